use std::collections::HashMap;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;
use uuid::Uuid;

use super::CatalogBackend;
use crate::error::{BiblioError, Result};
use crate::model::{Book, BookDraft, Role};
use crate::session::SessionState;
use crate::token;

/// In-memory backend implementing the server's contract for tests.
///
/// It mirrors the rules the real server enforces — credentials checked at
/// login, admin role required for create/update/delete, availability checked
/// at borrow, borrower identity checked at return — and keeps enough
/// bookkeeping (`last_bearer`, `mutation_calls`) for tests to assert what
/// actually went over the wire.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    users: HashMap<String, (String, Role)>,
    books: Vec<Book>,
    /// Bearer token seen on the most recent authenticated call.
    last_bearer: Option<String>,
    /// How many create/update/delete requests reached this backend.
    mutation_calls: usize,
}

/// Build an unsigned three-segment token the client can decode.
fn issue_token(username: &str, role: Role) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({ "sub": username, "role": role.as_claim() }).to_string(),
    );
    format!("{}.{}.unsigned", header, payload)
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, username: &str, password: &str, role: Role) -> Self {
        self.users
            .insert(username.to_string(), (password.to_string(), role));
        self
    }

    pub fn with_books(mut self, books: Vec<Book>) -> Self {
        self.books = books;
        self
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn last_bearer(&self) -> Option<&str> {
        self.last_bearer.as_deref()
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls
    }

    /// Identify the caller from its bearer token, as the server would.
    fn authenticate(&mut self, session: &SessionState) -> Result<(String, Option<Role>)> {
        let token = session
            .token()
            .ok_or_else(|| BiblioError::Server("401 Unauthorized".to_string()))?;
        self.last_bearer = Some(token.to_string());
        let claims = token::decode_claims(token)
            .ok_or_else(|| BiblioError::Server("401 Unauthorized: bad token".to_string()))?;
        let username = claims
            .sub
            .ok_or_else(|| BiblioError::Server("401 Unauthorized: bad token".to_string()))?;
        Ok((username, claims.role.as_deref().and_then(Role::from_claim)))
    }

    fn authenticate_admin(&mut self, session: &SessionState) -> Result<String> {
        let (username, role) = self.authenticate(session)?;
        if role != Some(Role::Admin) {
            return Err(BiblioError::Server("403 Forbidden".to_string()));
        }
        Ok(username)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Book> {
        self.books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| BiblioError::BookNotFound(id.to_string()))
    }
}

impl CatalogBackend for InMemoryBackend {
    fn login(&mut self, username: &str, password: &str) -> Result<String> {
        match self.users.get(username) {
            Some((stored, role)) if stored == password => Ok(issue_token(username, *role)),
            _ => Err(BiblioError::Server("400 Bad Request: Invalid credentials".to_string())),
        }
    }

    fn register(&mut self, username: &str, password: &str, role: Role) -> Result<()> {
        if self.users.contains_key(username) {
            return Err(BiblioError::Server(
                "400 Bad Request: Username already exists".to_string(),
            ));
        }
        self.users
            .insert(username.to_string(), (password.to_string(), role));
        Ok(())
    }

    fn list_books(&self, _session: &SessionState) -> Result<Vec<Book>> {
        Ok(self.books.clone())
    }

    fn list_available(&self, _session: &SessionState) -> Result<Vec<Book>> {
        Ok(self.books.iter().filter(|b| b.available).cloned().collect())
    }

    fn search_books(&self, _session: &SessionState, query: &str) -> Result<Vec<Book>> {
        let needle = query.to_lowercase();
        Ok(self
            .books
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.author.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    fn create_book(&mut self, session: &SessionState, draft: &BookDraft) -> Result<Book> {
        self.mutation_calls += 1;
        self.authenticate_admin(session)?;
        let book = Book {
            id: Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            author: draft.author.clone(),
            isbn: draft.isbn.clone(),
            available: draft.available,
            borrowed_by: None,
        };
        self.books.push(book.clone());
        Ok(book)
    }

    fn update_book(&mut self, session: &SessionState, id: &str, draft: &BookDraft) -> Result<Book> {
        self.mutation_calls += 1;
        self.authenticate_admin(session)?;
        let book = self.find_mut(id)?;
        book.title = draft.title.clone();
        book.author = draft.author.clone();
        book.isbn = draft.isbn.clone();
        book.available = draft.available;
        if book.available {
            book.borrowed_by = None;
        }
        Ok(book.clone())
    }

    fn delete_book(&mut self, session: &SessionState, id: &str) -> Result<()> {
        self.mutation_calls += 1;
        self.authenticate_admin(session)?;
        if !self.books.iter().any(|b| b.id == id) {
            return Err(BiblioError::BookNotFound(id.to_string()));
        }
        self.books.retain(|b| b.id != id);
        Ok(())
    }

    fn borrow_book(&mut self, session: &SessionState, id: &str) -> Result<Book> {
        let (username, _) = self.authenticate(session)?;
        let book = self.find_mut(id)?;
        if !book.available {
            return Err(BiblioError::Server(
                "400 Bad Request: Book is not available".to_string(),
            ));
        }
        book.available = false;
        book.borrowed_by = Some(username);
        Ok(book.clone())
    }

    fn return_book(&mut self, session: &SessionState, id: &str) -> Result<Book> {
        let (username, _) = self.authenticate(session)?;
        let book = self.find_mut(id)?;
        if book.borrowed_by.as_deref() != Some(username.as_str()) {
            return Err(BiblioError::Server(
                "400 Bad Request: Book is not borrowed by this user".to_string(),
            ));
        }
        book.available = true;
        book.borrowed_by = None;
        Ok(book.clone())
    }
}
