use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

use super::CatalogBackend;
use crate::error::{BiblioError, Result};
use crate::model::{Book, BookDraft, Role};
use crate::session::SessionState;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Error payloads the server sends with non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// The production backend: one HTTP request per operation against a fixed
/// base URL, bearer token injected from the session passed per call.
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder, session: &SessionState) -> RequestBuilder {
        match session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Turn a non-2xx response into an opaque error, surfacing the server's
    /// `{"error": ...}` body when it has one.
    fn expect_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|e| e.error.or(e.message));
        match detail {
            Some(detail) => Err(BiblioError::Server(format!("{}: {}", status, detail))),
            None => Err(BiblioError::Server(status.to_string())),
        }
    }

    fn fetch_books(&self, request: RequestBuilder) -> Result<Vec<Book>> {
        let response = Self::expect_success(request.send()?)?;
        Ok(response.json()?)
    }

    fn fetch_book(&self, request: RequestBuilder) -> Result<Book> {
        let response = Self::expect_success(request.send()?)?;
        Ok(response.json()?)
    }
}

impl CatalogBackend for HttpBackend {
    fn login(&mut self, username: &str, password: &str) -> Result<String> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()?;
        let response = Self::expect_success(response)?;
        let login: LoginResponse = response.json()?;
        Ok(login.token)
    }

    fn register(&mut self, username: &str, password: &str, role: Role) -> Result<()> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&json!({
                "username": username,
                "password": password,
                "role": role.as_claim(),
            }))
            .send()?;
        Self::expect_success(response)?;
        Ok(())
    }

    fn list_books(&self, session: &SessionState) -> Result<Vec<Book>> {
        let request = self.authorize(self.http.get(self.url("/books")), session);
        self.fetch_books(request)
    }

    fn list_available(&self, session: &SessionState) -> Result<Vec<Book>> {
        let request = self.authorize(self.http.get(self.url("/books/available")), session);
        self.fetch_books(request)
    }

    fn search_books(&self, session: &SessionState, query: &str) -> Result<Vec<Book>> {
        let request = self
            .authorize(self.http.get(self.url("/books/search")), session)
            .query(&[("query", query)]);
        self.fetch_books(request)
    }

    fn create_book(&mut self, session: &SessionState, draft: &BookDraft) -> Result<Book> {
        let request = self
            .authorize(self.http.post(self.url("/books")), session)
            .json(draft);
        self.fetch_book(request)
    }

    fn update_book(&mut self, session: &SessionState, id: &str, draft: &BookDraft) -> Result<Book> {
        let request = self
            .authorize(self.http.put(self.url(&format!("/books/{}", id))), session)
            .json(draft);
        self.fetch_book(request)
    }

    fn delete_book(&mut self, session: &SessionState, id: &str) -> Result<()> {
        let request = self.authorize(
            self.http.delete(self.url(&format!("/books/{}", id))),
            session,
        );
        Self::expect_success(request.send()?)?;
        Ok(())
    }

    fn borrow_book(&mut self, session: &SessionState, id: &str) -> Result<Book> {
        let request = self.authorize(
            self.http.put(self.url(&format!("/books/{}/borrow", id))),
            session,
        );
        self.fetch_book(request)
    }

    fn return_book(&mut self, session: &SessionState, id: &str) -> Result<Book> {
        let request = self.authorize(
            self.http.put(self.url(&format!("/books/{}/return", id))),
            session,
        );
        self.fetch_book(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let backend = HttpBackend::new("http://localhost:8080/api/");
        assert_eq!(backend.base_url(), "http://localhost:8080/api");
        assert_eq!(backend.url("/books"), "http://localhost:8080/api/books");
    }
}
