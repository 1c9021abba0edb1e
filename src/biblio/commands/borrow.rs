//! Borrow and return.
//!
//! The gates here mirror what the web UI hides: borrow needs a logged-in
//! session and an available book, return is offered only to the borrower.
//! They run before any request is issued; the server enforces the same rules
//! again on its side.

use crate::catalog::CatalogStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BiblioError, Result};
use crate::remote::CatalogBackend;
use crate::session::SessionState;

pub fn borrow<B: CatalogBackend>(
    catalog: &mut CatalogStore,
    backend: &mut B,
    session: &SessionState,
    id: &str,
) -> Result<CmdResult> {
    if !session.is_authenticated() {
        return Err(BiblioError::Api(
            "You must be logged in to borrow a book".to_string(),
        ));
    }
    let known = catalog
        .find(id)
        .ok_or_else(|| BiblioError::BookNotFound(id.to_string()))?;
    if !known.available {
        return Err(BiblioError::Api(format!(
            "\"{}\" is already borrowed",
            known.title
        )));
    }

    let updated = catalog.borrow(backend, session, id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Borrowed: {}", updated.title)));
    Ok(result.with_affected_books(vec![updated]))
}

pub fn give_back<B: CatalogBackend>(
    catalog: &mut CatalogStore,
    backend: &mut B,
    session: &SessionState,
    id: &str,
) -> Result<CmdResult> {
    let username = session.username().ok_or_else(|| {
        BiblioError::Api("You must be logged in to return a book".to_string())
    })?;
    let known = catalog
        .find(id)
        .ok_or_else(|| BiblioError::BookNotFound(id.to_string()))?;
    if known.borrowed_by.as_deref() != Some(username) {
        return Err(BiblioError::Api(format!(
            "\"{}\" is not borrowed by you",
            known.title
        )));
    }

    let updated = catalog.give_back(backend, session, id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Returned: {}", updated.title)));
    Ok(result.with_affected_books(vec![updated]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, Role, Session};
    use crate::remote::memory::InMemoryBackend;

    fn book(id: &str, title: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: "Author".to_string(),
            isbn: format!("isbn-{}", id),
            available: true,
            borrowed_by: None,
        }
    }

    fn logged_in(backend: &mut InMemoryBackend, username: &str) -> SessionState {
        let token = backend.login(username, "pw").unwrap();
        SessionState::from_session(Session {
            username: username.to_string(),
            token,
        })
    }

    fn fetched(backend: &InMemoryBackend, session: &SessionState) -> CatalogStore {
        let mut catalog = CatalogStore::new();
        catalog.fetch_all(backend, session).unwrap();
        catalog
    }

    #[test]
    fn borrow_carries_the_session_bearer_token() {
        let mut backend = InMemoryBackend::new()
            .with_user("alice", "pw", Role::Member)
            .with_books(vec![book("42", "Dune")]);
        let session = logged_in(&mut backend, "alice");
        let mut catalog = fetched(&backend, &session);

        borrow(&mut catalog, &mut backend, &session, "42").unwrap();
        assert_eq!(backend.last_bearer(), session.token());
    }

    #[test]
    fn anonymous_borrow_is_refused_before_any_request() {
        let mut backend = InMemoryBackend::new().with_books(vec![book("42", "Dune")]);
        let mut catalog = fetched(&backend, &SessionState::Anonymous);

        let result = borrow(&mut catalog, &mut backend, &SessionState::Anonymous, "42");
        assert!(result.is_err());
        assert_eq!(backend.last_bearer(), None);
        assert!(catalog.books()[0].available);
    }

    #[test]
    fn borrowing_an_unavailable_book_is_refused_locally() {
        let mut backend = InMemoryBackend::new()
            .with_user("alice", "pw", Role::Member)
            .with_user("bob", "pw", Role::Member)
            .with_books(vec![book("42", "Dune")]);
        let alice = logged_in(&mut backend, "alice");
        let bob = logged_in(&mut backend, "bob");

        let mut catalog = fetched(&backend, &alice);
        borrow(&mut catalog, &mut backend, &alice, "42").unwrap();

        assert!(borrow(&mut catalog, &mut backend, &bob, "42").is_err());
    }

    #[test]
    fn only_the_borrower_may_return() {
        let mut backend = InMemoryBackend::new()
            .with_user("alice", "pw", Role::Member)
            .with_user("bob", "pw", Role::Member)
            .with_books(vec![book("42", "Dune")]);
        let alice = logged_in(&mut backend, "alice");
        let bob = logged_in(&mut backend, "bob");

        let mut catalog = fetched(&backend, &alice);
        borrow(&mut catalog, &mut backend, &alice, "42").unwrap();

        assert!(give_back(&mut catalog, &mut backend, &bob, "42").is_err());

        let result = give_back(&mut catalog, &mut backend, &alice, "42").unwrap();
        assert!(result.affected_books[0].available);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut backend = InMemoryBackend::new()
            .with_user("alice", "pw", Role::Member)
            .with_books(vec![book("1", "A")]);
        let session = logged_in(&mut backend, "alice");
        let mut catalog = fetched(&backend, &session);

        assert!(matches!(
            borrow(&mut catalog, &mut backend, &session, "404"),
            Err(BiblioError::BookNotFound(_))
        ));
    }
}
