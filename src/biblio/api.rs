//! # API Facade
//!
//! The single entry point for every biblio operation, regardless of the UI
//! driving it. It owns the four moving parts — backend, durable session
//! store, the current [`SessionState`], and the [`CatalogStore`] — and wires
//! them into the command layer.
//!
//! The facade holds no business logic and performs no I/O of its own beyond
//! what the commands do. Its one stateful job is session replacement: when a
//! command reports a transition (login, logout), the facade swaps the whole
//! session value rather than mutating it.
//!
//! Generic over both seams:
//! - Production: `BiblioApi<HttpBackend, FileSessionStore>`
//! - Testing: `BiblioApi<InMemoryBackend, InMemorySessionStore>`

use crate::catalog::CatalogStore;
use crate::commands;
use crate::error::Result;
use crate::model::{BookDraft, Role};
use crate::remote::CatalogBackend;
use crate::session::SessionState;
use crate::store::SessionStore;

pub struct BiblioApi<B: CatalogBackend, S: SessionStore> {
    backend: B,
    session_store: S,
    session: SessionState,
    catalog: CatalogStore,
}

impl<B: CatalogBackend, S: SessionStore> BiblioApi<B, S> {
    /// Restore the session from durable storage and start with an empty
    /// catalog; the first list-touching operation fills it.
    pub fn new(backend: B, session_store: S) -> Result<Self> {
        let session = SessionState::restore(session_store.load()?);
        Ok(Self {
            backend,
            session_store,
            session,
            catalog: CatalogStore::new(),
        })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    fn adopt_session(&mut self, result: &CmdResult) {
        if let Some(state) = &result.session {
            self.session = state.clone();
        }
    }

    fn refresh(&mut self) -> Result<()> {
        self.catalog.fetch_all(&self.backend, &self.session)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<CmdResult> {
        let result = commands::login::run(
            &mut self.backend,
            &mut self.session_store,
            username,
            password,
        )?;
        self.adopt_session(&result);
        Ok(result)
    }

    pub fn logout(&mut self) -> Result<CmdResult> {
        let result = commands::logout::run(&mut self.session_store)?;
        self.adopt_session(&result);
        Ok(result)
    }

    pub fn register(&mut self, username: &str, password: &str, role: Role) -> Result<CmdResult> {
        commands::register::run(&mut self.backend, username, password, role)
    }

    pub fn list_books(&mut self, available_only: bool) -> Result<CmdResult> {
        commands::list::run(
            &mut self.catalog,
            &self.backend,
            &self.session,
            available_only,
        )
    }

    pub fn search_books(&mut self, query: &str) -> Result<CmdResult> {
        commands::search::run(&mut self.catalog, &self.backend, &self.session, query)
    }

    pub fn borrow_book(&mut self, id: &str) -> Result<CmdResult> {
        self.refresh()?;
        commands::borrow::borrow(&mut self.catalog, &mut self.backend, &self.session, id)
    }

    pub fn return_book(&mut self, id: &str) -> Result<CmdResult> {
        self.refresh()?;
        commands::borrow::give_back(&mut self.catalog, &mut self.backend, &self.session, id)
    }

    pub fn add_book(&mut self, draft: BookDraft) -> Result<CmdResult> {
        commands::create::run(&mut self.catalog, &mut self.backend, &self.session, draft)
    }

    pub fn update_book(&mut self, id: &str, patch: BookPatch) -> Result<CmdResult> {
        self.refresh()?;
        commands::update::run(&mut self.catalog, &mut self.backend, &self.session, id, patch)
    }

    pub fn delete_book(&mut self, id: &str) -> Result<CmdResult> {
        self.refresh()?;
        commands::delete::run(&mut self.catalog, &mut self.backend, &self.session, id)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::update::BookPatch;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Book;
    use crate::remote::memory::InMemoryBackend;
    use crate::store::memory::InMemorySessionStore;

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

    fn api_with(
        backend: InMemoryBackend,
    ) -> BiblioApi<InMemoryBackend, InMemorySessionStore> {
        BiblioApi::new(backend, InMemorySessionStore::new()).unwrap()
    }

    #[test]
    fn starts_anonymous_without_a_persisted_session() {
        let api = api_with(InMemoryBackend::new());
        assert!(!api.session().is_authenticated());
    }

    #[test]
    fn restores_a_persisted_session_at_startup() {
        let mut backend = InMemoryBackend::new().with_user("alice", "pw", Role::Member);
        let token = backend.login("alice", "pw").unwrap();
        let store = InMemorySessionStore::with_session(crate::model::Session {
            username: "alice".into(),
            token,
        });
        let api = BiblioApi::new(backend, store).unwrap();
        assert_eq!(api.session().username(), Some("alice"));
    }

    #[test]
    fn login_then_logout_replaces_the_session_state() {
        let backend = InMemoryBackend::new().with_user("alice", "pw", Role::Member);
        let mut api = api_with(backend);

        api.login("alice", "pw").unwrap();
        assert!(api.session().is_authenticated());

        api.logout().unwrap();
        assert_eq!(*api.session(), SessionState::Anonymous);
    }

    #[test]
    fn failed_login_leaves_the_session_anonymous() {
        let backend = InMemoryBackend::new().with_user("alice", "pw", Role::Member);
        let mut api = api_with(backend);
        assert!(api.login("alice", "nope").is_err());
        assert_eq!(*api.session(), SessionState::Anonymous);
    }

    #[test]
    fn borrow_flows_through_fetch_and_reconcile() {
        let backend = InMemoryBackend::new()
            .with_user("alice", "pw", Role::Member)
            .with_books(vec![book("42", "Dune"), book("7", "Emma")]);
        let mut api = api_with(backend);
        api.login("alice", "pw").unwrap();

        let result = api.borrow_book("42").unwrap();
        assert_eq!(result.affected_books[0].borrowed_by.as_deref(), Some("alice"));
        assert!(api.catalog().find("7").unwrap().available);
    }

    #[test]
    fn create_then_list_round_trips_the_new_book() {
        let backend = InMemoryBackend::new().with_user("root", "pw", Role::Admin);
        let mut api = api_with(backend);
        api.login("root", "pw").unwrap();

        let created = api
            .add_book(BookDraft::new("Dune", "Frank Herbert", "isbn"))
            .unwrap()
            .affected_books
            .remove(0);

        let listed = api.list_books(false).unwrap().listed_books;
        assert!(listed.iter().any(|b| b.id == created.id));
    }
}
