use crate::catalog::CatalogStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BiblioError, Result};
use crate::model::BookDraft;
use crate::remote::CatalogBackend;
use crate::session::SessionState;

/// Admin gate first: a session without the admin role never issues the
/// request. The derived role is unverified, so the server checks again.
pub fn run<B: CatalogBackend>(
    catalog: &mut CatalogStore,
    backend: &mut B,
    session: &SessionState,
    draft: BookDraft,
) -> Result<CmdResult> {
    if !session.is_admin() {
        return Err(BiblioError::Api(
            "Adding books requires an administrator session".to_string(),
        ));
    }
    if draft.title.is_empty() {
        return Err(BiblioError::Api("Title cannot be empty".to_string()));
    }

    let created = catalog.create(backend, session, &draft)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added: {} ({})",
        created.title, created.id
    )));
    Ok(result.with_affected_books(vec![created]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, Session};
    use crate::remote::memory::InMemoryBackend;

    fn logged_in(backend: &mut InMemoryBackend, username: &str) -> SessionState {
        let token = backend.login(username, "pw").unwrap();
        SessionState::from_session(Session {
            username: username.to_string(),
            token,
        })
    }

    #[test]
    fn admin_creates_and_catalog_appends() {
        let mut backend = InMemoryBackend::new().with_user("root", "pw", Role::Admin);
        let session = logged_in(&mut backend, "root");
        let mut catalog = CatalogStore::new();

        let result = run(
            &mut catalog,
            &mut backend,
            &session,
            BookDraft::new("Dune", "Frank Herbert", "isbn"),
        )
        .unwrap();
        assert_eq!(result.affected_books.len(), 1);
        assert_eq!(catalog.books().last().unwrap().title, "Dune");
    }

    #[test]
    fn member_never_triggers_the_network_call() {
        let mut backend = InMemoryBackend::new().with_user("bob", "pw", Role::Member);
        let session = logged_in(&mut backend, "bob");
        let mut catalog = CatalogStore::new();

        let result = run(
            &mut catalog,
            &mut backend,
            &session,
            BookDraft::new("T", "A", "i"),
        );
        assert!(result.is_err());
        assert_eq!(backend.mutation_calls(), 0);
    }

    #[test]
    fn session_without_decodable_role_is_refused() {
        let mut backend = InMemoryBackend::new();
        let session = SessionState::from_session(Session {
            username: "alice".into(),
            token: "malformed-token".into(),
        });
        let mut catalog = CatalogStore::new();

        let result = run(
            &mut catalog,
            &mut backend,
            &session,
            BookDraft::new("T", "A", "i"),
        );
        assert!(result.is_err());
        assert_eq!(backend.mutation_calls(), 0);
    }
}
