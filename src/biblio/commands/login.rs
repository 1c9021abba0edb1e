use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Role, Session};
use crate::remote::CatalogBackend;
use crate::session::SessionState;
use crate::store::SessionStore;

/// Anonymous → Authenticated. On rejection the error propagates and the
/// caller's state stays Anonymous; nothing is persisted.
pub fn run<B: CatalogBackend, S: SessionStore>(
    backend: &mut B,
    store: &mut S,
    username: &str,
    password: &str,
) -> Result<CmdResult> {
    let token = backend.login(username, password)?;
    let session = Session {
        username: username.to_string(),
        token,
    };
    store.save(&session)?;
    let state = SessionState::from_session(session);

    let mut result = CmdResult::default();
    let greeting = match state.role() {
        Some(Role::Admin) => format!("Logged in as {} (administrator)", username),
        _ => format!("Logged in as {}", username),
    };
    result.add_message(CmdMessage::success(greeting));
    Ok(result.with_session(state))
}
