use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::SessionState;
use crate::store::SessionStore;

/// Authenticated → Anonymous, unconditionally. Safe to repeat.
pub fn run<S: SessionStore>(store: &mut S) -> Result<CmdResult> {
    store.clear()?;
    let mut result = CmdResult::default().with_session(SessionState::Anonymous);
    result.add_message(CmdMessage::success("Logged out."));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Session;
    use crate::store::memory::InMemorySessionStore;

    #[test]
    fn clears_the_persisted_session() {
        let mut store = InMemorySessionStore::with_session(Session {
            username: "alice".into(),
            token: "a.b.c".into(),
        });
        let result = run(&mut store).unwrap();
        assert_eq!(result.session, Some(SessionState::Anonymous));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn logging_out_twice_is_the_same_as_once() {
        let mut store = InMemorySessionStore::with_session(Session {
            username: "alice".into(),
            token: "a.b.c".into(),
        });
        let first = run(&mut store).unwrap();
        let second = run(&mut store).unwrap();
        assert_eq!(first.session, second.session);
        assert_eq!(store.load().unwrap(), None);
    }
}
