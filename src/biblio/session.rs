//! Session state machine.
//!
//! Two states: `Anonymous` (initial) and `Authenticated` (username + token +
//! derived role). The state is an explicitly passed value, constructed at
//! startup from durable storage and *replaced* — never mutated in place — on
//! login and logout. Role derivation happens once, at construction, via
//! [`crate::token::role_claim`]; a token whose claim cannot be decoded still
//! authenticates, it just carries no role.

use crate::model::{Role, Session};
use crate::token;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated { session: Session, role: Option<Role> },
}

impl SessionState {
    /// Build the authenticated state from a session record, deriving the role
    /// from the token. Decode failure is not an error: the session is valid,
    /// the role is simply absent.
    pub fn from_session(session: Session) -> Self {
        let role = token::role_claim(&session.token);
        SessionState::Authenticated { session, role }
    }

    /// Restore from what durable storage held at startup.
    pub fn restore(persisted: Option<Session>) -> Self {
        match persisted {
            Some(session) => Self::from_session(session),
            None => SessionState::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated { session, .. } => Some(session),
            SessionState::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.session().map(|s| s.username.as_str())
    }

    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::Authenticated { role, .. } => *role,
            SessionState::Anonymous => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn session_with_payload(username: &str, payload: &str) -> Session {
        Session {
            username: username.to_string(),
            token: format!("head.{}.sig", URL_SAFE_NO_PAD.encode(payload)),
        }
    }

    #[test]
    fn restores_anonymous_when_nothing_persisted() {
        assert_eq!(SessionState::restore(None), SessionState::Anonymous);
    }

    #[test]
    fn restores_authenticated_with_derived_role() {
        let session = session_with_payload("alice", r#"{"sub":"alice","role":"ADMIN"}"#);
        let state = SessionState::restore(Some(session));
        assert!(state.is_authenticated());
        assert!(state.is_admin());
        assert_eq!(state.username(), Some("alice"));
    }

    #[test]
    fn malformed_token_authenticates_without_role() {
        let session = Session {
            username: "bob".into(),
            token: "garbage".into(),
        };
        let state = SessionState::from_session(session);
        assert!(state.is_authenticated());
        assert_eq!(state.role(), None);
        assert!(!state.is_admin());
    }

    #[test]
    fn anonymous_exposes_nothing() {
        let state = SessionState::Anonymous;
        assert_eq!(state.username(), None);
        assert_eq!(state.token(), None);
        assert_eq!(state.role(), None);
    }
}
