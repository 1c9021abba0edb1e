use super::SessionStore;
use crate::error::Result;
use crate::model::Session;

/// In-memory session storage for tests. No persistence.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: Option<Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.session = None;
        Ok(())
    }
}
