//! # Durable Session Storage
//!
//! One persisted record — `{username, token}` — kept under a fixed filename,
//! read synchronously at startup, written on successful login, erased on
//! logout. The [`SessionStore`] trait abstracts the backing so the command
//! layer can be tested without touching the filesystem.
//!
//! ## Implementations
//!
//! - [`fs::FileSessionStore`]: production storage under the app data dir
//!   (`session.json`)
//! - [`memory::InMemorySessionStore`]: in-memory storage for tests
//!
//! A corrupt or unreadable session file restores as "no session" rather than
//! failing startup; the user simply has to log in again.

use crate::error::Result;
use crate::model::Session;

pub mod fs;
pub mod memory;

pub trait SessionStore {
    /// The persisted session, if a valid one exists.
    fn load(&self) -> Result<Option<Session>>;

    /// Persist a session (overwrites any previous one).
    fn save(&mut self, session: &Session) -> Result<()>;

    /// Erase the persisted session. Must be idempotent.
    fn clear(&mut self) -> Result<()>;
}
