//! # Remote Catalog Backend
//!
//! Everything the client knows how to ask the server, as one trait. Each
//! operation is a single request/response: no retries, no client-side timeout
//! beyond the transport default, and failures surface as one opaque error.
//! The session context is passed explicitly per call — the backend never
//! reads ambient storage to find a token.
//!
//! ## Implementations
//!
//! - [`http::HttpBackend`]: production backend over the server's REST surface
//!   - `POST /auth/login`, `POST /auth/register`
//!   - `GET /books`, `GET /books/available`, `GET /books/search?query=`
//!   - `POST /books`, `PUT /books/{id}`, `DELETE /books/{id}`
//!   - `PUT /books/{id}/borrow`, `PUT /books/{id}/return`
//!
//! - [`memory::InMemoryBackend`]: in-memory stand-in for tests. It enforces
//!   the same rules the real server does (admin-only CRUD, availability
//!   checks, borrower-only return) and records the bearer tokens it sees, so
//!   the command layer can be exercised end to end without a network.

use crate::error::Result;
use crate::model::{Book, BookDraft, Role};
use crate::session::SessionState;

pub mod http;
pub mod memory;

pub trait CatalogBackend {
    /// Exchange credentials for a bearer token.
    fn login(&mut self, username: &str, password: &str) -> Result<String>;

    /// Create an account. No session is established.
    fn register(&mut self, username: &str, password: &str, role: Role) -> Result<()>;

    /// All books, in server order.
    fn list_books(&self, session: &SessionState) -> Result<Vec<Book>>;

    /// Only books currently available to borrow.
    fn list_available(&self, session: &SessionState) -> Result<Vec<Book>>;

    /// Books whose title or author matches the query.
    fn search_books(&self, session: &SessionState, query: &str) -> Result<Vec<Book>>;

    /// Create a book; the server assigns the id.
    fn create_book(&mut self, session: &SessionState, draft: &BookDraft) -> Result<Book>;

    /// Replace a book's fields.
    fn update_book(&mut self, session: &SessionState, id: &str, draft: &BookDraft) -> Result<Book>;

    /// Delete a book record.
    fn delete_book(&mut self, session: &SessionState, id: &str) -> Result<()>;

    /// Mark a book borrowed by the calling session.
    fn borrow_book(&mut self, session: &SessionState, id: &str) -> Result<Book>;

    /// Mark a borrowed book returned.
    fn return_book(&mut self, session: &SessionState, id: &str) -> Result<Book>;
}
