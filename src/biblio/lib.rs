//! # Biblio Architecture
//!
//! Biblio is a **UI-agnostic client library** for a library catalog server.
//! The CLI binary is a thin shell around it; everything from the API facade
//! inward returns plain Rust types and performs no terminal I/O.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, formats output, handles exit codes     │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the session context and the catalog view-state      │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One operation per module: login, borrow, add, ...        │
//! │  - Enforces the client-side gates (auth, admin, borrower)   │
//! │    BEFORE any network call is issued                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State + Transport (catalog.rs, session.rs, remote/, store/)│
//! │  - CatalogStore: books, loading flag, error, fetch tickets  │
//! │  - SessionState: Anonymous | Authenticated                  │
//! │  - CatalogBackend trait: HttpBackend / InMemoryBackend      │
//! │  - SessionStore trait: FileSessionStore / InMemorySession   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trust Model
//!
//! The bearer token's middle segment is decoded client-side to learn a role
//! claim, but its signature is never checked here. The decoded role gates
//! which commands biblio will even attempt; it is NOT a security boundary.
//! The server re-validates every authenticated request, so the worst a forged
//! claim can do is trigger a request the server rejects.
//!
//! ## State Reconciliation
//!
//! The catalog store mirrors remote state and mutates only on confirmed
//! server responses: fetches replace the whole list in server order, borrow /
//! return / update replace one record in place, create appends, delete
//! removes. List-replacing fetches carry a monotonic ticket so a stale
//! completion can never overwrite a newer one (see [`catalog`]).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: One module per user-facing operation
//! - [`catalog`]: Catalog view-state and reconciliation rules
//! - [`session`]: Session state machine (Anonymous / Authenticated)
//! - [`remote`]: The `CatalogBackend` trait plus HTTP and in-memory impls
//! - [`store`]: Durable session persistence
//! - [`token`]: Unverified role-claim extraction from bearer tokens
//! - [`model`]: Core data types (`Book`, `BookDraft`, `Session`, `Role`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod remote;
pub mod session;
pub mod store;
pub mod token;
