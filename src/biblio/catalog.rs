//! Catalog view-state.
//!
//! [`CatalogStore`] mirrors the server's book list and mutates only on
//! confirmed responses: fetches replace the whole list in server order,
//! borrow/return/update replace one record in place, create appends, remove
//! drops. Rejected calls record an error message and leave the list alone.
//!
//! All three list-replacing fetches (all books, available books, search)
//! share one loading contract: loading is set when the fetch begins and
//! cleared when its result lands. Each fetch also takes a monotonic
//! [`FetchTicket`]; a completion is applied only if its ticket is the latest
//! issued, so when two fetches overlap the stale one is discarded instead of
//! overwriting the newer result. The split-phase `begin_fetch` /
//! `complete_fetch` pair exists so callers driving their own I/O (and tests)
//! can interleave completions.

use crate::error::Result;
use crate::model::{Book, BookDraft};
use crate::remote::CatalogBackend;
use crate::session::SessionState;

/// Monotonic tag for one in-flight list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct CatalogStore {
    books: Vec<Book>,
    loading: bool,
    error: Option<String>,
    issued_seq: u64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a list-replacing fetch: sets loading, clears the last error, and
    /// issues the ticket the completion must present.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_seq += 1;
        self.loading = true;
        self.error = None;
        FetchTicket(self.issued_seq)
    }

    /// Land a fetch outcome. Returns whether it was applied; a stale ticket
    /// (a newer fetch has been issued since) changes nothing — not even the
    /// loading flag, which belongs to the newer fetch.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: std::result::Result<Vec<Book>, String>,
    ) -> bool {
        if ticket.0 != self.issued_seq {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(books) => self.books = books,
            Err(message) => self.error = Some(message),
        }
        true
    }

    fn run_fetch<F>(&mut self, fetch: F) -> Result<()>
    where
        F: FnOnce() -> Result<Vec<Book>>,
    {
        let ticket = self.begin_fetch();
        match fetch() {
            Ok(books) => {
                self.complete_fetch(ticket, Ok(books));
                Ok(())
            }
            Err(e) => {
                self.complete_fetch(ticket, Err(e.to_string()));
                Err(e)
            }
        }
    }

    /// Replace the list with every book the server knows, in server order.
    pub fn fetch_all<B: CatalogBackend>(
        &mut self,
        backend: &B,
        session: &SessionState,
    ) -> Result<()> {
        self.run_fetch(|| backend.list_books(session))
    }

    /// Replace the list with the books currently available to borrow.
    pub fn fetch_available<B: CatalogBackend>(
        &mut self,
        backend: &B,
        session: &SessionState,
    ) -> Result<()> {
        self.run_fetch(|| backend.list_available(session))
    }

    /// Replace the list with the search results. An empty or whitespace-only
    /// query is a plain fetch of everything.
    pub fn search<B: CatalogBackend>(
        &mut self,
        backend: &B,
        session: &SessionState,
        query: &str,
    ) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return self.fetch_all(backend, session);
        }
        self.run_fetch(|| backend.search_books(session, query))
    }

    /// Swap the matching record for the server-confirmed one. Unknown ids are
    /// a no-op: the record may have left the list since it was rendered.
    fn reconcile(&mut self, updated: &Book) {
        if let Some(slot) = self.books.iter_mut().find(|b| b.id == updated.id) {
            *slot = updated.clone();
        }
    }

    fn record_failure(&mut self, e: &crate::error::BiblioError) {
        self.error = Some(e.to_string());
    }

    pub fn borrow<B: CatalogBackend>(
        &mut self,
        backend: &mut B,
        session: &SessionState,
        id: &str,
    ) -> Result<Book> {
        match backend.borrow_book(session, id) {
            Ok(updated) => {
                self.reconcile(&updated);
                Ok(updated)
            }
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    pub fn give_back<B: CatalogBackend>(
        &mut self,
        backend: &mut B,
        session: &SessionState,
        id: &str,
    ) -> Result<Book> {
        match backend.return_book(session, id) {
            Ok(updated) => {
                self.reconcile(&updated);
                Ok(updated)
            }
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    /// Create a book and append the server's record to the end of the list.
    pub fn create<B: CatalogBackend>(
        &mut self,
        backend: &mut B,
        session: &SessionState,
        draft: &BookDraft,
    ) -> Result<Book> {
        match backend.create_book(session, draft) {
            Ok(created) => {
                self.books.push(created.clone());
                Ok(created)
            }
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    pub fn update<B: CatalogBackend>(
        &mut self,
        backend: &mut B,
        session: &SessionState,
        id: &str,
        draft: &BookDraft,
    ) -> Result<Book> {
        match backend.update_book(session, id, draft) {
            Ok(updated) => {
                self.reconcile(&updated);
                Ok(updated)
            }
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    pub fn remove<B: CatalogBackend>(
        &mut self,
        backend: &mut B,
        session: &SessionState,
        id: &str,
    ) -> Result<()> {
        match backend.delete_book(session, id) {
            Ok(()) => {
                self.books.retain(|b| b.id != id);
                Ok(())
            }
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }
}
