use crate::catalog::CatalogStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::remote::CatalogBackend;
use crate::session::SessionState;

pub fn run<B: CatalogBackend>(
    catalog: &mut CatalogStore,
    backend: &B,
    session: &SessionState,
    query: &str,
) -> Result<CmdResult> {
    catalog.search(backend, session, query)?;
    let mut result = CmdResult::default().with_listed_books(catalog.books().to_vec());
    if result.listed_books.is_empty() && !query.trim().is_empty() {
        result.add_message(CmdMessage::info(format!("No books match \"{}\".", query.trim())));
    }
    Ok(result)
}
