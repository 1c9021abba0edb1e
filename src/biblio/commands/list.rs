use crate::catalog::CatalogStore;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::remote::CatalogBackend;
use crate::session::SessionState;

pub fn run<B: CatalogBackend>(
    catalog: &mut CatalogStore,
    backend: &B,
    session: &SessionState,
    available_only: bool,
) -> Result<CmdResult> {
    if available_only {
        catalog.fetch_available(backend, session)?;
    } else {
        catalog.fetch_all(backend, session)?;
    }
    Ok(CmdResult::default().with_listed_books(catalog.books().to_vec()))
}
