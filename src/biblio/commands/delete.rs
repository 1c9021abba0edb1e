use crate::catalog::CatalogStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BiblioError, Result};
use crate::remote::CatalogBackend;
use crate::session::SessionState;

pub fn run<B: CatalogBackend>(
    catalog: &mut CatalogStore,
    backend: &mut B,
    session: &SessionState,
    id: &str,
) -> Result<CmdResult> {
    if !session.is_admin() {
        return Err(BiblioError::Api(
            "Deleting books requires an administrator session".to_string(),
        ));
    }
    let title = catalog
        .find(id)
        .map(|b| b.title.clone())
        .ok_or_else(|| BiblioError::BookNotFound(id.to_string()))?;

    catalog.remove(backend, session, id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Deleted: {}", title)));
    Ok(result)
}
