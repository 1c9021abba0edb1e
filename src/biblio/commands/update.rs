use crate::catalog::CatalogStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BiblioError, Result};
use crate::model::BookDraft;
use crate::remote::CatalogBackend;
use crate::session::SessionState;

/// The fields a caller may change. Anything left `None` keeps the value the
/// server last confirmed; the full draft is sent either way.
#[derive(Debug, Default, Clone)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub available: Option<bool>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.isbn.is_none()
            && self.available.is_none()
    }
}

pub fn run<B: CatalogBackend>(
    catalog: &mut CatalogStore,
    backend: &mut B,
    session: &SessionState,
    id: &str,
    patch: BookPatch,
) -> Result<CmdResult> {
    if !session.is_admin() {
        return Err(BiblioError::Api(
            "Editing books requires an administrator session".to_string(),
        ));
    }
    if patch.is_empty() {
        return Err(BiblioError::Api("Nothing to update".to_string()));
    }
    let current = catalog
        .find(id)
        .ok_or_else(|| BiblioError::BookNotFound(id.to_string()))?;

    let draft = BookDraft {
        title: patch.title.unwrap_or_else(|| current.title.clone()),
        author: patch.author.unwrap_or_else(|| current.author.clone()),
        isbn: patch.isbn.unwrap_or_else(|| current.isbn.clone()),
        available: patch.available.unwrap_or(current.available),
    };
    if draft.title.is_empty() {
        return Err(BiblioError::Api("Title cannot be empty".to_string()));
    }

    let updated = catalog.update(backend, session, id, &draft)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Updated: {}", updated.title)));
    Ok(result.with_affected_books(vec![updated]))
}
