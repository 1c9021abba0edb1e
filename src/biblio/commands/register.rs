use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Role;
use crate::remote::CatalogBackend;

/// Pure side-effecting call: no session transition either way.
pub fn run<B: CatalogBackend>(
    backend: &mut B,
    username: &str,
    password: &str,
    role: Role,
) -> Result<CmdResult> {
    backend.register(username, password, role)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Registered {}. You can now log in.",
        username
    )));
    Ok(result)
}
