use std::path::Path;

use crate::commands::{CmdMessage, CmdResult};
use crate::config::BiblioConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    SetApiUrl(String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = BiblioConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll | ConfigAction::ShowKey(_) => {}
        ConfigAction::SetApiUrl(url) => {
            config.set_api_url(&url);
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!(
                "api-url set to {}",
                config.api_url()
            )));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            ConfigAction::SetApiUrl("http://books.local/api/".into()),
        )
        .unwrap();

        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config.unwrap().api_url(), "http://books.local/api");
    }
}
