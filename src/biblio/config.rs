use crate::error::{BiblioError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Configuration for biblio, stored next to the session record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BiblioConfig {
    /// Base URL of the catalog server's REST surface.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for BiblioConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl BiblioConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BiblioError::Io)?;
        let config: BiblioConfig =
            serde_json::from_str(&content).map_err(BiblioError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BiblioError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BiblioError::Serialization)?;
        fs::write(config_path, content).map_err(BiblioError::Io)?;
        Ok(())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Set the server base URL (trailing slashes are dropped).
    pub fn set_api_url(&mut self, url: &str) {
        self.api_url = url.trim_end_matches('/').to_string();
    }
}
