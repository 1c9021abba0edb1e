use super::SessionStore;
use crate::error::{BiblioError, Result};
use crate::model::Session;
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILENAME: &str = "session.json";

pub struct FileSessionStore {
    root: PathBuf,
}

impl FileSessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(BiblioError::Io)?;
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(BiblioError::Io)?;
        // A corrupt record restores as no session; logging in rewrites it.
        Ok(serde_json::from_str(&content).ok())
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(session).map_err(BiblioError::Serialization)?;
        fs::write(self.session_path(), content).map_err(BiblioError::Io)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BiblioError::Io(e)),
        }
    }
}
