use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use todo_core::PreferenceStore;
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Prefs {
    dark_mode: Option<bool>,
}

/// Dark-mode flag stored as `dark_mode = <bool>` in `prefs.toml`.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("prefs.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    /// Unreadable or malformed files count as "nothing stored".
    fn load_dark_mode(&self) -> Option<bool> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<Prefs>(&content) {
            Ok(prefs) => prefs.dark_mode,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "ignoring malformed prefs");
                None
            }
        }
    }

    fn save_dark_mode(&mut self, enabled: bool) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let prefs = Prefs {
            dark_mode: Some(enabled),
        };
        let content = toml::to_string(&prefs).map_err(io::Error::other)?;
        std::fs::write(&self.path, content)
    }
}
