use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use todo_core::DEFAULT_BASE_URL;

pub const BASE_URL_ENV: &str = "TODO_API_URL";

/// Directory holding `config.toml` and `prefs.toml`.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = dirs::config_dir() {
        return Ok(dir.join("todo-cli"));
    }
    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".todo-cli"));
    }
    anyhow::bail!("could not determine a config directory: no HOME or XDG config dir found")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Flag, then environment, then file.
    pub fn resolve_base_url(&self, flag: Option<&str>) -> String {
        self.resolve_with_env(flag, std::env::var(BASE_URL_ENV).ok())
    }

    fn resolve_with_env(&self, flag: Option<&str>, env: Option<String>) -> String {
        flag.map(str::to_string)
            .or(env.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| self.base_url.clone())
    }
}
