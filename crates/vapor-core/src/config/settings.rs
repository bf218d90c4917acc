use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::cache::CACHE_FILE_NAME;
use crate::error::Result;

const APP_DIR: &str = "vapor";
const CONFIG_FILE_NAME: &str = "config.toml";

/// User settings.
///
/// ```toml
/// steam_api_key = "..."
/// user_id = "gabelogannewell"
/// cache_path = "/tmp/vapor-cache.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub steam_api_key: Option<String>,
    pub user_id: Option<String>,
    pub cache_path: Option<PathBuf>,
}

impl Config {
    /// Default config location, e.g. `~/.config/vapor/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::Error::ConfigParseError(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Where the rating cache lives: the configured path, else the user cache dir.
    pub fn resolved_cache_path(&self) -> PathBuf {
        if let Some(path) = &self.cache_path {
            return path.clone();
        }
        dirs::cache_dir()
            .map(|dir| dir.join(APP_DIR).join(CACHE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CACHE_FILE_NAME))
    }
}
