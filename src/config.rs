use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::runtime::DEFAULT_TICK_RATE_MS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Frame interval for the event loop
    pub tick_rate_ms: u64,
    /// Leaderboard file; the platform data dir when unset
    pub scores_path: Option<PathBuf>,
    /// Default `tracing` filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            scores_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn scores_path(&self) -> PathBuf {
        self.scores_path
            .clone()
            .unwrap_or_else(AppDirs::scores_path)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
