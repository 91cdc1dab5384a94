use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::chat::ChatTimings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub reply_delay_ms: u64,
    pub crisis_delay_ms: u64,
    pub tick_rate_ms: u64,
    /// Log out a session that expires while the app is open
    pub recheck_expiry: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1500,
            crisis_delay_ms: 2000,
            tick_rate_ms: 100,
            recheck_expiry: true,
        }
    }
}

/// Delays beyond `i64::MAX` milliseconds are treated as "never"
fn clamp_millis(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}

impl Config {
    pub fn chat_timings(&self) -> ChatTimings {
        ChatTimings {
            reply_delay_ms: clamp_millis(self.reply_delay_ms),
            crisis_delay_ms: clamp_millis(self.crisis_delay_ms),
        }
    }

    /// Redraw interval; a zero rate from the config file would spin the loop
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
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
    #[allow(clippy::new_without_default)]
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
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => warn!(error = %e, path = %self.path.display(), "ignoring malformed config"),
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
