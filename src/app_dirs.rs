use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the session record and exports live
    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("mindwell")
        } else {
            ProjectDirs::from("", "", "mindwell")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("mindwell_data"))
        }
    }

    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", "mindwell") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("mindwell_config.json")
        }
    }

    /// Log file inside a data directory
    pub fn log_path(data_dir: &Path) -> PathBuf {
        data_dir.join("mindwell.log")
    }
}
