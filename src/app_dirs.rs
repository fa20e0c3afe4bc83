use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "holdfast")
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("holdfast_config.json"))
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("holdfast")
                .join("holdfast.log")
        } else {
            ProjectDirs::from("", "", "holdfast")
                .map(|pd| pd.data_local_dir().join("holdfast.log"))
                .unwrap_or_else(|| PathBuf::from("holdfast.log"))
        }
    }
}
