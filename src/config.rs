use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app_dirs::AppDirs;
use crate::input::DEFAULT_RELEASE_TIMEOUT;
use crate::number_pool::PoolMode;
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub show_exact_seconds: bool,
    pub show_exact_frames: bool,
    pub visual_aid_circle: bool,
    pub play_audio_aid: bool,
    pub numbers_per_game: u8,
    pub number_pool: PoolMode,
    /// Without key release events, a key counts as released after this long
    /// without its first auto-repeat
    pub release_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            show_exact_seconds: settings.show_exact_seconds,
            show_exact_frames: settings.show_exact_frames,
            visual_aid_circle: settings.visual_aid_circle,
            play_audio_aid: settings.play_audio_aid,
            numbers_per_game: settings.numbers_per_game,
            number_pool: settings.number_pool,
            release_timeout_ms: DEFAULT_RELEASE_TIMEOUT.as_millis() as u64,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
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

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like [`ConfigStore::load`] but reports why the file could not be used
    pub fn try_load(&self) -> Result<Option<Config>, ConfigError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| ConfigError::Json {
                path: self.path.clone(),
                source,
            })
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Config::default(),
            Err(err) => {
                tracing::warn!(%err, "using default config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(|source| ConfigError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            show_exact_seconds: true,
            show_exact_frames: true,
            visual_aid_circle: true,
            play_audio_aid: true,
            numbers_per_game: 4,
            number_pool: PoolMode::FamousConstants,
            release_timeout_ms: 250,
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_matches!(store.try_load(), Ok(None));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "number_pool": "cube-roots", "numbers_per_game": 2 }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.number_pool, PoolMode::CubeRoots);
        assert_eq!(cfg.numbers_per_game, 2);
        assert!(!cfg.visual_aid_circle);
        assert_eq!(cfg.release_timeout_ms, 800);
    }

    #[test]
    fn malformed_file_is_reported_and_defaulted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_matches!(store.try_load(), Err(ConfigError::Json { .. }));
        assert_eq!(store.load(), Config::default());
    }
}
