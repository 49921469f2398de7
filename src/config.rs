//! Application configuration
//!
//! A JSON file; every field is optional and a missing file means defaults.

use estateflow_store::IN_MEMORY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::clipboard::CLIPBOARD_TTL_SECS;
use crate::optimistic::FailurePolicy;

pub const DEFAULT_DB_FILE: &str = "estateflow.db";
pub const DEFAULT_LOG_FILE_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_LOG_FILES: usize = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {error}")]
    Io { path: PathBuf, error: std::io::Error },
    #[error("invalid config {path}: {error}")]
    Parse { path: PathBuf, error: serde_json::Error },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// File name inside `data_dir`, or `:memory:`
    pub db_file: String,
    /// Defaults to `<data_dir>/logs`
    pub log_dir: Option<PathBuf>,
    pub log_to_file: bool,
    pub log_file_bytes: u64,
    pub log_files: usize,
    pub clipboard_ttl_secs: i64,
    pub failure_policy: FailurePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            db_file: DEFAULT_DB_FILE.to_string(),
            log_dir: None,
            log_to_file: true,
            log_file_bytes: DEFAULT_LOG_FILE_BYTES,
            log_files: DEFAULT_LOG_FILES,
            clipboard_ttl_secs: CLIPBOARD_TTL_SECS,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl AppConfig {
    /// Read `path`, falling back to defaults when it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(error) => return Err(ConfigError::Io { path: path.to_path_buf(), error }),
        };
        serde_json::from_str(&content).map_err(|error| ConfigError::Parse { path: path.to_path_buf(), error })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |error| ConfigError::Io { path: path.to_path_buf(), error };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|error| ConfigError::Parse { path: path.to_path_buf(), error })?;
        std::fs::write(path, json).map_err(io_err)
    }

    pub fn db_path(&self) -> PathBuf {
        if self.db_file == IN_MEMORY {
            return PathBuf::from(IN_MEMORY);
        }
        self.data_dir.join(&self.db_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| self.data_dir.join("logs"))
    }

    pub fn clipboard_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.clipboard_ttl_secs)
    }
}
