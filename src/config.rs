//! Application Configuration
//! Optional JSON settings read from the working directory at start-up.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "attendance_view.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// User settings. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Attendance export to load.
    pub data_path: PathBuf,
    /// Module selected when the window opens.
    pub default_module: String,
    pub window_size: [f32; 2],
    /// Pixel size of exported PNG charts.
    pub export_size: [u32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("attendance_anonymised-1.csv"),
            default_module: "Algorithms".to_string(),
            window_size: [1100.0, 1300.0],
            export_size: [1000, 1200],
        }
    }
}

impl AppConfig {
    /// Load settings from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No {} found, using default settings", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded settings from {}", path.display());
        Ok(config)
    }
}
