//! Start-up errors. Any of these stops the charts from being shown.

use crate::config::ConfigError;
use crate::data::{LoaderError, ProcessorError};
use crate::view::ViewError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Load(#[from] LoaderError),
    #[error("Invalid attendance data: {0}")]
    Normalize(#[from] ProcessorError),
    #[error("Failed to prepare the initial view: {0}")]
    View(#[from] ViewError),
}
