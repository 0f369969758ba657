//! Error types for the fallible outer layers (config, preferences, browser glue).
//!
//! The page model itself never fails: a missing element just means the
//! feature stays dormant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config line {line}: {message}")]
    Config { line: usize, message: String },
    #[error("preference store: {0}")]
    Preference(String),
    #[cfg(feature = "web")]
    #[error("browser: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
