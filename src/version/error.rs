use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No versions to rank")]
    EmptyInput,

    #[error("Model input is empty, no anchor character available")]
    InvalidInput,
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Firmware table not found in listing")]
    TableNotFound,

    #[error("Failed to load rows: {0}")]
    Rows(#[from] ConfigError),
}
