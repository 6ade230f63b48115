use thiserror::Error;

use crate::domain::period::PeriodError;

/// Error type shared by the stores, the configuration layer, and the alert tracker.
#[derive(Debug, Error)]
pub enum SpendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SpendError>;

impl From<PeriodError> for SpendError {
    fn from(err: PeriodError) -> Self {
        SpendError::InvalidInput(err.to_string())
    }
}
