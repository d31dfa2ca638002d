use thiserror::Error;

/// Error type covering expense entry, storage, and report generation.
#[derive(Debug, Error)]
pub enum FinanceError {
    /// Month token or number that does not name a calendar month.
    #[error("invalid month: {0}")]
    InvalidMonth(String),
    /// Input that is not of the expected kind (e.g. a non-integer year).
    #[error("invalid input type: {0}")]
    InvalidType(String),
    /// Form-level validation failure; user-correctable.
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, FinanceError>;
