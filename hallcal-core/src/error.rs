//! Error types for hallcal.

use thiserror::Error;

/// Errors that can occur outside the pure calendar functions.
///
/// Schedule expansion and day indexing never fail; these errors come from
/// configuration, the local record store and ICS export.
#[derive(Error, Debug)]
pub enum HallError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: &'static str, id: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Unknown timezone '{0}'")]
    Timezone(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for hallcal operations.
pub type HallResult<T> = Result<T, HallError>;
