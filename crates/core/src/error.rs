//! Error types for the dayaxis system.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the dayaxis system.
///
/// Only `Config` and `Json` ever abort a run. `InvalidDate` and
/// `IncompleteBar` are reported per row and counted by the ingestion
/// pre-pass, which then carries on without the offending data.
#[derive(Error, Debug)]
pub enum Error {
    /// No decoder could read the date field.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Some but not all of open/high/low/close were present.
    #[error("Incomplete bar: {0}")]
    IncompleteBar(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid date error.
    pub fn invalid_date(raw: impl Into<String>) -> Self {
        Error::InvalidDate(raw.into())
    }

    /// Create an incomplete bar error.
    pub fn incomplete_bar(msg: impl Into<String>) -> Self {
        Error::IncompleteBar(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
