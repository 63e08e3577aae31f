//! Error types for the BigBlueButton client.
//!
//! Only transport and configuration problems are errors. A response that
//! fails to parse or reports a non-`SUCCESS` return code is not an error;
//! it is [`ApiResponse::Absent`](crate::response::ApiResponse::Absent).

use thiserror::Error;

/// Client operation result type
pub type Result<T> = std::result::Result<T, BbbError>;

#[derive(Debug, Error)]
pub enum BbbError {
    /// Connection failures, timeouts and non-2xx statuses
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid timeout {value:?}: {reason}")]
    InvalidTimeout { value: String, reason: String },
}

impl BbbError {
    pub fn missing_var(name: &str) -> Self {
        Self::ConfigError(format!("{} must be set in environment", name))
    }

    /// True when the underlying transport gave up waiting
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }
}
