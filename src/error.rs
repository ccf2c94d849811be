// File: src/error.rs
use thiserror::Error;

/// Shown for anything that never reached the application layer.
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    Uri(#[from] http::uri::InvalidUri),

    #[error("Request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TLS setup failed: {0}")]
    Tls(String),

    #[error("Request timed out")]
    Timeout,

    /// Non-2xx answer. `message` is the body's `error` field when present.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(e)
        }
    }
}

impl ApiError {
    /// True when the failure happened below the application layer.
    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiError::Status { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text meant for the user: backend messages verbatim, everything
    /// else collapsed into a generic line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
