// File: src/pages/mod.rs
//! Controllers for the pages beyond the homepage.
//!
//! Each page owns a shared [`ApiClient`](crate::client::ApiClient) and
//! keeps just enough state to render itself; none of them touch the
//! homepage content store.
pub mod admin;
pub mod course;
pub mod profile;
pub mod textbook;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
}

/// Short feedback line shown under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Danger,
        }
    }

    pub fn is_error(&self) -> bool {
        self.tone == Tone::Danger
    }
}

/// `Error: ...` with the backend text when there is one.
pub(crate) fn error_text(e: &ApiError) -> String {
    match e {
        ApiError::Status { message, .. } => format!("Error: {}", message),
        other => format!("Error: {}", other),
    }
}
