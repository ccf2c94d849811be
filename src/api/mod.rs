// File: src/api/mod.rs
//! Typed wrappers around the backend's JSON endpoints.
//!
//! Every function here is a single request/response pair on
//! [`ApiClient`](crate::client::ApiClient). Nothing retries; callers decide
//! how a failure is shown.
pub mod admin;
pub mod auth;
pub mod content;
pub mod course;
pub mod profile;

use serde::Deserialize;

/// `{message}` bodies returned by most write endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
