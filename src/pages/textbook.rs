// File: src/pages/textbook.rs
use super::{StatusLine, error_text};
use crate::client::ApiClient;
use crate::error::ApiError;
use log::{error, warn};
use std::sync::Arc;

pub const NO_TOKEN: &str = "Error: Could not get CSRF token";
pub const SAVE_FAILED: &str = "Error: Could not save note";

pub struct TextbookPage {
    client: Arc<ApiClient>,
    book_id: String,
    pub note: String,
    pub status: Option<StatusLine>,
}

impl TextbookPage {
    pub fn new(client: Arc<ApiClient>, book_id: impl Into<String>) -> Self {
        Self {
            client,
            book_id: book_id.into(),
            note: String::new(),
            status: None,
        }
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub async fn load(&mut self) {
        match self.client.textbook_note(&self.book_id).await {
            Ok(content) => self.note = content,
            Err(e) => warn!("Failed to load note: {}", e),
        }
    }

    /// Unlike the other forms this one refuses to send without a token.
    pub async fn save_note(&mut self) -> bool {
        if self.client.prime_csrf().await.is_none() {
            self.status = Some(StatusLine::danger(NO_TOKEN));
            return false;
        }

        let status = match self.client.save_textbook_note(&self.book_id, &self.note).await {
            Ok(resp) => StatusLine::success(
                resp.message
                    .unwrap_or_else(|| super::course::NOTE_SAVED.to_string()),
            ),
            Err(e @ ApiError::Status { .. }) => StatusLine::danger(error_text(&e)),
            Err(e) => {
                error!("Error saving note: {}", e);
                StatusLine::danger(SAVE_FAILED)
            }
        };
        let saved = !status.is_error();
        self.status = Some(status);
        saved
    }
}
