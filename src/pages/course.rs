// File: src/pages/course.rs
use super::StatusLine;
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::Progress;
use log::{error, warn};
use std::sync::Arc;

pub const NOTE_SAVED: &str = "Note saved successfully!";
pub const NOTE_SAVE_FAILED: &str = "Error saving note. Please try again.";
pub const PROGRESS_REJECTED: &str = "Error updating progress. Please make sure you are logged in.";
pub const PROGRESS_FAILED: &str = "An error occurred while updating progress.";

/// Status after the user clicks `clicked` while `current` is active:
/// clicking the active status clears it.
pub fn next_progress(current: Progress, clicked: Progress) -> Progress {
    if current == clicked {
        Progress::NotStarted
    } else {
        clicked
    }
}

pub struct CoursePage {
    client: Arc<ApiClient>,
    uid: String,
    pub note: String,
    pub progress: Progress,
    pub note_status: Option<StatusLine>,
    /// Set when a progress update fails; the indicator keeps its old value.
    pub alert: Option<String>,
}

impl CoursePage {
    pub fn new(client: Arc<ApiClient>, uid: impl Into<String>) -> Self {
        Self {
            client,
            uid: uid.into(),
            note: String::new(),
            progress: Progress::NotStarted,
            note_status: None,
            alert: None,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Loads the note and the current progress. Neither failure is shown;
    /// the page just starts blank and Not Started.
    pub async fn load(&mut self) {
        self.client.prime_csrf().await;

        match self.client.course_note(&self.uid).await {
            Ok(content) => self.note = content,
            Err(e) => warn!("Failed to load note: {}", e),
        }

        // Progress only travels with the content listing.
        self.progress = match self.client.fetch_content().await {
            Ok(items) => items
                .iter()
                .find(|item| item.uid == self.uid)
                .map(|item| item.progress())
                .unwrap_or_default(),
            Err(e) => {
                error!("Failed to load progress: {}", e);
                Progress::NotStarted
            }
        };
    }

    pub async fn save_note(&mut self) -> Result<()> {
        let result = self.client.save_course_note(&self.uid, &self.note).await;
        self.note_status = Some(match &result {
            Ok(_) => StatusLine::success(NOTE_SAVED),
            Err(e) => {
                error!("Failed to save note: {}", e);
                StatusLine::danger(NOTE_SAVE_FAILED)
            }
        });
        result.map(|_| ())
    }

    /// Clicking a progress indicator. The indicator only moves once the
    /// backend has accepted the new status.
    pub async fn click_progress(&mut self, clicked: Progress) -> Result<Progress> {
        let target = next_progress(self.progress, clicked);
        match self.client.update_progress(&self.uid, target).await {
            Ok(_) => {
                self.progress = target;
                self.alert = None;
                Ok(target)
            }
            Err(e) => {
                self.alert = Some(if e.is_transport() {
                    error!("Failed to update progress: {}", e);
                    PROGRESS_FAILED.to_string()
                } else {
                    PROGRESS_REJECTED.to_string()
                });
                Err(e)
            }
        }
    }

    /// Clears the transient "saved" line. Error lines stay.
    pub fn expire_status(&mut self) {
        if self.note_status.as_ref().is_some_and(|s| !s.is_error()) {
            self.note_status = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicking_active_status_clears_it() {
        assert_eq!(
            next_progress(Progress::InProgress, Progress::InProgress),
            Progress::NotStarted
        );
        assert_eq!(
            next_progress(Progress::Completed, Progress::Completed),
            Progress::NotStarted
        );
    }

    #[test]
    fn clicking_other_status_switches() {
        assert_eq!(
            next_progress(Progress::NotStarted, Progress::InProgress),
            Progress::InProgress
        );
        assert_eq!(
            next_progress(Progress::InProgress, Progress::Completed),
            Progress::Completed
        );
    }

    #[test]
    fn expire_keeps_errors() {
        let client = Arc::new(ApiClient::new("http://127.0.0.1:9", false).unwrap());
        let mut page = CoursePage::new(client, "c1");
        page.note_status = Some(StatusLine::danger(NOTE_SAVE_FAILED));
        page.expire_status();
        assert!(page.note_status.is_some());

        page.note_status = Some(StatusLine::success(NOTE_SAVED));
        page.expire_status();
        assert!(page.note_status.is_none());
    }
}
