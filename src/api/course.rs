// File: src/api/course.rs
use super::MessageResponse;
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::Progress;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct NoteResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct CourseNote<'a> {
    course_uid: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct TextbookNote<'a> {
    book_id: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ProgressUpdate<'a> {
    course_uid: &'a str,
    status: Progress,
}

impl ApiClient {
    pub async fn course_note(&self, course_uid: &str) -> Result<String> {
        let resp: NoteResponse = self
            .get_json(&format!("/api/course/{}/note", course_uid), "Failed to load note")
            .await?;
        Ok(resp.content.unwrap_or_default())
    }

    pub async fn save_course_note(&self, course_uid: &str, content: &str) -> Result<MessageResponse> {
        self.post_json(
            "/api/course/note",
            &CourseNote {
                course_uid,
                content,
            },
            "Failed to save note",
        )
        .await
    }

    pub async fn update_progress(&self, course_uid: &str, status: Progress) -> Result<MessageResponse> {
        self.post_json(
            "/api/course/progress",
            &ProgressUpdate { course_uid, status },
            "Failed to update progress",
        )
        .await
    }

    pub async fn textbook_note(&self, book_id: &str) -> Result<String> {
        let resp: NoteResponse = self
            .get_json(&format!("/api/textbook/{}/note", book_id), "Failed to load note")
            .await?;
        Ok(resp.content.unwrap_or_default())
    }

    pub async fn save_textbook_note(&self, book_id: &str, content: &str) -> Result<MessageResponse> {
        self.post_json(
            "/api/textbook/note",
            &TextbookNote { book_id, content },
            "Failed to save note",
        )
        .await
    }
}
