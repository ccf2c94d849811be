// File: src/api/content.rs
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::ContentItem;
use crate::model::session::SessionResponse;
use crate::model::SessionUser;
use serde::Deserialize;

pub const CONTENT_PATH: &str = "/api/content";
pub const SESSION_PATH: &str = "/api/check_session";

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    content: Vec<ContentItem>,
}

impl ApiClient {
    /// Full content collection, courses first as the backend orders them.
    pub async fn fetch_content(&self) -> Result<Vec<ContentItem>> {
        let resp: ContentResponse = self
            .get_json(CONTENT_PATH, "Failed to fetch content")
            .await?;
        Ok(resp.content)
    }

    /// Any non-2xx answer means there is no session.
    pub async fn check_session(&self) -> Result<SessionUser> {
        let resp: SessionResponse = self.get_json(SESSION_PATH, "Not authenticated").await?;
        Ok(resp.user)
    }
}
