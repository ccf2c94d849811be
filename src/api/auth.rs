// File: src/api/auth.rs
use super::MessageResponse;
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::session::Credentials;
use log::info;

impl ApiClient {
    pub async fn login(&self, username: &str, password: &str) -> Result<MessageResponse> {
        let resp = self
            .post_json(
                "/api/login",
                &Credentials { username, password },
                "Login failed",
            )
            .await?;
        info!("Logged in as {}", username);
        Ok(resp)
    }

    /// Registration does not open a session; callers log in afterwards.
    pub async fn register(&self, username: &str, password: &str) -> Result<MessageResponse> {
        self.post_json(
            "/api/register",
            &Credentials { username, password },
            "Registration failed",
        )
        .await
    }

    pub async fn logout(&self) -> Result<MessageResponse> {
        let resp = self.post_empty("/api/logout", "Logout failed").await;
        // The local cookie is useless either way.
        self.forget_session();
        resp
    }
}
