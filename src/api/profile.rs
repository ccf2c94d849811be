// File: src/api/profile.rs
use super::MessageResponse;
use crate::client::{ApiClient, Payload, decode};
use crate::error::Result;
use crate::model::{AvatarResponse, AvatarUpload, PasswordChange, Profile, ProfileUpdate};
use http::Method;

pub const PROFILE_PATH: &str = "/api/profile";

impl ApiClient {
    pub async fn profile(&self) -> Result<Profile> {
        self.get_json(PROFILE_PATH, "Failed to load profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<MessageResponse> {
        self.post_json(PROFILE_PATH, update, "Failed to update profile")
            .await
    }

    pub async fn upload_avatar(&self, upload: &AvatarUpload) -> Result<AvatarResponse> {
        let payload = Payload::multipart(
            "avatar",
            &upload.filename,
            &upload.content_type,
            &upload.bytes,
        )?;
        let resp = self
            .send(Method::POST, "/api/profile/avatar", payload)
            .await?;
        decode(resp, "Avatar upload failed")
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<MessageResponse> {
        self.post_json(
            "/api/profile/change-password",
            change,
            "Failed to change password",
        )
        .await
    }
}
