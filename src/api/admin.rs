// File: src/api/admin.rs
// Admin namespace. Every call needs an admin session; the backend answers 403
// otherwise and the message surfaces unchanged.
use super::MessageResponse;
use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::model::admin::SuccessEnvelope;
use crate::model::{
    AdminCourse, AdminEbook, AdminStatus, AdminUser, CategorizeReport, CoverSearchReport,
    Diagnostics, EnvConfig, GenerateReport, LayoutSettings, NewUser, ScanReport,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

const ADMIN: &str = "/api/admin";

#[derive(Deserialize)]
struct EbookList {
    #[serde(default)]
    ebooks: Vec<AdminEbook>,
}

#[derive(Deserialize)]
struct CourseList {
    #[serde(default)]
    courses: Vec<AdminCourse>,
}

#[derive(Deserialize)]
struct UserList {
    #[serde(default)]
    users: Vec<AdminUser>,
}

#[derive(Deserialize)]
struct LogList {
    #[serde(default)]
    logs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestartResponse {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Serialize)]
struct SettingsBody<'a> {
    settings: &'a LayoutSettings,
}

#[derive(Serialize)]
struct EnvBody<'a> {
    config: &'a EnvConfig,
}

fn path(endpoint: &str) -> String {
    format!("{}/{}", ADMIN, endpoint)
}

/// Layout and env endpoints report failure inside a 2xx body as well.
fn unwrap_envelope<T>(envelope: SuccessEnvelope<T>, fallback: &str) -> Result<SuccessEnvelope<T>> {
    if envelope.success {
        Ok(envelope)
    } else {
        Err(ApiError::Status {
            status: 200,
            message: envelope.error.unwrap_or_else(|| fallback.to_string()),
        })
    }
}

impl ApiClient {
    // --- Textbooks ---

    pub async fn scan_ebooks(&self) -> Result<ScanReport> {
        self.post_empty(&path("scan-ebooks"), "Scan failed").await
    }

    pub async fn admin_ebooks(&self) -> Result<Vec<AdminEbook>> {
        let list: EbookList = self.get_json(&path("get-ebooks"), "Failed to load textbooks").await?;
        Ok(list.ebooks)
    }

    pub async fn search_covers(&self, source: &str) -> Result<CoverSearchReport> {
        self.post_json(&path("search-covers"), &json!({ "source": source }), "Cover search failed")
            .await
    }

    pub async fn generate_covers(&self) -> Result<GenerateReport> {
        self.post_empty(&path("generate-covers"), "Cover generation failed")
            .await
    }

    // --- Courses ---

    pub async fn scan_courses(&self) -> Result<ScanReport> {
        self.post_empty(&path("scan-courses"), "Scan failed").await
    }

    pub async fn admin_courses(&self) -> Result<Vec<AdminCourse>> {
        let list: CourseList = self.get_json(&path("get-courses"), "Failed to load courses").await?;
        Ok(list.courses)
    }

    pub async fn generate_thumbnails(&self) -> Result<GenerateReport> {
        self.post_empty(&path("generate-thumbnails"), "Thumbnail generation failed")
            .await
    }

    pub async fn autocategorize(&self) -> Result<CategorizeReport> {
        self.post_empty(&path("autocategorize"), "Auto-categorize failed")
            .await
    }

    // --- Server ---

    pub async fn restart_server(&self) -> Result<RestartResponse> {
        self.post_empty(&path("server/restart"), "Restart failed").await
    }

    pub async fn admin_status(&self) -> Result<AdminStatus> {
        self.get_json(&path("status"), "Failed to load status").await
    }

    pub async fn diagnostics(&self) -> Result<Diagnostics> {
        self.get_json(&path("diagnostics"), "Diagnostics failed").await
    }

    /// `None` when the backend has nothing to show.
    pub async fn server_logs(&self) -> Result<Option<Vec<String>>> {
        let list: LogList = self.get_json(&path("logs"), "Failed to fetch logs").await?;
        Ok(list.logs)
    }

    // --- Users ---

    pub async fn users(&self) -> Result<Vec<AdminUser>> {
        let list: UserList = self.get_json(&path("users"), "Failed to load users").await?;
        Ok(list.users)
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<MessageResponse> {
        self.post_json(&path("create_user"), user, "Failed to create user")
            .await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<MessageResponse> {
        self.post_json(&path("delete_user"), &json!({ "user_id": user_id }), "Failed to delete user")
            .await
    }

    // --- Layout ---

    pub async fn layout_settings(&self) -> Result<LayoutSettings> {
        let env: SuccessEnvelope<LayoutSettings> =
            self.get_json(&path("layout/get"), "Failed to load layout").await?;
        let env = unwrap_envelope(env, "Failed to load layout")?;
        Ok(env.settings.unwrap_or_default())
    }

    pub async fn save_layout_settings(&self, settings: &LayoutSettings) -> Result<()> {
        let env: SuccessEnvelope<LayoutSettings> = self
            .post_json(&path("layout/save"), &SettingsBody { settings }, "Failed to save layout")
            .await?;
        unwrap_envelope(env, "Failed to save layout").map(|_| ())
    }

    /// Returns the defaults the backend reset to.
    pub async fn reset_layout_settings(&self) -> Result<LayoutSettings> {
        let env: SuccessEnvelope<LayoutSettings> = self
            .post_empty(&path("layout/reset"), "Failed to reset layout")
            .await?;
        let env = unwrap_envelope(env, "Failed to reset layout")?;
        Ok(env.settings.unwrap_or_default())
    }

    // --- Environment ---

    pub async fn env_config(&self) -> Result<EnvConfig> {
        let env: SuccessEnvelope<EnvConfig> =
            self.get_json(&path("env/get"), "Failed to load configuration").await?;
        let env = unwrap_envelope(env, "Failed to load configuration")?;
        Ok(env.config.unwrap_or_default())
    }

    pub async fn save_env_config(&self, config: &EnvConfig) -> Result<()> {
        let env: SuccessEnvelope<EnvConfig> = self
            .post_json(&path("env/save"), &EnvBody { config }, "Failed to save configuration")
            .await?;
        unwrap_envelope(env, "Failed to save configuration").map(|_| ())
    }
}
