// File: src/pages/admin.rs
//! Admin panel. Long-running maintenance calls write into per-tab activity
//! logs the way the panel's log boxes do.
use super::{StatusLine, error_text};
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::{
    AdminCourse, AdminEbook, AdminStatus, AdminUser, EnvConfig, LayoutSettings, NewUser,
};
use log::{error, info};
use std::sync::Arc;

pub const LAYOUT_SAVED: &str = "Settings saved successfully! Refresh the page to see changes.";
pub const LAYOUT_RESET: &str = "Settings reset to defaults. Refresh the page to see changes.";
pub const NO_LOGS: &str = "No logs available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    lines: Vec<LogLine>,
}

impl ActivityLog {
    pub fn push(&mut self, level: LogLevel, text: impl Into<String>) {
        self.lines.push(LogLine {
            level,
            text: text.into(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(LogLevel::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(LogLevel::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(LogLevel::Error, text);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn has_errors(&self) -> bool {
        self.lines.iter().any(|l| l.level == LogLevel::Error)
    }
}

/// Dashboard tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatTiles {
    pub courses: u64,
    pub textbooks: u64,
    pub real_covers: u64,
    pub server: &'static str,
}

impl From<&AdminStatus> for StatTiles {
    fn from(status: &AdminStatus) -> Self {
        Self {
            courses: status.courses_count,
            textbooks: status.ebooks_count,
            real_covers: status.covers_with_real_images,
            server: status.server_label(),
        }
    }
}

pub struct AdminPage {
    client: Arc<ApiClient>,
    pub textbook_log: ActivityLog,
    pub course_log: ActivityLog,
    pub diagnostics_log: ActivityLog,
    pub ebooks: Vec<AdminEbook>,
    pub courses: Vec<AdminCourse>,
    pub users: Vec<AdminUser>,
    pub stats: Option<StatTiles>,
    pub server_logs: Vec<String>,
    pub layout: LayoutSettings,
    pub layout_message: Option<StatusLine>,
    pub env: EnvConfig,
    /// Modal-style message for one-shot actions.
    pub alert: Option<String>,
}

impl AdminPage {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            textbook_log: ActivityLog::default(),
            course_log: ActivityLog::default(),
            diagnostics_log: ActivityLog::default(),
            ebooks: Vec::new(),
            courses: Vec::new(),
            users: Vec::new(),
            stats: None,
            server_logs: Vec::new(),
            layout: LayoutSettings::default(),
            layout_message: None,
            env: EnvConfig::new(),
            alert: None,
        }
    }

    pub async fn init(&mut self) {
        self.client.prime_csrf().await;
        self.load_dashboard().await;
    }

    pub async fn load_dashboard(&mut self) {
        match self.client.admin_status().await {
            Ok(status) => self.stats = Some(StatTiles::from(&status)),
            Err(e) => error!("Error loading dashboard: {}", e),
        }
    }

    // --- Textbooks ---

    pub async fn scan_textbooks(&mut self) {
        self.textbook_log.clear();
        self.textbook_log
            .info("Scanning /epub directory for EPUB files...");
        match self.client.scan_ebooks().await {
            Ok(report) => {
                self.textbook_log
                    .success(format!("Found {} textbooks", report.total));
                self.textbook_log.info(format!(
                    "New: {}, Already imported: {}",
                    report.new, report.existing
                ));
                self.load_textbooks().await;
            }
            Err(e) => self.textbook_log.error(error_text(&e)),
        }
    }

    pub async fn load_textbooks(&mut self) {
        match self.client.admin_ebooks().await {
            Ok(ebooks) => self.ebooks = ebooks,
            Err(e) => error!("Error loading textbooks: {}", e),
        }
    }

    pub async fn search_covers(&mut self, source: &str) {
        self.textbook_log.clear();
        self.textbook_log
            .info(format!("Searching for covers using {}...", source));
        match self.client.search_covers(source).await {
            Ok(report) => {
                self.textbook_log
                    .success(format!("Found {} covers", report.found));
                self.textbook_log.info(format!(
                    "Failed: {}, Skipped: {}",
                    report.failed, report.skipped
                ));
                self.load_textbooks().await;
            }
            Err(e) => self.textbook_log.error(error_text(&e)),
        }
    }

    pub async fn generate_placeholders(&mut self) {
        self.textbook_log.clear();
        self.textbook_log.info("Generating placeholder covers...");
        match self.client.generate_covers().await {
            Ok(report) => {
                self.textbook_log.success(format!(
                    "Generated {} placeholder covers",
                    report.generated
                ));
                self.load_textbooks().await;
            }
            Err(e) => self.textbook_log.error(error_text(&e)),
        }
    }

    // --- Courses ---

    pub async fn scan_courses(&mut self) {
        self.course_log.clear();
        self.course_log.info("Scanning /courses directory...");
        match self.client.scan_courses().await {
            Ok(report) => {
                self.course_log
                    .success(format!("Found {} courses", report.total));
                self.course_log.info(format!(
                    "New: {}, Already imported: {}",
                    report.new, report.existing
                ));
                self.load_courses().await;
            }
            Err(e) => self.course_log.error(error_text(&e)),
        }
    }

    pub async fn load_courses(&mut self) {
        match self.client.admin_courses().await {
            Ok(courses) => self.courses = courses,
            Err(e) => error!("Error loading courses: {}", e),
        }
    }

    pub async fn generate_thumbnails(&mut self) {
        self.course_log.clear();
        self.course_log.info("Generating course thumbnails...");
        match self.client.generate_thumbnails().await {
            Ok(report) => {
                self.course_log
                    .success(format!("Generated {} thumbnails", report.generated));
                self.course_log.info(format!("Failed: {}", report.failed));
                self.load_courses().await;
            }
            Err(e) => self.course_log.error(error_text(&e)),
        }
    }

    pub async fn autocategorize(&mut self) {
        self.course_log.clear();
        self.course_log.info("Auto-categorizing courses...");
        match self.client.autocategorize().await {
            Ok(report) => {
                self.course_log
                    .success(format!("Categorized {} courses", report.updated));
                self.load_courses().await;
            }
            Err(e) => self.course_log.error(error_text(&e)),
        }
    }

    // --- Server ---

    pub async fn restart_server(&mut self) -> bool {
        match self.client.restart_server().await {
            Ok(resp) => {
                info!(
                    "Restart requested ({})",
                    resp.status.as_deref().unwrap_or("no status")
                );
                self.alert = Some("Server restarting...".to_string());
                true
            }
            Err(e) => {
                self.alert = Some(error_text(&e));
                false
            }
        }
    }

    pub async fn run_diagnostics(&mut self) {
        self.diagnostics_log.clear();
        self.diagnostics_log.info("Running system diagnostics...");
        match self.client.diagnostics().await {
            Ok(d) => {
                let log = &mut self.diagnostics_log;
                log.success(format!("Database: {}", d.database_status));
                log.info(format!("Courses: {}", d.courses_count));
                log.info(format!("Ebooks: {}", d.ebooks_count));
                log.info(format!("Covers: {}", d.covers_count));
                log.info(format!("Thumbnails: {}", d.thumbnails_count));
                if d.missing_covers > 0 {
                    log.error(format!("Warning: {} missing covers", d.missing_covers));
                }
            }
            Err(e) => self.diagnostics_log.error(error_text(&e)),
        }
    }

    pub async fn fetch_logs(&mut self) {
        self.server_logs = match self.client.server_logs().await {
            Ok(Some(lines)) => lines,
            Ok(None) => vec![NO_LOGS.to_string()],
            Err(e) if e.is_transport() => vec![error_text(&e)],
            Err(_) => vec![NO_LOGS.to_string()],
        };
    }

    // --- Users ---

    pub async fn load_users(&mut self) {
        match self.client.users().await {
            Ok(users) => self.users = users,
            Err(e) => error!("Error loading users: {}", e),
        }
    }

    pub async fn create_user(&mut self, user: &NewUser) -> Result<()> {
        match self.client.create_user(user).await {
            Ok(resp) => {
                self.alert = Some(
                    resp.message
                        .unwrap_or_else(|| format!("User '{}' created", user.username)),
                );
                self.load_users().await;
                Ok(())
            }
            Err(e) => {
                self.alert = Some(error_text(&e));
                Err(e)
            }
        }
    }

    pub async fn delete_user(&mut self, user_id: i64) -> Result<()> {
        match self.client.delete_user(user_id).await {
            Ok(resp) => {
                self.alert = Some(resp.message.unwrap_or_else(|| "User deleted".to_string()));
                self.users.retain(|u| u.id != user_id);
                Ok(())
            }
            Err(e) => {
                self.alert = Some(error_text(&e));
                Err(e)
            }
        }
    }

    // --- Layout ---

    pub async fn load_layout(&mut self) {
        match self.client.layout_settings().await {
            Ok(settings) => self.layout = settings,
            Err(e) => error!("Error loading layout settings: {}", e),
        }
    }

    pub async fn save_layout(&mut self) {
        match self.client.save_layout_settings(&self.layout).await {
            Ok(()) => self.layout_message = Some(StatusLine::success(LAYOUT_SAVED)),
            Err(e) => self.alert = Some(error_text(&e)),
        }
    }

    pub async fn reset_layout(&mut self) {
        match self.client.reset_layout_settings().await {
            Ok(settings) => {
                self.layout = settings;
                self.layout_message = Some(StatusLine::success(LAYOUT_RESET));
            }
            Err(e) => self.alert = Some(error_text(&e)),
        }
    }

    // --- Environment ---

    pub async fn load_env(&mut self) {
        match self.client.env_config().await {
            Ok(env) => self.env = env,
            Err(e) => self.alert = Some(error_text(&e)),
        }
    }

    pub async fn save_env(&mut self) -> Result<()> {
        match self.client.save_env_config(&self.env).await {
            Ok(()) => {
                self.alert = Some("Configuration saved.".to_string());
                Ok(())
            }
            Err(e) => {
                self.alert = Some(error_text(&e));
                Err(e)
            }
        }
    }
}
