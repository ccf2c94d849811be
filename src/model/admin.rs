// File: src/model/admin.rs
use super::null_as_default;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ScanReport {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub new: u64,
    #[serde(default)]
    pub existing: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminEbook {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover_status: String,
    #[serde(default)]
    pub created_at: serde_json::Value,
}

impl AdminEbook {
    pub fn has_real_cover(&self) -> bool {
        self.cover_status == "found"
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminCourse {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub has_thumbnail: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: String,
    #[serde(default)]
    pub created_at: serde_json::Value,
}

/// The backend sends either a timestamp string or a placeholder number.
pub fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct CoverSearchReport {
    #[serde(default)]
    pub found: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub skipped: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct GenerateReport {
    #[serde(default)]
    pub generated: u64,
    #[serde(default)]
    pub failed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct CategorizeReport {
    #[serde(default)]
    pub updated: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AdminStatus {
    #[serde(default)]
    pub courses_count: u64,
    #[serde(default)]
    pub ebooks_count: u64,
    #[serde(default)]
    pub covers_with_real_images: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub server_status: String,
}

impl AdminStatus {
    pub fn server_label(&self) -> &'static str {
        if self.server_status == "running" {
            "Running"
        } else {
            "Stopped"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Diagnostics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub database_status: String,
    #[serde(default)]
    pub courses_count: u64,
    #[serde(default)]
    pub ebooks_count: u64,
    #[serde(default)]
    pub covers_count: u64,
    #[serde(default)]
    pub thumbnails_count: u64,
    #[serde(default)]
    pub missing_covers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub is_admin: bool,
}

/// Homepage layout knobs, all CSS lengths or keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub featured_courses_width: String,
    pub featured_courses_max_width: String,
    pub featured_ebooks_width: String,
    pub featured_ebooks_max_width: String,
    pub table_row_height: String,
    pub table_padding: String,
    pub course_image_width: String,
    pub course_title_font_size: String,
    pub ebook_image_width: String,
    pub ebook_image_height: String,
    pub ebook_title_font_size: String,
    pub card_background: String,
    pub card_border: String,
    pub table_gap: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            featured_courses_width: "100%".into(),
            featured_courses_max_width: "600px".into(),
            featured_ebooks_width: "100%".into(),
            featured_ebooks_max_width: "600px".into(),
            table_row_height: "auto".into(),
            table_padding: "12px".into(),
            course_image_width: "150px".into(),
            course_title_font_size: "1rem".into(),
            ebook_image_width: "120px".into(),
            ebook_image_height: "150px".into(),
            ebook_title_font_size: "1rem".into(),
            card_background: "transparent".into(),
            card_border: "none".into(),
            table_gap: "0.75rem".into(),
        }
    }
}

pub type EnvConfig = BTreeMap<String, String>;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SuccessEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub settings: Option<T>,
    #[serde(default)]
    pub config: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn layout_fills_missing_fields_with_defaults() {
        let s: LayoutSettings = serde_json::from_value(json!({"table_padding": "4px"})).unwrap();
        assert_eq!(s.table_padding, "4px");
        assert_eq!(s.ebook_image_height, "150px");
        assert_eq!(s.card_border, "none");
    }

    #[test]
    fn created_at_placeholder_renders() {
        assert_eq!(display_value(&json!(7)), "7");
        assert_eq!(display_value(&json!("2024-01-01")), "2024-01-01");
        assert_eq!(display_value(&serde_json::Value::Null), "");
    }
}
