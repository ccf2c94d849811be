// File: src/model/item.rs
use super::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_BOOK_COVER: &str = "/static/images/default-book.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Course,
    Ebook,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Course => "course",
            ContentKind::Ebook => "ebook",
        }
    }
}

/// Per-user course progress. Anything the backend sends that is not one of
/// the two active states reads as `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Progress {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl Progress {
    pub fn as_str(&self) -> &'static str {
        match self {
            Progress::NotStarted => "Not Started",
            Progress::InProgress => "In Progress",
            Progress::Completed => "Completed",
        }
    }
}

impl From<String> for Progress {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "In Progress" => Progress::InProgress,
            "Completed" => Progress::Completed,
            _ => Progress::NotStarted,
        }
    }
}

impl From<Progress> for String {
    fn from(p: Progress) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub uid: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub cover_path: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub reader_url: Option<String>,
    /// Only sent for authenticated sessions.
    #[serde(default)]
    pub user_progress: Option<Progress>,
    #[serde(default)]
    pub user_note: Option<String>,
}

impl ContentItem {
    pub fn new(kind: ContentKind, uid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            kind,
            title: title.into(),
            description: String::new(),
            categories: Vec::new(),
            thumbnail: None,
            cover_path: None,
            path: None,
            author: None,
            reader_url: None,
            user_progress: None,
            user_note: None,
        }
    }

    pub fn course(uid: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(ContentKind::Course, uid, title)
    }

    pub fn ebook(uid: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(ContentKind::Ebook, uid, title)
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.user_progress = Some(progress);
        self
    }

    pub fn progress(&self) -> Progress {
        self.user_progress.unwrap_or_default()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Page the item links to.
    pub fn link(&self) -> String {
        match self.kind {
            ContentKind::Course => format!("/course/{}", self.uid),
            ContentKind::Ebook => self
                .path
                .clone()
                .unwrap_or_else(|| format!("/textbook/{}", self.uid)),
        }
    }

    pub fn image(&self) -> String {
        match self.kind {
            ContentKind::Course => self.thumbnail.clone().unwrap_or_default(),
            ContentKind::Ebook => self
                .cover_path
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_BOOK_COVER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_course_payload() {
        let item: ContentItem = serde_json::from_value(json!({
            "type": "course",
            "uid": "c1",
            "title": "Intro to Go",
            "path": "/course/c1",
            "description": null,
            "categories": ["Programming"],
            "thumbnail": "/static/thumbnails/c1.jpg",
            "user_progress": "In Progress",
            "user_note": ""
        }))
        .unwrap();

        assert_eq!(item.kind, ContentKind::Course);
        assert_eq!(item.description, "");
        assert_eq!(item.progress(), Progress::InProgress);
        assert_eq!(item.link(), "/course/c1");
    }

    #[test]
    fn ebook_without_categories_or_progress() {
        let item: ContentItem = serde_json::from_value(json!({
            "type": "ebook",
            "uid": "calibre-4",
            "title": "Go Cookbook",
            "cover_path": null
        }))
        .unwrap();

        assert!(item.categories.is_empty());
        assert_eq!(item.progress(), Progress::NotStarted);
        assert_eq!(item.image(), DEFAULT_BOOK_COVER);
        assert_eq!(item.link(), "/textbook/calibre-4");
    }

    #[test]
    fn unknown_progress_reads_as_not_started() {
        let p: Progress = serde_json::from_value(json!("Paused")).unwrap();
        assert_eq!(p, Progress::NotStarted);
        assert_eq!(serde_json::to_value(Progress::Completed).unwrap(), json!("Completed"));
    }
}
