// File: src/model/profile.rs
use super::item::Progress;
use super::null_as_default;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user: ProfileUser,
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses_in_progress: Vec<ProfileCourse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses_completed: Vec<ProfileCourse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: Vec<ProfileNote>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reading_list: Vec<ReadingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUser {
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub pronouns: Option<String>,
    /// ISO timestamp, with or without an offset.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ProfileUser {
    pub fn joined_on(&self) -> Option<NaiveDate> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
            .ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCourse {
    pub uid: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(default)]
    pub status: Progress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProfileNote {
    Course {
        course_uid: String,
        course_title: String,
        #[serde(default)]
        content: String,
    },
    Ebook {
        ebook_id: String,
        ebook_title: String,
        #[serde(default)]
        content: String,
    },
}

impl ProfileNote {
    pub fn title(&self) -> &str {
        match self {
            ProfileNote::Course { course_title, .. } => course_title,
            ProfileNote::Ebook { ebook_title, .. } => ebook_title,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ProfileNote::Course { content, .. } | ProfileNote::Ebook { content, .. } => content,
        }
    }

    pub fn link(&self) -> String {
        match self {
            ProfileNote::Course { course_uid, .. } => format!("/course/{}", course_uid),
            ProfileNote::Ebook { ebook_id, .. } => format!("/textbook/{}", ebook_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingEntry {
    pub uid: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_read: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub about_me: String,
    pub gender: String,
    pub pronouns: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    /// Content type is inferred from the extension, the backend re-checks it.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        // Control characters would end up inside the part headers.
        let filename: String = filename.into().chars().filter(|c| !c.is_control()).collect();
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let content_type = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        }
        .to_string();
        Self {
            filename,
            content_type,
            bytes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvatarResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_mixed_notes() {
        let notes: Vec<ProfileNote> = serde_json::from_value(json!([
            {"type": "course", "course_uid": "c1", "course_title": "Intro", "content": "hi"},
            {"type": "ebook", "ebook_id": "calibre-4", "ebook_title": "Book", "content": "yo"}
        ]))
        .unwrap();
        assert_eq!(notes[0].link(), "/course/c1");
        assert_eq!(notes[1].title(), "Book");
        assert_eq!(notes[1].link(), "/textbook/calibre-4");
    }

    #[test]
    fn joined_date_accepts_naive_timestamps() {
        let user = ProfileUser {
            username: "ana".into(),
            avatar: String::new(),
            about_me: None,
            gender: None,
            pronouns: None,
            created_at: Some("2024-03-05T10:11:12.123456".into()),
        };
        assert_eq!(user.joined_on(), NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn avatar_content_type_from_extension() {
        assert_eq!(AvatarUpload::new("me.JPG", vec![]).content_type, "image/jpeg");
        assert_eq!(AvatarUpload::new("me", vec![]).content_type, "application/octet-stream");
    }

    #[test]
    fn avatar_filename_drops_control_characters() {
        let upload = AvatarUpload::new("me\r\nX-Injected: 1.png", vec![]);
        assert_eq!(upload.filename, "meX-Injected: 1.png");
        assert_eq!(upload.content_type, "image/png");
    }

    #[test]
    fn reading_entry_tolerates_null_progress() {
        let entry: ReadingEntry = serde_json::from_value(json!({
            "uid": "calibre-2",
            "title": "Book",
            "progress": null,
            "status": null
        }))
        .unwrap();
        assert_eq!(entry.progress, 0.0);
        assert!(entry.status.is_none());
    }
}
