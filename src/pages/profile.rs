// File: src/pages/profile.rs
use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::model::{AvatarUpload, PasswordChange, Profile, ProfileNote, ProfileUpdate};
use log::{error, info};
use std::sync::Arc;

pub const NO_BIO: &str = "No bio yet. Click \"Edit Profile\" to add one!";
pub const NO_COURSES_IN_PROGRESS: &str = "No courses in progress";
pub const NO_COMPLETED_COURSES: &str = "No completed courses yet";
pub const NO_READING_LIST: &str = "No books in reading list";
pub const NO_NOTES: &str = "No notes yet";
pub const UPDATE_FAILED: &str = "Failed to update profile";

pub const STANDARD_PRONOUNS: [&str; 3] = ["he/him", "she/her", "they/them"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub title: String,
    pub href: String,
    /// Right-aligned detail: a status, a percentage, or a note excerpt.
    pub detail: Option<String>,
}

/// A profile section: entries, or a placeholder when there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Entries(Vec<LinkEntry>),
    Placeholder(&'static str),
}

impl Section {
    fn build(entries: Vec<LinkEntry>, placeholder: &'static str) -> Self {
        if entries.is_empty() {
            Section::Placeholder(placeholder)
        } else {
            Section::Entries(entries)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub username: String,
    pub avatar: String,
    pub pronouns: String,
    pub about: String,
    pub joined: Option<String>,
    pub in_progress: Section,
    pub completed: Section,
    pub reading_list: Section,
    pub notes: Section,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        let user = &profile.user;
        let about = user
            .about_me
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_BIO)
            .to_string();

        let in_progress = profile
            .courses_in_progress
            .iter()
            .map(|c| LinkEntry {
                title: c.title.clone(),
                href: format!("/course/{}", c.uid),
                detail: Some(c.status.to_string()),
            })
            .collect();
        let completed = profile
            .courses_completed
            .iter()
            .map(|c| LinkEntry {
                title: c.title.clone(),
                href: format!("/course/{}", c.uid),
                detail: None,
            })
            .collect();
        let reading = profile
            .reading_list
            .iter()
            .map(|b| LinkEntry {
                title: b.title.clone(),
                href: format!("/reader/{}", b.uid),
                detail: Some(format!("{}%", b.progress)),
            })
            .collect();
        let notes = profile.notes.iter().map(note_entry).collect();

        Self {
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            pronouns: user.pronouns.clone().unwrap_or_default(),
            about,
            joined: user
                .joined_on()
                .map(|d| format!("Joined {}", d.format("%B %-d, %Y"))),
            in_progress: Section::build(in_progress, NO_COURSES_IN_PROGRESS),
            completed: Section::build(completed, NO_COMPLETED_COURSES),
            reading_list: Section::build(reading, NO_READING_LIST),
            notes: Section::build(notes, NO_NOTES),
        }
    }
}

fn note_entry(note: &ProfileNote) -> LinkEntry {
    LinkEntry {
        title: note.title().to_string(),
        href: note.link(),
        detail: Some(note.content().to_string()),
    }
}

/// Pronoun picker value: one of the standard options, a custom entry, or
/// nothing selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PronounChoice {
    Unset,
    Standard(&'static str),
    Custom(String),
}

impl PronounChoice {
    pub fn resolve(raw: &str) -> Self {
        if raw.is_empty() {
            return PronounChoice::Unset;
        }
        match STANDARD_PRONOUNS.iter().find(|p| **p == raw) {
            Some(p) => PronounChoice::Standard(*p),
            None => PronounChoice::Custom(raw.to_string()),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            PronounChoice::Unset => "",
            PronounChoice::Standard(p) => *p,
            PronounChoice::Custom(p) => p.as_str(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, PronounChoice::Custom(_))
    }
}

/// Edit-profile form, prefilled from the current profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEditor {
    pub about_me: String,
    pub gender: String,
    pub pronouns: PronounChoice,
    pub avatar: Option<AvatarUpload>,
}

impl ProfileEditor {
    pub fn from_profile(profile: &Profile) -> Self {
        let user = &profile.user;
        Self {
            about_me: user.about_me.clone().unwrap_or_default(),
            gender: user.gender.clone().unwrap_or_default(),
            pronouns: PronounChoice::resolve(user.pronouns.as_deref().unwrap_or_default()),
            avatar: None,
        }
    }

    pub fn update(&self) -> ProfileUpdate {
        ProfileUpdate {
            about_me: self.about_me.clone(),
            gender: self.gender.clone(),
            pronouns: self.pronouns.value().to_string(),
        }
    }
}

pub struct ProfilePage {
    client: Arc<ApiClient>,
    pub profile: Option<Profile>,
    pub edit_error: Option<String>,
}

impl ProfilePage {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            profile: None,
            edit_error: None,
        }
    }

    pub async fn load(&mut self) -> Option<ProfileView> {
        self.client.prime_csrf().await;
        match self.client.profile().await {
            Ok(profile) => {
                let view = ProfileView::from(&profile);
                self.profile = Some(profile);
                Some(view)
            }
            Err(e) => {
                error!("Failed to load profile: {}", e);
                None
            }
        }
    }

    pub fn view(&self) -> Option<ProfileView> {
        self.profile.as_ref().map(ProfileView::from)
    }

    pub fn editor(&self) -> Option<ProfileEditor> {
        self.profile.as_ref().map(ProfileEditor::from_profile)
    }

    /// Avatar first, then the text fields. A failed upload stops before the
    /// profile is touched. On success the profile is reloaded.
    pub async fn save(&mut self, editor: &ProfileEditor) -> Result<Option<ProfileView>> {
        self.edit_error = None;
        let result = self.try_save(editor).await;
        match result {
            Ok(()) => Ok(self.load().await),
            Err(e) => {
                self.edit_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    async fn try_save(&self, editor: &ProfileEditor) -> Result<()> {
        if let Some(upload) = &editor.avatar {
            let resp = self.client.upload_avatar(upload).await?;
            info!(
                "Avatar uploaded: {}",
                resp.avatar_url.as_deref().unwrap_or("(no url)")
            );
        }
        match self.client.update_profile(&editor.update()).await {
            Ok(_) => Ok(()),
            Err(ApiError::Status { status, .. }) => Err(ApiError::Status {
                status,
                message: UPDATE_FAILED.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<String> {
        let resp = self
            .client
            .change_password(&PasswordChange {
                current_password: current.to_string(),
                new_password: new.to_string(),
            })
            .await?;
        Ok(resp
            .message
            .unwrap_or_else(|| "Password updated.".to_string()))
    }

    pub async fn logout(&self) {
        if let Err(e) = self.client.logout().await {
            error!("Logout failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: serde_json::Value) -> Profile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_profile_uses_placeholders() {
        let p = profile(json!({
            "user": {"username": "ana", "avatar": "/a.png", "about_me": null},
            "courses_in_progress": [],
            "courses_completed": [],
            "notes": [],
            "reading_list": []
        }));
        let view = ProfileView::from(&p);
        assert_eq!(view.about, NO_BIO);
        assert_eq!(view.joined, None);
        assert_eq!(view.in_progress, Section::Placeholder(NO_COURSES_IN_PROGRESS));
        assert_eq!(view.completed, Section::Placeholder(NO_COMPLETED_COURSES));
        assert_eq!(view.reading_list, Section::Placeholder(NO_READING_LIST));
        assert_eq!(view.notes, Section::Placeholder(NO_NOTES));
    }

    #[test]
    fn sections_link_to_their_pages() {
        let p = profile(json!({
            "user": {"username": "ana", "created_at": "2024-01-09T08:00:00"},
            "courses_in_progress": [{"uid": "c1", "title": "Go", "status": "In Progress"}],
            "courses_completed": [{"uid": "c2", "title": "Rust", "status": "Completed"}],
            "notes": [{"type": "course", "course_uid": "c1", "course_title": "Go", "content": "todo"}],
            "reading_list": [{"uid": "b1", "title": "Book", "progress": 40.0}]
        }));
        let view = ProfileView::from(&p);
        assert_eq!(view.joined.as_deref(), Some("Joined January 9, 2024"));

        let Section::Entries(entries) = &view.in_progress else {
            panic!("expected entries");
        };
        assert_eq!(entries[0].href, "/course/c1");
        assert_eq!(entries[0].detail.as_deref(), Some("In Progress"));

        let Section::Entries(books) = &view.reading_list else {
            panic!("expected entries");
        };
        assert_eq!(books[0].href, "/reader/b1");
        assert_eq!(books[0].detail.as_deref(), Some("40%"));
    }

    #[test]
    fn pronoun_resolution() {
        assert_eq!(PronounChoice::resolve("she/her"), PronounChoice::Standard("she/her"));
        assert_eq!(PronounChoice::resolve(""), PronounChoice::Unset);
        let custom = PronounChoice::resolve("xe/xem");
        assert!(custom.is_custom());
        assert_eq!(custom.value(), "xe/xem");
    }

    #[test]
    fn editor_round_trips_fields() {
        let p = profile(json!({
            "user": {"username": "ana", "about_me": "hi", "gender": "f", "pronouns": "ze/zir"}
        }));
        let editor = ProfileEditor::from_profile(&p);
        let update = editor.update();
        assert_eq!(update.about_me, "hi");
        assert_eq!(update.gender, "f");
        assert_eq!(update.pronouns, "ze/zir");
    }
}
