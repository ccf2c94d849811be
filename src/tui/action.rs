use crate::error::Result;
use crate::model::{ContentItem, SessionUser};

/// Work the UI hands to the network side.
#[derive(Debug)]
pub enum Action {
    // Loading
    FetchContent(u64),
    CheckSession,

    // Auth
    Login { username: String, password: String },
    Register { username: String, password: String },
    Logout,

    // Lifecycle
    Quit,
}

/// Answers coming back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    ContentLoaded(u64, Result<Vec<ContentItem>>),
    SessionChecked(Result<SessionUser>),
    /// `Ok` carries the username that is now signed in.
    AuthFinished(Result<String>),
    LoggedOut,
    SearchSettled(String),
}
