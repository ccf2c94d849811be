// File: src/session.rs
use crate::model::SessionUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLinkKind {
    Home,
    Courses,
    Ebooks,
    Profile,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub kind: NavLinkKind,
    pub label: &'static str,
    pub href: &'static str,
}

impl NavLink {
    pub const fn new(kind: NavLinkKind, label: &'static str, href: &'static str) -> Self {
        Self { kind, label, href }
    }

    fn is_session_link(&self) -> bool {
        matches!(self.kind, NavLinkKind::Profile | NavLinkKind::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAffordance {
    /// Login / Register entry point.
    LoginPrompt,
    /// Greeting plus a logout control.
    Welcome { username: String },
}

/// Navigation chrome. Starts unauthenticated and settles once the session
/// check resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    pub auth: AuthAffordance,
    pub links: Vec<NavLink>,
}

impl Default for NavBar {
    fn default() -> Self {
        Self {
            auth: AuthAffordance::LoginPrompt,
            links: vec![
                NavLink::new(NavLinkKind::Home, "Home", "/"),
                NavLink::new(NavLinkKind::Courses, "Courses", "/#courses"),
                NavLink::new(NavLinkKind::Ebooks, "Ebooks", "/#ebooks"),
            ],
        }
    }
}

impl NavBar {
    /// Applies a session check result. Profile and Admin links from an
    /// earlier pass are always removed before anything is added back.
    pub fn apply(&mut self, user: Option<&SessionUser>) {
        self.links.retain(|l| !l.is_session_link());

        match user {
            Some(user) => {
                self.auth = AuthAffordance::Welcome {
                    username: user.username.clone(),
                };
                self.links
                    .push(NavLink::new(NavLinkKind::Profile, "Profile", "/profile"));
                if user.is_admin {
                    self.links
                        .push(NavLink::new(NavLinkKind::Admin, "Admin", "/admin"));
                }
            }
            None => self.auth = AuthAffordance::LoginPrompt,
        }
    }

    pub fn has(&self, kind: NavLinkKind) -> bool {
        self.links.iter().any(|l| l.kind == kind)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthAffordance::Welcome { .. })
    }

    pub fn greeting(&self) -> Option<String> {
        match &self.auth {
            AuthAffordance::Welcome { username } => Some(format!("Welcome, {}", username)),
            AuthAffordance::LoginPrompt => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(admin: bool) -> SessionUser {
        SessionUser {
            id: Some(1),
            username: "ana".into(),
            is_admin: admin,
        }
    }

    #[test]
    fn admin_session_gets_both_links() {
        let mut nav = NavBar::default();
        nav.apply(Some(&user(true)));
        assert_eq!(nav.greeting().as_deref(), Some("Welcome, ana"));
        assert!(nav.has(NavLinkKind::Profile));
        assert!(nav.has(NavLinkKind::Admin));
    }

    #[test]
    fn regular_session_has_no_admin_link() {
        let mut nav = NavBar::default();
        nav.apply(Some(&user(false)));
        assert!(nav.has(NavLinkKind::Profile));
        assert!(!nav.has(NavLinkKind::Admin));
    }

    #[test]
    fn repeated_apply_does_not_duplicate_links() {
        let mut nav = NavBar::default();
        nav.apply(Some(&user(true)));
        nav.apply(Some(&user(true)));
        let profiles = nav.links.iter().filter(|l| l.kind == NavLinkKind::Profile).count();
        assert_eq!(profiles, 1);
    }

    #[test]
    fn losing_the_session_strips_links() {
        let mut nav = NavBar::default();
        nav.apply(Some(&user(true)));
        nav.apply(None);
        assert_eq!(nav.auth, AuthAffordance::LoginPrompt);
        assert!(!nav.has(NavLinkKind::Profile));
        assert!(!nav.has(NavLinkKind::Admin));
        assert!(nav.has(NavLinkKind::Home));
    }
}
