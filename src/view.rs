// File: src/view.rs
use crate::model::ContentKind;

/// Which section of the homepage is showing, derived from the URL fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Dashboard,
    Courses,
    Ebooks,
}

impl ViewState {
    /// Unknown or empty fragments fall back to the dashboard.
    pub fn from_fragment(fragment: &str) -> Self {
        match fragment.trim() {
            "#courses" => ViewState::Courses,
            "#ebooks" => ViewState::Ebooks,
            _ => ViewState::Dashboard,
        }
    }

    pub fn fragment(&self) -> &'static str {
        match self {
            ViewState::Dashboard => "",
            ViewState::Courses => "#courses",
            ViewState::Ebooks => "#ebooks",
        }
    }

    pub fn is_dashboard(&self) -> bool {
        *self == ViewState::Dashboard
    }

    pub fn library_kind(&self) -> Option<ContentKind> {
        match self {
            ViewState::Dashboard => None,
            ViewState::Courses => Some(ContentKind::Course),
            ViewState::Ebooks => Some(ContentKind::Ebook),
        }
    }

    pub fn library_title(&self) -> Option<&'static str> {
        match self {
            ViewState::Dashboard => None,
            ViewState::Courses => Some("Full Course Library"),
            ViewState::Ebooks => Some("Full Ebook Library"),
        }
    }

    /// Search and category filters only apply to the libraries.
    pub fn shows_filters(&self) -> bool {
        !self.is_dashboard()
    }

    /// Library pages are already single-type.
    pub fn shows_type_selector(&self) -> bool {
        self.is_dashboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_known_fragments() {
        assert_eq!(ViewState::from_fragment("#courses"), ViewState::Courses);
        assert_eq!(ViewState::from_fragment("#ebooks"), ViewState::Ebooks);
    }

    #[test]
    fn unknown_fragments_route_to_dashboard() {
        for f in ["", "#", "#dashboard", "courses", "#Courses", "#ebooks/2"] {
            assert_eq!(ViewState::from_fragment(f), ViewState::Dashboard, "{f}");
        }
    }

    #[test]
    fn fragment_round_trips() {
        for v in [ViewState::Dashboard, ViewState::Courses, ViewState::Ebooks] {
            assert_eq!(ViewState::from_fragment(v.fragment()), v);
        }
    }

    #[test]
    fn chrome_visibility() {
        assert!(!ViewState::Dashboard.shows_filters());
        assert!(ViewState::Dashboard.shows_type_selector());
        assert!(ViewState::Ebooks.shows_filters());
        assert!(!ViewState::Ebooks.shows_type_selector());
        assert_eq!(ViewState::Courses.library_title(), Some("Full Course Library"));
    }
}
