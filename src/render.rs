// File: src/render.rs
//! Pure mapping from the content store and UI state to view models.
//!
//! Nothing here touches the terminal. Every pass builds a fresh view model;
//! the drawing step replaces whatever it showed before.
use crate::model::{ContentItem, ContentKind, Progress};
use crate::session::NavBar;
use crate::store::{ContentStore, FilterState, TypeFilter};
use crate::view::ViewState;
use rand::Rng;
use rand::seq::SliceRandom;

pub const NO_COURSES: &str = "No courses match your criteria.";
pub const NO_TEXTBOOKS: &str = "No textbooks match your criteria.";
pub const NO_ITEMS: &str = "No items match your criteria.";
pub const LOAD_FAILED: &str = "Could not load content.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Secondary,
    Warning,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

impl From<Progress> for Badge {
    fn from(progress: Progress) -> Self {
        let tone = match progress {
            Progress::InProgress => BadgeTone::Warning,
            Progress::Completed => BadgeTone::Success,
            Progress::NotStarted => BadgeTone::Secondary,
        };
        Badge {
            label: progress.as_str(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    pub uid: String,
    pub title: String,
    pub link: String,
    pub thumbnail: String,
    pub badge: Badge,
}

impl From<&ContentItem> for CourseRow {
    fn from(item: &ContentItem) -> Self {
        Self {
            uid: item.uid.clone(),
            title: item.title.clone(),
            link: item.link(),
            thumbnail: item.image(),
            badge: Badge::from(item.progress()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbookRow {
    pub uid: String,
    pub title: String,
    pub link: String,
    pub cover: String,
}

impl From<&ContentItem> for EbookRow {
    fn from(item: &ContentItem) -> Self {
        Self {
            uid: item.uid.clone(),
            title: item.title.clone(),
            link: item.link(),
            cover: item.image(),
        }
    }
}

/// A table body: rows, an empty placeholder, or an inline error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rows<T> {
    Items(Vec<T>),
    Empty(&'static str),
    Error(String),
}

impl<T> Rows<T> {
    fn from_items(items: Vec<T>, placeholder: &'static str) -> Self {
        if items.is_empty() {
            Rows::Empty(placeholder)
        } else {
            Rows::Items(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Rows::Items(items) => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub courses: Rows<CourseRow>,
    pub ebooks: Rows<EbookRow>,
}

/// Random sample of each kind. Filters never apply here.
pub fn dashboard<R: Rng + ?Sized>(
    store: &ContentStore,
    rng: &mut R,
    sample: usize,
    load_error: Option<&str>,
) -> DashboardView {
    let mut courses = store.courses();
    courses.shuffle(rng);
    courses.truncate(sample);

    let mut ebooks = store.ebooks();
    ebooks.shuffle(rng);
    ebooks.truncate(sample);

    let courses = match load_error {
        Some(message) => Rows::Error(message.to_string()),
        None => Rows::from_items(courses.into_iter().map(CourseRow::from).collect(), NO_COURSES),
    };

    DashboardView {
        courses,
        ebooks: Rows::from_items(ebooks.into_iter().map(EbookRow::from).collect(), NO_TEXTBOOKS),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    Course {
        uid: String,
        title: String,
        description: String,
        link: String,
        thumbnail: String,
        badge: Badge,
    },
    Ebook {
        uid: String,
        title: String,
        link: String,
        cover: String,
    },
}

impl Card {
    pub fn uid(&self) -> &str {
        match self {
            Card::Course { uid, .. } | Card::Ebook { uid, .. } => uid,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Card::Course { title, .. } | Card::Ebook { title, .. } => title,
        }
    }

    pub fn link(&self) -> &str {
        match self {
            Card::Course { link, .. } | Card::Ebook { link, .. } => link,
        }
    }
}

impl From<&ContentItem> for Card {
    fn from(item: &ContentItem) -> Self {
        match item.kind {
            ContentKind::Course => Card::Course {
                uid: item.uid.clone(),
                title: item.title.clone(),
                description: item.description.clone(),
                link: item.link(),
                thumbnail: item.image(),
                badge: Badge::from(item.progress()),
            },
            ContentKind::Ebook => Card::Ebook {
                uid: item.uid.clone(),
                title: item.title.clone(),
                link: item.link(),
                cover: item.image(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryView {
    pub title: &'static str,
    pub cards: Vec<Card>,
    pub placeholder: Option<&'static str>,
    /// Always false: every match is listed on one page.
    pub pagination_visible: bool,
}

/// Filtered library for one kind. The full filter state applies, including
/// its type selector, before the kind restriction.
pub fn library(store: &ContentStore, filter: &FilterState, kind: ContentKind, title: &'static str) -> LibraryView {
    let cards: Vec<Card> = store
        .filter(filter)
        .into_iter()
        .filter(|item| item.kind == kind)
        .map(Card::from)
        .collect();
    let placeholder = cards.is_empty().then_some(NO_ITEMS);
    LibraryView {
        title,
        cards,
        placeholder,
        pagination_visible: false,
    }
}

/// Page bookkeeping for the library. Tracked but not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub items_per_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: 12,
        }
    }
}

impl PaginationState {
    pub fn with_page_size(items_per_page: usize) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
            ..Self::default()
        }
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.items_per_page.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChoice {
    pub name: String,
    pub checked: bool,
}

pub fn category_choices(categories: &[String], filter: &FilterState) -> Vec<CategoryChoice> {
    categories
        .iter()
        .map(|name| CategoryChoice {
            name: name.clone(),
            checked: filter.categories.contains(name),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Dashboard(DashboardView),
    Library(LibraryView),
}

/// Everything the drawing step needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub view: ViewState,
    pub nav: NavBar,
    pub filters_visible: bool,
    pub type_selector_visible: bool,
    pub type_filter: TypeFilter,
    pub search_term: String,
    pub categories: Vec<CategoryChoice>,
    pub body: Body,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn store(courses: usize, ebooks: usize) -> ContentStore {
        let mut items = Vec::new();
        for i in 0..courses {
            items.push(ContentItem::course(format!("c{i}"), format!("Course {i}")));
        }
        for i in 0..ebooks {
            items.push(ContentItem::ebook(format!("e{i}"), format!("Book {i}")));
        }
        ContentStore::new(items)
    }

    #[test]
    fn badges_follow_progress() {
        assert_eq!(Badge::from(Progress::InProgress).tone, BadgeTone::Warning);
        assert_eq!(Badge::from(Progress::Completed).tone, BadgeTone::Success);
        let default = Badge::from(ContentItem::course("c", "t").progress());
        assert_eq!(default.label, "Not Started");
        assert_eq!(default.tone, BadgeTone::Secondary);
    }

    #[test]
    fn dashboard_samples_six_of_each() {
        let mut rng = StdRng::seed_from_u64(7);
        let view = dashboard(&store(10, 8), &mut rng, 6, None);
        assert_eq!(view.courses.items().len(), 6);
        assert_eq!(view.ebooks.items().len(), 6);
        assert!(view.courses.items().iter().all(|r| r.uid.starts_with('c')));
        assert!(view.ebooks.items().iter().all(|r| r.uid.starts_with('e')));
    }

    #[test]
    fn dashboard_placeholders_when_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let view = dashboard(&store(0, 0), &mut rng, 6, None);
        assert_eq!(view.courses, Rows::Empty(NO_COURSES));
        assert_eq!(view.ebooks, Rows::Empty(NO_TEXTBOOKS));
    }

    #[test]
    fn dashboard_shows_load_error_in_course_table() {
        let mut rng = StdRng::seed_from_u64(1);
        let view = dashboard(&store(0, 0), &mut rng, 6, Some(LOAD_FAILED));
        assert_eq!(view.courses, Rows::Error(LOAD_FAILED.to_string()));
    }

    #[test]
    fn library_lists_every_match_without_paging() {
        let store = store(30, 2);
        let view = library(&store, &FilterState::default(), ContentKind::Course, "Full Course Library");
        assert_eq!(view.cards.len(), 30);
        assert!(view.placeholder.is_none());
        assert!(!view.pagination_visible);
        assert_eq!(PaginationState::default().total_pages(30), 3);
    }

    #[test]
    fn library_placeholder_on_no_match() {
        let store = store(3, 0);
        let mut filter = FilterState::default();
        filter.set_search("nothing like this");
        let view = library(&store, &filter, ContentKind::Course, "Full Course Library");
        assert!(view.cards.is_empty());
        assert_eq!(view.placeholder, Some(NO_ITEMS));
    }

    #[test]
    fn category_choices_reflect_selection() {
        let mut filter = FilterState::default();
        filter.toggle_category("Art", true);
        let choices = category_choices(&["Art".into(), "Math".into()], &filter);
        assert!(choices[0].checked);
        assert!(!choices[1].checked);
    }
}
