// File: src/store.rs
use crate::model::{ContentItem, ContentKind};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Course,
    Ebook,
}

impl TypeFilter {
    pub fn matches(&self, kind: ContentKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Course => kind == ContentKind::Course,
            TypeFilter::Ebook => kind == ContentKind::Ebook,
        }
    }

    /// Order used by the type selector.
    pub fn next(&self) -> Self {
        match self {
            TypeFilter::All => TypeFilter::Course,
            TypeFilter::Course => TypeFilter::Ebook,
            TypeFilter::Ebook => TypeFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "All",
            TypeFilter::Course => "Courses",
            TypeFilter::Ebook => "Ebooks",
        }
    }
}

/// Search, category and type criteria for one page view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Lowercase and trimmed; empty means no search filter.
    pub search_term: String,
    /// Every selected category must be present on an item.
    pub categories: BTreeSet<String>,
    pub type_filter: TypeFilter,
}

impl FilterState {
    pub fn set_search(&mut self, raw: &str) {
        self.search_term = raw.trim().to_lowercase();
    }

    pub fn toggle_category(&mut self, category: &str, checked: bool) {
        if checked {
            self.categories.insert(category.to_string());
        } else {
            self.categories.remove(category);
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.search_term.is_empty() && self.categories.is_empty() && self.type_filter == TypeFilter::All
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        if !self.type_filter.matches(item.kind) {
            return false;
        }

        let term = self.search_term.trim().to_lowercase();
        let matches_search = term.is_empty()
            || item.title.to_lowercase().contains(&term)
            || item.description.to_lowercase().contains(&term)
            || item
                .categories
                .iter()
                .any(|c| c.to_lowercase().contains(&term));
        if !matches_search {
            return false;
        }

        self.categories.iter().all(|c| item.has_category(c))
    }
}

/// Pure filter pass; matches keep their store order.
pub fn filter<'a>(items: &'a [ContentItem], state: &FilterState) -> Vec<&'a ContentItem> {
    items.iter().filter(|item| state.matches(item)).collect()
}

/// Content collection for one page load. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentStore {
    items: Vec<ContentItem>,
}

impl ContentStore {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn filter(&self, state: &FilterState) -> Vec<&ContentItem> {
        filter(&self.items, state)
    }

    pub fn of_kind(&self, kind: ContentKind) -> Vec<&ContentItem> {
        self.items.iter().filter(|i| i.kind == kind).collect()
    }

    pub fn courses(&self) -> Vec<&ContentItem> {
        self.of_kind(ContentKind::Course)
    }

    pub fn ebooks(&self) -> Vec<&ContentItem> {
        self.of_kind(ContentKind::Ebook)
    }

    pub fn find(&self, uid: &str) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.uid == uid)
    }

    /// Sorted, deduplicated categories across the whole store.
    pub fn categories(&self) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|i| i.categories.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
