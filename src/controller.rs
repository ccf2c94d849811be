// File: src/controller.rs
//! Homepage controller: owns the page state and turns backend answers and
//! user events into fresh [`Screen`]s.
use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::model::{ContentItem, SessionUser};
use crate::render::{self, Body, LOAD_FAILED, PaginationState, Screen};
use crate::session::NavBar;
use crate::store::{ContentStore, FilterState, TypeFilter};
use crate::view::ViewState;
use log::{debug, error, info, warn};
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: ContentStore,
    pub filter: FilterState,
    pub view: ViewState,
    pub pagination: PaginationState,
    pub nav: NavBar,
    pub session: Option<SessionUser>,
    /// Sidebar choices, rebuilt whenever the store is replaced.
    pub categories: Vec<String>,
    pub load_error: Option<String>,
}

pub struct HomeController {
    client: Arc<ApiClient>,
    state: AppState,
    latest_generation: u64,
    sample_size: usize,
}

impl HomeController {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: AppState::default(),
            latest_generation: 0,
            sample_size: 6,
        }
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_page_size(mut self, items_per_page: usize) -> Self {
        self.state.pagination = PaginationState::with_page_size(items_per_page);
        self
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// First load: token, then content and session side by side.
    pub async fn init(&mut self, fragment: &str) -> Screen {
        self.state.view = ViewState::from_fragment(fragment);
        self.client.prime_csrf().await;

        let generation = self.begin_content_fetch();
        let (content, session) = tokio::join!(self.client.fetch_content(), self.client.check_session());
        self.apply_content(generation, content);
        self.apply_session(session);
        self.render()
    }

    /// Stamps a new content request. Answers to older stamps are ignored.
    pub fn begin_content_fetch(&mut self) -> u64 {
        self.latest_generation += 1;
        self.latest_generation
    }

    /// Returns false when the answer was stale and nothing changed.
    pub fn apply_content(&mut self, generation: u64, result: Result<Vec<ContentItem>>) -> bool {
        if generation < self.latest_generation {
            debug!(
                "Dropping content response {} (latest is {})",
                generation, self.latest_generation
            );
            return false;
        }

        match result {
            Ok(items) => {
                info!("Loaded {} content items", items.len());
                self.state.store = ContentStore::new(items);
                self.state.load_error = None;
            }
            Err(e) => {
                error!("Error fetching content: {}", e);
                self.state.store.clear();
                self.state.load_error = Some(LOAD_FAILED.to_string());
            }
        }
        // Only the category list is rebuilt; selections stay as the user left them.
        self.state.categories = self.state.store.categories();
        true
    }

    /// Any failure, including transport errors, reads as logged out.
    pub fn apply_session(&mut self, result: Result<SessionUser>) {
        let user = match result {
            Ok(user) => Some(user),
            Err(ApiError::Status { status, .. }) => {
                debug!("No active session (HTTP {})", status);
                None
            }
            Err(e) => {
                warn!("Session check failed: {}", e);
                None
            }
        };
        self.state.nav.apply(user.as_ref());
        self.state.session = user;
    }

    pub async fn refresh_content(&mut self) -> bool {
        let generation = self.begin_content_fetch();
        let result = self.client.fetch_content().await;
        self.apply_content(generation, result)
    }

    pub async fn refresh_session(&mut self) {
        let result = self.client.check_session().await;
        self.apply_session(result);
    }

    pub fn render(&self) -> Screen {
        self.render_with(&mut rand::thread_rng())
    }

    pub fn render_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Screen {
        let state = &self.state;
        let body = match (state.view.library_kind(), state.view.library_title()) {
            (Some(kind), Some(title)) => Body::Library(render::library(&state.store, &state.filter, kind, title)),
            _ => Body::Dashboard(render::dashboard(
                &state.store,
                rng,
                self.sample_size,
                state.load_error.as_deref(),
            )),
        };

        Screen {
            view: state.view,
            nav: state.nav.clone(),
            filters_visible: state.view.shows_filters(),
            type_selector_visible: state.view.shows_type_selector(),
            type_filter: state.filter.type_filter,
            search_term: state.filter.search_term.clone(),
            categories: render::category_choices(&state.categories, &state.filter),
            body,
        }
    }

    pub fn set_search(&mut self, raw: &str) -> Screen {
        self.state.filter.set_search(raw);
        self.state.pagination.current_page = 1;
        self.render()
    }

    pub fn toggle_category(&mut self, category: &str, checked: bool) -> Screen {
        self.state.filter.toggle_category(category, checked);
        self.state.pagination.current_page = 1;
        self.render()
    }

    pub fn clear_categories(&mut self) -> Screen {
        self.state.filter.categories.clear();
        self.state.pagination.current_page = 1;
        self.render()
    }

    pub fn set_type(&mut self, type_filter: TypeFilter) -> Screen {
        self.state.filter.type_filter = type_filter;
        self.render()
    }

    pub fn route(&mut self, fragment: &str) -> Screen {
        let view = ViewState::from_fragment(fragment);
        if view != self.state.view {
            debug!("Routing to {:?}", view);
            self.state.pagination.current_page = 1;
        }
        self.state.view = view;
        self.render()
    }

    pub fn set_page(&mut self, page: usize) -> Screen {
        self.state.pagination.current_page = page.max(1);
        self.render()
    }

    /// On success the session and the content (which carries per-user
    /// progress) are both reloaded.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Screen> {
        self.client.login(username, password).await?;
        self.refresh_session().await;
        self.refresh_content().await;
        Ok(self.render())
    }

    /// Registers and then signs the new account in.
    pub async fn register(&mut self, username: &str, password: &str) -> Result<Screen> {
        self.client.register(username, password).await?;
        info!("Registered {}", username);
        self.login(username, password).await
    }

    pub async fn logout(&mut self) -> Screen {
        if let Err(e) = self.client.logout().await {
            warn!("Logout failed: {}", e);
        }
        self.sign_out();
        self.refresh_content().await;
        self.render()
    }

    /// Local half of a logout: back to an anonymous dashboard.
    pub fn sign_out(&mut self) {
        self.state.nav.apply(None);
        self.state.session = None;
        self.state.filter = FilterState::default();
        self.state.view = ViewState::Dashboard;
        self.state.pagination.current_page = 1;
    }
}
