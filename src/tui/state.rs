use crate::render::{Body, Card, Screen};
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Searching,
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

pub struct AppState {
    pub screen: Screen,
    pub mode: InputMode,
    pub active_focus: Focus,

    // Search box
    pub input_buffer: String,
    pub cursor_position: usize,

    // Login dialog
    pub username: String,
    pub password: String,
    pub login_field: LoginField,
    pub auth_error: Option<String>,

    pub sidebar_state: ListState,
    pub list_state: ListState,

    pub message: String,
    pub loading: bool,
    pub show_full_help: bool,
}

impl AppState {
    pub fn new(screen: Screen) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            input_buffer: screen.search_term.clone(),
            cursor_position: screen.search_term.chars().count(),
            screen,
            mode: InputMode::Normal,
            active_focus: Focus::Main,
            username: String::new(),
            password: String::new(),
            login_field: LoginField::Username,
            auth_error: None,
            sidebar_state: ListState::default(),
            list_state,
            message: "Loading...".to_string(),
            loading: true,
            show_full_help: false,
        }
    }

    /// Swaps in a fresh frame and keeps the selections in range.
    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
        let len = self.main_len();
        clamp(&mut self.list_state, len);
        clamp(&mut self.sidebar_state, self.screen.categories.len());
    }

    pub fn cards(&self) -> &[Card] {
        match &self.screen.body {
            Body::Library(lib) => &lib.cards,
            Body::Dashboard(_) => &[],
        }
    }

    pub fn main_len(&self) -> usize {
        match &self.screen.body {
            Body::Library(lib) => lib.cards.len(),
            Body::Dashboard(d) => d.courses.items().len() + d.ebooks.items().len(),
        }
    }

    /// Link behind the highlighted row, if any.
    pub fn selected_link(&self) -> Option<String> {
        let idx = self.list_state.selected()?;
        match &self.screen.body {
            Body::Library(lib) => lib.cards.get(idx).map(|c| c.link().to_string()),
            Body::Dashboard(d) => {
                let courses = d.courses.items();
                if idx < courses.len() {
                    Some(courses[idx].link.clone())
                } else {
                    d.ebooks.items().get(idx - courses.len()).map(|e| e.link.clone())
                }
            }
        }
    }

    pub fn selected_category(&self) -> Option<(String, bool)> {
        let idx = self.sidebar_state.selected()?;
        self.screen
            .categories
            .get(idx)
            .map(|c| (c.name.clone(), c.checked))
    }

    pub fn next(&mut self) {
        match self.active_focus {
            Focus::Main => {
                let len = self.main_len();
                step(&mut self.list_state, len, 1)
            }
            Focus::Sidebar => step(&mut self.sidebar_state, self.screen.categories.len(), 1),
        }
    }

    pub fn previous(&mut self) {
        match self.active_focus {
            Focus::Main => {
                let len = self.main_len();
                step(&mut self.list_state, len, -1)
            }
            Focus::Sidebar => step(&mut self.sidebar_state, self.screen.categories.len(), -1),
        }
    }

    pub fn toggle_focus(&mut self) {
        self.active_focus = match self.active_focus {
            Focus::Main if self.screen.filters_visible => {
                if self.sidebar_state.selected().is_none() && !self.screen.categories.is_empty() {
                    self.sidebar_state.select(Some(0));
                }
                Focus::Sidebar
            }
            _ => Focus::Main,
        };
    }

    pub fn enter_login(&mut self) {
        self.mode = InputMode::Login;
        self.login_field = LoginField::Username;
        self.auth_error = None;
    }

    pub fn leave_login(&mut self) {
        self.mode = InputMode::Normal;
        self.password.clear();
        self.auth_error = None;
    }

    pub fn login_buffer(&mut self) -> &mut String {
        match self.login_field {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let byte_idx = byte_index(&self.input_buffer, self.cursor_position);
        self.input_buffer.insert(byte_idx, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let byte_idx = byte_index(&self.input_buffer, self.cursor_position - 1);
        self.input_buffer.remove(byte_idx);
        self.cursor_position -= 1;
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            self.cursor_position += 1;
        }
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn step(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(len as isize) as usize;
    state.select(Some(next));
}

fn clamp(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        Some(i) if i >= len => state.select(Some(len - 1)),
        None => state.select(Some(0)),
        _ => {}
    }
}
