// File: src/tui/mod.rs
//! Terminal front end. The homepage controller lives on the UI loop;
//! network work runs on spawned tasks and reports back over a channel.
pub mod action;
pub mod state;
pub mod view;

use crate::client::ApiClient;
use crate::config::Config;
use crate::controller::HomeController;
use crate::debounce::Debouncer;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{AppState, Focus, InputMode, LoginField};

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use log::{info, warn};
use ratatui::DefaultTerminal;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

pub async fn run(config: Config) -> Result<()> {
    let client = Arc::new(ApiClient::from_config(&config).context("creating API client")?);
    info!("Connecting to {}", client.base_url());

    let controller = HomeController::new(client.clone())
        .with_sample_size(config.dashboard_sample_size)
        .with_page_size(config.items_per_page);
    let debouncer = Debouncer::from_millis(config.search_debounce_ms);

    let (action_tx, action_rx) = unbounded_channel::<Action>();
    let (event_tx, event_rx) = unbounded_channel::<AppEvent>();
    tokio::spawn(network_actor(client, action_rx, event_tx.clone()));

    let mut terminal = ratatui::init();
    let result = App {
        controller,
        debouncer,
        action_tx,
        event_tx,
    }
    .run(&mut terminal, event_rx)
    .await;
    ratatui::restore();
    result
}

/// Runs each request on its own task so content and session load in
/// parallel. The CSRF token is primed before anything else goes out.
async fn network_actor(
    client: Arc<ApiClient>,
    mut rx: UnboundedReceiver<Action>,
    tx: UnboundedSender<AppEvent>,
) {
    client.prime_csrf().await;

    while let Some(action) = rx.recv().await {
        let client = client.clone();
        let tx = tx.clone();
        match action {
            Action::Quit => break,
            Action::FetchContent(generation) => {
                tokio::spawn(async move {
                    let result = client.fetch_content().await;
                    let _ = tx.send(AppEvent::ContentLoaded(generation, result));
                });
            }
            Action::CheckSession => {
                tokio::spawn(async move {
                    let result = client.check_session().await;
                    let _ = tx.send(AppEvent::SessionChecked(result));
                });
            }
            Action::Login { username, password } => {
                tokio::spawn(async move {
                    let result = client.login(&username, &password).await.map(|_| username);
                    let _ = tx.send(AppEvent::AuthFinished(result));
                });
            }
            Action::Register { username, password } => {
                tokio::spawn(async move {
                    let result = match client.register(&username, &password).await {
                        Ok(_) => client.login(&username, &password).await.map(|_| username),
                        Err(e) => Err(e),
                    };
                    let _ = tx.send(AppEvent::AuthFinished(result));
                });
            }
            Action::Logout => {
                tokio::spawn(async move {
                    if let Err(e) = client.logout().await {
                        warn!("Logout failed: {}", e);
                    }
                    let _ = tx.send(AppEvent::LoggedOut);
                });
            }
        }
    }
}

struct App {
    controller: HomeController,
    debouncer: Debouncer,
    action_tx: UnboundedSender<Action>,
    event_tx: UnboundedSender<AppEvent>,
}

impl App {
    async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        mut event_rx: UnboundedReceiver<AppEvent>,
    ) -> Result<()> {
        let mut state = AppState::new(self.controller.render());
        self.reload();

        let mut input = EventStream::new();
        loop {
            terminal.draw(|f| view::draw(f, &mut state))?;

            tokio::select! {
                maybe_event = input.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if !self.handle_key(&mut state, key) {
                                let _ = self.action_tx.send(Action::Quit);
                                break;
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e).context("reading terminal input"),
                        None => break,
                    }
                }
                Some(event) = event_rx.recv() => self.handle_event(&mut state, event),
            }
        }
        Ok(())
    }

    fn reload(&mut self) {
        let generation = self.controller.begin_content_fetch();
        let _ = self.action_tx.send(Action::FetchContent(generation));
        let _ = self.action_tx.send(Action::CheckSession);
    }

    fn handle_event(&mut self, state: &mut AppState, event: AppEvent) {
        match event {
            AppEvent::ContentLoaded(generation, result) => {
                if self.controller.apply_content(generation, result) {
                    state.loading = false;
                    state.set_screen(self.controller.render());
                    state.message = match &self.controller.state().load_error {
                        Some(err) => err.clone(),
                        None => format!("Loaded {} items", self.controller.state().store.len()),
                    };
                }
            }
            AppEvent::SessionChecked(result) => {
                self.controller.apply_session(result);
                // Only the chrome changes; keep the current dashboard sample.
                state.screen.nav = self.controller.state().nav.clone();
            }
            AppEvent::AuthFinished(Ok(username)) => {
                state.leave_login();
                state.message = format!("Logged in as {}", username);
                state.loading = true;
                self.reload();
            }
            AppEvent::AuthFinished(Err(e)) => {
                state.auth_error = Some(e.user_message());
            }
            AppEvent::LoggedOut => {
                self.controller.sign_out();
                state.message = "Logged out".to_string();
                state.input_buffer.clear();
                state.cursor_position = 0;
                state.loading = true;
                let generation = self.controller.begin_content_fetch();
                let _ = self.action_tx.send(Action::FetchContent(generation));
                state.set_screen(self.controller.render());
            }
            AppEvent::SearchSettled(text) => {
                state.set_screen(self.controller.set_search(&text));
            }
        }
    }

    /// Returns false when the user asked to quit.
    fn handle_key(&mut self, state: &mut AppState, key: KeyEvent) -> bool {
        match state.mode {
            InputMode::Searching => self.handle_search_key(state, key),
            InputMode::Login => self.handle_login_key(state, key),
            InputMode::Normal => return self.handle_normal_key(state, key),
        }
        true
    }

    fn handle_normal_key(&mut self, state: &mut AppState, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('?') => state.show_full_help = !state.show_full_help,
            KeyCode::Char('1') => self.route(state, ""),
            KeyCode::Char('2') => self.route(state, "#courses"),
            KeyCode::Char('3') => self.route(state, "#ebooks"),
            KeyCode::Tab => state.toggle_focus(),
            KeyCode::Char('j') | KeyCode::Down => state.next(),
            KeyCode::Char('k') | KeyCode::Up => state.previous(),
            KeyCode::Char('t') if state.screen.type_selector_visible => {
                let next = state.screen.type_filter.next();
                state.set_screen(self.controller.set_type(next));
                state.message = format!("Type: {}", next.label());
            }
            KeyCode::Char('/') if state.screen.filters_visible => {
                state.mode = InputMode::Searching;
                state.cursor_position = state.input_buffer.chars().count();
            }
            KeyCode::Char('c') if state.screen.filters_visible => {
                state.set_screen(self.controller.clear_categories());
            }
            KeyCode::Char(' ') | KeyCode::Enter if state.active_focus == Focus::Sidebar => {
                if let Some((name, checked)) = state.selected_category() {
                    state.set_screen(self.controller.toggle_category(&name, !checked));
                }
            }
            KeyCode::Enter => {
                if let Some(link) = state.selected_link() {
                    state.message = self.controller.client().url(&link);
                }
            }
            KeyCode::Char('r') => {
                state.loading = true;
                state.message = "Reloading...".to_string();
                self.reload();
            }
            KeyCode::Char('l') if !state.screen.nav.is_authenticated() => state.enter_login(),
            KeyCode::Char('o') if state.screen.nav.is_authenticated() => {
                let _ = self.action_tx.send(Action::Logout);
            }
            _ => {}
        }
        true
    }

    fn route(&mut self, state: &mut AppState, fragment: &str) {
        state.set_screen(self.controller.route(fragment));
        state.active_focus = Focus::Main;
        state.list_state.select(if state.main_len() > 0 { Some(0) } else { None });
    }

    fn handle_search_key(&mut self, state: &mut AppState, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => state.mode = InputMode::Normal,
            KeyCode::Char(c) => {
                state.enter_char(c);
                self.schedule_search(state.input_buffer.clone());
            }
            KeyCode::Backspace => {
                state.delete_char();
                self.schedule_search(state.input_buffer.clone());
            }
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            _ => {}
        }
    }

    /// Only the last keystroke inside the debounce window reaches the filter.
    fn schedule_search(&self, text: String) {
        let debouncer = self.debouncer.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            if debouncer.settle().await {
                let _ = tx.send(AppEvent::SearchSettled(text));
            }
        });
    }

    fn handle_login_key(&mut self, state: &mut AppState, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => state.leave_login(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                state.login_field = match state.login_field {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let _ = self.action_tx.send(Action::Register {
                    username: state.username.clone(),
                    password: state.password.clone(),
                });
            }
            KeyCode::Enter => {
                let _ = self.action_tx.send(Action::Login {
                    username: state.username.clone(),
                    password: state.password.clone(),
                });
            }
            KeyCode::Char(c) => state.login_buffer().push(c),
            KeyCode::Backspace => {
                state.login_buffer().pop();
            }
            _ => {}
        }
    }
}
