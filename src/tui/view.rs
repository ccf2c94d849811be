// File: src/tui/view.rs
use crate::color_utils;
use crate::render::{Badge, BadgeTone, Body, Card, DashboardView, LibraryView, Rows};
use crate::session::AuthAffordance;
use crate::tui::state::{AppState, Focus, InputMode, LoginField};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let full_help_text = vec![
        Line::from(vec![
            Span::styled(
                " GLOBAL ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Tab:Switch Focus  ?:Toggle Help  r:Reload  q:Quit"),
        ]),
        Line::from(vec![
            Span::styled(
                " VIEWS ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" 1:Dashboard  2:Courses  3:Ebooks  j/k:Up/Down  Enter:Open"),
        ]),
        Line::from(vec![
            Span::styled(
                " FILTER ",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" /:Search  t:Type  Space:Toggle Category  c:Clear Categories"),
        ]),
        Line::from(vec![
            Span::styled(
                " ACCOUNT ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" l:Login/Register  o:Logout"),
        ]),
    ];

    let footer_height = if state.show_full_help {
        Constraint::Length(full_help_text.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), footer_height])
        .split(f.area());

    draw_nav(f, state, v_chunks[0]);

    match &state.screen.body {
        Body::Dashboard(dashboard) => {
            let dashboard = dashboard.clone();
            draw_dashboard(f, state, &dashboard, v_chunks[1]);
        }
        Body::Library(library) => {
            let library = library.clone();
            let h_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
                .split(v_chunks[1]);
            draw_categories(f, state, h_chunks[0]);
            draw_library(f, state, &library, h_chunks[1]);
        }
    }

    draw_footer(f, state, &full_help_text, v_chunks[2]);

    if state.mode == InputMode::Login {
        draw_login(f, state);
    }
}

fn draw_nav(f: &mut Frame, state: &AppState, area: Rect) {
    let current = state.screen.view.fragment();
    let mut spans: Vec<Span> = Vec::new();
    for link in &state.screen.nav.links {
        let active = link.href.trim_start_matches('/') == current;
        let style = if active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} ", link.label), style));
        spans.push(Span::raw("|"));
    }
    spans.pop();

    if state.screen.type_selector_visible {
        spans.push(Span::styled(
            format!("   Type: {}", state.screen.type_filter.label()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let auth = match &state.screen.nav.auth {
        AuthAffordance::Welcome { username } => format!("Welcome, {}  [o] Logout ", username),
        AuthAffordance::LoginPrompt => "[l] Login / Register ".to_string(),
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let nav = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
            .title(" LearnShelf "),
    );
    let auth = Paragraph::new(auth)
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM));
    f.render_widget(nav, chunks[0]);
    f.render_widget(auth, chunks[1]);
}

fn badge_span(badge: Badge) -> Span<'static> {
    let color = match badge.tone {
        BadgeTone::Secondary => Color::DarkGray,
        BadgeTone::Warning => Color::Yellow,
        BadgeTone::Success => Color::Green,
    };
    Span::styled(format!("[{}]", badge.label), Style::default().fg(color))
}

fn rows_to_items<T>(rows: &Rows<T>, item: impl Fn(&T) -> ListItem<'static>) -> Vec<ListItem<'static>> {
    match rows {
        Rows::Items(items) => items.iter().map(item).collect(),
        Rows::Empty(msg) => vec![ListItem::new(Line::from(Span::styled(
            *msg,
            Style::default().fg(Color::DarkGray),
        )))],
        Rows::Error(msg) => vec![ListItem::new(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        )))],
    }
}

fn draw_dashboard(f: &mut Frame, state: &AppState, dashboard: &DashboardView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // One selection runs through both tables: courses first, then ebooks.
    let course_count = dashboard.courses.items().len();
    let selected = state.list_state.selected();
    let highlight = Style::default()
        .add_modifier(Modifier::BOLD)
        .bg(Color::Green)
        .fg(Color::Black);

    let mut course_items = rows_to_items(&dashboard.courses, |row| {
        ListItem::new(Line::from(vec![
            Span::raw(format!("{}  ", row.title)),
            badge_span(row.badge),
        ]))
    });
    let mut ebook_items = rows_to_items(&dashboard.ebooks, |row| {
        ListItem::new(Line::from(Span::raw(row.title.clone())))
    });

    if let Some(idx) = selected {
        if idx < course_count {
            if let Some(item) = course_items.get_mut(idx) {
                *item = item.clone().style(highlight);
            }
        } else if let Some(item) = ebook_items.get_mut(idx - course_count) {
            *item = item.clone().style(highlight);
        }
    }

    let main_style = if state.active_focus == Focus::Main {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let title = if state.loading {
        " Featured Courses (Loading...) ".to_string()
    } else {
        " Featured Courses ".to_string()
    };
    let courses = List::new(course_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(main_style),
    );
    let ebooks = List::new(ebook_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Featured Ebooks ")
            .border_style(main_style),
    );
    f.render_widget(courses, chunks[0]);
    f.render_widget(ebooks, chunks[1]);
}

fn draw_categories(f: &mut Frame, state: &mut AppState, area: Rect) {
    let sidebar_style = if state.active_focus == Focus::Sidebar {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = state
        .screen
        .categories
        .iter()
        .map(|c| {
            let check = if c.checked { "[x]" } else { "[ ]" };
            let (r, g, b) = color_utils::category_rgb(&c.name);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", check)),
                Span::styled("#", Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(c.name.clone()),
            ]))
        })
        .collect();

    let selected = state.screen.categories.iter().filter(|c| c.checked).count();
    let title = if selected > 0 {
        format!(" Categories ({} selected) ", selected)
    } else {
        " Categories ".to_string()
    };

    let sidebar = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(sidebar_style),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Blue),
        );
    f.render_stateful_widget(sidebar, area, &mut state.sidebar_state);
}

fn draw_library(f: &mut Frame, state: &mut AppState, library: &LibraryView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search_text = if state.screen.search_term.is_empty() {
        Span::styled("Press / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.screen.search_term.clone())
    };
    let search = Paragraph::new(Line::from(search_text))
        .block(Block::default().borders(Borders::ALL).title(" Search "));
    f.render_widget(search, chunks[0]);

    let inner_width = chunks[1].width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = match library.placeholder {
        Some(msg) => vec![ListItem::new(Span::styled(
            msg,
            Style::default().fg(Color::DarkGray),
        ))],
        None => library
            .cards
            .iter()
            .map(|card| card_item(card, inner_width))
            .collect(),
    };

    let main_style = if state.active_focus == Focus::Main {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let title = format!(" {} ({}) ", library.title, library.cards.len());

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(main_style),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Green)
                .fg(Color::Black),
        );
    f.render_stateful_widget(list, chunks[1], &mut state.list_state);
}

fn card_item(card: &Card, width: usize) -> ListItem<'static> {
    match card {
        Card::Course {
            title,
            description,
            badge,
            ..
        } => {
            let badge_len = badge.label.chars().count() + 2;
            let padding = width.saturating_sub(title.chars().count() + badge_len);
            let mut lines = vec![Line::from(vec![
                Span::styled(title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" ".repeat(padding)),
                badge_span(*badge),
            ])];
            if !description.is_empty() {
                let excerpt: String = description.chars().take(width.max(1)).collect();
                lines.push(Line::from(Span::styled(
                    excerpt,
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        }
        Card::Ebook { title, .. } => ListItem::new(Line::from(Span::styled(
            title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))),
    }
}

fn draw_footer(f: &mut Frame, state: &AppState, full_help_text: &[Line<'static>], area: Rect) {
    f.render_widget(Clear, area);

    if state.mode == InputMode::Searching {
        let input = Paragraph::new(format!("/ {}", state.input_buffer))
            .style(Style::default().fg(Color::Green))
            .block(Block::default().borders(Borders::ALL).title(" Search "))
            .wrap(Wrap { trim: false });
        f.render_widget(input, area);

        let cursor_x = area.x + 1 + 2 + state.cursor_position as u16;
        if cursor_x <= area.x + area.width.saturating_sub(2) {
            f.set_cursor_position((cursor_x, area.y + 1));
        }
        return;
    }

    if state.show_full_help {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Keyboard Shortcuts (Press ? to minimize) ")
            .border_style(Style::default().fg(Color::Cyan));
        let p = Paragraph::new(full_help_text.to_vec())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(p, h_chunks[0]);
        let status = Paragraph::new(state.message.clone())
            .style(Style::default().fg(Color::Cyan))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        f.render_widget(status, h_chunks[1]);
        return;
    }

    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );
    let help_str = match (state.active_focus, state.screen.view.is_dashboard()) {
        (_, true) => "1/2/3:View t:Type Ret:Open r:Reload ?:Help",
        (Focus::Sidebar, false) => "Spc:Toggle c:Clear Tab:Items /:Search ?:Help",
        (Focus::Main, false) => "Ret:Open /:Search Tab:Categories 1:Home ?:Help",
    };
    let help = Paragraph::new(help_str)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);
}

fn draw_login(f: &mut Frame, state: &AppState) {
    let area = centered_rect(50, 40, f.area());
    f.render_widget(Clear, area);

    let field_style = |field: LoginField| {
        if state.login_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Username: ", field_style(LoginField::Username)),
            Span::raw(state.username.clone()),
        ]),
        Line::from(vec![
            Span::styled("Password: ", field_style(LoginField::Password)),
            Span::raw("*".repeat(state.password.chars().count())),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter:Login  Ctrl+R:Register  Tab:Next field  Esc:Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(err) = &state.auth_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Login / Register ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
