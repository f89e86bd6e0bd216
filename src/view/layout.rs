//! Layout rendering (screen tabs, key hint bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{FormField, Screen, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, city: &str) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Screen tabs
            Constraint::Length(24), // City
        ])
        .split(area);

    let titles: Vec<Line> = Screen::ALL
        .iter()
        .map(|screen| Line::from(format!(" {} ", screen.title())))
        .collect();
    let selected = Screen::ALL
        .iter()
        .position(|s| *s == ui_state.screen)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Hidden Spots ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(tabs, chunks[0]);

    let city = Paragraph::new(format!("📍 {}", city))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" City "));
    frame.render_widget(city, chunks[1]);
}

/// One line of key hints for whatever currently has focus
pub fn render_hint_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let hints: &[(&str, &str)] = match (&ui_state.detail, ui_state.screen) {
        (Some(detail), _) if detail.composing => &[("Enter", "post"), ("Esc", "stop typing")],
        (Some(_), _) => &[
            ("←→", "photos"),
            ("a", "anonymous"),
            ("i", "comment"),
            ("Esc", "close"),
        ],
        (None, Screen::Spots) if ui_state.search_editing => &[("Enter/Esc", "done")],
        (None, Screen::Spots) => &[
            ("/", "search"),
            ("c", "category"),
            ("s", "sort"),
            ("x", "clear"),
            ("r", "refresh"),
            ("l", "locate me"),
            ("Enter", "open"),
        ],
        (None, Screen::AddSpot) if ui_state.form_field == FormField::Tips => &[
            ("Enter", "add tip"),
            ("Backspace", "remove last"),
            ("↑↓", "fields"),
        ],
        (None, Screen::AddSpot) if ui_state.form_field.accepts_text() => &[("type", "edit"), ("↑↓", "fields")],
        (None, Screen::AddSpot) => &[
            ("↑↓", "fields"),
            ("←→", "adjust"),
            ("g", "gallery"),
            ("c", "camera"),
            ("d", "remove photo"),
            ("Enter", "select"),
        ],
        (None, Screen::Profile) => &[("←→", "tabs")],
    };

    let mut spans = Vec::new();
    for (key, desc) in hints.iter().chain([("Tab", "screens"), ("?", "help")].iter()) {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Black).bg(Color::DarkGray),
        ));
        spans.push(Span::styled(format!(" {}  ", desc), Style::default().fg(Color::Gray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
