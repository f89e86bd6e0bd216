//! Spots screen: search, category chips, stats and the result list

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{Category, DiscoveryView, UiState};
use super::utils::{category_color, render_scrollable_list, star_bar, truncate_string};

pub fn render_spots_screen(frame: &mut Frame, area: Rect, ui_state: &UiState, view: &DiscoveryView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Length(1), // Category chips
            Constraint::Length(1), // Stats + sort
            Constraint::Min(0),    // Results
        ])
        .split(area);

    render_search(frame, chunks[0], ui_state, view);
    render_category_chips(frame, chunks[1], view);
    render_stats(frame, chunks[2], view);
    render_results(frame, chunks[3], ui_state, view);
}

fn render_search(frame: &mut Frame, area: Rect, ui_state: &UiState, view: &DiscoveryView) {
    let editing = ui_state.search_editing;
    let accent = if editing { Style::default().fg(Color::Green) } else { Style::default() };

    let text = match (view.search_text.is_empty(), editing) {
        (true, false) => Span::styled("Press / to search spots...", Style::default().fg(Color::DarkGray)),
        (_, true) => Span::styled(format!("{}▏", view.search_text), accent),
        (false, false) => Span::raw(view.search_text.clone()),
    };

    let search = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Discover hidden spots in {} ", view.city))
            .padding(Padding::horizontal(1))
            .border_style(accent),
    );
    frame.render_widget(search, area);
}

fn render_category_chips(frame: &mut Frame, area: Rect, view: &DiscoveryView) {
    let chip = |label: String, selected: bool, color: Color| {
        if selected {
            Span::styled(
                format!(" {} ", label),
                Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(color))
        }
    };

    let mut spans = vec![chip(
        format!("All ({})", view.total_spots),
        view.category.is_none(),
        Color::White,
    )];
    for category in Category::ALL {
        let info = category.info();
        let count = view.category_counts.get(&category).copied().unwrap_or(0);
        spans.push(Span::raw(" "));
        spans.push(chip(
            format!("{} {} ({})", info.icon, info.name, count),
            view.category == Some(category),
            category_color(category),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_stats(frame: &mut Frame, area: Rect, view: &DiscoveryView) {
    let mut spans = vec![
        Span::styled(format!(" {} spots", view.stats.count), Style::default().fg(Color::White)),
        Span::raw("  ·  "),
        Span::styled(
            format!("★ {:.1} avg", view.stats.average_rating),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  ·  "),
        Span::styled(
            format!("{} experiences", view.stats.total_experiences),
            Style::default().fg(Color::White),
        ),
        Span::raw("  ·  "),
        Span::styled(format!("Sort: {}", view.sort.label()), Style::default().fg(Color::Cyan)),
    ];

    if view.is_refreshing {
        spans.push(Span::styled("  ⟳ Refreshing...", Style::default().fg(Color::Yellow)));
    }
    if view.is_locating {
        spans.push(Span::styled("  ⌖ Locating...", Style::default().fg(Color::Yellow)));
    } else if let Some(position) = view.user_location {
        spans.push(Span::styled(format!("  ⌖ {}", position), Style::default().fg(Color::Green)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_results(frame: &mut Frame, area: Rect, ui_state: &UiState, view: &DiscoveryView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Spots ")
        .padding(Padding::horizontal(1));

    if view.results.is_empty() {
        let hint = if view.is_filtered {
            "No spots found\n\nTry adjusting your search or filters (x clears them)"
        } else {
            "No spots yet"
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = view
        .results
        .iter()
        .enumerate()
        .map(|(i, spot)| {
            let selected = i == ui_state.spot_selected;
            let info = spot.category.info();
            let name_style = if selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            let marker = if selected { "▶ " } else { "  " };

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, name_style),
                    Span::styled(truncate_string(&spot.name, width.saturating_sub(24)), name_style),
                    Span::raw("  "),
                    Span::styled(star_bar(spot.overall_rating), Style::default().fg(Color::Yellow)),
                    Span::styled(format!(" {:.1}", spot.overall_rating), Style::default().fg(Color::Yellow)),
                ]),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{} {}", info.icon, info.name),
                        Style::default().fg(category_color(spot.category)),
                    ),
                    Span::styled(
                        format!("  ·  {}  ·  {} photos", spot.experience_label(), spot.photos.len()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", truncate_string(&spot.description, width.saturating_sub(2))),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    render_scrollable_list(frame, area, items, Some(ui_state.spot_selected), block);
}
