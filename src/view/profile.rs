//! Profile screen: stats, badges and the tabbed spot / activity lists

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Tabs},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ProfileTab, ProfileView, Spot, Toast, UiState};
use super::utils::{category_color, render_scrollable_list, toast_style};

pub fn render_profile_screen(frame: &mut Frame, area: Rect, ui_state: &UiState, view: &ProfileView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Header + stats
            Constraint::Length(3), // Badges
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Tab content
        ])
        .split(area);

    render_header(frame, chunks[0], view);
    render_badges(frame, chunks[1], view);

    let titles: Vec<Line> = ProfileTab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.title())))
        .collect();
    let selected = ProfileTab::ALL
        .iter()
        .position(|t| *t == ui_state.profile_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, chunks[2]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", ui_state.profile_tab.title()))
        .padding(Padding::horizontal(1));
    let items = match ui_state.profile_tab {
        ProfileTab::MySpots => spot_items(&view.my_spots),
        ProfileTab::Favorites => spot_items(&view.favorites),
        ProfileTab::Activity => activity_items(&view.activity),
    };

    if items.is_empty() {
        let empty = Paragraph::new("Nothing here yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, chunks[3]);
    } else {
        render_scrollable_list(frame, chunks[3], items, None, block);
    }
}

fn render_header(frame: &mut Frame, area: Rect, view: &ProfileView) {
    let profile = &view.profile;
    let stat = |value: u32, label: &str| {
        vec![
            Span::styled(value.to_string(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {}    ", label), Style::default().fg(Color::Gray)),
        ]
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(profile.name.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format!("[{}]", profile.level), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(profile.joined_label(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(
            [
                stat(profile.spots_discovered, "discovered"),
                stat(profile.spots_shared, "shared"),
                stat(profile.total_likes, "likes"),
            ]
            .concat(),
        ),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Profile ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(header, area);
}

fn render_badges(frame: &mut Frame, area: Rect, view: &ProfileView) {
    let profile = &view.profile;
    let mut spans = Vec::new();
    for badge in &profile.badges {
        let style = if badge.earned {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{} {}   ", badge.icon, badge.name), style));
    }

    let badges = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(
                " Badges {}/{} ",
                profile.earned_badges(),
                profile.badges.len()
            ))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(badges, area);
}

fn spot_items(spots: &[Spot]) -> Vec<ListItem<'static>> {
    spots
        .iter()
        .map(|spot| {
            let info = spot.category.info();
            ListItem::new(Line::from(vec![
                Span::styled(spot.name.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(
                    format!("{} {}", info.icon, info.name),
                    Style::default().fg(category_color(spot.category)),
                ),
                Span::styled(format!("  ★ {:.1}", spot.overall_rating), Style::default().fg(Color::Yellow)),
            ]))
        })
        .collect()
}

/// Most recent toast first
fn activity_items(activity: &[Toast]) -> Vec<ListItem<'static>> {
    activity
        .iter()
        .rev()
        .map(|toast| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    toast.shown_at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{:<8}", toast.kind.label()), toast_style(toast.kind)),
                Span::raw(toast.message.clone()),
            ]))
        })
        .collect()
}
