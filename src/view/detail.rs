//! Spot detail overlay: gallery, story, ratings, tips and experiences

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{DetailState, Spot, ANONYMOUS_LABEL};
use super::utils::{category_color, centered_rect, star_bar};

pub fn render_spot_detail(frame: &mut Frame, spot: &Spot, detail: &DetailState, author: &str) {
    let popup_area = centered_rect(frame.area(), 90, 34);
    frame.render_widget(Clear, popup_area);

    let info = spot.category.info();
    let accent = category_color(spot.category);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(format!(" {} {} ", info.icon, spot.name))
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Comment composer
        ])
        .split(inner);

    let body = Paragraph::new(body_lines(spot, detail))
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(Color::Black));
    frame.render_widget(body, chunks[0]);

    render_composer(frame, chunks[1], detail, author);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn body_lines(spot: &Spot, detail: &DetailState) -> Vec<Line<'static>> {
    let info = spot.category.info();
    let photo_count = spot.photos.len();
    let photo = spot
        .photos
        .get(detail.photo_index)
        .cloned()
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} {}", info.icon, info.name),
                Style::default().fg(category_color(spot.category)),
            ),
            Span::raw("  ·  "),
            Span::styled(
                format!("{} {:.1}", star_bar(spot.overall_rating), spot.overall_rating),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  ·  "),
            Span::styled(format!("📍 {}", spot.location), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(Span::styled(
            format!(
                "Photo {}/{}: {}",
                (detail.photo_index + 1).min(photo_count),
                photo_count,
                photo
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(spot.description.clone()),
        Line::from(""),
        heading("The story"),
        Line::from(Span::styled(spot.story.clone(), Style::default().fg(Color::Gray))),
        Line::from(""),
        heading("Ratings"),
    ];

    for (label, score) in spot.ratings.entries() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", label), Style::default().fg(Color::White)),
            Span::styled(
                format!("{} {:.1}", star_bar(score), score),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    if !spot.tips.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Tips"));
        for tip in &spot.tips {
            lines.push(Line::from(format!("  • {}", tip)));
        }
    }

    lines.push(Line::from(""));
    lines.push(heading(&format!("Experiences ({})", spot.experiences.len())));
    for experience in &spot.experiences {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}", experience.display_name()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}  ♥ {}", experience.created_at.format("%d %b %Y"), experience.likes),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(format!("    {}", experience.content)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Shared by {} on {}",
            spot.submitted_by,
            spot.submitted_at.format("%d %B %Y")
        ),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn render_composer(frame: &mut Frame, area: Rect, detail: &DetailState, author: &str) {
    let posting_as = if detail.anonymous { ANONYMOUS_LABEL } else { author };
    let style = if detail.composing {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = if detail.composing {
        format!("{}▏", detail.comment)
    } else if detail.comment.is_empty() {
        "Press i to share your experience...".to_string()
    } else {
        detail.comment.clone()
    };

    let composer = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(format!(" Posting as {} (a to toggle) ", posting_as)),
    );
    frame.render_widget(composer, area);
}
