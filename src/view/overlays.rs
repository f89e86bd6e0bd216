//! Overlay rendering (toast banner, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{Toast, ToastKind};
use super::utils::{centered_rect, toast_style};

fn toast_icon(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "✓",
        ToastKind::Error => "✗",
        ToastKind::Info => "ℹ",
        ToastKind::Warning => "⚠",
    }
}

/// Banner pinned to the top right, above everything but the help popup
pub fn render_toast(frame: &mut Frame, toast: &Toast) {
    let area = frame.area();

    let popup_width = 56.min(area.width.saturating_sub(2));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize;
    let text = format!("{} {}", toast_icon(toast.kind), toast.message);
    let line_count = text.chars().count().div_ceil(inner_width) as u16;
    let popup_height = (2 + line_count.max(1)).min(area.height.saturating_sub(2));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width + 1),
        y: area.y + 1,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let style = toast_style(toast.kind);
    let banner = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(format!(" {} (Esc to dismiss) ", toast.kind.label()))
                .title_style(style.add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(banner, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let keybindings = [
        ("", "── General ──"),
        ("Tab / Shift+Tab", "Switch screen"),
        ("Esc", "Dismiss toast / close / stop typing"),
        ("?", "Toggle this help"),
        ("q / Ctrl+C", "Quit"),
        ("", ""),
        ("", "── Spots ──"),
        ("/", "Edit search"),
        ("c / C", "Next / previous category"),
        ("s", "Cycle sort (rating, recent, trending)"),
        ("x", "Clear filters"),
        ("r", "Refresh"),
        ("l", "Locate me"),
        ("↑ / ↓  Enter", "Select / open spot"),
        ("", ""),
        ("", "── Spot detail ──"),
        ("← / →", "Browse photos"),
        ("a", "Toggle anonymous"),
        ("i  Enter", "Write / post a comment"),
        ("", ""),
        ("", "── Add Spot ──"),
        ("↑ / ↓", "Move between fields"),
        ("← / →", "Category, ratings, photo"),
        ("g / c", "Photo from gallery / camera"),
        ("d", "Remove selected photo"),
        ("Enter", "Locate / add tip / submit"),
        ("Backspace", "Remove last tip (empty input)"),
        ("", ""),
        ("", "── Profile ──"),
        ("← / →", "Switch tab"),
    ];

    let popup_area = centered_rect(frame.area(), 62, keybindings.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^56}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (? or Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(help_text, popup_area);
}
