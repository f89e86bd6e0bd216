//! Add Spot screen: the submission form

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{FormField, FormView, RatingKind, UiState, MAX_PHOTOS};
use super::utils::{category_color, truncate_string};

const LABEL_WIDTH: usize = 14;

pub fn render_add_spot_screen(frame: &mut Frame, area: Rect, ui_state: &UiState, view: &FormView) {
    let focus = ui_state.form_field;
    let draft = &view.draft;
    let width = area.width.saturating_sub(LABEL_WIDTH as u16 + 8) as usize;
    let mut lines = Vec::new();

    let text_row = |field: FormField, label: &str, value: &str, placeholder: &str| {
        let focused = focus == field;
        let value = if focused {
            Span::styled(format!("{}▏", value), Style::default().fg(Color::Green))
        } else if value.is_empty() {
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(truncate_string(value, width))
        };
        Line::from(vec![label_span(label, focused), value])
    };

    lines.push(text_row(FormField::Name, "Name *", &draft.name, "Give this spot a memorable name"));
    lines.push(text_row(
        FormField::Description,
        "Description *",
        &draft.description,
        "What makes this spot special?",
    ));
    lines.push(text_row(FormField::Story, "Story *", &draft.story, "How did you discover it?"));

    let category = match draft.category {
        Some(category) => {
            let info = category.info();
            Span::styled(
                format!("◀ {} {} ▶  {}", info.icon, info.name, info.description),
                Style::default().fg(category_color(category)),
            )
        }
        None => Span::styled("◀ choose a category ▶", Style::default().fg(Color::DarkGray)),
    };
    lines.push(Line::from(vec![label_span("Category *", focus == FormField::Category), category]));

    let mut photos = vec![label_span(
        &format!("Photos {}/{} *", draft.photos.len(), MAX_PHOTOS),
        focus == FormField::Photos,
    )];
    if draft.photos.is_empty() {
        photos.push(Span::styled("g gallery · c camera", Style::default().fg(Color::DarkGray)));
    }
    for (i, _) in draft.photos.iter().enumerate() {
        let selected = focus == FormField::Photos && i == ui_state.photo_selected;
        let style = if selected {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default().fg(Color::Cyan)
        };
        photos.push(Span::styled(format!("[📷 {}]", i + 1), style));
        photos.push(Span::raw(" "));
    }
    if view.photo_busy {
        photos.push(Span::styled(" Loading photo...", Style::default().fg(Color::Yellow)));
    }
    lines.push(Line::from(photos));

    let location = if view.location_busy {
        Span::styled("Getting location...", Style::default().fg(Color::Yellow))
    } else {
        match &draft.location {
            Some(location) => Span::styled(
                format!("{} ({})", location.address, location.coordinates),
                Style::default().fg(Color::Green),
            ),
            None => Span::styled("Enter to use current location", Style::default().fg(Color::DarkGray)),
        }
    };
    lines.push(Line::from(vec![label_span("Location *", focus == FormField::Location), location]));

    lines.push(Line::from(""));
    for kind in RatingKind::ALL {
        let value = draft.ratings.get(kind) as usize;
        lines.push(Line::from(vec![
            label_span(kind.label(), focus == FormField::Rating(kind)),
            Span::styled(
                format!("{}{}", "★".repeat(value), "☆".repeat(5usize.saturating_sub(value))),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    lines.push(Line::from(""));
    let tips_focused = focus == FormField::Tips;
    let tip_input = if tips_focused {
        Span::styled(format!("{}▏", ui_state.tip_input), Style::default().fg(Color::Green))
    } else {
        Span::styled("Add a helpful tip", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(vec![label_span("Tips", tips_focused), tip_input]));
    for tip in &draft.tips {
        lines.push(Line::from(Span::styled(
            format!("{:width$}• {}", "", tip, width = LABEL_WIDTH + 2),
            Style::default().fg(Color::Gray),
        )));
    }

    lines.push(Line::from(""));
    let submit_style = match (focus == FormField::Submit, view.submitting) {
        (_, true) => Style::default().fg(Color::Yellow),
        (true, false) => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        (false, false) => Style::default().fg(Color::Green),
    };
    let submit_label = if view.submitting { " Submitting... " } else { " Submit Hidden Spot " };
    lines.push(Line::from(vec![
        Span::raw(format!("{:width$}", "", width = LABEL_WIDTH + 2)),
        Span::styled(submit_label, submit_style),
    ]));

    let form = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Share a Hidden Spot ")
            .padding(Padding::new(1, 1, 1, 0)),
    );
    frame.render_widget(form, area);
}

fn label_span(label: &str, focused: bool) -> Span<'static> {
    let marker = if focused { "▶" } else { " " };
    let style = if focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Span::styled(format!("{} {:<width$}", marker, label, width = LABEL_WIDTH), style)
}
