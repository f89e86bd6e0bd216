//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared helpers (colours, stars, truncation, popup geometry)
//! - `layout`: Screen tabs and the key hint bar
//! - `spots`: Discovery screen
//! - `detail`: Spot detail overlay
//! - `add_spot`: Submission form
//! - `profile`: Profile screen
//! - `overlays`: Toast banner and help popup

mod utils;
mod layout;
mod spots;
mod detail;
mod add_spot;
mod profile;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{DiscoveryView, FormView, ProfileView, Screen, Spot, Toast, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        discovery: &DiscoveryView,
        form: &FormView,
        profile: &ProfileView,
        detail_spot: Option<&Spot>,
        toast: Option<&Toast>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Screen tabs + city
                Constraint::Min(0),    // Active screen
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, &discovery.city);

        match ui_state.screen {
            Screen::Spots => spots::render_spots_screen(frame, chunks[1], ui_state, discovery),
            Screen::AddSpot => add_spot::render_add_spot_screen(frame, chunks[1], ui_state, form),
            Screen::Profile => profile::render_profile_screen(frame, chunks[1], ui_state, profile),
        }

        layout::render_hint_bar(frame, chunks[2], ui_state);

        if let (Some(detail), Some(spot)) = (&ui_state.detail, detail_spot) {
            detail::render_spot_detail(frame, spot, detail, &profile.profile.name);
        }

        if let Some(toast) = toast {
            overlays::render_toast(frame, toast);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
