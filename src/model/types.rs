//! Core UI state definitions

use super::form::RatingKind;
use super::profile::ProfileTab;
use super::query::DiscoveryQuery;
use super::spot::Coordinates;

/// Top-level screens, switched with Tab
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Spots,
    AddSpot,
    Profile,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Spots, Screen::AddSpot, Screen::Profile];

    pub fn next(self) -> Self {
        match self {
            Screen::Spots => Screen::AddSpot,
            Screen::AddSpot => Screen::Profile,
            Screen::Profile => Screen::Spots,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Spots => Screen::Profile,
            Screen::AddSpot => Screen::Spots,
            Screen::Profile => Screen::AddSpot,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Spots => "Spots",
            Screen::AddSpot => "Add Spot",
            Screen::Profile => "Profile",
        }
    }
}

/// Focusable rows of the add-spot form, top to bottom
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Description,
    Story,
    Category,
    Photos,
    Location,
    Rating(RatingKind),
    Tips,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::Name,
        FormField::Description,
        FormField::Story,
        FormField::Category,
        FormField::Photos,
        FormField::Location,
        FormField::Rating(RatingKind::Uniqueness),
        FormField::Rating(RatingKind::Vibe),
        FormField::Rating(RatingKind::Safety),
        FormField::Rating(RatingKind::CrowdLevel),
        FormField::Tips,
        FormField::Submit,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Clamped at the last row
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Clamped at the first row
    pub fn prev(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    /// Rows that take typed characters
    pub fn accepts_text(self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::Description | FormField::Story | FormField::Tips
        )
    }
}

/// State of the spot detail overlay
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DetailState {
    pub spot_id: String,
    pub photo_index: usize,
    pub comment: String,
    pub composing: bool,
    pub anonymous: bool,
}

/// Query inputs and loading flags of the Spots screen
#[derive(Clone, Debug, Default)]
pub struct DiscoveryState {
    pub query: DiscoveryQuery,
    pub is_refreshing: bool,
    pub user_location: Option<Coordinates>,
}

/// Navigation and input state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub screen: Screen,
    pub search_editing: bool,
    pub spot_selected: usize,
    pub detail: Option<DetailState>,
    pub form_field: FormField,
    pub photo_selected: usize,
    pub tip_input: String,
    pub profile_tab: ProfileTab,
    pub show_help_popup: bool,
}

impl UiState {
    /// True when key presses should be treated as typed text
    pub fn is_typing(&self) -> bool {
        if let Some(detail) = &self.detail {
            return detail.composing;
        }
        match self.screen {
            Screen::Spots => self.search_editing,
            Screen::AddSpot => self.form_field.accepts_text(),
            Screen::Profile => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_navigation_is_clamped() {
        assert_eq!(FormField::Name.prev(), FormField::Name);
        assert_eq!(FormField::Submit.next(), FormField::Submit);
        assert_eq!(FormField::Location.next(), FormField::Rating(RatingKind::Uniqueness));
        assert_eq!(FormField::Tips.prev(), FormField::Rating(RatingKind::CrowdLevel));
    }

    #[test]
    fn typing_mode_follows_focus() {
        let mut ui = UiState::default();
        assert!(!ui.is_typing());

        ui.search_editing = true;
        assert!(ui.is_typing());

        ui.screen = Screen::AddSpot;
        ui.form_field = FormField::Photos;
        assert!(!ui.is_typing());
        ui.form_field = FormField::Tips;
        assert!(ui.is_typing());

        ui.detail = Some(DetailState::default());
        assert!(!ui.is_typing());
    }

    #[test]
    fn screens_cycle_both_ways() {
        for screen in Screen::ALL {
            assert_eq!(screen.next().prev(), screen);
        }
    }
}
