//! Add-spot form draft and its validation

use std::fmt;

use thiserror::Error;

use super::spot::{Category, Coordinates};

pub const MAX_PHOTOS: usize = 5;
pub const MAX_DRAFT_RATING: u8 = 5;
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Required fields, in the order validation checks them
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Description,
    Story,
    Category,
    Photos,
    Location,
}

impl RequiredField {
    pub fn id(self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Description => "description",
            RequiredField::Story => "story",
            RequiredField::Category => "category",
            RequiredField::Photos => "photos",
            RequiredField::Location => "location",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RequiredField::Name => "Please enter a spot name",
            RequiredField::Description => "Please enter a description",
            RequiredField::Story => "Please share your discovery story",
            RequiredField::Category => "Please select a category",
            RequiredField::Photos => "Please add at least one photo",
            RequiredField::Location => "Please set the location",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{}", .field.message())]
pub struct ValidationError {
    pub field: RequiredField,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("a spot can have at most {} photos", MAX_PHOTOS)]
pub struct PhotoLimitReached;

/// Coordinates plus the address shown to the user
#[derive(Clone, Debug, PartialEq)]
pub struct SpotLocation {
    pub coordinates: Coordinates,
    pub address: String,
}

/// One line of a reverse-geocode answer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeocodedAddress {
    pub street: Option<String>,
    pub city: Option<String>,
}

/// `"<street>, <city>"` from the first geocode hit, with gaps filled in
pub fn format_address(addresses: &[GeocodedAddress]) -> String {
    let Some(first) = addresses.first() else {
        return UNKNOWN_LOCATION.to_string();
    };
    let street = first.street.as_deref().unwrap_or("");
    let city = first.city.as_deref().unwrap_or(UNKNOWN_LOCATION);
    let joined = format!("{street}, {city}");
    let trimmed = joined.trim();
    trimmed
        .strip_prefix(',')
        .map(str::trim_start)
        .unwrap_or(trimmed)
        .to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RatingKind {
    Uniqueness,
    Vibe,
    Safety,
    CrowdLevel,
}

impl RatingKind {
    pub const ALL: [RatingKind; 4] = [
        RatingKind::Uniqueness,
        RatingKind::Vibe,
        RatingKind::Safety,
        RatingKind::CrowdLevel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RatingKind::Uniqueness => "Uniqueness",
            RatingKind::Vibe => "Vibe",
            RatingKind::Safety => "Safety",
            RatingKind::CrowdLevel => "Crowd level",
        }
    }
}

/// The submitter's own scores, whole stars 0..=5
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DraftRatings {
    pub uniqueness: u8,
    pub vibe: u8,
    pub safety: u8,
    pub crowd_level: u8,
}

impl DraftRatings {
    pub fn get(&self, kind: RatingKind) -> u8 {
        match kind {
            RatingKind::Uniqueness => self.uniqueness,
            RatingKind::Vibe => self.vibe,
            RatingKind::Safety => self.safety,
            RatingKind::CrowdLevel => self.crowd_level,
        }
    }

    fn slot(&mut self, kind: RatingKind) -> &mut u8 {
        match kind {
            RatingKind::Uniqueness => &mut self.uniqueness,
            RatingKind::Vibe => &mut self.vibe,
            RatingKind::Safety => &mut self.safety,
            RatingKind::CrowdLevel => &mut self.crowd_level,
        }
    }
}

/// In-progress submission of a new spot
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormDraft {
    pub name: String,
    pub description: String,
    pub story: String,
    pub category: Option<Category>,
    pub photos: Vec<String>,
    pub location: Option<SpotLocation>,
    pub ratings: DraftRatings,
    pub tips: Vec<String>,
    /// Bumped on every reset so late results can tell their draft is gone
    generation: u64,
}

impl FormDraft {
    /// First missing required field, in the fixed check order
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = if self.name.trim().is_empty() {
            Some(RequiredField::Name)
        } else if self.description.trim().is_empty() {
            Some(RequiredField::Description)
        } else if self.story.trim().is_empty() {
            Some(RequiredField::Story)
        } else if self.category.is_none() {
            Some(RequiredField::Category)
        } else if self.photos.is_empty() {
            Some(RequiredField::Photos)
        } else if self.location.is_none() {
            Some(RequiredField::Location)
        } else {
            None
        };

        match missing {
            Some(field) => Err(ValidationError { field }),
            None => Ok(()),
        }
    }

    pub fn can_add_photo(&self) -> bool {
        self.photos.len() < MAX_PHOTOS
    }

    pub fn add_photo(&mut self, uri: String) -> Result<(), PhotoLimitReached> {
        if !self.can_add_photo() {
            return Err(PhotoLimitReached);
        }
        self.photos.push(uri);
        Ok(())
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<String> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    /// Append a trimmed tip; blank input is ignored
    pub fn add_tip(&mut self, text: &str) -> bool {
        let tip = text.trim();
        if tip.is_empty() {
            return false;
        }
        self.tips.push(tip.to_string());
        true
    }

    pub fn remove_tip(&mut self, index: usize) -> Option<String> {
        (index < self.tips.len()).then(|| self.tips.remove(index))
    }

    pub fn set_rating(&mut self, kind: RatingKind, value: u8) {
        *self.ratings.slot(kind) = value.min(MAX_DRAFT_RATING);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation.wrapping_add(1),
            ..Self::default()
        };
    }
}
