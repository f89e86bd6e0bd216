//! Spot records, community experiences and the closed category set

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label shown instead of the author for anonymous experiences
pub const ANONYMOUS_LABEL: &str = "Anonymous Explorer";

/// Upper bound of every rating scale in the app
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

/// Thematic vibe of a spot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Romantic,
    Serene,
    Creative,
    Adventure,
}

/// Display metadata for a category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Romantic,
        Category::Serene,
        Category::Creative,
        Category::Adventure,
    ];

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn info(self) -> CategoryInfo {
        match self {
            Category::Romantic => CategoryInfo {
                id: "romantic",
                name: "Romantic",
                color: "#EC4899",
                icon: "💕",
                description: "Perfect for couples and intimate moments",
            },
            Category::Serene => CategoryInfo {
                id: "serene",
                name: "Serene",
                color: "#059669",
                icon: "🧘",
                description: "Peaceful spots for meditation and reflection",
            },
            Category::Creative => CategoryInfo {
                id: "creative",
                name: "Creative",
                color: "#7C3AED",
                icon: "🎨",
                description: "Inspiring spaces for artists and creators",
            },
            Category::Adventure => CategoryInfo {
                id: "adventure",
                name: "Adventure",
                color: "#EA580C",
                icon: "🏃",
                description: "Exciting spots for thrill-seekers",
            },
        }
    }

    /// Step through `None -> each category -> None`, the order of the filter chips
    pub fn cycle(current: Option<Category>) -> Option<Category> {
        match current {
            None => Some(Category::ALL[0]),
            Some(category) => {
                let index = Category::ALL.iter().position(|c| *c == category).unwrap_or(0);
                Category::ALL.get(index + 1).copied()
            }
        }
    }

    /// Reverse of [`Category::cycle`]
    pub fn cycle_back(current: Option<Category>) -> Option<Category> {
        match current {
            None => Category::ALL.last().copied(),
            Some(category) => {
                let index = Category::ALL.iter().position(|c| *c == category).unwrap_or(0);
                index.checked_sub(1).map(|i| Category::ALL[i])
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Community sub-scores, each on a 0.0..=5.0 scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratings {
    pub uniqueness: f64,
    pub vibe: f64,
    pub safety: f64,
    pub crowd_level: f64,
}

impl Ratings {
    /// Labelled scores in display order
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("Uniqueness", self.uniqueness),
            ("Vibe", self.vibe),
            ("Safety", self.safety),
            ("Crowd level", self.crowd_level),
        ]
    }

    pub fn in_range(&self) -> bool {
        self.entries()
            .iter()
            .all(|(_, value)| (0.0..=MAX_RATING).contains(value))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
    pub likes: u32,
}

impl Experience {
    pub fn display_name(&self) -> &str {
        if self.is_anonymous {
            ANONYMOUS_LABEL
        } else {
            &self.user_name
        }
    }
}

/// A hidden spot: one point of interest in the discovery dataset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub story: String,
    #[serde(flatten)]
    pub location: Coordinates,
    pub category: Category,
    pub photos: Vec<String>,
    pub ratings: Ratings,
    pub overall_rating: f64,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
    pub experiences: Vec<Experience>,
    pub tips: Vec<String>,
}

impl Spot {
    pub fn experience_label(&self) -> String {
        let count = self.experiences.len();
        format!("{} experience{}", count, if count == 1 { "" } else { "s" })
    }
}
