//! Mock user profile shown on the Profile screen

use chrono::{DateTime, NaiveDate, Utc};

use super::dataset::SpotRepository;
use super::spot::Spot;

/// Number of dataset spots credited to the mock user
const SHARED_SPOT_COUNT: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub earned: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    MySpots,
    Favorites,
    Activity,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [ProfileTab::MySpots, ProfileTab::Favorites, ProfileTab::Activity];

    pub fn next(self) -> Self {
        match self {
            Self::MySpots => Self::Favorites,
            Self::Favorites => Self::Activity,
            Self::Activity => Self::MySpots,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::MySpots => Self::Activity,
            Self::Favorites => Self::MySpots,
            Self::Activity => Self::Favorites,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::MySpots => "My Spots",
            Self::Favorites => "Favorites",
            Self::Activity => "Activity",
        }
    }
}

#[derive(Clone, Debug)]
pub struct UserProfile {
    pub name: String,
    pub level: String,
    pub joined_at: DateTime<Utc>,
    pub spots_discovered: u32,
    pub spots_shared: u32,
    pub total_likes: u32,
    pub favorite_spots: Vec<String>,
    pub badges: Vec<Badge>,
}

impl UserProfile {
    pub fn demo() -> Self {
        Self {
            name: "Priya Sharma".to_string(),
            level: "Explorer".to_string(),
            joined_at: NaiveDate::from_ymd_opt(2023, 8, 15)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
                .unwrap_or_default(),
            spots_discovered: 12,
            spots_shared: 3,
            total_likes: 45,
            favorite_spots: vec!["2".to_string(), "3".to_string(), "4".to_string()],
            badges: vec![
                Badge { id: "first-spot", name: "First Discovery", icon: "🏃", earned: true },
                Badge { id: "photographer", name: "Photographer", icon: "📸", earned: true },
                Badge { id: "storyteller", name: "Storyteller", icon: "📖", earned: false },
                Badge { id: "local-guide", name: "Local Guide", icon: "🗺️", earned: false },
            ],
        }
    }

    /// "Joined August 2023"
    pub fn joined_label(&self) -> String {
        format!("Joined {}", self.joined_at.format("%B %Y"))
    }

    pub fn earned_badges(&self) -> usize {
        self.badges.iter().filter(|b| b.earned).count()
    }

    pub fn my_spots<'a>(&self, repo: &'a SpotRepository) -> Vec<&'a Spot> {
        repo.spots().iter().take(SHARED_SPOT_COUNT).collect()
    }

    /// Favorite spots in the order they were saved; unknown ids are skipped
    pub fn favorites<'a>(&self, repo: &'a SpotRepository) -> Vec<&'a Spot> {
        self.favorite_spots.iter().filter_map(|id| repo.get(id)).collect()
    }
}
