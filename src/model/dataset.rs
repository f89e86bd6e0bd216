//! The read-only spot dataset and its load-time integrity checks

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use super::spot::{Category, Coordinates, Experience, Ratings, Spot, MAX_RATING};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("duplicate spot id `{0}`")]
    DuplicateSpot(String),
    #[error("spot `{0}` has no photos")]
    MissingPhotos(String),
    #[error("spot `{0}` has a rating outside 0.0..=5.0")]
    RatingOutOfRange(String),
    #[error("spot `{spot}` repeats experience id `{experience}`")]
    DuplicateExperience { spot: String, experience: String },
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable collection of spots, validated once when loaded
#[derive(Clone, Debug)]
pub struct SpotRepository {
    spots: Vec<Spot>,
}

impl SpotRepository {
    pub fn new(spots: Vec<Spot>) -> Result<Self, DatasetError> {
        let mut ids = HashSet::new();
        for spot in &spots {
            if !ids.insert(spot.id.as_str()) {
                return Err(DatasetError::DuplicateSpot(spot.id.clone()));
            }
            if spot.photos.is_empty() {
                return Err(DatasetError::MissingPhotos(spot.id.clone()));
            }
            if !spot.ratings.in_range() || !(0.0..=MAX_RATING).contains(&spot.overall_rating) {
                return Err(DatasetError::RatingOutOfRange(spot.id.clone()));
            }
            let mut experience_ids = HashSet::new();
            for experience in &spot.experiences {
                if !experience_ids.insert(experience.id.as_str()) {
                    return Err(DatasetError::DuplicateExperience {
                        spot: spot.id.clone(),
                        experience: experience.id.clone(),
                    });
                }
            }
        }

        tracing::debug!(spots = spots.len(), "Spot dataset validated");
        Ok(Self { spots })
    }

    /// Load a JSON array of spots (same shape as the built-in fixture)
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path)?;
        let spots: Vec<Spot> = serde_json::from_str(&content)?;
        Self::new(spots)
    }

    /// The built-in Gwalior dataset
    pub fn gwalior() -> Self {
        Self { spots: gwalior_spots() }
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn get(&self, id: &str) -> Option<&Spot> {
        self.spots.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .unwrap_or_default()
}

fn photos(ids: &[&str]) -> Vec<String> {
    ids.iter()
        .map(|id| format!("https://images.pexels.com/photos/{id}/pexels-photo-{id}.jpeg"))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn experience(
    id: &str,
    user_id: &str,
    user_name: &str,
    content: &str,
    is_anonymous: bool,
    created_at: DateTime<Utc>,
    likes: u32,
) -> Experience {
    Experience {
        id: id.to_string(),
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        content: content.to_string(),
        is_anonymous,
        created_at,
        likes,
    }
}

fn gwalior_spots() -> Vec<Spot> {
    vec![
        Spot {
            id: "1".to_string(),
            name: "Sunset Point at Gwalior Fort".to_string(),
            description: "A serene corner of the historic fort offering breathtaking sunset views over the city.".to_string(),
            story: "Discovered this magical spot during a solo exploration of the fort. The evening light filtering through the ancient stones creates an otherworldly atmosphere. Perfect for reflection and photography.".to_string(),
            location: Coordinates { latitude: 26.2295, longitude: 78.1808 },
            category: Category::Serene,
            photos: photos(&["1770809", "2387793", "1612461"]),
            ratings: Ratings { uniqueness: 4.5, vibe: 4.8, safety: 4.2, crowd_level: 2.1 },
            overall_rating: 4.4,
            submitted_by: "Arjun Sharma".to_string(),
            submitted_at: day(2024, 1, 15),
            experiences: vec![experience(
                "exp1",
                "user1",
                "Priya Singh",
                "Visited here with my partner last month. The sunset was absolutely stunning! We had the whole place to ourselves.",
                false,
                day(2024, 1, 20),
                12,
            )],
            tips: strings(&[
                "Best time to visit is 6-7 PM",
                "Carry water and snacks",
                "Wear comfortable shoes for the climb",
            ]),
        },
        Spot {
            id: "2".to_string(),
            name: "Phool Bagh Secret Garden".to_string(),
            description: "A hidden section of the famous Phool Bagh with ancient trees and peaceful corners.".to_string(),
            story: "While exploring Phool Bagh, I discovered this secluded area behind the main garden. The century-old trees create a natural canopy, and there's a small stone seat perfect for reading or meditation.".to_string(),
            location: Coordinates { latitude: 26.2124, longitude: 78.1772 },
            category: Category::Romantic,
            photos: photos(&["1366919", "1300510", "1002703"]),
            ratings: Ratings { uniqueness: 4.2, vibe: 4.6, safety: 4.5, crowd_level: 1.8 },
            overall_rating: 4.3,
            submitted_by: "Kavya Patel".to_string(),
            submitted_at: day(2024, 1, 18),
            experiences: vec![experience(
                "exp2",
                "user2",
                "Anonymous Explorer",
                "Perfect spot for a quiet date. The morning light filtering through the leaves is magical.",
                true,
                day(2024, 1, 25),
                8,
            )],
            tips: strings(&[
                "Early morning visits are best",
                "Bring a book or journal",
                "Respect the peaceful atmosphere",
            ]),
        },
        Spot {
            id: "3".to_string(),
            name: "Riverside Artist Corner".to_string(),
            description: "A creative space along the Chambal riverbank where local artists gather to paint and sketch.".to_string(),
            story: "Found this artistic community by accident while walking along the river. Local painters and sketchers meet here every evening to capture the changing light. The riverbank provides endless inspiration.".to_string(),
            location: Coordinates { latitude: 26.2020, longitude: 78.1950 },
            category: Category::Creative,
            photos: photos(&["1194420", "1109354", "1545743"]),
            ratings: Ratings { uniqueness: 4.7, vibe: 4.5, safety: 3.8, crowd_level: 2.5 },
            overall_rating: 4.4,
            submitted_by: "Rohit Verma".to_string(),
            submitted_at: day(2024, 1, 22),
            experiences: vec![experience(
                "exp3",
                "user3",
                "Meera Artist",
                "This place ignited my passion for painting again. The community here is so welcoming and inspiring.",
                false,
                day(2024, 1, 28),
                15,
            )],
            tips: strings(&[
                "Bring your own art supplies",
                "Join the evening art sessions",
                "Respect the river environment",
            ]),
        },
        Spot {
            id: "4".to_string(),
            name: "Tighra Dam Viewpoint".to_string(),
            description: "A lesser-known viewpoint offering panoramic views of Tighra Dam and surrounding hills.".to_string(),
            story: "While cycling around Tighra Dam, I discovered this elevated spot off the main road. The view is spectacular, especially during monsoon when the dam is full. It's perfect for photography and peaceful contemplation.".to_string(),
            location: Coordinates { latitude: 26.2850, longitude: 78.2100 },
            category: Category::Adventure,
            photos: photos(&["1770809", "1612461", "2387793"]),
            ratings: Ratings { uniqueness: 4.6, vibe: 4.3, safety: 4.0, crowd_level: 1.5 },
            overall_rating: 4.1,
            submitted_by: "Ankit Gupta".to_string(),
            submitted_at: day(2024, 1, 25),
            experiences: vec![experience(
                "exp4",
                "user4",
                "Travel Enthusiast",
                "Went here for sunrise photography. The mist over the water and the golden light were absolutely breathtaking!",
                false,
                day(2024, 2, 1),
                10,
            )],
            tips: strings(&[
                "Best during monsoon and winter",
                "Carry camera for amazing shots",
                "Visit during sunrise or sunset",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_fixture_passes_integrity_checks() {
        let fixture = SpotRepository::gwalior();
        let checked = SpotRepository::new(fixture.spots().to_vec()).expect("fixture is valid");
        assert_eq!(checked.len(), 4);
        assert_eq!(checked.get("3").map(|s| s.name.as_str()), Some("Riverside Artist Corner"));
        assert!(checked.get("99").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut spots = SpotRepository::gwalior().spots().to_vec();
        spots[1].id = "1".to_string();
        assert!(matches!(
            SpotRepository::new(spots),
            Err(DatasetError::DuplicateSpot(id)) if id == "1"
        ));
    }

    #[test]
    fn spot_without_photos_is_rejected() {
        let mut spots = SpotRepository::gwalior().spots().to_vec();
        spots[2].photos.clear();
        assert!(matches!(SpotRepository::new(spots), Err(DatasetError::MissingPhotos(_))));
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let mut spots = SpotRepository::gwalior().spots().to_vec();
        spots[0].ratings.safety = 5.5;
        assert!(matches!(SpotRepository::new(spots), Err(DatasetError::RatingOutOfRange(_))));

        let mut spots = SpotRepository::gwalior().spots().to_vec();
        spots[0].overall_rating = -1.0;
        assert!(matches!(SpotRepository::new(spots), Err(DatasetError::RatingOutOfRange(_))));
    }

    #[test]
    fn repeated_experience_ids_are_rejected() {
        let mut spots = SpotRepository::gwalior().spots().to_vec();
        let copy = spots[0].experiences[0].clone();
        spots[0].experiences.push(copy);
        assert!(matches!(
            SpotRepository::new(spots),
            Err(DatasetError::DuplicateExperience { .. })
        ));
    }

    #[test]
    fn dataset_loads_from_flat_json() {
        let json = serde_json::to_string(SpotRepository::gwalior().spots()).unwrap();
        assert!(json.contains("\"latitude\":26.2295"));
        assert!(json.contains("\"overallRating\":4.4"));

        let path = std::env::temp_dir().join(format!("hidden-spots-{}.json", std::process::id()));
        std::fs::write(&path, json).unwrap();
        let loaded = SpotRepository::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.spots(), SpotRepository::gwalior().spots());
    }
}
