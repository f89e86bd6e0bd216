//! Discovery query engine: search, category filter, stable sort and stats
//!
//! Everything here is a pure function of the dataset and the query, cheap
//! enough to rerun on every keystroke.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::spot::{Category, Spot, UnknownCategory};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown sort key `{0}`")]
    UnknownSortKey(String),
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}

/// Result ordering for the spot list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Highest `overall_rating` first
    #[default]
    Rating,
    /// Newest `submitted_at` first
    Recent,
    /// Most experiences first
    Trending,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Rating, SortKey::Recent, SortKey::Trending];

    pub fn next(self) -> Self {
        match self {
            SortKey::Rating => SortKey::Recent,
            SortKey::Recent => SortKey::Trending,
            SortKey::Trending => SortKey::Rating,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            SortKey::Rating => "rating",
            SortKey::Recent => "recent",
            SortKey::Trending => "trending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Rating => "Top Rated",
            SortKey::Recent => "Recent",
            SortKey::Trending => "Trending",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| QueryError::UnknownSortKey(s.to_string()))
    }
}

/// Inputs of the discovery list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiscoveryQuery {
    pub search_text: String,
    pub category: Option<Category>,
    pub sort: SortKey,
}

impl DiscoveryQuery {
    /// Build a query from untyped ids, rejecting anything unknown
    #[cfg(test)]
    pub fn parse(search_text: &str, category: Option<&str>, sort: &str) -> Result<Self, QueryError> {
        Ok(Self {
            search_text: search_text.to_string(),
            category: category.map(str::parse::<Category>).transpose()?,
            sort: sort.parse::<SortKey>()?,
        })
    }

    pub fn is_filtered(&self) -> bool {
        !self.search_text.is_empty() || self.category.is_some()
    }

    pub fn matches(&self, spot: &Spot) -> bool {
        self.matches_search(spot) && self.category.is_none_or(|c| spot.category == c)
    }

    fn matches_search(&self, spot: &Spot) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        spot.name.to_lowercase().contains(&needle) || spot.description.to_lowercase().contains(&needle)
    }
}

/// Filter then stably sort `spots`; ties keep dataset order
pub fn query<'a>(spots: &'a [Spot], params: &DiscoveryQuery) -> Vec<&'a Spot> {
    let mut results: Vec<&Spot> = spots.iter().filter(|s| params.matches(s)).collect();

    match params.sort {
        SortKey::Rating => results.sort_by(|a, b| b.overall_rating.total_cmp(&a.overall_rating)),
        SortKey::Recent => results.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at)),
        SortKey::Trending => results.sort_by(|a, b| b.experiences.len().cmp(&a.experiences.len())),
    }

    results
}

/// Aggregates shown in the stats strip above the list
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct QueryStats {
    pub count: usize,
    pub average_rating: f64,
    pub total_experiences: usize,
}

impl QueryStats {
    pub fn from_results(results: &[&Spot]) -> Self {
        Self {
            count: results.len(),
            average_rating: average_rating(results),
            total_experiences: total_experiences(results),
        }
    }
}

/// Mean `overall_rating`; 0.0 for an empty list
pub fn average_rating(spots: &[&Spot]) -> f64 {
    if spots.is_empty() {
        return 0.0;
    }
    spots.iter().map(|s| s.overall_rating).sum::<f64>() / spots.len() as f64
}

pub fn total_experiences(spots: &[&Spot]) -> usize {
    spots.iter().map(|s| s.experiences.len()).sum()
}

/// Per-category counts over the whole dataset, for the filter chip labels.
/// Every category is present, including ones with no spots.
pub fn category_counts(spots: &[Spot]) -> BTreeMap<Category, usize> {
    let mut counts: BTreeMap<Category, usize> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    for spot in spots {
        *counts.entry(spot.category).or_default() += 1;
    }
    counts
}
