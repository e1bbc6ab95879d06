//! Core data model: catalog records scraped from the site and the persisted
//! slug -> TMDB id mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Star rating in half-star steps, 0.5 to 5.0 stars.
///
/// The site encodes ratings as a `rated-N` marker with N in 1..=10; the
/// stored value is that half-star count. An unrated film is represented by
/// the absence of a `Rating`, never by a zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    /// Build a rating from the site's half-star count. Out-of-range markers
    /// are rejected.
    pub fn from_half_stars(n: u8) -> Option<Self> {
        (1..=10).contains(&n).then_some(Self(n))
    }

    pub fn half_stars(self) -> u8 {
        self.0
    }

    /// Rating on the 0-5 star scale.
    pub fn stars(self) -> f32 {
        f32::from(self.0) / 2.0
    }
}

/// One film on a member's ratings page.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchRecord {
    pub slug: String,
    pub rating: Option<Rating>,
}

impl WatchRecord {
    /// Star value with the wire convention for unrated films: 0.0.
    pub fn stars_or_unrated(&self) -> f32 {
        self.rating.map(Rating::stars).unwrap_or(0.0)
    }
}

/// Outward record for the watched projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedFilm {
    pub movie_id: i64,
    pub rating: f32,
}

/// Persisted slug -> TMDB id mapping row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmMapping {
    pub slug: String,
    pub tmdb_id: i64,
    pub resolved_at: DateTime<Utc>,
}

/// Outcome of page-count discovery for a member's list index page.
///
/// An unknown member is a first-class outcome, distinct from a member whose
/// list fits on a single page.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberIndex {
    Found {
        page_count: u32,
        display_name: Option<String>,
    },
    MemberNotFound,
}

/// Result of scraping one member's catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogOutcome<T> {
    Found(Vec<T>),
    MemberNotFound,
}

impl<T> CatalogOutcome<T> {
    /// Collapse the outcome into its items; an unknown member yields none.
    pub fn into_items(self) -> Vec<T> {
        match self {
            CatalogOutcome::Found(items) => items,
            CatalogOutcome::MemberNotFound => Vec::new(),
        }
    }

    pub fn is_member_found(&self) -> bool {
        matches!(self, CatalogOutcome::Found(_))
    }
}

/// A member list collection on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Watchlist,
    Films,
}

impl Collection {
    fn segment(self) -> &'static str {
        match self {
            Collection::Watchlist => "watchlist",
            Collection::Films => "films",
        }
    }

    /// Path of the collection's index page, relative to the site root.
    pub fn index_path(self, member: &str) -> String {
        format!("{member}/{}/", self.segment())
    }

    /// Path of one numbered page of the collection.
    pub fn page_path(self, member: &str, page: u32) -> String {
        format!("{member}/{}/page/{page}/", self.segment())
    }
}
