mod identifiers;
pub mod platform;
pub mod query;

pub use identifiers::MovieId;
pub use platform::Platform;
pub use query::{ActiveFilter, FilterUpdate, QueryState, YearRange};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use platform::lenient_platforms;

/// A movie as it appears in list responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default)]
    pub canonical_key: Option<String>,
    pub title: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub imdb_rating: Option<f32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_platforms")]
    pub sources: BTreeSet<Platform>,
    #[serde(default)]
    pub num_sources: Option<u32>,
    #[serde(default)]
    pub netflix_id: Option<String>,
    #[serde(default)]
    pub amazon_id: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
}

impl MovieSummary {
    /// Platform-specific id, treating blank strings as absent.
    pub fn platform_id(&self, platform: Platform) -> Option<&str> {
        let id = match platform {
            Platform::Netflix => self.netflix_id.as_deref(),
            Platform::Amazon => self.amazon_id.as_deref(),
            Platform::Imdb => self.imdb_id.as_deref(),
        };
        id.map(str::trim).filter(|id| !id.is_empty())
    }
}

/// Per-platform metadata carried by the detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformMetadata {
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub listed_in: Option<String>,
}

/// Full movie record returned by `GET /movies/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(default)]
    pub imdb_votes: Option<u64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub netflix_director: Option<String>,
    #[serde(default)]
    pub netflix_cast: Option<String>,
    #[serde(default)]
    pub netflix_country: Option<String>,
    #[serde(default)]
    pub netflix_date_added: Option<String>,
    #[serde(default)]
    pub netflix_rating: Option<String>,
    #[serde(default)]
    pub netflix_duration: Option<String>,
    #[serde(default)]
    pub netflix_listed_in: Option<String>,
    #[serde(default)]
    pub amazon_director: Option<String>,
    #[serde(default)]
    pub amazon_cast: Option<String>,
    #[serde(default)]
    pub amazon_country: Option<String>,
    #[serde(default)]
    pub amazon_date_added: Option<String>,
    #[serde(default)]
    pub amazon_rating: Option<String>,
    #[serde(default)]
    pub amazon_duration: Option<String>,
    #[serde(default)]
    pub amazon_listed_in: Option<String>,
}

impl MovieDetail {
    pub fn platform_metadata(&self, platform: Platform) -> Option<PlatformMetadata> {
        let metadata = match platform {
            Platform::Netflix => PlatformMetadata {
                director: self.netflix_director.clone(),
                cast: self.netflix_cast.clone(),
                country: self.netflix_country.clone(),
                date_added: self.netflix_date_added.clone(),
                rating: self.netflix_rating.clone(),
                duration: self.netflix_duration.clone(),
                listed_in: self.netflix_listed_in.clone(),
            },
            Platform::Amazon => PlatformMetadata {
                director: self.amazon_director.clone(),
                cast: self.amazon_cast.clone(),
                country: self.amazon_country.clone(),
                date_added: self.amazon_date_added.clone(),
                rating: self.amazon_rating.clone(),
                duration: self.amazon_duration.clone(),
                listed_in: self.amazon_listed_in.clone(),
            },
            Platform::Imdb => return None,
        };
        (metadata != PlatformMetadata::default()).then_some(metadata)
    }
}

/// Search-as-you-type entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub id: Option<MovieId>,
    pub title: String,
    #[serde(default, alias = "year")]
    pub release_year: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCounts {
    #[serde(default)]
    pub netflix: Option<u64>,
    #[serde(default)]
    pub amazon: Option<u64>,
    #[serde(default)]
    pub imdb: Option<u64>,
}

impl PlatformCounts {
    pub fn get(&self, platform: Platform) -> u64 {
        match platform {
            Platform::Netflix => self.netflix,
            Platform::Amazon => self.amazon,
            Platform::Imdb => self.imdb,
        }
        .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_movies: u64,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub year_range: YearBounds,
    #[serde(default)]
    pub platforms: PlatformCounts,
}

/// Raw `/health` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub movies_count: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<chrono::NaiveDateTime>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// One page of the movie list plus totals, as returned by `GET /movies`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    pub movies: Vec<MovieSummary>,
    pub total: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Last successfully fetched page. Replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListResult {
    pub items: Vec<MovieSummary>,
    pub total_count: u64,
    pub total_pages: u32,
}

impl ListResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<MoviePage> for ListResult {
    fn from(page: MoviePage) -> Self {
        Self {
            items: page.movies,
            total_count: page.total,
            total_pages: page.total_pages,
        }
    }
}
