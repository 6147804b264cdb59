use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::Platform;
use crate::constants::DEFAULT_PAGE_SIZE;

/// Release year bounds. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct YearRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl YearRange {
    pub fn new(from: Option<i32>, to: Option<i32>) -> Self {
        Self { from, to }
    }

    pub fn between(from: i32, to: i32) -> Self {
        Self::new(Some(from), Some(to))
    }

    pub fn since(from: i32) -> Self {
        Self::new(Some(from), None)
    }

    pub fn until(to: i32) -> Self {
        Self::new(None, Some(to))
    }

    /// Parse a year selector value. An empty selector means no range at all.
    pub fn parse_selector(value: &str) -> Result<Option<YearRange>, InvalidYearRange> {
        if value.trim().is_empty() {
            Ok(None)
        } else {
            value.parse().map(Some)
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (Some(from), Some(to)) => write!(f, "{}-{}", from, to),
            (Some(from), None) => write!(f, "{}-", from),
            (None, Some(to)) => write!(f, "-{}", to),
            (None, None) => write!(f, "any"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidYearRange(pub String);

impl fmt::Display for InvalidYearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid year range '{}' (expected FROM-TO, FROM- or -TO)", self.0)
    }
}

impl std::error::Error for InvalidYearRange {}

impl FromStr for YearRange {
    type Err = InvalidYearRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidYearRange(s.to_string());
        let bound = |part: &str| -> Result<Option<i32>, InvalidYearRange> {
            let part = part.trim();
            if part.is_empty() {
                Ok(None)
            } else {
                part.parse().map(Some).map_err(|_| invalid())
            }
        };

        // A bare year behaves like an open-ended lower bound
        let (from, to) = s.trim().split_once('-').unwrap_or((s.trim(), ""));
        Ok(YearRange::new(bound(from)?, bound(to)?))
    }
}

/// Partial filter change. Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub year_range: Option<Option<YearRange>>,
    pub min_rating: Option<Option<f32>>,
    pub sources: Option<BTreeSet<Platform>>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn year_range(mut self, range: Option<YearRange>) -> Self {
        self.year_range = Some(range);
        self
    }

    pub fn min_rating(mut self, rating: Option<f32>) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn sources(mut self, sources: impl IntoIterator<Item = Platform>) -> Self {
        self.sources = Some(sources.into_iter().collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One entry of the active filter summary shown next to the results.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveFilter {
    Search(String),
    Genre(String),
    Years(YearRange),
    MinRating(f32),
    Platforms { selected: usize, total: usize },
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::Search(search) => write!(f, "Search: \"{}\"", search),
            ActiveFilter::Genre(genre) => write!(f, "Genre: {}", genre),
            ActiveFilter::Years(range) => write!(f, "Years: {}", range),
            ActiveFilter::MinRating(rating) => write!(f, "Rating: {}+", rating),
            ActiveFilter::Platforms { selected, total } => {
                write!(f, "Platforms: {} of {}", selected, total)
            }
        }
    }
}

/// Pagination and filter intent driving the next list fetch.
///
/// The only mutators are [`QueryState::set_filters`], [`QueryState::reset_filters`]
/// and [`QueryState::request_page`]. Any filter change puts the state back on page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    page: u32,
    page_size: u32,
    search: String,
    genre: String,
    year_range: Option<YearRange>,
    min_rating: Option<f32>,
    sources: BTreeSet<Platform>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    /// A zero page size is clamped to 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            genre: String::new(),
            year_range: None,
            min_rating: None,
            sources: Platform::all(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn year_range(&self) -> Option<YearRange> {
        self.year_range
    }

    pub fn min_rating(&self) -> Option<f32> {
        self.min_rating
    }

    pub fn sources(&self) -> &BTreeSet<Platform> {
        &self.sources
    }

    pub fn set_filters(&mut self, update: FilterUpdate) {
        if let Some(search) = update.search {
            self.search = search.trim().to_string();
        }
        if let Some(genre) = update.genre {
            self.genre = genre.trim().to_string();
        }
        if let Some(year_range) = update.year_range {
            self.year_range = year_range;
        }
        if let Some(min_rating) = update.min_rating {
            self.min_rating = min_rating;
        }
        if let Some(sources) = update.sources {
            self.sources = sources;
        }
        self.page = 1;
    }

    pub fn reset_filters(&mut self) {
        *self = Self::new(self.page_size);
    }

    /// Move by `delta` pages. Out-of-range requests are ignored; returns whether
    /// the page changed.
    pub fn request_page(&mut self, delta: i64, total_pages: u32) -> bool {
        let candidate = i64::from(self.page).saturating_add(delta);
        if candidate >= 1 && candidate <= i64::from(total_pages) {
            // candidate fits in u32 because total_pages does
            self.page = candidate as u32;
            true
        } else {
            false
        }
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();
        if !self.search.is_empty() {
            active.push(ActiveFilter::Search(self.search.clone()));
        }
        if !self.genre.is_empty() {
            active.push(ActiveFilter::Genre(self.genre.clone()));
        }
        if let Some(range) = self.year_range {
            active.push(ActiveFilter::Years(range));
        }
        if let Some(rating) = self.min_rating {
            active.push(ActiveFilter::MinRating(rating));
        }
        if self.sources.len() < Platform::ALL.len() {
            active.push(ActiveFilter::Platforms {
                selected: self.sources.len(),
                total: Platform::ALL.len(),
            });
        }
        active
    }
}
