use serde::{Deserialize, Serialize};

use crate::models::MovieId;

/// Notification emitted by the catalog view models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEvent {
    pub id: String,
    pub event_type: EventType,
    pub payload: EventPayload,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl CatalogEvent {
    pub fn new(event_type: EventType, payload: EventPayload) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_type,
            payload,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A list fetch succeeded and the list result was replaced.
    ListUpdated,
    /// A fetch failed; prior data is still valid.
    FetchFailed,
    GenresLoaded,
    StatsLoaded,
    DetailsLoaded,
    SuggestionsUpdated,
    /// Bootstrap could not reach the catalog and fell back to sample data.
    DemoModeEntered,
    HealthChecked,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ListUpdated => "list.updated",
            EventType::FetchFailed => "fetch.failed",
            EventType::GenresLoaded => "genres.loaded",
            EventType::StatsLoaded => "stats.loaded",
            EventType::DetailsLoaded => "details.loaded",
            EventType::SuggestionsUpdated => "suggestions.updated",
            EventType::DemoModeEntered => "demo.entered",
            EventType::HealthChecked => "health.checked",
        }
    }
}

/// Which request a failure belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FetchOperation {
    List,
    Genres,
    Stats,
    Details,
    Suggestions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EventPayload {
    List {
        page: u32,
        total_count: u64,
        total_pages: u32,
        item_count: usize,
    },
    Failure {
        operation: FetchOperation,
        message: String,
    },
    Genres {
        count: usize,
    },
    Stats {
        total_movies: u64,
    },
    Details {
        id: MovieId,
    },
    Suggestions {
        query: String,
        count: usize,
    },
    Demo {
        item_count: usize,
    },
    Health {
        online: bool,
        movies_count: Option<u64>,
    },
}
