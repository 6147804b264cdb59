use std::sync::Arc;
use tracing::{debug, warn};

use super::{Property, PropertySubscriber};
use crate::backends::CatalogBackend;
use crate::constants::MIN_SUGGESTION_QUERY_CHARS;
use crate::events::{CatalogEvent, EventBus, EventPayload, EventType, FetchOperation};
use crate::models::Suggestion;
use crate::utils::CatalogResult;

/// Search-as-you-type suggestions.
#[derive(Debug)]
pub struct SearchViewModel {
    backend: Arc<dyn CatalogBackend>,
    event_bus: Arc<EventBus>,
    query: Property<String>,
    suggestions: Property<Vec<Suggestion>>,
}

impl SearchViewModel {
    pub fn new(backend: Arc<dyn CatalogBackend>, event_bus: Arc<EventBus>) -> Self {
        Self {
            backend,
            event_bus,
            query: Property::new(String::new(), "query"),
            suggestions: Property::new(Vec::new(), "suggestions"),
        }
    }

    pub fn query(&self) -> String {
        self.query.get()
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.suggestions.get()
    }

    pub fn subscribe_suggestions(&self) -> PropertySubscriber<Vec<Suggestion>> {
        self.suggestions.subscribe()
    }

    /// Whether a query is long enough to ask the server for suggestions.
    pub fn is_searchable(query: &str) -> bool {
        query.trim().chars().count() >= MIN_SUGGESTION_QUERY_CHARS
    }

    /// Update the typed text and refresh suggestions. Short queries clear the
    /// list without a request.
    pub async fn update_query(&self, text: &str) -> CatalogResult<Vec<Suggestion>> {
        let query = text.trim().to_string();
        self.query.set(query.clone());

        if !Self::is_searchable(&query) {
            self.suggestions.set(Vec::new());
            return Ok(Vec::new());
        }

        match self.backend.search_suggestions(&query).await {
            Ok(suggestions) => {
                debug!("{} suggestions for '{}'", suggestions.len(), query);
                self.suggestions.set(suggestions.clone());
                self.event_bus
                    .publish(CatalogEvent::new(
                        EventType::SuggestionsUpdated,
                        EventPayload::Suggestions {
                            query,
                            count: suggestions.len(),
                        },
                    ))
                    .await;
                Ok(suggestions)
            }
            Err(e) => {
                // Stale suggestions are worse than none
                warn!("Failed to load suggestions for '{}': {}", query, e);
                self.suggestions.set(Vec::new());
                self.event_bus
                    .emit_fetch_failed(FetchOperation::Suggestions, e.user_message())
                    .await;
                Err(e)
            }
        }
    }

    pub fn clear(&self) {
        self.query.set(String::new());
        self.suggestions.set(Vec::new());
    }
}
