use std::sync::Arc;
use tracing::{debug, error, info};

use super::{Property, PropertySubscriber};
use crate::backends::CatalogBackend;
use crate::events::{CatalogEvent, EventBus, EventPayload, EventType, FetchOperation};
use crate::mapper::MovieDetailsView;
use crate::models::MovieId;
use crate::utils::CatalogResult;

/// Loads one movie at a time for the detail view.
#[derive(Debug)]
pub struct DetailsViewModel {
    backend: Arc<dyn CatalogBackend>,
    event_bus: Arc<EventBus>,
    current: Property<Option<MovieDetailsView>>,
    movie_id: Property<Option<MovieId>>,
    is_loading: Property<bool>,
    error: Property<Option<String>>,
}

impl DetailsViewModel {
    pub fn new(backend: Arc<dyn CatalogBackend>, event_bus: Arc<EventBus>) -> Self {
        Self {
            backend,
            event_bus,
            current: Property::new(None, "current"),
            movie_id: Property::new(None, "movie_id"),
            is_loading: Property::new(false, "is_loading"),
            error: Property::new(None, "error"),
        }
    }

    pub fn current(&self) -> Option<MovieDetailsView> {
        self.current.get()
    }

    pub fn subscribe_current(&self) -> PropertySubscriber<Option<MovieDetailsView>> {
        self.current.subscribe()
    }

    pub fn movie_id(&self) -> Option<MovieId> {
        self.movie_id.get()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    /// Fetch and map a movie. On failure the previously shown movie is cleared
    /// and the error message is kept for display.
    pub async fn load_movie(&self, id: MovieId) -> CatalogResult<MovieDetailsView> {
        self.is_loading.set(true);
        self.error.set(None);
        self.movie_id.set(Some(id));
        debug!("Loading details for movie {}", id);

        let result = self.backend.get_movie(id).await;
        self.is_loading.set(false);

        match result {
            Ok(detail) => {
                let view = MovieDetailsView::from(&detail);
                info!("Loaded details for '{}' ({})", view.title, id);
                self.current.set(Some(view.clone()));
                self.event_bus
                    .publish(CatalogEvent::new(
                        EventType::DetailsLoaded,
                        EventPayload::Details { id },
                    ))
                    .await;
                Ok(view)
            }
            Err(e) => {
                let message = e.user_message();
                error!("Failed to load movie {}: {}", id, message);
                self.current.set(None);
                self.error.set(Some(message.clone()));
                self.event_bus
                    .emit_fetch_failed(FetchOperation::Details, message)
                    .await;
                Err(e)
            }
        }
    }

    pub fn close(&self) {
        self.current.set(None);
        self.movie_id.set(None);
        self.error.set(None);
    }
}
