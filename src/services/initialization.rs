use tracing::{info, warn};

use super::demo;
use crate::core::viewmodels::{CatalogViewModel, FetchOutcome};
use crate::events::{CatalogEvent, EventPayload, EventType};
use crate::models::MovieSummary;

/// What the render layer should show after startup.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialLoad {
    /// Genres, stats and the first page came from the catalog.
    Live,
    /// The catalog could not be loaded; show the sample movies instead.
    Demo {
        movies: Vec<MovieSummary>,
        reason: String,
    },
}

impl InitialLoad {
    pub fn is_demo(&self) -> bool {
        matches!(self, InitialLoad::Demo { .. })
    }
}

/// Load genres, then stats, then the first page. The first failure stops the
/// sequence and switches to the demo dataset. The view model's list result is
/// left empty in that case; demo movies never enter it.
pub async fn initialize_catalog(view_model: &CatalogViewModel) -> InitialLoad {
    info!("Loading catalog from {}", view_model.backend().backend_id());

    match load_live(view_model).await {
        Ok(()) => {
            info!("Catalog ready");
            InitialLoad::Live
        }
        Err(reason) => {
            let movies = demo::sample_movies();
            warn!("Catalog unavailable ({}), falling back to demo data", reason);
            view_model
                .event_bus()
                .publish(CatalogEvent::new(
                    EventType::DemoModeEntered,
                    EventPayload::Demo {
                        item_count: movies.len(),
                    },
                ))
                .await;
            InitialLoad::Demo { movies, reason }
        }
    }
}

async fn load_live(view_model: &CatalogViewModel) -> Result<(), String> {
    view_model
        .load_genres()
        .await
        .map_err(|e| e.user_message())?;
    view_model
        .load_stats()
        .await
        .map_err(|e| e.user_message())?;

    match view_model.fetch_list().await {
        FetchOutcome::Failed(message) => Err(message),
        FetchOutcome::Updated | FetchOutcome::Skipped => Ok(()),
    }
}
