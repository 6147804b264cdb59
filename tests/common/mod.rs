pub mod fixtures;

use kinoteka::backends::{CatalogBackend, RestBackend};
use kinoteka::core::{CatalogViewModel, DetailsViewModel, SearchViewModel};
use kinoteka::events::EventBus;
use mockito::{Server, ServerGuard};
use std::sync::Arc;
use std::time::Duration;

/// A mock catalog server plus a client wired to it.
pub struct TestContext {
    pub server: ServerGuard,
    pub backend: Arc<dyn CatalogBackend>,
    pub event_bus: Arc<EventBus>,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let backend = RestBackend::new(&format!("{}/api", server.url()), Duration::from_secs(5))
            .expect("Failed to create backend");

        Self {
            server,
            backend: Arc::new(backend),
            event_bus: Arc::new(EventBus::new(32)),
        }
    }

    pub fn catalog(&self) -> CatalogViewModel {
        CatalogViewModel::new(self.backend.clone(), self.event_bus.clone(), 20)
    }

    pub fn details(&self) -> DetailsViewModel {
        DetailsViewModel::new(self.backend.clone(), self.event_bus.clone())
    }

    pub fn search(&self) -> SearchViewModel {
        SearchViewModel::new(self.backend.clone(), self.event_bus.clone())
    }
}
