use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{Property, PropertySubscriber};
use crate::backends::CatalogBackend;
use crate::core::pagination::{self, Pagination};
use crate::core::query_encoder::encode;
use crate::events::{CatalogEvent, EventBus, EventPayload, EventType, FetchOperation};
use crate::models::{CatalogStats, FilterUpdate, ListResult, QueryState, Suggestion};
use crate::utils::CatalogResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Fetching,
}

/// What a call to [`CatalogViewModel::fetch_list`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list result was replaced.
    Updated,
    /// The request failed; the previous list result is untouched.
    Failed(String),
    /// Another fetch was already in flight, nothing was sent.
    Skipped,
}

/// Releases the single-flight slot when dropped, including on cancellation.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    status: &'a Property<FetchStatus>,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool, status: &'a Property<FetchStatus>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        status.set(FetchStatus::Fetching);
        Some(Self { flag, status })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.status.set(FetchStatus::Idle);
        self.flag.store(false, Ordering::Release);
    }
}

/// Owns the query state and the last list result for one catalog session, and
/// keeps them in sync with the remote list endpoint.
///
/// At most one list request is in flight at a time. Filter and page changes made
/// meanwhile are recorded immediately, but the caller has to fetch again once the
/// running request is done for them to show up.
#[derive(Debug)]
pub struct CatalogViewModel {
    backend: Arc<dyn CatalogBackend>,
    event_bus: Arc<EventBus>,
    query: Mutex<QueryState>,
    in_flight: AtomicBool,
    status: Property<FetchStatus>,
    list_result: Property<ListResult>,
    genres: Property<Vec<String>>,
    stats: Property<Option<CatalogStats>>,
}

impl CatalogViewModel {
    pub fn new(backend: Arc<dyn CatalogBackend>, event_bus: Arc<EventBus>, page_size: u32) -> Self {
        Self::with_query(backend, event_bus, QueryState::new(page_size))
    }

    pub fn with_query(
        backend: Arc<dyn CatalogBackend>,
        event_bus: Arc<EventBus>,
        query: QueryState,
    ) -> Self {
        Self {
            backend,
            event_bus,
            query: Mutex::new(query),
            in_flight: AtomicBool::new(false),
            status: Property::new(FetchStatus::Idle, "status"),
            list_result: Property::new(ListResult::default(), "list_result"),
            genres: Property::new(Vec::new(), "genres"),
            stats: Property::new(None, "stats"),
        }
    }

    pub fn backend(&self) -> &Arc<dyn CatalogBackend> {
        &self.backend
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Snapshot of the current query.
    pub async fn query(&self) -> QueryState {
        self.query.lock().await.clone()
    }

    pub fn list_result(&self) -> ListResult {
        self.list_result.get()
    }

    pub fn subscribe_list(&self) -> PropertySubscriber<ListResult> {
        self.list_result.subscribe()
    }

    pub fn status(&self) -> FetchStatus {
        self.status.get()
    }

    pub fn subscribe_status(&self) -> PropertySubscriber<FetchStatus> {
        self.status.subscribe()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn genres(&self) -> Vec<String> {
        self.genres.get()
    }

    pub fn stats(&self) -> Option<CatalogStats> {
        self.stats.get()
    }

    pub async fn pagination(&self) -> Pagination {
        let page = self.query.lock().await.page();
        Pagination::new(page, self.list_result.with(|r| r.total_pages))
    }

    /// `Showing S-E of T movies` for the current page.
    pub async fn results_label(&self) -> String {
        let (page, page_size) = {
            let query = self.query.lock().await;
            (query.page(), query.page_size())
        };
        let total = self.list_result.with(|r| r.total_count);
        pagination::results_label(page_size, page, total)
    }

    /// Merge a filter change (back to page 1) and fetch.
    pub async fn set_filters(&self, update: FilterUpdate) -> FetchOutcome {
        {
            let mut query = self.query.lock().await;
            query.set_filters(update);
            debug!("Filters updated: {:?}", query.active_filters());
        }
        self.fetch_list().await
    }

    pub async fn reset_filters(&self) -> FetchOutcome {
        self.query.lock().await.reset_filters();
        info!("Filters reset");
        self.fetch_list().await
    }

    pub async fn search(&self, text: impl Into<String>) -> FetchOutcome {
        self.set_filters(FilterUpdate::new().search(text)).await
    }

    pub async fn select_suggestion(&self, suggestion: &Suggestion) -> FetchOutcome {
        self.search(suggestion.title.clone()).await
    }

    /// Move by `delta` pages and fetch. Returns `None` when the target page is
    /// out of range, in which case nothing changes and nothing is fetched.
    pub async fn change_page(&self, delta: i64) -> Option<FetchOutcome> {
        let total_pages = self.list_result.with(|r| r.total_pages);
        let moved = self.query.lock().await.request_page(delta, total_pages);
        if !moved {
            debug!("Ignoring page change by {} (total pages {})", delta, total_pages);
            return None;
        }
        Some(self.fetch_list().await)
    }

    pub async fn next_page(&self) -> Option<FetchOutcome> {
        self.change_page(1).await
    }

    pub async fn previous_page(&self) -> Option<FetchOutcome> {
        self.change_page(-1).await
    }

    /// Fetch the list for the current query.
    ///
    /// A call made while another fetch is running returns
    /// [`FetchOutcome::Skipped`] without touching the network.
    pub async fn fetch_list(&self) -> FetchOutcome {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight, &self.status) else {
            debug!("List fetch already in flight, dropping request");
            return FetchOutcome::Skipped;
        };

        let request_id = Uuid::new_v4();
        let (page, params) = {
            let query = self.query.lock().await;
            (query.page(), encode(&query))
        };
        debug!(%request_id, "Fetching movie list: {}", params);
        let start = Instant::now();

        match self.backend.list_movies(&params).await {
            Ok(movie_page) => {
                if encode(&*self.query.lock().await) != params {
                    warn!(
                        %request_id,
                        "Query changed while the list request was in flight; applying the older response"
                    );
                }

                let result = ListResult::from(movie_page);
                let (total_count, total_pages, item_count) =
                    (result.total_count, result.total_pages, result.items.len());
                self.list_result.set(result);
                drop(guard);

                info!(
                    %request_id,
                    "Loaded page {} ({} of {} movies, {} pages) in {:?}",
                    page,
                    item_count,
                    total_count,
                    total_pages,
                    start.elapsed()
                );
                self.event_bus
                    .emit_list_updated(page, total_count, total_pages, item_count)
                    .await;
                FetchOutcome::Updated
            }
            Err(e) => {
                let message = e.user_message();
                drop(guard);

                error!(%request_id, "Failed to load movies: {}", message);
                self.event_bus
                    .emit_fetch_failed(FetchOperation::List, message.clone())
                    .await;
                FetchOutcome::Failed(message)
            }
        }
    }

    pub async fn load_genres(&self) -> CatalogResult<Vec<String>> {
        match self.backend.get_genres().await {
            Ok(genres) => {
                info!("Loaded {} genres", genres.len());
                self.genres.set(genres.clone());
                self.event_bus
                    .publish(CatalogEvent::new(
                        EventType::GenresLoaded,
                        EventPayload::Genres {
                            count: genres.len(),
                        },
                    ))
                    .await;
                Ok(genres)
            }
            Err(e) => {
                error!("Failed to load genres: {}", e);
                self.event_bus
                    .emit_fetch_failed(FetchOperation::Genres, e.user_message())
                    .await;
                Err(e)
            }
        }
    }

    pub async fn load_stats(&self) -> CatalogResult<CatalogStats> {
        match self.backend.get_stats().await {
            Ok(stats) => {
                info!(
                    "Catalog has {} movies, average rating {:.2}",
                    stats.total_movies, stats.average_rating
                );
                self.stats.set(Some(stats.clone()));
                self.event_bus
                    .publish(CatalogEvent::new(
                        EventType::StatsLoaded,
                        EventPayload::Stats {
                            total_movies: stats.total_movies,
                        },
                    ))
                    .await;
                Ok(stats)
            }
            Err(e) => {
                error!("Failed to load stats: {}", e);
                self.event_bus
                    .emit_fetch_failed(FetchOperation::Stats, e.user_message())
                    .await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query_encoder::ParameterSet;
    use crate::models::{
        HealthReport, MovieDetail, MovieId, MoviePage, MovieSummary, Platform, YearRange,
    };
    use crate::utils::CatalogError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Scripted backend: pops one prepared list response per call and can hold
    /// requests until released.
    #[derive(Debug, Default)]
    struct MockBackend {
        responses: std::sync::Mutex<VecDeque<CatalogResult<MoviePage>>>,
        requests: std::sync::Mutex<Vec<ParameterSet>>,
        list_calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl MockBackend {
        fn with_responses(responses: Vec<CatalogResult<MoviePage>>) -> Self {
            Self {
                responses: std::sync::Mutex::new(responses.into()),
                ..Default::default()
            }
        }

        fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        fn calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn last_request(&self) -> ParameterSet {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl CatalogBackend for MockBackend {
        async fn get_genres(&self) -> CatalogResult<Vec<String>> {
            Ok(vec!["Comedy".into(), "Drama".into()])
        }

        async fn get_stats(&self) -> CatalogResult<CatalogStats> {
            Err(CatalogError::Network("connection refused".into()))
        }

        async fn list_movies(&self, params: &ParameterSet) -> CatalogResult<MoviePage> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(params.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CatalogError::Api("no scripted response".into())))
        }

        async fn get_movie(&self, id: MovieId) -> CatalogResult<MovieDetail> {
            Err(CatalogError::NotFound(id))
        }

        async fn search_suggestions(&self, _query: &str) -> CatalogResult<Vec<Suggestion>> {
            Ok(Vec::new())
        }

        async fn health(&self) -> CatalogResult<HealthReport> {
            Err(CatalogError::Network("offline".into()))
        }

        fn backend_id(&self) -> &str {
            "mock"
        }
    }

    fn movie(id: i64, title: &str) -> MovieSummary {
        MovieSummary {
            id: MovieId::new(id),
            canonical_key: None,
            title: title.to_string(),
            release_year: Some(2000 + id as i32),
            imdb_rating: Some(7.0),
            genre: Some("Drama".into()),
            description: None,
            poster_url: None,
            sources: Platform::all(),
            num_sources: Some(3),
            netflix_id: None,
            amazon_id: None,
            imdb_id: None,
        }
    }

    fn page(titles: &[&str], total: u64, total_pages: u32) -> CatalogResult<MoviePage> {
        Ok(MoviePage {
            movies: titles
                .iter()
                .enumerate()
                .map(|(i, t)| movie(i as i64 + 1, t))
                .collect(),
            total,
            total_pages,
            page: None,
            per_page: None,
        })
    }

    fn view_model(backend: Arc<MockBackend>) -> CatalogViewModel {
        CatalogViewModel::new(backend, Arc::new(EventBus::new(16)), 20)
    }

    #[tokio::test]
    async fn test_successful_fetch_replaces_result() {
        let backend = Arc::new(MockBackend::with_responses(vec![
            page(&["Heat", "Ronin"], 45, 3),
            page(&["Alien"], 1, 1),
        ]));
        let vm = view_model(backend.clone());
        let mut events = vm.event_bus().subscribe();

        assert_eq!(vm.fetch_list().await, FetchOutcome::Updated);
        let result = vm.list_result();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total_count, 45);
        assert_eq!(result.total_pages, 3);
        assert_eq!(vm.status(), FetchStatus::Idle);

        let event = events.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::ListUpdated);

        // Replaced wholesale, not merged
        assert_eq!(vm.fetch_list().await, FetchOutcome::Updated);
        let result = vm.list_result();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].title, "Alien");
        assert_eq!(result.total_pages, 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_result() {
        let backend = Arc::new(MockBackend::with_responses(vec![
            page(&["Heat"], 1, 1),
            Err(CatalogError::Api("database is locked".into())),
        ]));
        let vm = view_model(backend.clone());
        let mut failures = vm.event_bus().subscribe_to_types(vec![EventType::FetchFailed]);

        vm.fetch_list().await;
        let before = vm.list_result();

        let FetchOutcome::Failed(message) = vm.fetch_list().await else {
            panic!("expected the second fetch to fail");
        };
        assert!(!message.is_empty());
        assert_eq!(vm.list_result(), before);
        assert_eq!(vm.status(), FetchStatus::Idle);
        assert!(!vm.is_fetching());

        let event = failures.recv().await.unwrap();
        assert_eq!(
            event.payload,
            EventPayload::Failure {
                operation: FetchOperation::List,
                message
            }
        );
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let backend = Arc::new(MockBackend::with_responses(vec![Err(CatalogError::Network(
            "timed out".into(),
        ))]));
        let vm = view_model(backend.clone());

        assert!(matches!(vm.fetch_list().await, FetchOutcome::Failed(_)));
        assert_eq!(backend.calls(), 1);
        assert_eq!(vm.list_result(), ListResult::default());
    }

    #[tokio::test]
    async fn test_concurrent_fetch_is_dropped() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(
            MockBackend::with_responses(vec![page(&["Heat"], 1, 1), page(&["Ronin"], 1, 1)])
                .gated(gate.clone()),
        );
        let vm = view_model(backend.clone());

        let (first, second, _) = tokio::join!(vm.fetch_list(), vm.fetch_list(), async {
            gate.notify_one();
        });

        assert_eq!(first, FetchOutcome::Updated);
        assert_eq!(second, FetchOutcome::Skipped);
        assert_eq!(backend.calls(), 1);
        assert_eq!(vm.list_result().items[0].title, "Heat");
        assert!(!vm.is_fetching());
    }

    #[tokio::test]
    async fn test_changes_during_fetch_are_recorded_without_second_request() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(
            MockBackend::with_responses(vec![page(&["Heat"], 1, 1), page(&["Alien"], 1, 1)])
                .gated(gate.clone()),
        );
        let vm = view_model(backend.clone());

        let (first, during, _) = tokio::join!(
            vm.fetch_list(),
            vm.set_filters(FilterUpdate::new().search("alien")),
            async {
                gate.notify_one();
            }
        );

        assert_eq!(first, FetchOutcome::Updated);
        assert_eq!(during, FetchOutcome::Skipped);
        assert_eq!(backend.calls(), 1);
        assert_eq!(vm.query().await.search(), "alien");

        // The caller re-issues once the first request is done
        gate.notify_one();
        assert_eq!(vm.fetch_list().await, FetchOutcome::Updated);
        assert_eq!(backend.last_request().get("search"), Some("alien"));
    }

    #[tokio::test]
    async fn test_filters_reset_page_and_are_sent() {
        let backend = Arc::new(MockBackend::with_responses(vec![
            page(&["Heat"], 45, 3),
            page(&["Ronin"], 45, 3),
            page(&["Alien"], 3, 1),
        ]));
        let vm = view_model(backend.clone());

        vm.fetch_list().await;
        assert!(vm.next_page().await.is_some());
        assert_eq!(vm.query().await.page(), 2);
        assert_eq!(backend.last_request().get("page"), Some("2"));

        vm.set_filters(
            FilterUpdate::new()
                .genre("Horror")
                .year_range(Some(YearRange::since(1979)))
                .sources([Platform::Amazon]),
        )
        .await;

        let request = backend.last_request();
        assert_eq!(vm.query().await.page(), 1);
        assert_eq!(request.get("page"), Some("1"));
        assert_eq!(request.get("genre"), Some("Horror"));
        assert_eq!(request.get("year_from"), Some("1979"));
        assert_eq!(request.get_all("sources"), vec!["amazon"]);
    }

    #[tokio::test]
    async fn test_out_of_range_page_change_is_ignored() {
        let backend = Arc::new(MockBackend::with_responses(vec![page(&["Heat"], 20, 1)]));
        let vm = view_model(backend.clone());

        // Before the first fetch the total is unknown
        assert_eq!(vm.next_page().await, None);
        assert_eq!(backend.calls(), 0);

        vm.fetch_list().await;
        assert_eq!(vm.next_page().await, None);
        assert_eq!(vm.previous_page().await, None);
        assert_eq!(backend.calls(), 1);
        assert_eq!(vm.query().await.page(), 1);
    }

    #[tokio::test]
    async fn test_pagination_and_labels() {
        let backend = Arc::new(MockBackend::with_responses(vec![
            page(&["Heat"], 45, 3),
            page(&["Ronin"], 45, 3),
            page(&["Alien"], 45, 3),
        ]));
        let vm = view_model(backend.clone());

        vm.fetch_list().await;
        vm.change_page(2).await;

        let pagination = vm.pagination().await;
        assert_eq!(pagination, Pagination::new(3, 3));
        assert!(pagination.has_previous());
        assert!(!pagination.has_next());
        assert_eq!(vm.results_label().await, "Showing 41-45 of 45 movies");
    }

    #[tokio::test]
    async fn test_reset_filters_restores_defaults() {
        let backend = Arc::new(MockBackend::with_responses(vec![
            page(&["Heat"], 1, 1),
            page(&["Heat"], 1, 1),
        ]));
        let vm = view_model(backend.clone());

        vm.set_filters(FilterUpdate::new().search("heat").sources(Vec::new())).await;
        assert!(!backend.last_request().contains("sources"));

        vm.reset_filters().await;
        assert_eq!(vm.query().await, QueryState::new(20));
        assert_eq!(
            backend.last_request().get_all("sources"),
            vec!["netflix", "amazon", "imdb"]
        );
    }

    #[tokio::test]
    async fn test_select_suggestion_searches_by_title() {
        let backend = Arc::new(MockBackend::with_responses(vec![page(&["Heat"], 1, 1)]));
        let vm = view_model(backend.clone());

        let suggestion = Suggestion {
            id: Some(MovieId::new(4)),
            title: "Heat".into(),
            release_year: Some(1995),
        };
        assert_eq!(vm.select_suggestion(&suggestion).await, FetchOutcome::Updated);
        assert_eq!(backend.last_request().get("search"), Some("Heat"));
    }

    #[tokio::test]
    async fn test_genres_and_stats() {
        let backend = Arc::new(MockBackend::default());
        let vm = view_model(backend);
        let mut failures = vm.event_bus().subscribe_to_types(vec![EventType::FetchFailed]);

        assert_eq!(vm.load_genres().await.unwrap(), vec!["Comedy", "Drama"]);
        assert_eq!(vm.genres(), vec!["Comedy", "Drama"]);

        assert!(vm.load_stats().await.is_err());
        assert_eq!(vm.stats(), None);
        let event = failures.recv().await.unwrap();
        assert!(matches!(
            event.payload,
            EventPayload::Failure {
                operation: FetchOperation::Stats,
                ..
            }
        ));
    }
}
