use crate::common::TestContext;
use crate::common::fixtures::Fixtures;
use kinoteka::core::FetchOutcome;
use kinoteka::events::{EventPayload, EventType, FetchOperation};
use kinoteka::models::{FilterUpdate, Platform, YearRange};
use mockito::Matcher;

fn page_query(page: &str) -> Matcher {
    Matcher::UrlEncoded("page".into(), page.into())
}

#[tokio::test]
async fn test_first_page_uses_canonical_query() {
    let mut ctx = TestContext::new().await;
    let mock = ctx
        .server
        .mock("GET", "/api/movies")
        .match_query(Matcher::Exact(
            "page=1&per_page=20&search=&genre=&min_rating=&sort_by=imdb_rating&sort_order=DESC\
             &sources=netflix&sources=amazon&sources=imdb"
                .into(),
        ))
        .with_body(Fixtures::movies_page(&["Heat", "Ronin"], 1, 45, 3).to_string())
        .expect(1)
        .create_async()
        .await;

    let catalog = ctx.catalog();
    assert_eq!(catalog.fetch_list().await, FetchOutcome::Updated);

    let result = catalog.list_result();
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.total_count, 45);
    assert_eq!(result.total_pages, 3);
    assert_eq!(catalog.results_label().await, "Showing 1-20 of 45 movies");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_paging_then_filtering_returns_to_first_page() {
    let mut ctx = TestContext::new().await;
    let first = ctx
        .server
        .mock("GET", "/api/movies")
        .match_query(Matcher::AllOf(vec![
            page_query("1"),
            Matcher::UrlEncoded("genre".into(), "".into()),
        ]))
        .with_body(Fixtures::movies_page(&["Heat"], 1, 45, 3).to_string())
        .create_async()
        .await;
    let second = ctx
        .server
        .mock("GET", "/api/movies")
        .match_query(page_query("2"))
        .with_body(Fixtures::movies_page(&["Ronin"], 2, 45, 3).to_string())
        .expect(1)
        .create_async()
        .await;
    let filtered = ctx
        .server
        .mock("GET", "/api/movies")
        .match_query(Matcher::AllOf(vec![
            page_query("1"),
            Matcher::UrlEncoded("genre".into(), "Crime".into()),
            Matcher::UrlEncoded("year_from".into(), "1990".into()),
            Matcher::UrlEncoded("sources".into(), "amazon".into()),
        ]))
        .with_body(Fixtures::movies_page(&["Collateral"], 1, 1, 1).to_string())
        .expect(1)
        .create_async()
        .await;

    let catalog = ctx.catalog();
    catalog.fetch_list().await;
    assert_eq!(catalog.next_page().await, Some(FetchOutcome::Updated));
    assert_eq!(catalog.query().await.page(), 2);
    assert_eq!(catalog.list_result().items[0].title, "Ronin");

    let outcome = catalog
        .set_filters(
            FilterUpdate::new()
                .genre("Crime")
                .year_range(Some(YearRange::since(1990)))
                .sources([Platform::Amazon]),
        )
        .await;
    assert_eq!(outcome, FetchOutcome::Updated);
    assert_eq!(catalog.query().await.page(), 1);
    assert_eq!(catalog.list_result().items[0].title, "Collateral");

    let pagination = catalog.pagination().await;
    assert!(!pagination.has_previous());
    assert!(!pagination.has_next());
    assert_eq!(catalog.next_page().await, None);

    first.assert_async().await;
    second.assert_async().await;
    filtered.assert_async().await;
}

#[tokio::test]
async fn test_failed_page_keeps_previous_result() {
    let mut ctx = TestContext::new().await;
    ctx.server
        .mock("GET", "/api/movies")
        .match_query(page_query("1"))
        .with_body(Fixtures::movies_page(&["Heat"], 1, 45, 3).to_string())
        .create_async()
        .await;
    ctx.server
        .mock("GET", "/api/movies")
        .match_query(page_query("2"))
        .with_status(500)
        .with_body(Fixtures::failure("database is locked").to_string())
        .create_async()
        .await;

    let catalog = ctx.catalog();
    let mut failures = ctx.event_bus.subscribe_to_types(vec![EventType::FetchFailed]);

    catalog.fetch_list().await;
    let before = catalog.list_result();

    let outcome = catalog.next_page().await;
    assert_eq!(
        outcome,
        Some(FetchOutcome::Failed("API error: database is locked".into()))
    );
    assert_eq!(catalog.list_result(), before);
    assert!(!catalog.is_fetching());

    let event = failures.recv().await.unwrap();
    assert_eq!(
        event.payload,
        EventPayload::Failure {
            operation: FetchOperation::List,
            message: "API error: database is locked".into()
        }
    );
}

#[tokio::test]
async fn test_malformed_payload_is_a_failure() {
    let mut ctx = TestContext::new().await;
    ctx.server
        .mock("GET", "/api/movies")
        .match_query(Matcher::Any)
        .with_body(r#"{"success": true, "movies": "not a list"}"#)
        .create_async()
        .await;

    let catalog = ctx.catalog();
    let outcome = catalog.fetch_list().await;
    assert!(matches!(outcome, FetchOutcome::Failed(ref message) if message.starts_with("Malformed")));
    assert!(catalog.list_result().is_empty());
}

#[tokio::test]
async fn test_truncated_page_keeps_previous_result() {
    let mut ctx = TestContext::new().await;
    ctx.server
        .mock("GET", "/api/movies")
        .match_query(page_query("1"))
        .with_body(Fixtures::movies_page(&["Heat"], 1, 45, 3).to_string())
        .create_async()
        .await;
    ctx.server
        .mock("GET", "/api/movies")
        .match_query(page_query("2"))
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let catalog = ctx.catalog();
    catalog.fetch_list().await;
    let before = catalog.list_result();

    let outcome = catalog.next_page().await;
    assert!(
        matches!(outcome, Some(FetchOutcome::Failed(ref message)) if message.starts_with("Malformed"))
    );
    assert_eq!(catalog.list_result(), before);
    assert_eq!(catalog.list_result().total_pages, 3);

    // The last good totals still bound navigation
    assert_eq!(catalog.query().await.page(), 2);
    assert!(catalog.pagination().await.has_previous());
}

#[tokio::test]
async fn test_concurrent_fetches_make_one_request() {
    let mut ctx = TestContext::new().await;
    let mock = ctx
        .server
        .mock("GET", "/api/movies")
        .match_query(Matcher::Any)
        .with_body(Fixtures::movies_page(&["Heat"], 1, 1, 1).to_string())
        .expect(1)
        .create_async()
        .await;

    let catalog = ctx.catalog();
    let (first, second) = tokio::join!(catalog.fetch_list(), catalog.fetch_list());

    assert_eq!(first, FetchOutcome::Updated);
    assert_eq!(second, FetchOutcome::Skipped);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_reset_filters_restores_all_sources() {
    let mut ctx = TestContext::new().await;
    let none_selected = ctx
        .server
        .mock("GET", "/api/movies")
        .match_query(Matcher::Regex("^page=1&per_page=20&search=heat&genre=&min_rating=&sort_by=imdb_rating&sort_order=DESC$".into()))
        .with_body(Fixtures::movies_page(&[], 1, 0, 0).to_string())
        .expect(1)
        .create_async()
        .await;
    let reset = ctx
        .server
        .mock("GET", "/api/movies")
        .match_query(Matcher::Regex("search=&.*sources=netflix&sources=amazon&sources=imdb$".into()))
        .with_body(Fixtures::movies_page(&["Heat"], 1, 1, 1).to_string())
        .expect(1)
        .create_async()
        .await;

    let catalog = ctx.catalog();
    catalog
        .set_filters(FilterUpdate::new().search("heat").sources(Vec::new()))
        .await;
    assert!(catalog.list_result().is_empty());
    assert_eq!(catalog.results_label().await, "Showing 1-0 of 0 movies");

    catalog.reset_filters().await;
    assert_eq!(catalog.list_result().items.len(), 1);
    assert!(catalog.query().await.active_filters().is_empty());

    none_selected.assert_async().await;
    reset.assert_async().await;
}
