use crate::common::TestContext;
use crate::common::fixtures::Fixtures;
use kinoteka::CatalogError;
use kinoteka::models::{MovieId, Platform};
use kinoteka::services::{InitialLoad, ServerStatus, check_health, initialize_catalog};
use serde_json::json;

#[tokio::test]
async fn test_movie_details_view() {
    let mut ctx = TestContext::new().await;
    ctx.server
        .mock("GET", "/api/movies/7")
        .with_body(Fixtures::movie_detail(7, "Heat").to_string())
        .create_async()
        .await;

    let details = ctx.details();
    let view = details.load_movie(MovieId::new(7)).await.unwrap();

    assert_eq!(view.title, "Heat");
    assert_eq!(view.director.as_deref(), Some("Michael Mann"));
    assert_eq!(view.cast.as_deref(), Some("Al Pacino, Robert De Niro"));
    assert_eq!(view.duration.as_deref(), Some("170 min"));
    assert_eq!(view.genres, vec!["Drama", "Crime"]);

    let links: Vec<(Platform, &str)> = view
        .watch_links
        .iter()
        .map(|link| (link.platform, link.url.as_str()))
        .collect();
    assert_eq!(
        links,
        vec![
            (Platform::Netflix, "https://www.netflix.com/title/nf7"),
            (Platform::Imdb, "https://www.imdb.com/title/tt0000007"),
        ]
    );
}

#[tokio::test]
async fn test_unknown_movie() {
    let mut ctx = TestContext::new().await;
    ctx.server
        .mock("GET", "/api/movies/404")
        .with_status(404)
        .with_body(Fixtures::failure("Movie not found").to_string())
        .create_async()
        .await;

    let details = ctx.details();
    let err = details.load_movie(MovieId::new(404)).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(id) if id.get() == 404));
    assert!(details.current().is_none());
}

#[tokio::test]
async fn test_bootstrap_loads_genres_stats_and_first_page() {
    let mut ctx = TestContext::new().await;
    ctx.server
        .mock("GET", "/api/genres")
        .with_body(json!({"success": true, "genres": ["Drama", " Crime ", "Drama"]}).to_string())
        .create_async()
        .await;
    ctx.server
        .mock("GET", "/api/stats")
        .with_body(
            json!({
                "success": true,
                "stats": {
                    "total_movies": 45,
                    "average_rating": 7.2,
                    "year_range": {"min": 1972, "max": 2023},
                    "platforms": {"netflix": 20, "amazon": 15, "imdb": 45}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    ctx.server
        .mock("GET", "/api/movies")
        .match_query(mockito::Matcher::Any)
        .with_body(Fixtures::movies_page(&["Heat"], 1, 45, 3).to_string())
        .create_async()
        .await;

    let catalog = ctx.catalog();
    assert_eq!(initialize_catalog(&catalog).await, InitialLoad::Live);
    assert_eq!(catalog.genres(), vec!["Crime", "Drama"]);

    let stats = catalog.stats().unwrap();
    assert_eq!(stats.platforms.get(Platform::Amazon), 15);
    assert_eq!(stats.year_range.min, Some(1972));
    assert_eq!(catalog.list_result().total_pages, 3);
}

#[tokio::test]
async fn test_bootstrap_against_dead_server_enters_demo_mode() {
    let ctx = TestContext::new().await;
    // Nothing is mocked, so every request gets mockito's 501
    let catalog = ctx.catalog();

    let load = initialize_catalog(&catalog).await;
    assert!(load.is_demo());
    assert!(catalog.genres().is_empty());
    assert!(catalog.list_result().is_empty());
}

#[tokio::test]
async fn test_health_served_from_server_root() {
    let mut ctx = TestContext::new().await;
    let mock = ctx
        .server
        .mock("GET", "/health")
        .with_body(json!({"status": "healthy", "database": "connected", "movies_count": 45}).to_string())
        .create_async()
        .await;

    let status = check_health(ctx.backend.as_ref(), &ctx.event_bus).await;
    assert_eq!(
        status,
        ServerStatus::Healthy {
            movies_count: Some(45)
        }
    );
    mock.assert_async().await;
}
