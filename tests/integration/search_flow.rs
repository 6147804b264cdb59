use crate::common::TestContext;
use crate::common::fixtures::Fixtures;
use kinoteka::core::FetchOutcome;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_suggestion_selection_searches_by_title() {
    let mut ctx = TestContext::new().await;
    let suggestions = ctx
        .server
        .mock("GET", "/api/search/suggestions")
        .match_query(Matcher::UrlEncoded("q".into(), "the dark".into()))
        .with_body(
            json!({
                "success": true,
                "suggestions": [
                    {"id": 3, "title": "The Dark Knight", "release_year": 2008},
                    {"id": 9, "title": "The Dark Crystal", "year": 1982}
                ]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let list = ctx
        .server
        .mock("GET", "/api/movies")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search".into(), "The Dark Knight".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_body(Fixtures::movies_page(&["The Dark Knight"], 1, 1, 1).to_string())
        .expect(1)
        .create_async()
        .await;

    let search = ctx.search();
    let catalog = ctx.catalog();

    let found = search.update_query("the dark").await.unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].release_year, Some(1982));

    let outcome = catalog.select_suggestion(&found[0]).await;
    assert_eq!(outcome, FetchOutcome::Updated);
    assert_eq!(catalog.query().await.search(), "The Dark Knight");
    assert_eq!(catalog.list_result().items[0].title, "The Dark Knight");

    suggestions.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn test_single_character_never_hits_the_server() {
    let mut ctx = TestContext::new().await;
    let mock = ctx
        .server
        .mock("GET", "/api/search/suggestions")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let search = ctx.search();
    assert!(search.update_query("t").await.unwrap().is_empty());
    assert!(search.update_query("   ").await.unwrap().is_empty());
    mock.assert_async().await;
}
