//! End-to-end view flows
//!
//! Runs `App` against a `wiremock` backend: the analyze-store-refresh chain,
//! restaurant paging and review paging.

mod common;

use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eatratelove::app::{App, REVIEW_SAVED_TOAST};
use eatratelove::config::UiConfig;
use eatratelove::pagination::PageSize;
use eatratelove::session::{MemoryCredentialStore, SessionStore};

use common::{client, restaurant_page};

fn app(server: &MockServer) -> App {
    let api = client(&server.uri());
    let session = SessionStore::new(api.clone(), Box::new(MemoryCredentialStore::new()));
    App::new(api, session, &UiConfig::default())
}

#[tokio::test]
async fn test_analyze_stores_review_and_refreshes_first_page() {
    let server = MockServer::start().await;
    let text = "Amazing food and great service!";

    Mock::given(method("POST"))
        .and(path("/sentiment/analyze"))
        .and(body_json(serde_json::json!({ "review": text })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "review": text,
            "sentiment": "positive",
            "keywords": ["food", "service"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload/review"))
        .and(body_json(serde_json::json!({ "review": text })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 11,
            "review": text,
            "sentiment": "positive",
            "keywords": ["food", "service"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/upload/reviews"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{
                "id": 11,
                "review": text,
                "sentiment": "positive",
                "keywords": ["food", "service"],
                "created_at": "2024-05-01T12:00:00Z"
            }],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.review_input = text.to_string();
    assert!(app.analyze().await);

    let analysis = app.sentiment().expect("sentiment shown");
    assert_eq!(analysis.sentiment, "positive");
    assert_eq!(analysis.keywords, vec!["food", "service"]);
    assert_eq!(app.reviews()[0].review, text);
    assert_eq!(app.reviews_pager().offset(), 0);
    assert_eq!(app.take_toast().as_deref(), Some(REVIEW_SAVED_TOAST));
    assert!(app.error().is_none());
    assert!(!app.is_analyzing());

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        paths,
        vec!["/sentiment/analyze", "/upload/review", "/upload/reviews"]
    );
}

#[tokio::test]
async fn test_analyze_stops_after_failed_sentiment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sentiment/analyze"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload/review"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.review_input = "Cold naan".to_string();
    assert!(!app.analyze().await);
    assert_eq!(app.error(), Some("Sentiment request failed"));
    assert!(app.take_toast().is_none());
    assert!(!app.is_analyzing());
}

#[tokio::test]
async fn test_restaurant_paging_follows_total() {
    let server = MockServer::start().await;
    for (offset, name) in [("0", "First"), ("10", "Second"), ("20", "Third")] {
        Mock::given(method("GET"))
            .and(path("/yelp/restaurants"))
            .and(query_param("offset", offset))
            .respond_with(ResponseTemplate::new(200).set_body_json(restaurant_page(23, &[name])))
            .mount(&server)
            .await;
    }

    let mut app = app(&server);
    assert!(app.search_first().await);
    assert!(app.search_pager().prev_disabled());
    assert!(!app.search_pager().next_disabled());

    assert!(app.search_next().await);
    assert!(app.search_next().await);
    assert_eq!(app.search_pager().offset(), 20);
    assert_eq!(app.restaurants()[0].name.as_deref(), Some("Third"));
    assert!(app.search_pager().next_disabled());

    // Next is disabled on the last page: no request is sent.
    assert!(!app.search_next().await);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);

    assert!(app.search_prev().await);
    assert_eq!(app.restaurants()[0].name.as_deref(), Some("Second"));
}

#[tokio::test]
async fn test_failed_page_keeps_current_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/yelp/restaurants"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(restaurant_page(30, &["Only"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/yelp/restaurants"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.search_first().await;
    assert!(!app.search_next().await);

    assert_eq!(app.error(), Some("Restaurant search failed"));
    assert_eq!(app.search_pager().offset(), 0);
    assert_eq!(app.restaurants()[0].name.as_deref(), Some("Only"));
}

#[tokio::test]
async fn test_review_limit_change_reloads_from_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/upload/reviews"))
        .and(query_param("limit", "25"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [],
            "total": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app(&server);
    app.set_reviews_limit(PageSize::TwentyFive);
    assert!(app.refresh_reviews().await);
    assert_eq!(app.reviews_pager().total(), 40);
    assert!(!app.reviews_pager().next_disabled());
    assert_eq!(app.reviews_pager().page_count(), 2);
}
