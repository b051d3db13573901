//! Backend client integration tests
//!
//! Verifies request shapes (paths, query strings, auth headers, multipart
//! bodies) and the normalized failure messages against a `wiremock` server.

mod common;

use std::io::Write;

use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eatratelove::api::SearchQuery;
use eatratelove::error::{ApiOperation, EatRateLoveError};
use eatratelove::pagination::PageSize;

use common::{client, restaurant_page};

#[tokio::test]
async fn test_search_omits_blank_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/yelp/restaurants"))
        .and(query_param_is_missing("q"))
        .and(query_param_is_missing("city"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(restaurant_page(2, &["A", "B"])))
        .expect(1)
        .mount(&server)
        .await;

    let query = SearchQuery {
        text: "  ".to_string(),
        city: String::new(),
        limit: PageSize::Ten,
        offset: 0,
    };
    let page = client(&server.uri())
        .search_restaurants(&query)
        .await
        .expect("search succeeds");
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("limit=10&offset=0"));
}

#[tokio::test]
async fn test_search_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/yelp/restaurants"))
        .and(query_param("q", "biryani"))
        .and(query_param("city", "Austin"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(restaurant_page(16, &["Biryani Pot"])))
        .expect(1)
        .mount(&server)
        .await;

    let query = SearchQuery {
        text: "biryani".to_string(),
        city: "Austin".to_string(),
        limit: PageSize::Five,
        offset: 15,
    };
    let page = client(&server.uri()).search_restaurants(&query).await.unwrap();
    assert_eq!(page.items[0].name.as_deref(), Some("Biryani Pot"));
}

#[tokio::test]
async fn test_failures_use_fixed_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sentiment/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model offline"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/upload/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/yelp/restaurants"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server.uri());

    let err = api.analyze_sentiment("hello").await.unwrap_err();
    assert_eq!(err.to_string(), "Sentiment request failed");
    assert_eq!(
        err.downcast_ref::<EatRateLoveError>()
            .and_then(EatRateLoveError::api_operation),
        Some(ApiOperation::AnalyzeSentiment)
    );

    let err = api.list_reviews(10, 0).await.unwrap_err();
    assert_eq!(err.to_string(), "List reviews failed");

    let err = api
        .search_restaurants(&SearchQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Restaurant search failed");

    // Failures are not retried: one request per call.
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_unreachable_backend_is_normalized() {
    // Nothing listens on port 9 on test hosts.
    let api = client("http://127.0.0.1:9");
    let err = api.upload_review("text").await.unwrap_err();
    assert_eq!(err.to_string(), "Upload review failed");
}

#[tokio::test]
async fn test_bearer_header_only_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [],
            "limit": 25,
            "offset": 0
        })))
        .mount(&server)
        .await;

    let api = client(&server.uri());
    api.get_feed(Some("tok-1"), 25, 0).await.unwrap();
    api.get_feed(None, 25, 0).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0]
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer tok-1")
    );
    assert!(requests[1].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_sentiment_request_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sentiment/analyze"))
        .and(body_json(serde_json::json!({ "review": "Great dosa" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "review": "Great dosa",
            "sentiment": "positive",
            "keywords": ["dosa"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analysis = client(&server.uri())
        .analyze_sentiment("Great dosa")
        .await
        .unwrap();
    assert_eq!(analysis.sentiment, "positive");
    assert_eq!(analysis.keywords, vec!["dosa".to_string()]);
}

#[tokio::test]
async fn test_create_post_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/create"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_json(serde_json::json!({
            "image_url": "http://cdn/x.png",
            "caption": "lunch"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "post": {
                "id": 42,
                "user_id": 1,
                "username": "asha",
                "caption": "lunch",
                "image_url": "http://cdn/x.png",
                "created_at": "2024-05-01T12:00:00Z"
            }
        })))
        .mount(&server)
        .await;

    let post = client(&server.uri())
        .create_post(Some("tok-1"), "http://cdn/x.png", "lunch")
        .await
        .unwrap();
    assert_eq!(post.id, 42);
    assert_eq!(post.caption, "lunch");
}

#[tokio::test]
async fn test_create_post_without_token_is_rejected_by_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/create"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .create_post(None, "http://cdn/x.png", "")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Create post failed");
}

#[tokio::test]
async fn test_upload_image_sends_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/media/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "url": "http://cdn/uploads/abc.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"\x89PNG fake").unwrap();

    let upload = client(&server.uri())
        .upload_image(Some("tok-1"), file.path())
        .await
        .unwrap();
    assert_eq!(upload.url, "http://cdn/uploads/abc.png");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("Content-Type: image/png") || body.contains("content-type: image/png"));
}

#[tokio::test]
async fn test_upload_image_rejects_unsupported_type_without_request() {
    let server = MockServer::start().await;
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();

    let err = client(&server.uri())
        .upload_image(Some("tok-1"), file.path())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unsupported image type"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_reviews_decodes_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/upload/reviews"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{
                "id": 7,
                "review": "Too salty",
                "sentiment": "negative",
                "keywords": ["salty"],
                "created_at": "2024-05-01 09:30:00"
            }],
            "total": 6
        })))
        .mount(&server)
        .await;

    let page = client(&server.uri()).list_reviews(5, 5).await.unwrap();
    assert_eq!(page.total, 6);
    assert_eq!(page.items[0].review, "Too salty");
    assert!(page.items[0].created_at_utc().is_some());
}
