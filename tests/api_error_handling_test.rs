use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use booktracker::api;
use booktracker::db;
use booktracker::google_books::GoogleBooksClient;
use booktracker::infrastructure::AppState;
use booktracker::seed;
use serde_json::{Value, json};
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Helper to create a test app against the given Google Books base URL
async fn setup_test_app(base_url: String, seed_demo: bool) -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    if seed_demo {
        seed::seed_demo_data(&db).await.expect("Failed to seed");
    }
    let client = GoogleBooksClient::new(base_url, "", Duration::from_secs(2))
        .expect("Failed to build client");
    api::api_router_with_state(AppState::new(db, client))
}

async fn request(app: &Router, http_method: &str, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .uri(uri)
        .method(http_method)
        .header(header::CONTENT_TYPE, "application/json");
    let body = payload.map_or_else(Body::empty, |p| Body::from(p.to_string()));

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_invalid_page_arguments() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalItems": 0})))
        .expect(0)
        .mount(&mock_server)
        .await;
    let app = setup_test_app(mock_server.uri(), false).await;

    let (status, body) = request(&app, "GET", "/books/search/-1/10/rust", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let (status, _) = request(&app, "GET", "/books/search/0/0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(&app, "GET", "/books/search/0/-3?sweep=true", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upstream_failure_is_service_unavailable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let app = setup_test_app(mock_server.uri(), false).await;

    let (status, body) = request(&app, "GET", "/books/search/0/10/rust", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "EXTERNAL_SERVICE_UNAVAILABLE");

    let (status, _) = request(&app, "GET", "/books/details/abc", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unreachable_upstream_is_service_unavailable() {
    // Nothing listens on port 9 of localhost
    let app = setup_test_app("http://127.0.0.1:9/books/v1/volumes".to_string(), false).await;

    let (status, body) = request(&app, "GET", "/books/search/0/10", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "EXTERNAL_SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_upstream_timeout_is_service_unavailable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"totalItems": 0}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;
    let app = setup_test_app(mock_server.uri(), false).await;

    let (status, _) = request(&app, "GET", "/books/search/0/10", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_malformed_upstream_body_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"items\": ["))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/no-volume-info/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc"})))
        .mount(&mock_server)
        .await;

    let app = setup_test_app(format!("{}/broken", mock_server.uri()), false).await;
    let (status, body) = request(&app, "GET", "/books/search/0/10/rust", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "MALFORMED_RESPONSE");

    let app = setup_test_app(format!("{}/no-volume-info", mock_server.uri()), false).await;
    let (status, _) = request(&app, "GET", "/books/details/abc", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_not_found_responses() {
    let app = setup_test_app("http://127.0.0.1:9".to_string(), false).await;

    for uri in [
        "/books/999",
        "/authors/999",
        "/categories/999",
        "/categories/genre/Poetry",
        "/users/999",
        "/users/username/nobody",
        "/users/email/nobody@example.org",
        "/reviews/1/1",
    ] {
        let (status, body) = request(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    let (status, _) = request(&app, "DELETE", "/books/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = request(&app, "DELETE", "/reviews/1/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unique_constraints_conflict() {
    let app = setup_test_app("http://127.0.0.1:9".to_string(), true).await;

    let (status, body) = request(
        &app,
        "POST",
        "/users",
        Some(json!({"username": "alice", "email": "other@example.org"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = request(
        &app,
        "POST",
        "/users",
        Some(json!({"username": "carol", "email": "bob@example.org"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = request(&app, "POST", "/categories", Some(json!({"genre": "computers"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // alice already reviewed the first demo book
    let (_, users) = request(&app, "GET", "/users/username/alice", None).await;
    let (_, books) = request(&app, "GET", "/books/title/Mythical", None).await;
    let (status, _) = request(
        &app,
        "POST",
        "/reviews",
        Some(json!({
            "user_id": users["id"],
            "book_id": books[0]["book_id"],
            "rating": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_review_validation() {
    let app = setup_test_app("http://127.0.0.1:9".to_string(), true).await;
    let (_, bob) = request(&app, "GET", "/users/username/bob", None).await;
    let (_, dune) = request(&app, "GET", "/books/title/Dune", None).await;
    let user_id = bob["id"].clone();
    let book_id = dune[0]["book_id"].clone();

    let (status, body) = request(
        &app,
        "POST",
        "/reviews",
        Some(json!({"user_id": user_id, "book_id": book_id, "rating": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let tomorrow = chrono::Utc::now().date_naive() + chrono::Days::new(1);
    let (status, _) = request(
        &app,
        "POST",
        "/reviews",
        Some(json!({
            "user_id": user_id,
            "book_id": book_id,
            "rating": 3,
            "creation_date": tomorrow.to_string()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "POST",
        "/reviews",
        Some(json!({"user_id": 999, "book_id": book_id, "rating": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_inputs_are_rejected() {
    let app = setup_test_app("http://127.0.0.1:9".to_string(), false).await;

    let (status, _) = request(
        &app,
        "POST",
        "/authors",
        Some(json!({"firstname": " ", "lastname": "Herbert"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(&app, "POST", "/categories", Some(json!({"genre": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "POST",
        "/users",
        Some(json!({"username": "dave", "email": "not-an-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user_errors() {
    let app = setup_test_app("http://127.0.0.1:9".to_string(), true).await;

    let (status, body) = request(
        &app,
        "PUT",
        "/users/999",
        Some(json!({"username": "ghost", "email": "ghost@example.org"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (_, alice) = request(&app, "GET", "/users/username/alice", None).await;
    let uri = format!("/users/{}", alice["id"]);

    let (status, body) = request(
        &app,
        "PUT",
        &uri,
        Some(json!({"username": "bob", "email": "alice@example.org"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = request(
        &app,
        "PUT",
        &uri,
        Some(json!({"username": "alice", "email": "bob@example.org"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = request(
        &app,
        "PUT",
        &uri,
        Some(json!({"username": "alice", "email": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
