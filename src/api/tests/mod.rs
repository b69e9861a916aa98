use super::*;
use crate::test_helpers::{FakeFailure, FakeSource, sample_records};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use std::time::Duration;
use tower::ServiceExt; // for oneshot()


/// Router with default config over an in-memory source
fn create_test_router(source: FakeSource) -> (Router, Arc<FakeSource>) {
    let source = Arc::new(source);
    let config = Arc::new(Config::default());
    (create_router(source.clone(), config), source)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _source) = create_test_router(FakeSource::new(Vec::new(), 10));

    let response = app.oneshot(get("/api/v1/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_json_endpoint() {
    let (app, _source) = create_test_router(FakeSource::new(Vec::new(), 10));

    let response = app.oneshot(get("/api/v1/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(json["paths"]["/api/v1/export"].is_object());
}

#[tokio::test]
async fn test_swagger_ui_only_when_enabled() {
    let source: Arc<dyn PageSource> = Arc::new(FakeSource::new(Vec::new(), 10));

    let app = create_router(source.clone(), Arc::new(Config::default()));
    let response = app.oneshot(get("/swagger-ui/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let mut config = Config::default();
    config.server.api.swagger_ui = true;
    let app = create_router(source, Arc::new(config));
    let response = app.oneshot(get("/swagger-ui/")).await.unwrap();
    assert_ne!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_enabled() {
    let (app, _source) = create_test_router(FakeSource::new(Vec::new(), 10));

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_server_starts_and_shuts_down() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = Config::default();
    config.server.api.bind_address = addr;
    let config = Arc::new(config);
    let source: Arc<dyn PageSource> = Arc::new(FakeSource::new(sample_records(3), 10));

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(start_api_server(source, config, async move {
        stop_rx.await.ok();
    }));

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.text().await.unwrap().contains("educationCode"));

    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop after shutdown signal")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_upstream_failure_reaches_json_and_html_differently() {
    let (app, _source) = create_test_router(
        FakeSource::new(sample_records(5), 10)
            .with_failure(0, FakeFailure::Upstream("rate limited".into())),
    );

    let response = app
        .clone()
        .oneshot(get("/api/v1/formasi?educationCode=5101087"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["error"]["code"], "upstream_rejected");

    let response = app
        .oneshot(get("/scrape?educationCode=5101087"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = body_string(response).await;
    assert!(text.starts_with("Failed to retrieve data: "));
    assert!(text.contains("rate limited"));
}
