// API Integration Tests

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use ssl_deadline::api::{AppState, router};
use ssl_deadline::certificates::CertificateProbe;
use ssl_deadline::config::SlackConfig;
use ssl_deadline::deadline::DeadlineEvaluator;
use ssl_deadline::monitor::DeadlineMonitor;
use ssl_deadline::notify::SlackNotifier;
use ssl_deadline::registry::{HostRegistry, MemoryRegistry};
use ssl_deadline::{DeadlineError, Result};
use std::sync::Arc;
use tower::ServiceExt;

/// Every host expires in 60 days except `down.example`
struct StaticProber;

#[async_trait]
impl CertificateProbe for StaticProber {
    async fn probe(&self, hostname: &str) -> Result<DateTime<Utc>> {
        if hostname == "down.example" {
            return Err(DeadlineError::TlsHandshake {
                hostname: hostname.to_string(),
                details: "alert received".to_string(),
            });
        }
        Ok(Utc::now() + Duration::days(60) + Duration::hours(1))
    }
}

fn app() -> (Router, Arc<MemoryRegistry>) {
    let registry = Arc::new(MemoryRegistry::new());
    let notifier = SlackNotifier::new(SlackConfig::default()).unwrap();
    let monitor = DeadlineMonitor::new(
        Arc::new(StaticProber),
        registry.clone(),
        Arc::new(notifier),
        DeadlineEvaluator::new(chrono_tz::Asia::Tokyo),
    );

    (router(Arc::new(AppState::new(Arc::new(monitor)))), registry)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_register_returns_created() {
    let (app, registry) = app();

    let (status, body) = send(&app, post_json("/api", json!({"hostname": "a.example"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"response": {"status": true}, "error": null}));

    let stored = registry.get("a.example").await.unwrap();
    assert_eq!(stored.notification_threshold, 45);
    assert_eq!(stored.remaining_days, 60);
}

#[tokio::test]
async fn test_register_with_trailing_slash_and_threshold() {
    let (app, registry) = app();

    let (status, _) = send(
        &app,
        post_json("/api/", json!({"hostname": "b.example", "notification_days": 90})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        registry.get("b.example").await.unwrap().notification_threshold,
        90
    );
}

#[tokio::test]
async fn test_register_duplicate_is_conflict() {
    let (app, _) = app();

    send(&app, post_json("/api", json!({"hostname": "a.example"}))).await;
    let (status, body) = send(&app, post_json("/api", json!({"hostname": "a.example"}))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["response"].is_null());
    assert!(body["error"].as_str().unwrap().contains("a.example"));
}

#[tokio::test]
async fn test_register_probe_failure_is_bad_gateway() {
    let (app, registry) = app();

    let (status, body) = send(&app, post_json("/api", json!({"hostname": "down.example"}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn test_register_malformed_body_is_bad_request() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_register_empty_hostname_is_bad_request() {
    let (app, _) = app();

    let (status, _) = send(&app, post_json("/api", json!({"hostname": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_and_show() {
    let (app, _) = app();
    send(&app, post_json("/api", json!({"hostname": "a.example"}))).await;
    send(&app, post_json("/api", json!({"hostname": "b.example"}))).await;

    let (status, body) = send(&app, get("/api")).await;
    assert_eq!(status, StatusCode::OK);
    let hosts = body["response"].as_array().unwrap();
    assert_eq!(hosts.len(), 2);
    assert_eq!(hosts[0]["hostname"], "a.example");
    assert_eq!(hosts[1]["hostname"], "b.example");

    let (status, body) = send(&app, get("/api/b.example")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["hostname"], "b.example");
    assert_eq!(body["response"]["remaining_days"], 60);
    assert_eq!(body["response"]["notification_days"], 45);
    assert!(body["response"]["timelimit"].is_string());
}

#[tokio::test]
async fn test_show_unknown_host_is_not_found() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/api/missing.example")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["response"].is_null());
}

#[tokio::test]
async fn test_check_single_and_all() {
    let (app, _) = app();
    send(&app, post_json("/api", json!({"hostname": "a.example"}))).await;

    let (status, body) = send(&app, post("/api/check/a.example")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"response": "ok", "error": null}));

    let (status, body) = send(&app, post("/api/check/all")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "ok");
}

#[tokio::test]
async fn test_check_unknown_host_is_not_found() {
    let (app, _) = app();

    let (status, _) = send(&app, post("/api/check/missing.example")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_check_all_failure_is_reported() {
    let (app, registry) = app();
    send(&app, post_json("/api", json!({"hostname": "a.example"}))).await;

    let deadline = ssl_deadline::deadline::Deadline {
        display_date: "2000-01-01".to_string(),
        remaining_days: 0,
    };
    registry
        .insert(&ssl_deadline::registry::HostRecord::new("down.example", &deadline, 45))
        .await
        .unwrap();

    let (status, body) = send(&app, post("/api/check/all")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("down.example"));
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["registry"], "memory");
}
