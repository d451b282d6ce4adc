//! Visit recording: defaults, header fallbacks, distinct ids, and the
//! generic failure envelope.

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use domains::error::AppError;
use integration_tests::fixtures::*;
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn visit_with_only_a_path_stores_optionals_as_absent() {
    let mut mocks = Mocks::default();
    mocks
        .visits
        .expect_record()
        .withf(|v| {
            v.path == "/city/paraty"
                && v.source.is_none()
                && v.user_agent.is_none()
                && v.ip.is_none()
        })
        .returning(|_| Ok(Uuid::new_v4()));

    let (status, body) = post_json(app(mocks), "/visit", json!({"path": "/city/paraty"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], Value::Bool(true));
    let id = body["data"]["visitId"].as_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn missing_path_defaults_to_the_site_root() {
    let mut mocks = Mocks::default();
    mocks
        .visits
        .expect_record()
        .withf(|v| v.path == "/")
        .returning(|_| Ok(Uuid::new_v4()));

    let (status, _) = post_json(app(mocks), "/visit", json!({})).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn identical_payloads_produce_distinct_ids() {
    let mut mocks = Mocks::default();
    mocks
        .visits
        .expect_record()
        .returning(|_| Ok(Uuid::new_v4()));

    let app = app(mocks);
    let payload = json!({"path": "/city/paraty", "source": "qrcode"});
    let (_, first) = post_json(app.clone(), "/visit", payload.clone()).await;
    let (_, second) = post_json(app, "/visit", payload).await;

    assert_ne!(first["data"]["visitId"], second["data"]["visitId"]);
}

#[tokio::test]
async fn header_fallbacks_fill_user_agent_and_client_ip() {
    let mut mocks = Mocks::default();
    mocks
        .visits
        .expect_record()
        .withf(|v| {
            v.user_agent.as_deref() == Some("guarda-test/1.0")
                && v.ip.as_deref() == Some("203.0.113.7")
        })
        .returning(|_| Ok(Uuid::new_v4()));

    let request = Request::builder()
        .method("POST")
        .uri("/visit")
        .header(CONTENT_TYPE, "application/json")
        .header("user-agent", "guarda-test/1.0")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .body(Body::from(json!({"path": "/"}).to_string()))
        .unwrap();

    let response = send(app(mocks), request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn recording_failure_returns_the_generic_500_envelope() {
    let mut mocks = Mocks::default();
    mocks
        .visits
        .expect_record()
        .returning(|_| Err(AppError::Internal("visits table is gone".into())));

    let (status, body) = post_json(app(mocks), "/visit", json!({"path": "/"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
}
