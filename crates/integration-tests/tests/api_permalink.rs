//! Permalink resolution: always a redirect, never an error body.

use axum::http::{header::LOCATION, StatusCode};
use domains::error::AppError;
use integration_tests::fixtures::*;

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect carries a Location header")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn reply_permalink_redirects_to_its_parent_post() {
    let mut mocks = Mocks::default();
    mocks
        .media
        .expect_find_by_permalink()
        .withf(|p| p == "mem-0009")
        .returning(|_| Ok(Some(permalink_target(9, Some(4), "ouro-preto"))));

    let response = get_raw(app(mocks), "/permalink/mem-0009").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/city/ouro-preto?media=4");
}

#[tokio::test]
async fn root_permalink_redirects_to_its_own_id() {
    let mut mocks = Mocks::default();
    mocks
        .media
        .expect_find_by_permalink()
        .returning(|_| Ok(Some(permalink_target(9, None, "ouro-preto"))));

    let response = get_raw(app(mocks), "/permalink/mem-0009").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/city/ouro-preto?media=9");
}

#[tokio::test]
async fn unknown_permalink_soft_fails_to_the_site_root() {
    let mut mocks = Mocks::default();
    mocks
        .media
        .expect_find_by_permalink()
        .returning(|_| Ok(None));

    let response = get_raw(app(mocks), "/permalink/never-existed").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");

    let body = read_json(response).await;
    assert!(body.is_null(), "redirects must not carry a JSON error body");
}

#[tokio::test]
async fn lookup_failure_also_redirects_instead_of_erroring() {
    let mut mocks = Mocks::default();
    mocks
        .media
        .expect_find_by_permalink()
        .returning(|_| Err(AppError::Internal("connection reset".into())));

    let response = get_raw(app(mocks), "/permalink/mem-0009").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
}
