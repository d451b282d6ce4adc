//! Builders for mocked application state and helpers for driving the
//! router through `tower::ServiceExt::oneshot`.

use api_adapters::handlers::AppState;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use domains::models::{City, CityWithState, Media, PermalinkTarget, Pessoa, State};
use domains::ports::{MockCatalogRepo, MockMediaRepo, MockPessoaRepo, MockVisitLog};
use serde_json::Value;
use services::{CatalogService, MediaService, PessoaService, VisitService};
use std::sync::Arc;
use tower::ServiceExt;

/// One mock per port. Tests set expectations on the ones they exercise;
/// an unexpected call on the rest fails the test.
#[derive(Default)]
pub struct Mocks {
    pub catalog: MockCatalogRepo,
    pub media: MockMediaRepo,
    pub pessoas: MockPessoaRepo,
    pub visits: MockVisitLog,
}

pub fn app(mocks: Mocks) -> Router {
    let state = AppState {
        catalog: CatalogService::new(Arc::new(mocks.catalog)),
        media: MediaService::new(Arc::new(mocks.media)),
        pessoas: PessoaService::new(Arc::new(mocks.pessoas)),
        visits: VisitService::new(Arc::new(mocks.visits)),
    };
    api_adapters::router(state)
}

// ── Entity builders ─────────────────────────────────────────────────────────

pub fn state(id: i32, name: &str, sigla: &str) -> State {
    State { id, name: name.into(), sigla: sigla.into() }
}

pub fn city(id: i32, name: &str, state_id: i32) -> City {
    City {
        id,
        name: name.into(),
        slug: name.to_lowercase().replace(' ', "-"),
        state_id,
    }
}

pub fn city_with_state(id: i32, name: &str, sigla: &str) -> CityWithState {
    CityWithState {
        id,
        name: name.into(),
        slug: name.to_lowercase().replace(' ', "-"),
        state_id: 1,
        state_sigla: sigla.into(),
    }
}

pub fn permalink_target(media_id: i32, parent_id: Option<i32>, city_slug: &str) -> PermalinkTarget {
    PermalinkTarget { media_id, city_id: 1, parent_id, city_slug: city_slug.into() }
}

/// A media row aged by `minutes_ago` so listings can assert ordering.
pub fn media(id: i32, pessoa_id: i32, minutes_ago: i64) -> Media {
    Media {
        id,
        permalink: format!("mem-{id:04}"),
        city_id: 1,
        pessoa_id,
        parent_id: None,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

pub fn pessoa(id: i32, full_name: &str, city_name: &str, sigla: &str) -> Pessoa {
    Pessoa {
        id,
        full_name: full_name.into(),
        city_name: city_name.into(),
        state_sigla: sigla.into(),
    }
}

// ── Request helpers ─────────────────────────────────────────────────────────

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get_raw(app: Router, uri: &str) -> Response {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = get_raw(app, uri).await;
    let status = response.status();
    (status, read_json(response).await)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = send(app, request).await;
    let status = response.status();
    (status, read_json(response).await)
}

pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
