//! # api-adapters
//!
//! The web routing and orchestration layer for Guarda Memória.

#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
pub mod response;

#[cfg(feature = "web-axum")]
use axum::{
    routing::{get, post},
    Router,
};

/// Builds the full route table.
///
/// # Developer Note
/// The `/cidades/*` routes are the legacy alternate-schema surface kept for
/// the existing front end; they share repositories with `/cities/*` and
/// differ only in projection.
#[cfg(feature = "web-axum")]
pub fn router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/cities", get(handlers::list_cities))
        .route("/cities/{id}", get(handlers::city_by_id))
        .route("/cities-all", get(handlers::list_cities_all))
        .route("/states", get(handlers::list_states))
        .route("/permalink/{permalink}", get(handlers::resolve_permalink))
        .route("/visit", post(handlers::record_visit))
        .route("/cidades/{id}", get(handlers::cidade_by_id))
        .route("/cidades/slug/{slug}", get(handlers::cidade_by_slug))
        .route("/medias", get(handlers::list_medias))
        .route("/pessoas/{id}", get(handlers::pessoa_by_id))
        .layer(middleware::trace_layer())
        .layer(middleware::cors_policy())
        .with_state(state)
}
