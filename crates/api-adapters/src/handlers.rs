//! # Handlers
//!
//! This module coordinates the flow between HTTP requests and the lookup
//! services. Every handler is the same three-step pipeline: resolve the
//! identifier, issue one service call, format the outcome — the `?` on
//! [`ApiResult`] does the error-to-envelope mapping once for all routes.

use axum::extract::{Path, Query, State};
use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use domains::error::AppError;
use domains::models::{City, CityWithState, Media, NewVisit, Pessoa};
use serde::{Deserialize, Serialize};
use services::{ident, CatalogService, MediaService, PessoaService, VisitService};
use std::collections::BTreeMap;
use tracing::{debug, error};
use uuid::Uuid;

use crate::response::{found, ok, ApiResult};

/// State shared across all handlers. The services hold `Arc`s internally,
/// so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub media: MediaService,
    pub pessoas: PessoaService,
    pub visits: VisitService,
}

// ── Wire types (camelCase to match the JavaScript front end) ────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityItem {
    pub id: i32,
    pub name: String,
    pub state_id: i32,
}

impl From<City> for CityItem {
    fn from(city: City) -> Self {
        CityItem { id: city.id, name: city.name, state_id: city.state_id }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub state_id: i32,
}

impl From<City> for CityRecord {
    fn from(city: City) -> Self {
        CityRecord {
            id: city.id,
            name: city.name,
            slug: city.slug,
            state_id: city.state_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StateRef {
    pub sigla: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDetail {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub state: StateRef,
}

impl From<CityWithState> for CityDetail {
    fn from(city: CityWithState) -> Self {
        CityDetail {
            id: city.id,
            name: city.name,
            slug: city.slug,
            state: StateRef { sigla: city.state_sigla },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: i32,
    pub permalink: String,
    pub city_id: i32,
    pub pessoa_id: i32,
    pub parent_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Media> for MediaItem {
    fn from(media: Media) -> Self {
        MediaItem {
            id: media.id,
            permalink: media.permalink,
            city_id: media.city_id,
            pessoa_id: media.pessoa_id,
            parent_id: media.parent_id,
            created_at: media.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct CityRef {
    pub name: String,
    pub sigla: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PessoaDetail {
    pub id: i32,
    pub user: UserRef,
    pub city: CityRef,
}

impl From<Pessoa> for PessoaDetail {
    fn from(pessoa: Pessoa) -> Self {
        PessoaDetail {
            id: pessoa.id,
            user: UserRef { full_name: pessoa.full_name },
            city: CityRef { name: pessoa.city_name, sigla: pessoa.state_sigla },
        }
    }
}

// ── Catalog routes ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitiesQuery {
    pub state_id: Option<String>,
}

/// GET /cities — city listing, optionally filtered to one state, sorted by
/// name with state sigla as the tie-break.
pub async fn list_cities(
    State(state): State<AppState>,
    Query(query): Query<CitiesQuery>,
) -> ApiResult<impl IntoResponse> {
    let state_id = query
        .state_id
        .as_deref()
        .map(ident::parse_numeric_id)
        .transpose()?;

    let cities = state.catalog.list_cities(state_id).await?;
    Ok(ok(cities.into_iter().map(CityItem::from).collect::<Vec<_>>()))
}

/// GET /cities/{id} — one city with its state sigla.
pub async fn city_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = ident::parse_numeric_id(&raw_id)?;
    let city = state.catalog.get_city(id).await?;
    Ok(ok(CityDetail::from(city)))
}

/// GET /cities-all — the whole catalog with siglas attached.
pub async fn list_cities_all(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let cities = state.catalog.list_cities_with_state().await?;
    Ok(ok(cities.into_iter().map(CityDetail::from).collect::<Vec<_>>()))
}

/// GET /states — `{id: name}` mapping, one entry per state id.
pub async fn list_states(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let states = state.catalog.list_states().await?;
    let map: BTreeMap<i32, String> = states.into_iter().map(|s| (s.id, s.name)).collect();
    Ok(ok(map))
}

// ── Legacy alternate-schema routes ──────────────────────────────────────────

/// GET /cidades/{id} — plain city record.
pub async fn cidade_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = ident::parse_numeric_id(&raw_id)?;
    let city = state.catalog.get_city(id).await?;
    Ok(ok(CityRecord {
        id: city.id,
        name: city.name,
        slug: city.slug,
        state_id: city.state_id,
    }))
}

/// GET /cidades/slug/{slug} — city by its slug. Slugs pass through the
/// resolver unchanged; misses are ordinary 404s.
pub async fn cidade_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let city = state.catalog.get_city_by_slug(&slug).await?;
    Ok(ok(CityRecord::from(city)))
}

// ── Permalink resolution ────────────────────────────────────────────────────

/// GET /permalink/{permalink} — always redirects, never errors.
///
/// A reply's permalink lands on its root post's city page with the root id
/// as the `media` query parameter. Unknown permalinks and lookup failures
/// both soft-fail to the site root so the browser is never stranded on an
/// error page.
pub async fn resolve_permalink(
    State(state): State<AppState>,
    Path(permalink): Path<String>,
) -> Response {
    match state.media.resolve_permalink(&permalink).await {
        Ok(redirect) => found(&redirect.path()),
        Err(AppError::NotFound(_, _)) => {
            debug!(permalink, "unknown permalink, redirecting to root");
            found("/")
        }
        Err(err) => {
            error!(error = %err, "permalink resolution failed");
            found("/")
        }
    }
}

// ── Media routes ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediasQuery {
    pub pessoa_id: Option<String>,
}

/// GET /medias?pessoaId= — media for one pessoa, newest first. The query
/// parameter is required.
pub async fn list_medias(
    State(state): State<AppState>,
    Query(query): Query<MediasQuery>,
) -> ApiResult<impl IntoResponse> {
    let pessoa_id = query
        .pessoa_id
        .as_deref()
        .ok_or_else(|| AppError::InvalidArgument("pessoaId query parameter is required".into()))
        .and_then(ident::parse_numeric_id)?;

    let medias = state.media.list_for_pessoa(pessoa_id).await?;
    Ok(ok(medias.into_iter().map(MediaItem::from).collect::<Vec<_>>()))
}

// ── Pessoa routes ───────────────────────────────────────────────────────────

/// GET /pessoas/{id} — pessoa with nested user and city projections.
pub async fn pessoa_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = ident::parse_numeric_id(&raw_id)?;
    let pessoa = state.pessoas.get(id).await?;
    Ok(ok(PessoaDetail::from(pessoa)))
}

// ── Visit recording ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitPayload {
    pub path: Option<String>,
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitCreated {
    pub visit_id: Uuid,
}

/// POST /visit — appends one visit row and returns its generated id.
/// Fields missing from the body fall back to the request headers; the page
/// render never blocks on this call succeeding.
pub async fn record_visit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<VisitPayload>,
) -> ApiResult<impl IntoResponse> {
    let user_agent = payload.user_agent.or_else(|| {
        headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    });
    let ip = payload.ip.or_else(|| client_ip(&headers));

    let visit = NewVisit {
        path: payload.path.unwrap_or_default(),
        source: payload.source,
        user_agent,
        ip,
    };

    let visit_id = state.visits.record(visit).await?;
    Ok(ok(VisitCreated { visit_id }))
}

/// First entry of `X-Forwarded-For`, the client address as seen by the
/// reverse proxy in front of the app.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(|ip| ip.trim().to_string())
}

// ── Health ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health — liveness probe for deployments.
pub async fn health() -> ApiResult<impl IntoResponse> {
    Ok(ok(Health { status: "ok", version: env!("CARGO_PKG_VERSION") }))
}
