//! # Port Traits
//!
//! Any storage adapter must implement these traits to be used by the
//! services and the binary. Every method maps to exactly one query; lookups
//! distinguish "found nothing" (`Ok(None)`) from infrastructure failure.

use crate::error::Result;
use crate::models::{City, CityWithState, Media, NewVisit, PermalinkTarget, Pessoa, State};
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to the city/state catalog.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CatalogRepo: Send + Sync {
    /// States sorted by name ascending.
    async fn list_states(&self) -> Result<Vec<State>>;

    /// Cities, optionally filtered to one state, sorted by name ascending
    /// with ties broken by state sigla ascending.
    async fn list_cities(&self, state_id: Option<i32>) -> Result<Vec<City>>;

    /// All cities joined with their state sigla, same sort as `list_cities`.
    async fn list_cities_with_state(&self) -> Result<Vec<CityWithState>>;

    async fn get_city(&self, id: i32) -> Result<Option<CityWithState>>;

    async fn get_city_by_slug(&self, slug: &str) -> Result<Option<City>>;
}

/// Read access to media posts and their permalinks.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MediaRepo: Send + Sync {
    async fn find_by_permalink(&self, permalink: &str) -> Result<Option<PermalinkTarget>>;

    /// Media belonging to one pessoa, newest first.
    async fn list_by_pessoa(&self, pessoa_id: i32) -> Result<Vec<Media>>;
}

/// Read access to biographical entries.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PessoaRepo: Send + Sync {
    async fn get(&self, id: i32) -> Result<Option<Pessoa>>;
}

/// Append-only page-visit log. Rows are never updated or read back here.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait VisitLog: Send + Sync {
    /// Inserts one visit row and returns its generated id.
    async fn record(&self, visit: NewVisit) -> Result<Uuid>;
}
