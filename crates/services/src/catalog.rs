//! # Catalog lookups
//!
//! Cities and states. All reads, no writes; sort orders are guaranteed by
//! the storage adapter and passed through untouched.

use domains::error::{AppError, Result};
use domains::models::{City, CityWithState, State};
use domains::ports::CatalogRepo;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepo>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepo>) -> Self {
        Self { repo }
    }

    /// States sorted by name ascending.
    pub async fn list_states(&self) -> Result<Vec<State>> {
        self.repo.list_states().await
    }

    /// Cities with an optional state filter. An empty listing is a valid
    /// success, never a `NotFound`.
    pub async fn list_cities(&self, state_id: Option<i32>) -> Result<Vec<City>> {
        self.repo.list_cities(state_id).await
    }

    /// The full catalog with state siglas attached.
    pub async fn list_cities_with_state(&self) -> Result<Vec<CityWithState>> {
        self.repo.list_cities_with_state().await
    }

    pub async fn get_city(&self, id: i32) -> Result<CityWithState> {
        self.repo
            .get_city(id)
            .await?
            .ok_or_else(|| AppError::not_found("city", id))
    }

    pub async fn get_city_by_slug(&self, slug: &str) -> Result<City> {
        let city = self.repo.get_city_by_slug(slug).await?;
        debug!(slug, found = city.is_some(), "city slug lookup");
        city.ok_or_else(|| AppError::not_found("city", slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::ports::MockCatalogRepo;

    fn city(id: i32, name: &str) -> City {
        City {
            id,
            name: name.into(),
            slug: name.to_lowercase().replace(' ', "-"),
            state_id: 1,
        }
    }

    #[tokio::test]
    async fn missing_city_maps_to_not_found() {
        let mut repo = MockCatalogRepo::new();
        repo.expect_get_city().returning(|_| Ok(None));

        let svc = CatalogService::new(Arc::new(repo));
        match svc.get_city(99).await {
            Err(AppError::NotFound(kind, key)) => {
                assert_eq!(kind, "city");
                assert_eq!(key, "99");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn listing_preserves_repo_order() {
        let mut repo = MockCatalogRepo::new();
        repo.expect_list_cities()
            .returning(|_| Ok(vec![city(2, "Aracaju"), city(1, "Belém")]));

        let svc = CatalogService::new(Arc::new(repo));
        let cities = svc.list_cities(None).await.unwrap();
        assert_eq!(
            cities.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            ["Aracaju", "Belém"]
        );
    }

    #[tokio::test]
    async fn state_filter_reaches_the_repo() {
        let mut repo = MockCatalogRepo::new();
        repo.expect_list_cities()
            .withf(|state_id| *state_id == Some(5))
            .returning(|_| Ok(vec![]));

        let svc = CatalogService::new(Arc::new(repo));
        assert!(svc.list_cities(Some(5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn slug_lookup_misses_are_not_found() {
        let mut repo = MockCatalogRepo::new();
        repo.expect_get_city_by_slug().returning(|_| Ok(None));

        let svc = CatalogService::new(Arc::new(repo));
        assert!(matches!(
            svc.get_city_by_slug("nowhere").await,
            Err(AppError::NotFound(_, _))
        ));
    }
}
