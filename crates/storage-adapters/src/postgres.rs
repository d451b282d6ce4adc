//! # Postgres adapters
//!
//! This module implements the data mapping between the Postgres relational
//! model and the `domains` models. Every port method issues exactly one
//! query; sort orders live in the SQL, not in Rust.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::error::{AppError, Result};
use domains::models::{City, CityWithState, Media, NewVisit, PermalinkTarget, Pessoa, State};
use domains::ports::{CatalogRepo, MediaRepo, PessoaRepo, VisitLog};
use sqlx::PgPool;
use uuid::Uuid;

/// Applies the embedded migrations. Called once at startup by the binary
/// and by the seed command.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn db_err(err: sqlx::Error) -> AppError {
    AppError::Internal(err.to_string())
}

// ── Row types ───────────────────────────────────────────────────────────────
//
// Row structs keep the sqlx derive out of the domain crate; the From impls
// are the single place column order and naming are mapped.

#[derive(Debug, sqlx::FromRow)]
struct StateRow {
    id: i32,
    name: String,
    sigla: String,
}

impl From<StateRow> for State {
    fn from(row: StateRow) -> Self {
        State { id: row.id, name: row.name, sigla: row.sigla }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CityRow {
    id: i32,
    name: String,
    slug: String,
    state_id: i32,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        City {
            id: row.id,
            name: row.name,
            slug: row.slug,
            state_id: row.state_id,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CityWithStateRow {
    id: i32,
    name: String,
    slug: String,
    state_id: i32,
    state_sigla: String,
}

impl From<CityWithStateRow> for CityWithState {
    fn from(row: CityWithStateRow) -> Self {
        CityWithState {
            id: row.id,
            name: row.name,
            slug: row.slug,
            state_id: row.state_id,
            state_sigla: row.state_sigla,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PermalinkRow {
    id: i32,
    city_id: i32,
    parent_id: Option<i32>,
    city_slug: String,
}

impl From<PermalinkRow> for PermalinkTarget {
    fn from(row: PermalinkRow) -> Self {
        PermalinkTarget {
            media_id: row.id,
            city_id: row.city_id,
            parent_id: row.parent_id,
            city_slug: row.city_slug,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MediaRow {
    id: i32,
    permalink: String,
    city_id: i32,
    pessoa_id: i32,
    parent_id: Option<i32>,
    created_at: DateTime<Utc>,
}

impl From<MediaRow> for Media {
    fn from(row: MediaRow) -> Self {
        Media {
            id: row.id,
            permalink: row.permalink,
            city_id: row.city_id,
            pessoa_id: row.pessoa_id,
            parent_id: row.parent_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PessoaRow {
    id: i32,
    full_name: String,
    city_name: String,
    state_sigla: String,
}

impl From<PessoaRow> for Pessoa {
    fn from(row: PessoaRow) -> Self {
        Pessoa {
            id: row.id,
            full_name: row.full_name,
            city_name: row.city_name,
            state_sigla: row.state_sigla,
        }
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgCatalogRepo {
    pool: PgPool,
}

impl PgCatalogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepo for PgCatalogRepo {
    async fn list_states(&self) -> Result<Vec<State>> {
        let rows = sqlx::query_as::<_, StateRow>(
            "SELECT id, name, sigla FROM states ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(State::from).collect())
    }

    async fn list_cities(&self, state_id: Option<i32>) -> Result<Vec<City>> {
        // The join exists only for the sigla tie-break in the sort.
        let rows = sqlx::query_as::<_, CityRow>(
            "SELECT c.id, c.name, c.slug, c.state_id
             FROM cities c
             JOIN states s ON s.id = c.state_id
             WHERE $1::int4 IS NULL OR c.state_id = $1
             ORDER BY c.name ASC, s.sigla ASC",
        )
        .bind(state_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(City::from).collect())
    }

    async fn list_cities_with_state(&self) -> Result<Vec<CityWithState>> {
        let rows = sqlx::query_as::<_, CityWithStateRow>(
            "SELECT c.id, c.name, c.slug, c.state_id, s.sigla AS state_sigla
             FROM cities c
             JOIN states s ON s.id = c.state_id
             ORDER BY c.name ASC, s.sigla ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(CityWithState::from).collect())
    }

    async fn get_city(&self, id: i32) -> Result<Option<CityWithState>> {
        let row = sqlx::query_as::<_, CityWithStateRow>(
            "SELECT c.id, c.name, c.slug, c.state_id, s.sigla AS state_sigla
             FROM cities c
             JOIN states s ON s.id = c.state_id
             WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(CityWithState::from))
    }

    async fn get_city_by_slug(&self, slug: &str) -> Result<Option<City>> {
        let row = sqlx::query_as::<_, CityRow>(
            "SELECT id, name, slug, state_id FROM cities WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(City::from))
    }
}

// ── Media ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgMediaRepo {
    pool: PgPool,
}

impl PgMediaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepo for PgMediaRepo {
    async fn find_by_permalink(&self, permalink: &str) -> Result<Option<PermalinkTarget>> {
        let row = sqlx::query_as::<_, PermalinkRow>(
            "SELECT m.id, m.city_id, m.parent_id, c.slug AS city_slug
             FROM medias m
             JOIN cities c ON c.id = m.city_id
             WHERE m.permalink = $1",
        )
        .bind(permalink)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(PermalinkTarget::from))
    }

    async fn list_by_pessoa(&self, pessoa_id: i32) -> Result<Vec<Media>> {
        let rows = sqlx::query_as::<_, MediaRow>(
            "SELECT id, permalink, city_id, pessoa_id, parent_id, created_at
             FROM medias
             WHERE pessoa_id = $1
             ORDER BY created_at DESC",
        )
        .bind(pessoa_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Media::from).collect())
    }
}

// ── Pessoas ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgPessoaRepo {
    pool: PgPool,
}

impl PgPessoaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PessoaRepo for PgPessoaRepo {
    async fn get(&self, id: i32) -> Result<Option<Pessoa>> {
        let row = sqlx::query_as::<_, PessoaRow>(
            "SELECT p.id, u.full_name, c.name AS city_name, s.sigla AS state_sigla
             FROM pessoas p
             JOIN users u ON u.id = p.user_id
             JOIN cities c ON c.id = p.city_id
             JOIN states s ON s.id = c.state_id
             WHERE p.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Pessoa::from))
    }
}

// ── Visits ──────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgVisitLog {
    pool: PgPool,
}

impl PgVisitLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitLog for PgVisitLog {
    /// Append-only: the id is generated here, never deduplicated, and the
    /// timestamp comes from the database clock.
    async fn record(&self, visit: NewVisit) -> Result<Uuid> {
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO visits (id, path, source, user_agent, ip, created_at)
             VALUES ($1, $2, $3, $4, $5, now())",
        )
        .bind(id)
        .bind(&visit.path)
        .bind(&visit.source)
        .bind(&visit.user_agent)
        .bind(&visit.ip)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permalink_row_maps_reply_fields() {
        let row = PermalinkRow {
            id: 12,
            city_id: 3,
            parent_id: Some(8),
            city_slug: "congonhas".into(),
        };
        let target = PermalinkTarget::from(row);
        assert_eq!(target.media_id, 12);
        assert_eq!(target.display_id(), 8);
        assert_eq!(target.city_slug, "congonhas");
    }

    #[test]
    fn city_with_state_row_carries_sigla() {
        let row = CityWithStateRow {
            id: 1,
            name: "Ouro Preto".into(),
            slug: "ouro-preto".into(),
            state_id: 11,
            state_sigla: "MG".into(),
        };
        let city = CityWithState::from(row);
        assert_eq!(city.state_sigla, "MG");
        assert_eq!(city.slug, "ouro-preto");
    }
}
