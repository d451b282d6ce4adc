//! # Guarda Memória server binary
//!
//! Wires configuration, the Postgres pool, and the lookup services into the
//! axum router. All assembly happens here; the crates below stay free of
//! each other's concrete types.

use anyhow::Context;
use api_adapters::handlers::AppState;
use secrecy::ExposeSecret;
use services::{CatalogService, MediaService, PessoaService, VisitService};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use storage_adapters::postgres::{
    run_migrations, PgCatalogRepo, PgMediaRepo, PgPessoaRepo, PgVisitLog,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = configs::AppConfig::load().context("loading configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(cfg.database.max_connections)
        .connect(cfg.database.url.expose_secret())
        .await
        .context("connecting to Postgres")?;

    run_migrations(&pool).await.context("running migrations")?;

    let state = AppState {
        catalog: CatalogService::new(Arc::new(PgCatalogRepo::new(pool.clone()))),
        media: MediaService::new(Arc::new(PgMediaRepo::new(pool.clone()))),
        pessoas: PessoaService::new(Arc::new(PgPessoaRepo::new(pool.clone()))),
        visits: VisitService::new(Arc::new(PgVisitLog::new(pool))),
    };

    let app = api_adapters::router(state);

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "guarda-memoria listening");

    axum::serve(listener, app).await?;
    Ok(())
}
