//! Development seeding: applies migrations and inserts a small dataset so
//! the catalog and permalink routes have something to serve locally.
//! Idempotent — safe to run against an already-seeded database.

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .context("connecting to Postgres")?;

    storage_adapters::postgres::run_migrations(&pool).await?;

    let mg = upsert_state(&pool, "Minas Gerais", "MG").await?;
    let ba = upsert_state(&pool, "Bahia", "BA").await?;

    let ouro_preto = upsert_city(&pool, "Ouro Preto", "ouro-preto", mg).await?;
    upsert_city(&pool, "Diamantina", "diamantina", mg).await?;
    upsert_city(&pool, "Cachoeira", "cachoeira", ba).await?;
    upsert_city(&pool, "Lençóis", "lencois", ba).await?;

    // One pessoa with a root media and a reply, enough to exercise the
    // permalink parent redirect by hand.
    let already_seeded: (i64,) = sqlx::query_as("SELECT count(*) FROM pessoas")
        .fetch_one(&pool)
        .await?;
    if already_seeded.0 == 0 {
        let user: (i32,) =
            sqlx::query_as("INSERT INTO users (full_name) VALUES ($1) RETURNING id")
                .bind("Maria Conceição dos Santos")
                .fetch_one(&pool)
                .await?;
        let pessoa: (i32,) = sqlx::query_as(
            "INSERT INTO pessoas (user_id, city_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(user.0)
        .bind(ouro_preto)
        .fetch_one(&pool)
        .await?;

        let root: (i32,) = sqlx::query_as(
            "INSERT INTO medias (permalink, city_id, pessoa_id, parent_id)
             VALUES ($1, $2, $3, NULL) RETURNING id",
        )
        .bind("mem-ouro-preto-0001")
        .bind(ouro_preto)
        .bind(pessoa.0)
        .fetch_one(&pool)
        .await?;

        sqlx::query(
            "INSERT INTO medias (permalink, city_id, pessoa_id, parent_id)
             VALUES ($1, $2, $3, $4)",
        )
        .bind("mem-ouro-preto-0002")
        .bind(ouro_preto)
        .bind(pessoa.0)
        .bind(root.0)
        .execute(&pool)
        .await?;
    }

    println!("seed complete");
    Ok(())
}

async fn upsert_state(pool: &PgPool, name: &str, sigla: &str) -> anyhow::Result<i32> {
    let row: (i32,) = sqlx::query_as(
        "INSERT INTO states (name, sigla) VALUES ($1, $2)
         ON CONFLICT (sigla) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(name)
    .bind(sigla)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

async fn upsert_city(pool: &PgPool, name: &str, slug: &str, state_id: i32) -> anyhow::Result<i32> {
    let row: (i32,) = sqlx::query_as(
        "INSERT INTO cities (name, slug, state_id) VALUES ($1, $2, $3)
         ON CONFLICT (state_id, slug) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(name)
    .bind(slug)
    .bind(state_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}
