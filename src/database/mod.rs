pub mod images;
pub mod introduces;
pub mod models;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Build the connection pool lazily so the server can boot (and report a
/// degraded health status) before the database is reachable.
pub fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.url)
}

/// Create the backing tables if they do not exist yet.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS images (
            id UUID PRIMARY KEY,
            content_type TEXT,
            base64 TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS introduce (
            id UUID PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            tag TEXT,
            image_id UUID NOT NULL,
            url TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            modified_at TIMESTAMPTZ NOT NULL,
            status TEXT NOT NULL DEFAULT 'ACTIVE'
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
