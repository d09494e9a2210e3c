//! Database migration utilities

use sqlx::migrate::MigrateDatabase;
use sqlx_migrator::{Migrate, Plan};

use crate::Config;

/// Create the database when missing and apply every pending migration
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!(url = %config.database.url, "database does not exist, creating");
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = crate::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    pantry_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);
    pool.close().await;

    tracing::info!("migrations completed");

    Ok(())
}

/// Drop the database if it exists and recreate it with migrations
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!(url = %config.database.url, "dropping existing database");
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    }

    migrate(config).await
}
