//! Database integration for the seeding pipeline.
//!
//! [`connect`] selects (and if necessary creates) the target database, and
//! the [`Seeder`] runs the seeding steps against the resulting pool.

mod seeder;

pub use seeder::{SeedError, Seeder, Summary};

use sqlx::PgPool;
use sqlx::migrate::MigrateDatabase;
use sqlx::postgres::{PgPoolOptions, Postgres};
use tracing::info;

use crate::config::SeedConfig;

/// Creates the target database if it is missing and returns a pool scoped to
/// it. The handle is owned by the caller; nothing here is process-global.
pub async fn connect(config: &SeedConfig) -> Result<PgPool, SeedError> {
    let url = config.connection_url();

    if !Postgres::database_exists(&url)
        .await
        .map_err(SeedError::Connection)?
    {
        info!("Creating database '{}'", config.database_name);
        Postgres::create_database(&url)
            .await
            .map_err(SeedError::Connection)?;
    }

    // The pipeline is strictly sequential; one connection is all it uses.
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .map_err(SeedError::Connection)?;

    Ok(pool)
}
