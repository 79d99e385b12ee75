//! Seeds the petstore test database with sample data and indexes.
//!
//! Run with:
//! ```
//! cargo run -p seeder --bin seed
//! ```

use seeder::config::SeedConfig;
use seeder::db::{self, Seeder};
use seeder::fixtures::{FixtureSet, IndexSpec};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env();
    let pool = db::connect(&config).await?;

    tracing::info!("Connected to database '{}'", config.database_name);

    let summary = Seeder::new(pool)
        .run(&FixtureSet::sample(), &IndexSpec::sample_set())
        .await?;

    println!("{summary}");

    Ok(())
}
