//! Seed data for the petstore test database.
//!
//! Ensures the `pets`, `users`, and `orders` collections exist, populates
//! them with a fixed set of sample documents, creates the supporting indexes,
//! and reports per-collection counts. The pipeline is a single sequential
//! pass; any failure aborts the run and surfaces to the caller.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seeder::prelude::*;
//!
//! let config = SeedConfig::from_env();
//! let pool = seeder::db::connect(&config).await?;
//!
//! let summary = Seeder::new(pool)
//!     .run(&FixtureSet::sample(), &IndexSpec::sample_set())
//!     .await?;
//! println!("{summary}");
//! ```

pub mod config;
pub mod db;
pub mod documents;
pub mod fixtures;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, Seeder, Summary};
    pub use crate::documents::{Order, OrderStatus, Pet, PetStatus, Tag, User};
    pub use crate::fixtures::{CollectionFixture, FixtureSet, IndexOrder, IndexSpec};
}
