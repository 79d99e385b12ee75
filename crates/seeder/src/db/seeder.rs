//! Database seeding pipeline.

use std::fmt;

use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::fixtures::{CollectionFixture, FixtureSet, IndexSpec};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Duplicate key in '{collection}' (constraint: {constraint})")]
    DuplicateKey {
        collection: String,
        constraint: String,
    },

    #[error("Document serialization error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Index on '{0}' has no fields")]
    EmptyIndex(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result of a completed seeding run, queried from actual stored state.
#[derive(Debug, Clone)]
pub struct Summary {
    pub database: String,
    pub collections: Vec<String>,
    pub counts: Vec<(String, i64)>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Database initialization completed successfully!")?;
        write!(f, "\nDatabase: {}", self.database)?;
        write!(f, "\nCollections created: {}", self.collections.join(", "))?;
        for (collection, count) in &self.counts {
            write!(f, "\n{} count: {count}", capitalize(collection))?;
        }
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Database seeder for inserting the fixture data.
///
/// Steps run strictly in sequence: ensure collections, bulk-insert documents,
/// create indexes, then read back the summary. There is no retry and no
/// rollback; a failure midway leaves a partially seeded database and
/// propagates to the caller.
pub struct Seeder {
    pool: PgPool,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the full pipeline and returns the summary.
    pub async fn run(
        &self,
        fixtures: &FixtureSet,
        indexes: &[IndexSpec],
    ) -> Result<Summary, SeedError> {
        let collections = fixtures.collections()?;

        for collection in &collections {
            self.ensure_collection(collection.name).await?;
        }

        for collection in &collections {
            self.insert_documents(collection.name, &collection.documents)
                .await?;
        }

        for index in indexes {
            self.create_index(index).await?;
        }

        self.summarize(&collections).await
    }

    /// Creates the collection's backing table if it does not exist.
    ///
    /// Explicit creation before any insert keeps the outcome deterministic
    /// across backends: all collections exist even if an insert fails later.
    pub async fn ensure_collection(&self, name: &str) -> Result<(), SeedError> {
        check_collection_name(name)?;
        info!("Ensuring collection '{name}' exists");

        let sql = format!(
            r#"CREATE TABLE IF NOT EXISTS "{name}" (id BIGSERIAL PRIMARY KEY, doc JSONB NOT NULL)"#
        );
        sqlx::query(&sql).execute(&self.pool).await?;

        Ok(())
    }

    /// Inserts the documents as one bulk statement, preserving input order.
    ///
    /// Not idempotent: a re-run duplicates documents, and unique indexes then
    /// reject the conflicting insert with [`SeedError::DuplicateKey`].
    pub async fn insert_documents(
        &self,
        name: &str,
        documents: &[Value],
    ) -> Result<(), SeedError> {
        check_collection_name(name)?;
        info!("Inserting {} documents into '{name}'", documents.len());

        let sql = format!(
            r#"
            INSERT INTO "{name}" (doc)
            SELECT elem
            FROM jsonb_array_elements($1) WITH ORDINALITY AS t(elem, ord)
            ORDER BY ord
            "#
        );
        sqlx::query(&sql)
            .bind(Value::Array(documents.to_vec()))
            .execute(&self.pool)
            .await
            .map_err(|e| classify_insert_error(e, name))?;

        Ok(())
    }

    /// Creates the index if it does not exist. Idempotent for a matching spec.
    pub async fn create_index(&self, spec: &IndexSpec) -> Result<(), SeedError> {
        check_index_spec(spec)?;
        info!(
            "Creating {}index '{}' on '{}'",
            if spec.unique { "unique " } else { "" },
            spec.name(),
            spec.collection
        );

        let columns: Vec<String> = spec
            .fields
            .iter()
            .map(|(field, order)| format!("(doc->>'{field}') {}", order.as_sql()))
            .collect();
        let sql = format!(
            r#"CREATE {}INDEX IF NOT EXISTS "{}" ON "{}" ({})"#,
            if spec.unique { "UNIQUE " } else { "" },
            spec.name(),
            spec.collection,
            columns.join(", ")
        );
        sqlx::query(&sql).execute(&self.pool).await?;

        Ok(())
    }

    /// Builds the summary from stored state: database name, collections that
    /// actually exist, and post-insert document counts.
    async fn summarize(&self, collections: &[CollectionFixture]) -> Result<Summary, SeedError> {
        let database: String = sqlx::query_scalar("SELECT current_database()")
            .fetch_one(&self.pool)
            .await?;

        let stored: Vec<String> =
            sqlx::query_scalar("SELECT tablename FROM pg_tables WHERE schemaname = 'public'")
                .fetch_all(&self.pool)
                .await?;

        let names: Vec<String> = collections
            .iter()
            .map(|c| c.name)
            .filter(|name| stored.iter().any(|s| s == name))
            .map(|name| name.to_string())
            .collect();

        let mut counts = Vec::with_capacity(names.len());
        for name in &names {
            counts.push((name.clone(), self.count_documents(name).await?));
        }

        Ok(Summary {
            database,
            collections: names,
            counts,
        })
    }

    /// Counts the documents currently stored in a collection.
    pub async fn count_documents(&self, name: &str) -> Result<i64, SeedError> {
        check_collection_name(name)?;
        let count: i64 = sqlx::query_scalar(&format!(r#"SELECT COUNT(*) FROM "{name}""#))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Deletes all documents from the fixture collections.
    ///
    /// Collections and indexes remain; only the stored documents go away.
    pub async fn clear_all(&self, fixtures: &FixtureSet) -> Result<(), SeedError> {
        info!("Clearing all seeded data...");

        for name in fixtures.collection_names() {
            check_collection_name(name)?;
            sqlx::query(&format!(r#"DELETE FROM "{name}""#))
                .execute(&self.pool)
                .await?;
        }

        info!("All data cleared");
        Ok(())
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Collection names are interpolated into SQL as identifiers, so they are
/// restricted to lowercase snake_case.
fn check_collection_name(name: &str) -> Result<(), SeedError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SeedError::InvalidIdentifier(name.to_string()))
    }
}

/// Field names land inside a quoted SQL string literal; alphanumerics and
/// underscores only.
fn check_field_name(field: &str) -> Result<(), SeedError> {
    if !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(SeedError::InvalidIdentifier(field.to_string()))
    }
}

/// An index needs a valid collection and at least one field; an empty field
/// list would render invalid SQL.
fn check_index_spec(spec: &IndexSpec) -> Result<(), SeedError> {
    check_collection_name(spec.collection)?;
    if spec.fields.is_empty() {
        return Err(SeedError::EmptyIndex(spec.collection.to_string()));
    }
    for (field, _) in &spec.fields {
        check_field_name(field)?;
    }
    Ok(())
}

fn classify_insert_error(err: sqlx::Error, collection: &str) -> SeedError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return SeedError::DuplicateKey {
                collection: collection.to_string(),
                constraint: db_err.constraint().unwrap_or("unknown").to_string(),
            };
        }
    }
    SeedError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_renders_count_lines() {
        let summary = Summary {
            database: "petstore_test".to_string(),
            collections: vec![
                "pets".to_string(),
                "users".to_string(),
                "orders".to_string(),
            ],
            counts: vec![
                ("pets".to_string(), 5),
                ("users".to_string(), 3),
                ("orders".to_string(), 3),
            ],
        };
        let rendered = summary.to_string();

        assert!(rendered.starts_with("Database initialization completed successfully!"));
        assert!(rendered.contains("Database: petstore_test"));
        assert!(rendered.contains("Collections created: pets, users, orders"));
        assert!(rendered.contains("Pets count: 5"));
        assert!(rendered.contains("Users count: 3"));
        assert!(rendered.contains("Orders count: 3"));
    }

    #[test]
    fn collection_names_are_validated() {
        assert!(check_collection_name("pets").is_ok());
        assert!(check_collection_name("segment_efforts").is_ok());
        assert!(check_collection_name("Pets").is_err());
        assert!(check_collection_name("pets; DROP TABLE users").is_err());
        assert!(check_collection_name("").is_err());
    }

    #[test]
    fn index_specs_without_fields_are_rejected() {
        let empty = IndexSpec {
            collection: "pets",
            fields: vec![],
            unique: false,
        };
        assert!(matches!(
            check_index_spec(&empty),
            Err(SeedError::EmptyIndex(_))
        ));
        assert!(check_index_spec(&IndexSpec::ascending("pets", "name")).is_ok());
    }

    #[test]
    fn field_names_are_validated() {
        assert!(check_field_name("orderId").is_ok());
        assert!(check_field_name("user_status").is_ok());
        assert!(check_field_name("a'b").is_err());
        assert!(check_field_name("").is_err());
    }
}
