//! Database operations for the portfolio `PostgreSQL` database.
//!
//! # Tables
//!
//! - Catalog: `skill_categories`, `skills`, `experiences`,
//!   `project_categories`, `technologies`, `projects` (+
//!   `project_technologies`), `article_categories`, `tags`, `articles`
//!   (+ `article_tags`)
//! - `contact_messages` - Contact form submissions
//! - `site_settings` - Singleton configuration row
//!
//! Queries are runtime-checked (`query_as` with `FromRow` models) so the
//! workspace builds without a live database.
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p portfolio-cli -- migrate
//! ```

pub mod catalog;
pub mod messages;
pub mod settings;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
