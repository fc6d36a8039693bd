//! # Warden DB
//!
//! Database pool and the user store.
//!
//! - [`UserStore`]: the narrow contract the services persist users through
//! - [`PgUserStore`]: Postgres implementation on an sqlx pool
//! - [`MemoryUserStore`]: in-process implementation for tests (feature `test-utils`)
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use warden_config::DatabaseConfig;
//! use warden_db::{PgUserStore, UserStore, init_db_pool};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
//! ```

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod store;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use warden_config::DatabaseConfig;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;
pub use store::{StoreError, StoreResult, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool.
///
/// Connections are acquired per query and returned to the pool on every exit path;
/// waiting for one longer than the configured acquire timeout fails the query.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
        .context("Failed to connect to database")
}
