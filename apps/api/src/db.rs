use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::cache::HandleCache;

/// Connection pools keyed by database URL.
pub type PoolCache = HandleCache<String, PgPool>;

/// Returns the pool for `database_url`, creating it on first use.
///
/// Pools connect lazily, so startup does not wait on PostgreSQL; the first
/// query pays the connection cost.
pub fn pool_for(cache: &PoolCache, database_url: &str) -> Result<PgPool> {
    cache.get_or_try_insert_with(&database_url.to_string(), || {
        info!("Opening PostgreSQL connection pool");
        PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)
            .context("Invalid DATABASE_URL")
    })
}
