//! Profile store — pluggable, trait-based lookup of saved style profiles.
//!
//! Default: `PgProfileStore` over the `user_profiles` table.
//! `AppState` holds an `Arc<dyn ProfileStore>`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{pool_for, PoolCache};
use crate::errors::AppError;
use crate::models::profile::{ProfileRow, StoredProfile};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, id: Uuid) -> Result<Option<StoredProfile>, AppError>;

    async fn list_profiles(&self) -> Result<Vec<StoredProfile>, AppError>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    /// Builds a store on the cached pool for `database_url`.
    pub fn connect(cache: &PoolCache, database_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            pool: pool_for(cache, database_url)?,
        })
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get_profile(&self, id: Uuid) -> Result<Option<StoredProfile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, persona, tone, style_traits, sample_text, created_at \
             FROM user_profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoredProfile::from))
    }

    async fn list_profiles(&self) -> Result<Vec<StoredProfile>, AppError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, persona, tone, style_traits, sample_text, created_at \
             FROM user_profiles ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoredProfile::from).collect())
    }
}

/// Fixed set of profiles held in memory. Used by route tests.
#[cfg(test)]
pub struct InMemoryProfileStore(pub Vec<StoredProfile>);

#[cfg(test)]
#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self, id: Uuid) -> Result<Option<StoredProfile>, AppError> {
        Ok(self.0.iter().find(|p| p.id == id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<StoredProfile>, AppError> {
        Ok(self.0.clone())
    }
}
