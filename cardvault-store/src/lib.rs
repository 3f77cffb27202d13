//! cardvault-store: PostgreSQL persistence layer for the card game backend
//!
//! Entity schema plus one repository per entity. The API layer calls the
//! repositories through a [`Store`] handle built once at process start;
//! nothing here is initialized as a side effect of loading the crate.

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;

use sqlx::PgPool;

pub use config::DbConfig;
pub use error::{StoreError, StoreResult};
pub use repos::{
    Card, CardOwnership, CardRepo, Event, EventRepo, Player, PlayerRepo, Tag, TagRepo,
    UpgradeEdge,
};

/// Handle to the card store.
///
/// Owns the connection pool; cheap to clone and share. Repositories borrow
/// the pool and live no longer than the handle.
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Connect to the database described by `config` and run migrations.
    ///
    /// This is the single initialization point; the caller owns the
    /// returned handle's lifecycle.
    pub async fn connect(config: &DbConfig) -> StoreResult<Self> {
        let pool = pool::create_pool(&config.url()).await?;
        migrations::run(&pool).await?;

        tracing::info!(host = %config.host, database = %config.database, "Card store ready");
        Ok(Self { pool })
    }

    /// Wrap an existing pool. Migrations are not run; used by tests and
    /// callers that manage the pool themselves.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn cards(&self) -> CardRepo<'_> {
        CardRepo::new(&self.pool)
    }

    pub fn tags(&self) -> TagRepo<'_> {
        TagRepo::new(&self.pool)
    }

    pub fn events(&self) -> EventRepo<'_> {
        EventRepo::new(&self.pool)
    }

    pub fn players(&self) -> PlayerRepo<'_> {
        PlayerRepo::new(&self.pool)
    }
}
