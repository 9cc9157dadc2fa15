use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::config::CoreConfig;
use crate::errors::Result;

/// Wrapper around the Postgres connection pool backing the record gateway.
#[derive(Clone)]
pub struct DatabasePool {
    pool: Pool<Postgres>,
}

impl DatabasePool {
    /// Establishes a new connection pool based on the core configuration.
    pub async fn connect(config: &CoreConfig) -> Result<Self> {
        Self::connect_with_url(config.database_url(), config.max_connections).await
    }

    /// Establishes a connection pool directly from a database URL.
    pub async fn connect_with_url(database_url: &str, max_connections: u32) -> Result<Self> {
        debug!(max_connections, "connecting to postgres");
        let pool = Self::options(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Builds a pool that only opens connections on first use.
    pub fn connect_lazy_with_url(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = Self::options(max_connections).connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    fn options(max_connections: u32) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
    }

    pub fn inner(&self) -> &Pool<Postgres> {
        &self.pool
    }
}
