use std::str::FromStr;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, info, instrument};

use crate::db::DbError;

/// Read-only handle to the observation snapshot
#[derive(Clone)]
pub struct ObservationStore {
    pool: SqlitePool,
}

impl ObservationStore {
    /// Open the snapshot file behind `database_url` without write access.
    /// The file must already exist; nothing is created or migrated.
    #[instrument]
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Opened observation snapshot {}", database_url);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a connection scoped to a single operation.
    /// It goes back to the pool when dropped.
    pub async fn session(&self) -> Result<PoolConnection<Sqlite>, DbError> {
        let conn = self.pool.acquire().await?;
        debug!("Acquired store session");
        Ok(conn)
    }
}
