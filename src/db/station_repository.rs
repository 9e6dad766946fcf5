use sqlx::SqliteConnection;
use tracing::{debug, instrument};

use crate::db::{DbError, Station};

pub struct StationRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> StationRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Station identifiers in table order
    #[instrument(skip(self))]
    pub async fn find_identifiers(&mut self) -> Result<Vec<String>, DbError> {
        let ids = sqlx::query_scalar::<_, String>("SELECT station FROM station ORDER BY rowid")
            .fetch_all(&mut *self.conn)
            .await?;

        debug!("Found {} stations", ids.len());
        Ok(ids)
    }

    #[instrument(skip(self))]
    pub async fn find_all(&mut self) -> Result<Vec<Station>, DbError> {
        let stations =
            sqlx::query_as::<_, Station>("SELECT station, name FROM station ORDER BY rowid")
                .fetch_all(&mut *self.conn)
                .await?;

        Ok(stations)
    }
}
