use sqlx::SqliteConnection;
use tracing::{debug, instrument};

use crate::db::{
    DateBounds, DbError, PrecipitationReading, StationActivity, TemperatureAggregate,
    TemperatureObservation,
};

/// Read queries over the `measurement` table, bound to one store session.
///
/// Dates are compared as raw ISO strings, which matches chronological order
/// only because the snapshot stores them zero-padded.
pub struct MeasurementRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> MeasurementRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    #[instrument(skip(self))]
    pub async fn date_bounds(&mut self) -> Result<DateBounds, DbError> {
        let bounds = sqlx::query_as::<_, DateBounds>(
            r#"
            SELECT MIN(date) AS earliest, MAX(date) AS latest
            FROM measurement
            "#,
        )
        .fetch_one(&mut *self.conn)
        .await?;

        debug!("Measurement dates span {:?} to {:?}", bounds.earliest, bounds.latest);
        Ok(bounds)
    }

    #[instrument(skip(self))]
    pub async fn latest_date(&mut self) -> Result<Option<String>, DbError> {
        let latest = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(date) FROM measurement")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(latest)
    }

    /// All precipitation readings on or after `start`, oldest first
    #[instrument(skip(self))]
    pub async fn find_precipitation_since(
        &mut self,
        start: &str,
    ) -> Result<Vec<PrecipitationReading>, DbError> {
        debug!("Querying precipitation since {}", start);

        let readings = sqlx::query_as::<_, PrecipitationReading>(
            r#"
            SELECT date, CAST(prcp AS REAL) AS precipitation
            FROM measurement
            WHERE date >= ?1
            ORDER BY date ASC, station ASC
            "#,
        )
        .bind(start)
        .fetch_all(&mut *self.conn)
        .await?;

        debug!("Found {} precipitation readings", readings.len());
        Ok(readings)
    }

    /// Station with the most measurement rows. Ties go to the lowest identifier.
    #[instrument(skip(self))]
    pub async fn most_active_station(&mut self) -> Result<Option<StationActivity>, DbError> {
        let activity = sqlx::query_as::<_, StationActivity>(
            r#"
            SELECT station, COUNT(*) AS observations
            FROM measurement
            GROUP BY station
            ORDER BY observations DESC, station ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&mut *self.conn)
        .await?;

        if let Some(ref a) = activity {
            debug!("Most active station is {} with {} rows", a.station, a.observations);
        }
        Ok(activity)
    }

    #[instrument(skip(self))]
    pub async fn find_temperatures_since(
        &mut self,
        station: &str,
        start: &str,
    ) -> Result<Vec<TemperatureObservation>, DbError> {
        debug!("Querying temperatures for station {} since {}", station, start);

        let observations = sqlx::query_as::<_, TemperatureObservation>(
            r#"
            SELECT date, CAST(tobs AS REAL) AS temperature
            FROM measurement
            WHERE station = ?1 AND date >= ?2
            ORDER BY date ASC
            "#,
        )
        .bind(station)
        .bind(start)
        .fetch_all(&mut *self.conn)
        .await?;

        debug!("Found {} temperature observations", observations.len());
        Ok(observations)
    }

    /// Min/avg/max temperature over `date >= start` and, when given, `date <= end`
    #[instrument(skip(self))]
    pub async fn temperature_aggregate(
        &mut self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureAggregate, DbError> {
        let aggregate = sqlx::query_as::<_, TemperatureAggregate>(
            r#"
            SELECT CAST(MIN(tobs) AS REAL) AS min_temp,
                   CAST(AVG(tobs) AS REAL) AS avg_temp,
                   CAST(MAX(tobs) AS REAL) AS max_temp,
                   COUNT(tobs) AS observations
            FROM measurement
            WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&mut *self.conn)
        .await?;

        debug!(
            "Aggregated {} temperature observations from {} to {:?}",
            aggregate.observations, start, end
        );
        Ok(aggregate)
    }
}
