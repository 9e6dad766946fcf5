use tracing::{debug, info, instrument, warn};

use crate::db::{
    MeasurementRepository, MostActiveStationObservations, ObservationStore, PrecipitationReading,
    Station, StationRepository, TemperatureStats,
};
use crate::services::window::{validate_range, window_start};
use crate::services::QueryError;

/// The four read-only views over the observation snapshot.
///
/// Every operation acquires its own store session and releases it on
/// return, so calls share nothing and can run concurrently.
#[derive(Clone)]
pub struct ClimateService {
    store: ObservationStore,
}

impl ClimateService {
    pub fn new(store: ObservationStore) -> Self {
        Self { store }
    }

    /// Precipitation for the 365 days ending at the latest recorded date
    #[instrument(skip(self))]
    pub async fn recent_precipitation(&self) -> Result<Vec<PrecipitationReading>, QueryError> {
        let mut session = self.store.session().await?;
        let mut measurements = MeasurementRepository::new(&mut session);

        let latest = measurements.latest_date().await?.ok_or(QueryError::NoData)?;
        let start = window_start(&latest)?;
        debug!("Precipitation window {} to {}", start, latest);

        let readings = measurements.find_precipitation_since(&start).await?;
        info!("Returning {} precipitation readings since {}", readings.len(), start);
        Ok(readings)
    }

    /// Every station identifier. An empty station table is `NoData`.
    #[instrument(skip(self))]
    pub async fn list_stations(&self) -> Result<Vec<String>, QueryError> {
        let mut session = self.store.session().await?;
        let ids = StationRepository::new(&mut session).find_identifiers().await?;

        if ids.is_empty() {
            warn!("Station table is empty");
            return Err(QueryError::NoData);
        }
        Ok(ids)
    }

    /// Identifier and name of every station
    #[instrument(skip(self))]
    pub async fn station_directory(&self) -> Result<Vec<Station>, QueryError> {
        let mut session = self.store.session().await?;
        let stations = StationRepository::new(&mut session).find_all().await?;

        if stations.is_empty() {
            warn!("Station table is empty");
            return Err(QueryError::NoData);
        }
        Ok(stations)
    }

    /// Temperature observations of the station with the most rows, limited to
    /// the recency window anchored at the latest date of the whole dataset
    #[instrument(skip(self))]
    pub async fn most_active_station_observations(
        &self,
    ) -> Result<MostActiveStationObservations, QueryError> {
        let mut session = self.store.session().await?;
        let mut measurements = MeasurementRepository::new(&mut session);

        let activity = measurements
            .most_active_station()
            .await?
            .ok_or(QueryError::NoData)?;
        let latest = measurements.latest_date().await?.ok_or(QueryError::NoData)?;
        let start = window_start(&latest)?;

        let observations = measurements
            .find_temperatures_since(&activity.station, &start)
            .await?;

        info!(
            "Returning {} observations for most active station {} ({} total rows)",
            observations.len(),
            activity.station,
            activity.observations
        );

        Ok(MostActiveStationObservations {
            station: activity.station,
            total_observations: activity.observations,
            window_start: start,
            observations,
        })
    }

    /// Min, mean and max temperature from `start` (through `end` if given).
    /// Dates are validated against the dataset bounds before aggregating.
    #[instrument(skip(self))]
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, QueryError> {
        let mut session = self.store.session().await?;
        let mut measurements = MeasurementRepository::new(&mut session);

        let bounds = measurements.date_bounds().await?;
        let (earliest, latest) = match (bounds.earliest, bounds.latest) {
            (Some(earliest), Some(latest)) => (earliest, latest),
            _ => return Err(QueryError::NoData),
        };

        validate_range(&earliest, &latest, start, end)?;

        let aggregate = measurements.temperature_aggregate(start, end).await?;
        let no_rows = || QueryError::NoDataInRange {
            start: start.to_string(),
            end: end.unwrap_or(latest.as_str()).to_string(),
        };

        if aggregate.observations == 0 {
            return Err(no_rows());
        }

        let stats = match (aggregate.min_temp, aggregate.avg_temp, aggregate.max_temp) {
            (Some(min), Some(avg), Some(max)) => TemperatureStats { min, avg, max },
            _ => return Err(no_rows()),
        };

        info!(
            "Temperature stats over {} observations: min {:.2}, avg {:.2}, max {:.2}",
            aggregate.observations, stats.min, stats.avg, stats.max
        );
        Ok(stats)
    }
}
