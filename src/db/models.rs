use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Database entity models
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub station: String,
    pub name: String,
}

/// Earliest and latest measurement dates, `None` when the table is empty
#[derive(Debug, Clone, FromRow)]
pub struct DateBounds {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct TemperatureAggregate {
    pub min_temp: Option<f64>,
    pub avg_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub observations: i64,
}

// API response DTOs (shared by services and api modules)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct PrecipitationReading {
    /// ISO `YYYY-MM-DD`
    pub date: String,
    /// Missing readings stay `null`
    pub precipitation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct TemperatureObservation {
    pub date: String,
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MostActiveStationObservations {
    pub station: String,
    pub total_observations: i64,
    pub window_start: String,
    pub observations: Vec<TemperatureObservation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}
