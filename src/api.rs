use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use utoipa::{OpenApi, ToSchema};

use crate::db::{PrecipitationReading, TemperatureObservation, TemperatureStats};
use crate::services::{ClimateService, QueryError};

#[derive(Clone)]
pub struct AppState {
    pub climate_service: ClimateService,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Temperature aggregates rendered with two decimals and a Fahrenheit suffix
#[derive(Debug, Serialize, ToSchema)]
pub struct TemperatureStatsResponse {
    #[serde(rename = "Minimum Temperature")]
    #[schema(example = "76.00 F")]
    pub minimum: String,
    #[serde(rename = "Average Temperature")]
    #[schema(example = "77.67 F")]
    pub average: String,
    #[serde(rename = "Maximum Temperature")]
    #[schema(example = "80.00 F")]
    pub maximum: String,
}

impl From<TemperatureStats> for TemperatureStatsResponse {
    fn from(stats: TemperatureStats) -> Self {
        Self {
            minimum: format_fahrenheit(stats.min),
            average: format_fahrenheit(stats.avg),
            maximum: format_fahrenheit(stats.max),
        }
    }
}

fn format_fahrenheit(value: f64) -> String {
    format!("{value:.2} F")
}

impl QueryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, precipitation, stations, tobs, temperature_from, temperature_range),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        TemperatureStatsResponse,
        PrecipitationReading,
        TemperatureObservation
    )),
    info(
        title = "Hawaii Climate API",
        description = "Read-only precipitation and temperature observations from Hawaiian weather stations"
    )
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/precipitation", get(precipitation))
        .route("/stations", get(stations))
        .route("/tobs", get(tobs))
        .route("/{start}", get(temperature_from))
        .route("/{start}/{end}", get(temperature_range))
        .with_state(state.clone());

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .with_state(state)
        .nest("/api/v1.0", api_routes)
}

async fn index() -> Html<&'static str> {
    Html(concat!(
        "<h1>Welcome to the Hawaii Climate API!</h1>",
        "<b>Available Routes:</b><br/>",
        "/api/v1.0/precipitation - Last 12 months of precipitation data<br/>",
        "/api/v1.0/stations - List of weather stations<br/>",
        "/api/v1.0/tobs - Temperature observations for the most active station<br/>",
        "/api/v1.0/&lt;start&gt; - Min, Avg, Max temps from start date<br/>",
        "/api/v1.0/&lt;start&gt;/&lt;end&gt; - Min, Avg, Max temps for date range<br/>",
    ))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

fn log_failure(context: &str, e: &QueryError) {
    if e.is_client_error() {
        warn!("{}: {}", context, e);
    } else {
        error!("{}: {}", context, e);
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = 200, description = "Precipitation over the last 365 days of data", body = [PrecipitationReading]),
        (status = 500, description = "No data in the store", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<PrecipitationReading>>, QueryError> {
    debug!("Fetching recent precipitation");
    let readings = state
        .climate_service
        .recent_precipitation()
        .await
        .inspect_err(|e| log_failure("Failed to fetch recent precipitation", e))?;

    info!("Retrieved {} precipitation readings", readings.len());
    Ok(Json(readings))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = 200, description = "Station identifiers", body = [String]),
        (status = 500, description = "No stations in the store", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, QueryError> {
    debug!("Fetching station list");
    let ids = state
        .climate_service
        .list_stations()
        .await
        .inspect_err(|e| log_failure("Failed to list stations", e))?;

    info!("Retrieved {} stations", ids.len());
    Ok(Json(ids))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = 200, description = "Last 365 days of temperatures at the most active station", body = [TemperatureObservation]),
        (status = 500, description = "No data in the store", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn tobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservation>>, QueryError> {
    debug!("Fetching most active station observations");
    let result = state
        .climate_service
        .most_active_station_observations()
        .await
        .inspect_err(|e| log_failure("Failed to fetch most active station observations", e))?;

    info!(
        "Retrieved {} observations for station {} since {}",
        result.observations.len(),
        result.station,
        result.window_start
    );
    Ok(Json(result.observations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(("start" = String, Path, description = "First date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Temperature stats from start", body = TemperatureStatsResponse),
        (status = 400, description = "Start date outside the dataset", body = ErrorResponse),
        (status = 500, description = "No observations in range or no data in the store", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(start = %start))]
async fn temperature_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStatsResponse>, QueryError> {
    temperature_stats(&state, &start, None).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First date, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Temperature stats for the range", body = TemperatureStatsResponse),
        (status = 400, description = "Dates outside the dataset or start after end", body = ErrorResponse),
        (status = 500, description = "No observations in range or no data in the store", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(start = %start, end = %end))]
async fn temperature_range(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStatsResponse>, QueryError> {
    temperature_stats(&state, &start, Some(&end)).await
}

async fn temperature_stats(
    state: &AppState,
    start: &str,
    end: Option<&str>,
) -> Result<Json<TemperatureStatsResponse>, QueryError> {
    debug!("Fetching temperature stats from {} to {:?}", start, end);
    let stats = state
        .climate_service
        .temperature_stats(start, end)
        .await
        .inspect_err(|e| log_failure("Failed to compute temperature stats", e))?;

    Ok(Json(stats.into()))
}
