#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use hawaii_climate_api::db::ObservationStore;
use hawaii_climate_api::services::ClimateService;

pub const WAIHEE: &str = "USC00519281";
pub const KANEOHE: &str = "USC00513117";
pub const WAIKIKI: &str = "USC00519397";

const CREATE_STATION: &str = r#"
    CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    )
"#;

const CREATE_MEASUREMENT: &str = r#"
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp FLOAT,
        tobs FLOAT NOT NULL
    )
"#;

/// Fresh in-memory database with the snapshot schema and no rows.
/// A single never-expiring connection keeps the in-memory data alive.
pub async fn empty_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    create_schema(&pool).await;
    pool
}

pub async fn create_schema(pool: &SqlitePool) {
    sqlx::query(CREATE_STATION)
        .execute(pool)
        .await
        .expect("Failed to create station table");
    sqlx::query(CREATE_MEASUREMENT)
        .execute(pool)
        .await
        .expect("Failed to create measurement table");
}

pub async fn insert_station(pool: &SqlitePool, station: &str, name: &str) {
    sqlx::query("INSERT INTO station (station, name) VALUES (?1, ?2)")
        .bind(station)
        .bind(name)
        .execute(pool)
        .await
        .expect("Failed to insert station");
}

pub async fn insert_measurement(
    pool: &SqlitePool,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: f64,
) {
    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
        .bind(station)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(pool)
        .await
        .expect("Failed to insert measurement");
}

/// Three stations; latest date 2017-08-23, so the recency window starts 2016-08-23.
///
/// WAIHEE has the most rows (4), KANEOHE 2, WAIKIKI 1.
pub async fn seed_hawaii(pool: &SqlitePool) {
    insert_station(pool, WAIKIKI, "WAIKIKI 717.2, HI US").await;
    insert_station(pool, KANEOHE, "KANEOHE 838.1, HI US").await;
    insert_station(pool, WAIHEE, "WAIHEE 837.5, HI US").await;

    insert_measurement(pool, WAIHEE, "2016-08-22", Some(0.1), 70.0).await;
    insert_measurement(pool, WAIHEE, "2016-08-23", None, 71.0).await;
    insert_measurement(pool, WAIHEE, "2017-01-15", Some(0.5), 74.0).await;
    insert_measurement(pool, WAIHEE, "2017-08-23", Some(0.0), 78.0).await;
    insert_measurement(pool, KANEOHE, "2015-01-01", Some(0.2), 60.0).await;
    insert_measurement(pool, KANEOHE, "2017-08-20", Some(1.2), 79.0).await;
    insert_measurement(pool, WAIKIKI, "2017-08-22", Some(0.3), 81.0).await;
}

pub async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;
    seed_hawaii(&pool).await;
    pool
}

pub fn service_for(pool: &SqlitePool) -> ClimateService {
    ClimateService::new(ObservationStore::from_pool(pool.clone()))
}
