//! Run the climate queries against a snapshot file and print JSON

use clap::{Parser, Subcommand};

use hawaii_climate_api::api::TemperatureStatsResponse;
use hawaii_climate_api::db::ObservationStore;
use hawaii_climate_api::services::ClimateService;

#[derive(Parser)]
#[command(name = "query-snapshot")]
#[command(about = "Query a Hawaii climate snapshot without starting the server", long_about = None)]
struct Cli {
    /// Snapshot connection string, e.g. sqlite:Resources/hawaii.sqlite
    #[arg(long, env)]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Precipitation over the last 365 days of data
    Precipitation,
    /// Station identifiers
    Stations {
        /// Include station names
        #[arg(long)]
        with_names: bool,
    },
    /// Recent temperatures at the most active station
    Tobs,
    /// Min/avg/max temperature from START (through END)
    Temps {
        start: String,
        end: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let store = ObservationStore::connect(&cli.database_url, 1).await?;
    let service = ClimateService::new(store);

    let json = match cli.command {
        Command::Precipitation => serde_json::to_string_pretty(&service.recent_precipitation().await?)?,
        Command::Stations { with_names: true } => {
            serde_json::to_string_pretty(&service.station_directory().await?)?
        }
        Command::Stations { with_names: false } => {
            serde_json::to_string_pretty(&service.list_stations().await?)?
        }
        Command::Tobs => {
            serde_json::to_string_pretty(&service.most_active_station_observations().await?)?
        }
        Command::Temps { start, end } => {
            let stats = service.temperature_stats(&start, end.as_deref()).await?;
            serde_json::to_string_pretty(&TemperatureStatsResponse::from(stats))?
        }
    };

    println!("{json}");
    Ok(())
}
