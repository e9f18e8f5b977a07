//! Load the university catalog from a CSV export into PostgreSQL.

use clap::Parser;
use findmyuni::config::Settings;
use findmyuni::services::{load_catalog, PostgresClient};
use findmyuni::telemetry;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "load-data", about = "Import universities from a CSV export", version)]
struct Cli {
    /// CSV file with one university per row
    #[arg(default_value = "data/universities.csv")]
    csv: PathBuf,
    /// Alternate configuration file instead of config/default.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = match cli.config.as_ref() {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init(&settings.logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let client = match PostgresClient::from_settings(
        &settings.database.url,
        Some(2),
        Some(1),
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match load_catalog(&client, &cli.csv).await {
        Ok(report) => {
            info!(
                "Catalog load finished: {} inserted, {} skipped",
                report.inserted, report.skipped
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Catalog load failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
