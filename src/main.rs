use brandfit::config::{LoggingSettings, Settings, SettingsError};
use brandfit::models::{BatchRequest, BatchResponse, BatchResult};
use clap::Parser;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use validator::Validate;

#[derive(Parser, Debug)]
#[command(
    name = "brandfit",
    about = "Rank listings for a brand requirement, or brands for a listing",
    version
)]
struct Cli {
    /// JSON batch request; read from stdin when omitted
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Settings file, instead of config/default + config/local
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,
}

/// Errors that end a batch run
#[derive(Debug, Error)]
enum RunnerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&settings.logging);
    info!("Configuration loaded successfully");

    match run(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Batch run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, SettingsError> {
    match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}

/// Logs go to stderr; stdout carries only the JSON response
fn init_tracing(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn run(cli: &Cli, settings: &Settings) -> Result<(), RunnerError> {
    let raw = match &cli.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let request: BatchRequest = serde_json::from_str(&raw)?;
    let ranker = settings.build_ranker();

    let result = match request {
        BatchRequest::BrandFit { requirement, query, listings } => {
            query.validate()?;

            info!("Ranking {} listings (cap {})", listings.len(), ranker.max_results());
            let outcome = ranker.rank(&requirement, &query, listings);

            match outcome.threshold {
                Some(threshold) => info!(
                    "Returning {} of {} matches at threshold {}",
                    outcome.matches.len(),
                    outcome.total_matches,
                    threshold.min_index()
                ),
                None => info!("No listings cleared the minimum fit index"),
            }

            BatchResult::BrandFit { outcome }
        }
        BatchRequest::PropertyFit { listing, brands } => {
            info!("Scoring {} brands for listing {}", brands.len(), listing.id);
            let result = ranker.matcher().find_brands(&listing, brands);

            info!("Returning {} brand matches", result.matches.len());

            BatchResult::PropertyFit {
                matches: result.matches,
                total_candidates: result.total_candidates,
            }
        }
    };

    let response = BatchResponse::new(result);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut out, &response)?;
    } else {
        serde_json::to_writer(&mut out, &response)?;
    }
    writeln!(out)?;

    Ok(())
}
