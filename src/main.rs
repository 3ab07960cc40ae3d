//! CLI entry point for the commute rater.
//!
//! Provides subcommands for generating the full comparison summary and for
//! looking up walk/transit scores of a single address.

use anyhow::Result;
use clap::{Parser, Subcommand};
use commute_rater::config::ApiConfig;
use commute_rater::input::{load_destinations, load_origins};
use commute_rater::output::{SortBy, print_table};
use commute_rater::scores::fetch_scores;
use commute_rater::services::{MapsClient, WalkScoreClient};
use commute_rater::summary::summary;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "commute_rater")]
#[command(about = "Compare apartments by commute times and walkability", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full comparison matrix, refetching only when inputs changed
    Summary {
        /// File with one origin address per line
        #[arg(short, long, default_value = "origins.txt")]
        origins: PathBuf,

        /// CSV of destinations: name, address, comment, weight, optional mode
        #[arg(short, long, default_value = "destinations.csv")]
        destinations: PathBuf,

        /// Stored matrix location
        #[arg(short, long, default_value = "matrix.csv")]
        matrix: PathBuf,

        /// Refetch travel times even if the stored matrix looks current
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Sort the report ascending by this column
        #[arg(short, long, value_enum, default_value = "wa")]
        sort: SortBy,
    },
    /// Look up walk and transit scores for one address
    Scores {
        #[arg(value_name = "ADDRESS")]
        address: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    tracing_subscriber::registry().with(stderr_layer).init();

    let cli = Cli::parse();

    // Credentials are resolved before any call so a missing key fails the
    // run immediately.
    let config = ApiConfig::from_env()?;
    let maps = MapsClient::new(config.google_api_key.clone());
    let walkscore = WalkScoreClient::new(config.walkscore_api_key.clone());

    match cli.command {
        Commands::Summary {
            origins,
            destinations,
            matrix,
            force,
            sort,
        } => {
            let origins = load_origins(&origins)?;
            let destinations = load_destinations(&destinations)?;
            info!(
                origins = origins.len(),
                destinations = destinations.len(),
                force,
                "Generating summary"
            );

            let table = summary(
                &maps,
                &maps,
                &walkscore,
                &origins,
                &destinations,
                &matrix,
                force,
            )?;
            print_table(&table, sort);
        }
        Commands::Scores { address } => {
            let scores = fetch_scores(&maps, &walkscore, &address)?;
            println!("Walk:    {}", label(scores.walk));
            println!("Transit: {}", label(scores.transit));
        }
    }

    Ok(())
}

fn label(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value}"),
        None => "NA".to_string(),
    }
}
