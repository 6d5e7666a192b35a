mod cleaner;
mod clock;
mod config;
mod console;
mod coordinator;
mod errors;
mod logging;
mod output;
mod records;
mod registry;
mod retailer;
mod schedule;
mod snapshot;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "pricegatherer", about = "Daily retailer price snapshots to CSV")]
struct Cli {
    /// Settings file (defaults to ./pricegatherer.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape all sources once and write today's snapshot
    Run,
    /// Stay up and scrape every day at the configured hour
    Schedule {
        /// Run once immediately before waiting for the first scheduled time
        #[arg(long)]
        now: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Invalid configuration")?;
    logging::init(&settings.error_log_path)?;

    match cli.command {
        Commands::Run => {
            let offset = settings.offset();
            let outcome = match tokio::task::spawn_blocking(move || coordinator::run(&settings)).await? {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Exception occurred when running the scraper: {:?}", e);
                    return Err(e);
                }
            };
            console::log(
                offset,
                format!(
                    "Done: {} / {} rows kept in {:?} ({:.1}s)",
                    outcome.rows,
                    outcome.report.total,
                    outcome.snapshot,
                    t0.elapsed().as_secs_f64()
                ),
            );
            Ok(())
        }
        Commands::Schedule { now } => {
            println!("Initializing scheduler");
            schedule::run_forever(settings, now).await
        }
    }
}
