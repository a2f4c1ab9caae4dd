mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tanda_core::TandaError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tanda")]
#[command(about = "Tanda - rotating savings games with a random turn order")]
#[command(version)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a complete game in memory and report every payout
    Simulate(commands::SimulateArgs),

    /// Show the turn order a random word produces for a list of players
    Schedule(commands::ScheduleArgs),

    /// Compute the period index for a start time, frequency and query time
    Period(commands::PeriodArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "tanda={},tanda_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::load_config(cli.config.as_deref()).await?;

    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate(config, args, cli.json).await,
        Commands::Schedule(args) => commands::schedule(&config, args, cli.json),
        Commands::Period(args) => commands::period(args, cli.json),
    };

    if let Err(e) = result {
        match e.downcast_ref::<TandaError>() {
            Some(TandaError::InvalidFrequency) => {
                eprintln!("Error: frequency must be at least one second");
            }
            Some(TandaError::BeforeStart) => {
                eprintln!("Error: query time is before the game start");
            }
            Some(TandaError::Config(msg)) => {
                eprintln!("Error: invalid configuration: {}", msg);
                eprintln!("Check the file passed with --config");
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
