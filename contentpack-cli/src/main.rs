//! contentpack CLI
//!
//! Loads content pack archives from a mods directory against the offline
//! host and reports what each pack contributed.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use contentpack::config::ConfigFile;
use contentpack::logging::init_logging;

use commands::clean::CleanArgs;
use commands::inspect::InspectArgs;
use commands::load::LoadArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "contentpack")]
#[command(version, about = "Load, inspect and stage content pack archives", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/contentpack/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level regardless of [logging] level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load every pack in the mods directory and report the results
    Load(LoadArgs),
    /// List how the members of one archive would be routed
    Inspect(InspectArgs),
    /// Remove the staging folder left by an earlier run
    Clean(CleanArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => ConfigFile::load_from(path),
        None => ConfigFile::load(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    let _guard = init_logging(&logging).map_err(|e| CliError::Logging(e.to_string()))?;

    match cli.command {
        Commands::Load(args) => commands::load::run(args, &config),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Clean(args) => commands::clean::run(args, &config),
    }
}
