//! # Name Advisor Entry Point
//!
//! Loads and validates the service environment, then prints the resolved
//! configuration with secrets redacted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use name_advisor::{
    config::{ConfigLoader, ResolvedConfig, validation},
    telemetry::{self, LogSettings},
};

#[derive(Debug, Parser)]
#[command(name = "name-advisor", version, about)]
struct Cli {
    /// Directory containing the `.env` files (defaults to the working directory)
    #[arg(long, value_name = "DIR", global = true)]
    env_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the environment, even in test mode
    Check,
    /// Print the resolved configuration as JSON without validating
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = match cli.env_dir {
        Some(dir) => ConfigLoader::with_base_dir(dir),
        None => ConfigLoader::new(),
    };

    let env = loader.snapshot()?;
    telemetry::init_tracing(&LogSettings::from_env(&env))
        .context("initializing telemetry")?;

    match cli.command {
        None => {
            let config = loader.load()?;
            println!("Loaded configuration for mode: {}", config.node_env);
            println!("{}", config.redacted_json()?);
        }
        Some(Command::Check) => {
            validation::validate(&env)?;
            let config = ResolvedConfig::from_env(&env)?;
            println!("Environment OK (mode: {})", config.node_env);
        }
        Some(Command::Show) => {
            let config = ResolvedConfig::from_env(&env)?;
            println!("{}", config.redacted_json()?);
        }
    }

    Ok(())
}
