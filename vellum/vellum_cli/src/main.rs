use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vellum_core::{AuthorizationConfig, LogLevel};

mod commands;
mod fixture;

use commands::actions::ActionsArgs;
use commands::check::CheckArgs;

/// Vellum Command Line Interface
///
/// Answers authorization questions against a fixture of models, records,
/// and tokens.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Path to the authorization configuration file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[clap(long, global = true)]
    log_level: Option<LogLevel>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a caller may perform an action
    Check(CheckArgs),

    /// List every action with its permission requirement
    Actions(ActionsArgs),

    /// Generate a fresh token and secret
    #[clap(name = "new-token")]
    NewToken,
}

fn init_logging(level: LogLevel) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => AuthorizationConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AuthorizationConfig::default(),
    };

    init_logging(cli.log_level.unwrap_or(config.log_level));
    log::debug!("Model creators: {:?}", config.model_creators);

    match cli.command {
        Commands::Check(args) => {
            if commands::check::execute(&args, &config)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Actions(args) => {
            commands::actions::execute(&args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::NewToken => {
            commands::token::execute();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            // Distinct from a denied check
            ExitCode::from(2)
        }
    }
}
