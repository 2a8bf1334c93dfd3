//! Integerize CLI - Command Line Controlled Rounding
//!
//! Reference caller for `integerize_core`: reads JSON job files, rounds them
//! with the configured methodology and writes JSON results.
//!
//! # Commands
//!
//! - `integerize vector --input <job.json>` - Integerize one vector
//! - `integerize matrix --input <job.json>` - Integerize one matrix
//! - `integerize batch --input <jobs.json>` - Integerize many vectors
//! - `integerize check` - Print the resolved configuration
//!
//! # Configuration
//!
//! Settings come from `--config` (default `integerize.toml`, optional) with
//! `INTEGERIZE_METHODOLOGY`, `INTEGERIZE_CONDITION`, `INTEGERIZE_SEED` and
//! `INTEGERIZE_NEIGHBOUR_RADII` taking precedence. Logging honours `RUST_LOG`;
//! `--verbose` raises it to `debug`.

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// Controlled rounding of estimates to integer counts
#[derive(Parser)]
#[command(name = "integerize")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "integerize.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integerize one vector
    Vector {
        /// JSON job file: {"values": [...], "control": n}
        #[arg(short, long)]
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Integerize one matrix against row and column controls
    Matrix {
        /// JSON job file: {"matrix": [[...]], "row_controls": [...], "col_controls": [...]}
        #[arg(short, long)]
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Integerize a list of independent vectors
    Batch {
        /// JSON file holding an array of vector jobs
        #[arg(short, long)]
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the resolved configuration
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = config::load(Path::new(&cli.config))?;

    match cli.command {
        Commands::Vector { input, output } => {
            commands::vector::run(&input, output.as_deref(), &config)?
        }
        Commands::Matrix { input, output } => {
            commands::matrix::run(&input, output.as_deref(), &config)?
        }
        Commands::Batch { input, output } => {
            commands::batch::run(&input, output.as_deref(), &config)?
        }
        Commands::Check => commands::check::run(&cli.config, &config)?,
    }
    Ok(())
}
