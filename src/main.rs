use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "upshift")]
#[command(about = "Django upgrade readiness scanner - find breaking changes before you upgrade")]
#[command(version)]
struct Cli {
    /// Path to the project root (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Enable verbose logging (progress line per sub-scan)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the project for Django 5.0 breaking changes
    Scan {
        /// Additionally export the full results to breaking_changes_scan.json
        #[arg(long)]
        json: bool,
    },

    /// Analyze migrations for pytz usage and recommend a remediation path
    Migrations {
        /// Additionally export the full results to pytz_analysis.json
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new upshift.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Determine the working directory
    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Some(Commands::Scan { json }) => {
            cli::scan::scan_command(&work_dir, json)?;
        }
        Some(Commands::Migrations { json }) => {
            cli::migrations::migrations_command(&work_dir, json)?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(&work_dir, force)?;
        }
        None => {
            // Default: run the breaking-change scan
            cli::scan::scan_command(&work_dir, false)?;
        }
    }

    Ok(())
}
