use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Boreas extreme-weather trend charts.
#[derive(Parser)]
#[command(
    name = "boreas",
    version,
    about = "Decadal trend charts for extreme temperature and precipitation days"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fit trends and write every configured chart.
    Report(ReportArgs),
}

/// Arguments for the `report` subcommand.
#[derive(clap::Args)]
pub struct ReportArgs {
    /// Path to TOML configuration file. Without it, `boreas.toml` is used
    /// when present and built-in defaults otherwise.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the annual exceedance CSV path from config.
    #[arg(short, long)]
    pub annual: Option<PathBuf>,

    /// Override the daily observation CSV path from config.
    #[arg(short, long)]
    pub daily: Option<PathBuf>,

    /// Override the chart output directory from config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}
