use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Proxima k-nearest-neighbor regression toolkit.
#[derive(Parser)]
#[command(
    name = "proxima",
    version,
    about = "k-nearest-neighbor regression with cross-validated tuning"
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
    /// Cross-validate the configured regressor.
    Cv(CvArgs),
    /// Grid-search k, distance and weighting on raw and standardized data.
    Tune(TuneArgs),
    /// Compare regular and efficient neighbor search across fold counts.
    Timing(TimingArgs),
}

/// Arguments for the `cv` subcommand.
#[derive(clap::Args)]
pub struct CvArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "proxima.toml")]
    pub config: PathBuf,

    /// Override dataset path from config.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Number of folds; 0 means leave-one-out. Defaults to [tune].folds.
    #[arg(short, long)]
    pub folds: Option<usize>,

    /// Standardize features before cross-validating.
    #[arg(long)]
    pub standardize: bool,
}

/// Arguments for the `tune` subcommand.
#[derive(clap::Args)]
pub struct TuneArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "proxima.toml")]
    pub config: PathBuf,

    /// Override dataset path from config.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Path for the JSON report. Printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `timing` subcommand.
#[derive(clap::Args)]
pub struct TimingArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "proxima.toml")]
    pub config: PathBuf,

    /// Override dataset path from config.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Time the [knn] configuration instead of tuning one first.
    #[arg(long)]
    pub no_tune: bool,
}
