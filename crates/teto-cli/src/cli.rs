//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::CeilingArgs;

/// Teto - NTN-B indicative rates and ceiling-rate tables
#[derive(Parser)]
#[command(name = "teto")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (TOML). Defaults to ./teto.toml when present.
    #[arg(short, long, global = true, env = "TETO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Business date to fetch (dd/mm/yyyy) instead of the last business day
    #[arg(short, long, global = true)]
    pub date: Option<String>,

    /// Serve a saved page (or a directory of pages) instead of launching a browser
    #[arg(long, global = true, value_name = "PATH")]
    pub html_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the business date and source URL that would be fetched
    Url,

    /// Fetch and list maturities with their indicative rates
    Rates,

    /// Compute the ceiling-rate table for one maturity
    Ceiling(CeilingArgs),

    /// Line-driven session: refresh, select, adjust inputs, print tables
    Interactive,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
