//! Teto CLI - NTN-B indicative rates and ceiling-rate tables.
//!
//! # Usage
//!
//! ```bash
//! # Where today's table would be fetched from
//! teto url
//!
//! # List maturities and indicative rates
//! teto rates
//!
//! # Ceiling table for one maturity
//! teto ceiling --maturity 15/05/2035 --spread 1.25 --nominal 7.00
//!
//! # Offline, from a saved page, as CSV
//! teto --html-file saved/ --date 14/08/2026 --format csv ceiling
//!
//! # Interactive session
//! teto interactive
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use teto_core::BusinessDate;

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::TetoConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = TetoConfig::load(cli.config.as_deref())?;
    let date = cli.date.as_deref().map(BusinessDate::parse).transpose()?;
    let ctx = Context {
        format: cli.format,
        config,
        date,
        html_file: cli.html_file,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Execute command
    match cli.command {
        Commands::Url => commands::url::execute(&ctx, &mut out)?,
        Commands::Rates => commands::rates::execute(&ctx, &mut out)?,
        Commands::Ceiling(args) => commands::ceiling::execute(args, &ctx, &mut out)?,
        Commands::Interactive => {
            drop(out);
            commands::interactive::execute(&ctx)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable. `-v` overrides
/// `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,teto=info")),
        1 => EnvFilter::new("warn,teto=debug"),
        _ => EnvFilter::new("warn,teto=trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
