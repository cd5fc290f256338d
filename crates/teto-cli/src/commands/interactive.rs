//! Interactive command implementation.
//!
//! A line-driven session over one [`RateSession`]: the table is loaded once at
//! start, `refresh` fetches again, and changing the maturity, spread or
//! nominal rate prints the recomputed ceiling table.

use std::io::{BufRead, Write};

use anyhow::Result;
use rust_decimal::Decimal;
use teto_extract::RateSession;
use teto_traits::PageRenderer;

use crate::cli::OutputFormat;
use crate::commands::ceiling::{resolve_maturity, CeilingReport};
use crate::commands::rates::write_series;
use crate::commands::{validate_nominal_rate, validate_spread, Context};
use crate::output::{print_error, print_success};

const HELP: &str = "\
Commands:
  rates              list maturities and indicative rates
  select <dd/mm/yyyy> choose the reference maturity
  spread <value>     set the spread (0.00 to 10.00)
  nominal <value>    set the nominal rate (0.00 to 15.00)
  table              print the ceiling table
  refresh            fetch the published table again
  help               show this help
  quit               leave";

/// Calculator inputs held between commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub maturity: Option<String>,
    pub spread: Decimal,
    pub nominal_rate: Decimal,
}

/// Execute the interactive command on stdin/stdout.
pub fn execute(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    let inputs = Inputs {
        maturity: None,
        spread: ctx.config.defaults.spread,
        nominal_rate: ctx.config.defaults.nominal_rate,
    };
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&mut session, inputs, ctx.format, stdin.lock(), &mut stdout.lock())
}

/// Runs the command loop until `quit` or end of input.
pub fn run<R: PageRenderer>(
    session: &mut RateSession<R>,
    mut inputs: Inputs,
    format: OutputFormat,
    input: impl BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    match session.initial_load() {
        Ok(series) => print_success(&format!("Loaded {} maturities", series.len())),
        Err(e) => print_error(&format!("{e} (use 'refresh' to retry)")),
    }
    show_table(session, &mut inputs, format, out)?;

    write!(out, "> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();

        match (command, argument) {
            ("", _) => {}
            ("quit" | "exit" | "q", _) => break,
            ("help" | "?", _) => writeln!(out, "{HELP}")?,
            ("rates", _) => match session.series() {
                Some(series) => write_series(out, series, format)?,
                None => print_error("no rate series loaded (use 'refresh')"),
            },
            ("refresh", _) => match session.refresh() {
                Ok(series) => {
                    print_success(&format!("Refreshed: {} maturities", series.len()));
                    show_table(session, &mut inputs, format, out)?;
                }
                Err(e) => print_error(&format!("{e} (previous table kept)")),
            },
            ("select", Some(key)) => match session.select(key) {
                Ok(_) => {
                    inputs.maturity = Some(key.to_string());
                    show_table(session, &mut inputs, format, out)?;
                }
                Err(e) => print_error(&e.to_string()),
            },
            ("spread", Some(value)) => match validate_spread(value) {
                Ok(spread) => {
                    inputs.spread = spread;
                    show_table(session, &mut inputs, format, out)?;
                }
                Err(e) => print_error(&e.to_string()),
            },
            ("nominal", Some(value)) => match validate_nominal_rate(value) {
                Ok(nominal_rate) => {
                    inputs.nominal_rate = nominal_rate;
                    show_table(session, &mut inputs, format, out)?;
                }
                Err(e) => print_error(&e.to_string()),
            },
            ("table", _) => show_table(session, &mut inputs, format, out)?,
            ("select" | "spread" | "nominal", None) => {
                print_error(&format!("'{command}' needs a value"))
            }
            _ => print_error(&format!("unknown command '{command}' (try 'help')")),
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

/// Prints the ceiling table for the current inputs. A maturity that left the
/// series after a refresh falls back to the first listed one.
fn show_table<R: PageRenderer>(
    session: &RateSession<R>,
    inputs: &mut Inputs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(series) = session.series() else {
        return Ok(());
    };
    let still_listed = inputs
        .maturity
        .as_deref()
        .is_some_and(|key| session.select(key).is_ok());
    if !still_listed {
        inputs.maturity = Some(resolve_maturity(series, None)?);
    }
    let maturity = inputs.maturity.clone().unwrap_or_default();

    let (_, reference_rate) = session.select(&maturity)?;
    let table = session.ceiling_table(&maturity, inputs.spread, inputs.nominal_rate)?;
    CeilingReport::new(
        series,
        &maturity,
        reference_rate,
        inputs.spread,
        inputs.nominal_rate,
        &table,
    )
    .write(out, format)
}
