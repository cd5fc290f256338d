//! TOML configuration.
//!
//! ```toml
//! [source]
//! url_template = "https://www.anbima.com.br/informacoes/merc-sec/resultados/msec_{date}_ntn-b.asp"
//! element_path = "/html/body/table/tbody/tr/td/div/table[2]"
//!
//! [layout]
//! columns = 11
//! header_rows = 5
//! maturity_column = 2
//! rate_column = 5
//!
//! [browser]
//! executable = "/usr/bin/chromium"
//! timeout_secs = 30
//! virtual_time_budget_ms = 10000
//! extra_args = []
//!
//! [defaults]
//! spread = "1.25"
//! nominal_rate = "7.00"
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use teto_ext_chrome::ChromeConfig;
use teto_extract::{SourceSettings, TableLayout};

use crate::commands::{validate_nominal_rate, validate_spread};
use crate::error::{CliError, CliResult};

/// File looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "teto.toml";

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TetoConfig {
    /// Where the table is published.
    pub source: SourceSettings,
    /// Shape of the table.
    pub layout: TableLayout,
    /// Headless browser settings.
    pub browser: BrowserSettings,
    /// Calculator inputs used when not given on the command line.
    pub defaults: CalculatorDefaults,
}

/// Headless browser settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Browser executable; searched on `PATH` when absent.
    pub executable: Option<PathBuf>,
    /// Deadline for one page render.
    pub timeout_secs: u64,
    /// Script time granted before the DOM is dumped.
    pub virtual_time_budget_ms: u64,
    /// Additional browser flags.
    pub extra_args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            executable: None,
            timeout_secs: default_timeout_secs(),
            virtual_time_budget_ms: default_virtual_time_budget_ms(),
            extra_args: Vec::new(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_virtual_time_budget_ms() -> u64 {
    10_000
}

impl BrowserSettings {
    /// Renderer configuration for these settings.
    pub fn to_chrome_config(&self) -> ChromeConfig {
        ChromeConfig {
            executable: self.executable.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            virtual_time_budget: Duration::from_millis(self.virtual_time_budget_ms),
            extra_args: self.extra_args.clone(),
        }
    }
}

/// Calculator inputs used when not given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorDefaults {
    /// Spread in percent.
    #[serde(with = "rust_decimal::serde::str")]
    pub spread: Decimal,
    /// Nominal rate in percent.
    #[serde(with = "rust_decimal::serde::str")]
    pub nominal_rate: Decimal,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            spread: Decimal::new(125, 2),
            nominal_rate: Decimal::new(700, 2),
        }
    }
}

impl TetoConfig {
    /// Reads a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
    }

    /// Loads `explicit` if given, else `./teto.toml` if present, else
    /// defaults; then validates.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let config = match explicit {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                Self::from_file(path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::debug!(path = DEFAULT_CONFIG_FILE, "Loading configuration");
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => {
                tracing::debug!("Using default configuration");
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the pipeline cannot run with.
    pub fn validate(&self) -> CliResult<()> {
        self.source
            .validate()
            .and_then(|()| self.layout.validate())
            .map_err(|e| CliError::Config(e.to_string()))?;
        if self.browser.timeout_secs == 0 {
            return Err(CliError::Config("browser.timeout_secs must be positive".into()));
        }
        validate_spread(&self.defaults.spread.to_string())?;
        validate_nominal_rate(&self.defaults.nominal_rate.to_string())?;
        Ok(())
    }
}
