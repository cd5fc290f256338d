//! # Teto Ext Chrome
//!
//! Renders the live page with a headless Chromium so its client-side script
//! fills in the rate table, then locates the table in the dumped DOM.
//!
//! Each call spawns one browser process:
//!
//! ```text
//! chromium --headless --no-sandbox --disable-dev-shm-usage --disable-gpu \
//!          --virtual-time-budget=<ms> --dump-dom <url>
//! ```
//!
//! The process is owned by a guard that kills and reaps it when the call
//! returns, whether it succeeded, failed, or hit the deadline.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod process;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use teto_html::{Document, ElementPath};
use teto_traits::{PageRenderer, RenderError, RenderedFragment};

use crate::process::run_with_deadline;

/// Executables tried on `PATH` when none is configured.
pub const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
];

/// Flags passed before any extra arguments.
const BASE_ARGS: &[&str] = &[
    "--headless",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
];

/// Browser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeConfig {
    /// Browser executable; searched on `PATH` when `None`.
    pub executable: Option<PathBuf>,
    /// Wall-clock deadline for one render.
    pub timeout: Duration,
    /// Virtual time the page's script is given before the DOM is dumped.
    pub virtual_time_budget: Duration,
    /// Additional browser flags, placed before the URL.
    pub extra_args: Vec<String>,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            executable: None,
            timeout: Duration::from_secs(30),
            virtual_time_budget: Duration::from_secs(10),
            extra_args: Vec::new(),
        }
    }
}

/// [`PageRenderer`] backed by a headless Chromium process.
#[derive(Debug, Clone, Default)]
pub struct ChromeRenderer {
    config: ChromeConfig,
}

impl ChromeRenderer {
    /// Creates a renderer with `config`.
    pub fn new(config: ChromeConfig) -> Self {
        Self { config }
    }

    /// Settings in use.
    pub fn config(&self) -> &ChromeConfig {
        &self.config
    }

    /// Arguments for rendering `url`.
    pub fn command_args(&self, url: &str) -> Vec<OsString> {
        let budget = format!(
            "--virtual-time-budget={}",
            self.config.virtual_time_budget.as_millis()
        );
        BASE_ARGS
            .iter()
            .map(OsString::from)
            .chain([OsString::from(budget), OsString::from("--dump-dom")])
            .chain(self.config.extra_args.iter().map(OsString::from))
            .chain([OsString::from(url)])
            .collect()
    }

    /// The configured executable, or the first candidate found on `PATH`.
    ///
    /// # Errors
    ///
    /// `RenderError::Navigation` when no browser can be found.
    pub fn executable(&self) -> Result<PathBuf, RenderError> {
        if let Some(path) = &self.config.executable {
            return Ok(path.clone());
        }
        let path_var = std::env::var_os("PATH").unwrap_or_default();
        std::env::split_paths(&path_var)
            .flat_map(|dir| BROWSER_CANDIDATES.iter().map(move |name| dir.join(name)))
            .find(|candidate| is_executable(candidate))
            .ok_or_else(|| {
                RenderError::Navigation(format!(
                    "no browser found on PATH (tried {})",
                    BROWSER_CANDIDATES.join(", ")
                ))
            })
    }

    /// Renders `url` and returns the serialized DOM.
    ///
    /// # Errors
    ///
    /// `Timeout` past the deadline; `Navigation` when the browser cannot be
    /// started, exits unsuccessfully, or prints no document; `Io` for pipe
    /// failures.
    pub fn dump_dom(&self, url: &str) -> Result<String, RenderError> {
        let executable = self.executable()?;
        let args = self.command_args(url);
        tracing::debug!(
            executable = %executable.display(),
            ?args,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "Launching headless browser"
        );

        let output = run_with_deadline(&executable, &args, self.config.timeout)?;
        if !output.status.success() {
            return Err(RenderError::Navigation(format!(
                "browser exited with {}: {}",
                output.status,
                last_line(&output.stderr)
            )));
        }
        if output.stdout.trim().is_empty() {
            return Err(RenderError::Navigation(format!(
                "browser produced no document for {url}: {}",
                last_line(&output.stderr)
            )));
        }
        Ok(output.stdout)
    }
}

impl PageRenderer for ChromeRenderer {
    fn name(&self) -> &'static str {
        "chrome"
    }

    fn render_and_locate(
        &self,
        url: &str,
        element_path: &str,
    ) -> Result<RenderedFragment, RenderError> {
        let path = ElementPath::parse(element_path)
            .map_err(|e| RenderError::invalid_path(e.path, e.reason))?;
        let started = Instant::now();
        let dom = self.dump_dom(url)?;

        let document = Document::parse(&dom);
        let element = document
            .locate(&path)
            .ok_or_else(|| RenderError::element_not_found(element_path))?;
        let html = element.outer_html();
        tracing::info!(
            %url,
            dom_bytes = dom.len(),
            fragment_bytes = html.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rendered page"
        );
        Ok(RenderedFragment::new(url, element_path, html))
    }
}

fn last_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("no diagnostics")
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}
