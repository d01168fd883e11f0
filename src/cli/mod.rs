//! cli
//!
//! Command-line interface layer for kiroku-nav.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and install logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and hands everything
//! else to [`crate::linking`]. Logs go to stderr, results to stdout.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::{Config, DEFAULT_LOG_FILTER};
use crate::core::types::Layout;
use crate::ui::output::{self, Verbosity};

/// Filter used by `--debug`.
const DEBUG_LOG_FILTER: &str = "kiroku_nav=debug";

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory the project config was looked up in.
    pub cwd: PathBuf,
    pub verbosity: Verbosity,
    /// Print machine-readable JSON.
    pub json: bool,
    /// Merged configuration.
    pub config: Config,
}

impl Context {
    /// `flag` if given, else the configured layout.
    pub fn layout(&self, flag: Option<Layout>) -> Layout {
        flag.unwrap_or_else(|| self.config.layout())
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let cwd = match &cli.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().context("Failed to determine working directory")?,
    };
    let loaded = Config::load(Some(&cwd)).context("Failed to load configuration")?;

    init_logging(cli.debug, &loaded.config);

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    for warning in &loaded.warnings {
        output::warn(
            format!("{}: {}", warning.path.display(), warning.message),
            verbosity,
        );
    }

    let ctx = Context {
        cwd,
        verbosity,
        json: cli.json || loaded.config.json_output(),
        config: loaded.config,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the stderr subscriber.
///
/// Filter precedence: `RUST_LOG`, `--debug`, config `log_filter`, default.
fn init_logging(debug: bool, config: &Config) {
    let fallback = if debug {
        DEBUG_LOG_FILTER.to_string()
    } else {
        config
            .log_filter()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
