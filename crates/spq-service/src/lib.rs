//! # SPQ Service
//!
//! Process entry point for the SPQ server:
//! - Parses the command line
//! - Initializes logging
//! - Loads the configuration document
//! - Dispatches to the configured transport and serves
//!
//! All failures surface as [`StartupError`]; `main` maps them to exit codes
//! via [`StartupError::exit_code`].

use clap::Parser;
use spq_api::{load_config, run_transport, StartupError};
use spq_core::Ports;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// SPQ server - hands out queued items over HTTP
#[derive(Debug, Parser)]
#[command(name = "spq-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serves the next item from a queue over the configured transport")]
pub struct Cli {
    /// Configuration document (JSON, or TOML/YAML by extension)
    #[arg(short, long, env = "SPQ_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// Log level for the server's own crates; RUST_LOG overrides it
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Filter directives used when RUST_LOG is not set
    pub fn default_filter(&self) -> String {
        format!(
            "spq_server={level},spq_service={level},spq_api={level},spq_core={level},\
             tower_http=debug",
            level = self.log_level
        )
    }
}

/// Install the global tracing subscriber; logs go to stderr.
pub fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_filter()));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load the configuration and serve on the transport it names
///
/// Returns only after a shutdown signal or on a fatal error.
pub async fn run(cli: &Cli) -> Result<(), StartupError> {
    info!(config = %cli.config.display(), "Booting");

    let config = load_config(&cli.config)?;
    let ports = Ports::default();

    run_transport(config, ports).await
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
