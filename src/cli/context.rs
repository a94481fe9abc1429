//! CLI context carrying shared state into the handler
//!
//! Centralizes the immutable run configuration and the logging setup so
//! the handler only deals with monitoring itself.

use std::sync::Arc;

use anyhow::Result;

use super::Cli;
use crate::config::WatchConfig;

/// CLI execution context containing the shared run configuration.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<WatchConfig>,
    pub verbose: bool,
}

impl CliContext {
    /// Create a context from parsed arguments.
    pub fn new(cli: &Cli) -> Self {
        Self {
            config: Arc::new(cli.watch_config()),
            verbose: cli.verbose,
        }
    }

    /// Initialize the logging subsystem based on verbosity. All records
    /// go to stderr.
    pub fn init_logging(&self) -> Result<()> {
        let log_level = if self.verbose { "debug" } else { "info" };

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env().add_directive(
                    log_level
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::INFO.into()),
                ),
            )
            .with_writer(std::io::stderr)
            .init();

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!("Watch config: {:?}", self.config);
        }

        Ok(())
    }
}
