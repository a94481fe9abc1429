//! CLI module providing command-line interface functionality
//!
//! This module handles argument parsing, context construction and the
//! monitoring loop itself.

pub mod commands;
pub mod context;
pub mod handlers;

use anyhow::Result;
use clap::Parser;

pub use commands::Cli;
pub use context::CliContext;
pub use handlers::CommandHandler;

/// Main CLI application following the CliContext pattern
pub struct CliApp;

impl CliApp {
    /// Parse command line arguments and run the monitor until shutdown.
    pub async fn run() -> Result<()> {
        let cli = Cli::parse();

        let context = CliContext::new(&cli);

        // Initialize logging through context
        context.init_logging()?;

        let handler = CommandHandler::new(context);
        handler.run().await
    }
}
