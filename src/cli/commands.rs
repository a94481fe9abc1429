//! Command-line argument definitions
//!
//! The tool has a single mode of operation, so everything lives on the
//! top-level clap structure.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{WatchConfig, DEFAULT_SERVER_URL};

/// Main CLI structure
#[derive(Parser)]
#[command(name = "ntfy-watch")]
#[command(about = "Monitor a folder and push filesystem change notifications to ntfy")]
#[command(version)]
pub struct Cli {
    /// Directory to monitor for changes
    #[arg(short, long)]
    pub path: PathBuf,

    /// ntfy topic that receives the notifications
    #[arg(short, long, env = "NTFY_WATCH_TOPIC")]
    pub topic: String,

    /// Comma-separated extensions to monitor, e.g. ".txt,.pdf" (default: all files)
    #[arg(short, long)]
    pub extensions: Option<String>,

    /// Also notify for directory events
    #[arg(long)]
    pub include_directories: bool,

    /// Watch subdirectories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Base URL of the ntfy server
    #[arg(long, env = "NTFY_WATCH_SERVER", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Fold the parsed arguments into the immutable run configuration.
    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig::new(
            self.path.clone(),
            self.topic.clone(),
            self.server_url.clone(),
            self.extensions.as_deref(),
            self.include_directories,
            self.recursive,
        )
    }
}
