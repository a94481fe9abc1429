use anyhow::Result;

mod cli;
mod config;
mod errors;
mod event;
mod filter;
mod notifier;
mod ntfy;
mod watcher;

use cli::CliApp;

#[tokio::main]
async fn main() -> Result<()> {
    CliApp::run().await
}
