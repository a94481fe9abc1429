//! Monitoring loop driving the watcher, filter and notifier
//!
//! Validates the configuration, announces start and stop, and consumes
//! events one at a time until Ctrl+C arrives. Each event is fully
//! processed, including the awaited delivery, before the next is taken.

use anyhow::Result;
use tracing::{debug, error, info, warn};

use super::CliContext;
use crate::errors::AppError;
use crate::filter::EventFilter;
use crate::notifier::Notifier;
use crate::watcher::FolderWatcher;

/// Runs the monitoring session described by the CLI context.
pub struct CommandHandler {
    context: CliContext,
}

impl CommandHandler {
    /// Create a new command handler instance with the provided context.
    pub fn new(context: CliContext) -> Self {
        Self { context }
    }

    /// Watch the configured folder until interrupted.
    pub async fn run(&self) -> Result<()> {
        let config = &self.context.config;

        if !config.path.exists() {
            error!("The specified path does not exist: {}", config.path.display());
            return Err(AppError::path_not_found(&config.path).into());
        }

        let notifier = Notifier::new(config)?;
        let filter = EventFilter::new(config);

        // Graceful shutdown on Ctrl+C, armed before the first notification.
        let (shutdown_sender, shutdown_receiver) = flume::unbounded::<()>();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                return;
            }
            if let Err(e) = shutdown_sender.send_async(()).await {
                warn!("Failed to send shutdown signal: {}", e);
            }
        });

        notifier.notify_started().await;
        info!(
            "Started monitoring. Notifications will be sent to topic: {}",
            config.topic
        );
        if !config.extensions.is_empty() {
            info!(
                "Monitoring only these extensions: {}",
                config.extensions.join(", ")
            );
        }

        let (mut watcher, events) = FolderWatcher::start(&config.path, config.recursive)?;
        let watched = config
            .path
            .canonicalize()
            .unwrap_or_else(|_| config.path.clone());
        info!(
            "Monitoring folder: {} (recursive: {})",
            watched.display(),
            config.recursive
        );

        loop {
            tokio::select! {
                event = events.recv_async() => {
                    match event {
                        Ok(event) => {
                            if filter.should_process(&event) {
                                notifier.notify_event(&event).await;
                            } else {
                                debug!("Event filtered out, skipping: {}", event.path.display());
                            }
                        }
                        Err(_) => {
                            warn!("Event channel closed, stopping monitor");
                            break;
                        }
                    }
                }
                _ = shutdown_receiver.recv_async() => {
                    info!("Monitoring stopped by user");
                    break;
                }
            }
        }

        // The farewell goes out first, then the watcher is taken down.
        notifier.notify_stopped().await;
        watcher.stop();

        Ok(())
    }
}
