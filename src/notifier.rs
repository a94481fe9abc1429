//! Notification formatting and dispatch
//!
//! Turns accepted file events into human-readable ntfy messages and sends
//! them. Delivery and size-lookup failures are logged and swallowed here;
//! nothing in this module stops the monitoring loop.

use std::borrow::Cow;
use std::path::Path;

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::config::WatchConfig;
use crate::errors::AppResult;
use crate::event::{FileEvent, FileEventKind};
use crate::ntfy::{NtfyClient, NtfyMessage, Priority};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sends one notification per accepted event to the configured topic.
pub struct Notifier {
    client: NtfyClient,
    topic: String,
}

impl Notifier {
    pub fn new(config: &WatchConfig) -> AppResult<Self> {
        let client = NtfyClient::new(&config.server_url, None)?;
        Ok(Notifier {
            client,
            topic: config.topic.clone(),
        })
    }

    /// Notify about a single file event.
    pub async fn notify_event(&self, event: &FileEvent) {
        match event.kind {
            FileEventKind::Created => info!("Created: {}", event.path.display()),
            FileEventKind::Modified => info!("Modified: {}", event.path.display()),
            FileEventKind::Deleted => info!("Deleted: {}", event.path.display()),
            FileEventKind::Moved => {
                if let Some(dest) = event.dest_path.as_deref() {
                    info!("Moved: {} -> {}", event.path.display(), dest.display());
                }
            }
        }

        if let Some(message) = self.build_event_message(event) {
            self.dispatch(message).await;
        }
    }

    /// Announce that monitoring has begun.
    pub async fn notify_started(&self) {
        let message = self.build_message(
            "Folder Monitoring Started",
            "Started monitoring folder for changes".to_string(),
            3,
            "rocket",
        );
        self.dispatch(message).await;
    }

    /// Announce that monitoring has ended.
    pub async fn notify_stopped(&self) {
        let message = self.build_message(
            "Monitoring Stopped",
            "Folder monitoring stopped by user".to_string(),
            3,
            "stop_sign",
        );
        self.dispatch(message).await;
    }

    fn build_event_message(&self, event: &FileEvent) -> Option<NtfyMessage> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let message = match event.kind {
            FileEventKind::Created => self.build_message(
                "File Created",
                format!(
                    "File created: {}\nLocation: {}\nSize: {}\nTime: {}",
                    file_name(&event.path),
                    event.path.display(),
                    file_size(&event.path),
                    timestamp
                ),
                3,
                "file_folder,new",
            ),
            FileEventKind::Modified => self.build_message(
                "File Modified",
                format!(
                    "File modified: {}\nLocation: {}\nSize: {}\nTime: {}",
                    file_name(&event.path),
                    event.path.display(),
                    file_size(&event.path),
                    timestamp
                ),
                2,
                "pencil",
            ),
            FileEventKind::Deleted => self.build_message(
                "File Deleted",
                format!(
                    "File deleted: {}\nLocation: {}\nTime: {}",
                    file_name(&event.path),
                    event.path.display(),
                    timestamp
                ),
                4,
                "wastebasket,warning",
            ),
            FileEventKind::Moved => {
                let dest = match event.dest_path.as_deref() {
                    Some(dest) => dest,
                    None => {
                        warn!(
                            "Moved event without destination: {}",
                            event.path.display()
                        );
                        return None;
                    }
                };
                self.build_message(
                    &moved_title(&event.path, dest),
                    format!(
                        "File moved:\nFrom: {}\nTo: {}\nTime: {}",
                        event.path.display(),
                        dest.display(),
                        timestamp
                    ),
                    3,
                    "arrow_right",
                )
            }
        };
        Some(message)
    }

    /// Assemble a payload. Tags travel as a single comma-joined entry.
    fn build_message(&self, title: &str, message: String, priority: u8, tags: &str) -> NtfyMessage {
        NtfyMessage {
            topic: self.topic.clone(),
            message,
            title: Some(title.to_string()),
            priority: Some(Priority::Level(priority)),
            tags: Some(vec![tags.to_string()]),
            click: None,
            attach: None,
            actions: None,
        }
    }

    async fn dispatch(&self, message: NtfyMessage) {
        match self.client.publish(&message).await {
            Ok(()) => debug!(
                "Notification sent: {}",
                message.title.as_deref().unwrap_or_default()
            ),
            Err(e) => error!("{e}"),
        }
    }
}

/// Title for a move: renames within one directory call out both names,
/// moves across directories stay generic.
fn moved_title(src: &Path, dest: &Path) -> String {
    if src.parent() == dest.parent() {
        format!("File Renamed: {} → {}", file_name(src), file_name(dest))
    } else {
        "File Moved".to_string()
    }
}

fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or(Cow::Borrowed(""))
}

/// Human-readable size of the file at `path`.
///
/// Paths that are not regular files (directories, or already gone again)
/// report `N/A (directory)`; lookup errors are logged and report `Unknown`.
fn file_size(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => human_size(metadata.len()),
        Ok(_) => "N/A (directory)".to_string(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => "N/A (directory)".to_string(),
        Err(err) => {
            error!("Error getting file size: {err}");
            "Unknown".to_string()
        }
    }
}

/// Format a byte count with two decimals in the largest unit under 1024.
fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.2} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.2} TB")
}
