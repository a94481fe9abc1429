//! Runtime configuration for the folder monitor
//!
//! Configuration is assembled once from command-line arguments and shared
//! read-only for the lifetime of the process.

use std::path::PathBuf;

/// Default ntfy server used when no `--server-url` is given.
pub const DEFAULT_SERVER_URL: &str = "https://ntfy.sh";

/// Immutable settings for a monitoring run.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Root directory to monitor.
    pub path: PathBuf,
    /// ntfy topic that receives every notification.
    pub topic: String,
    /// Base URL of the ntfy server.
    pub server_url: String,
    /// Normalized extension allow-list; empty means all files qualify.
    pub extensions: Vec<String>,
    /// Drop events whose subject is a directory.
    pub exclude_directories: bool,
    /// Watch subdirectories as well as the root.
    pub recursive: bool,
}

impl WatchConfig {
    /// Build a config from raw CLI values, normalizing the extension list.
    pub fn new(
        path: PathBuf,
        topic: String,
        server_url: String,
        extensions: Option<&str>,
        include_directories: bool,
        recursive: bool,
    ) -> Self {
        Self {
            path,
            topic,
            server_url,
            extensions: extensions.map(normalize_extensions).unwrap_or_default(),
            exclude_directories: !include_directories,
            recursive,
        }
    }
}

/// Normalize a comma-separated extension list: trim, lowercase and
/// dot-prefix each entry, dropping empty segments.
pub fn normalize_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|ext| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{ext}")
            }
        })
        .collect()
}
