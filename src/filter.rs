//! Event filtering
//!
//! Decides which file events become notifications. Pure predicate logic,
//! no side effects.

use std::path::Path;

use crate::config::WatchConfig;
use crate::event::FileEvent;

/// Filter applied to every event before formatting and delivery.
#[derive(Debug, Clone)]
pub struct EventFilter {
    allowed_extensions: Vec<String>,
    exclude_directories: bool,
}

impl EventFilter {
    pub fn new(config: &WatchConfig) -> Self {
        Self {
            allowed_extensions: config.extensions.clone(),
            exclude_directories: config.exclude_directories,
        }
    }

    /// Whether `event` should produce a notification.
    ///
    /// Directory events are governed only by the exclusion flag; the
    /// extension allow-list applies to file events and, for moves, to the
    /// source path.
    pub fn should_process(&self, event: &FileEvent) -> bool {
        if self.exclude_directories && event.is_directory {
            return false;
        }
        if !self.allowed_extensions.is_empty() && !event.is_directory {
            let extension = path_extension(&event.path);
            return self.allowed_extensions.iter().any(|allowed| *allowed == extension);
        }
        true
    }
}

/// Lowercased, dot-prefixed extension of a path's file name, or an empty
/// string when there is none (`Makefile`, `.hidden`).
fn path_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}
