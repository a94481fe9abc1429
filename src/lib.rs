//! Folder monitoring with ntfy notifications
//!
//! Watches a directory for create/modify/delete/move events, filters them
//! by extension and directory rules, and pushes one human-readable
//! notification per event to an ntfy topic.

pub mod config;
pub mod errors;
pub mod event;
pub mod filter;
pub mod notifier;
pub mod ntfy;
pub mod watcher;

// Re-export commonly used types for convenience
pub use config::WatchConfig;
pub use errors::{AppError, AppResult};
pub use event::{FileEvent, FileEventKind, RenameTracker};
pub use filter::EventFilter;
pub use notifier::Notifier;
pub use ntfy::{NtfyClient, NtfyMessage, Priority};
pub use watcher::FolderWatcher;
