//! Directory watcher integration
//!
//! Wraps a `notify` watcher whose callback forwards raw events to a
//! translation thread. The thread pairs split rename halves through
//! [`RenameTracker`] and feeds finished [`FileEvent`]s over a channel to
//! the single consumer loop. The notify backend runs its own thread;
//! ordering within the channel follows the backend's delivery order, with
//! held rename halves delayed by at most the flush window.

use std::path::{Path, PathBuf};
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, Sender};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tracing::error;

use crate::errors::{AppError, AppResult};
use crate::event::{FileEvent, RenameTracker};

/// How long an unpaired rename half may wait for its partner before it is
/// reported as a deletion.
const RENAME_FLUSH_WINDOW: Duration = Duration::from_millis(100);

/// Watches one directory tree and emits [`FileEvent`]s.
#[derive(Debug)]
pub struct FolderWatcher {
    watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FolderWatcher {
    /// Start watching `root`, returning the watcher handle and the event
    /// stream. Fails when the path does not exist or the backend cannot
    /// be started.
    pub fn start(root: &Path, recursive: bool) -> AppResult<(Self, Receiver<FileEvent>)> {
        if !root.exists() {
            return Err(AppError::path_not_found(root));
        }

        let (raw_sender, raw_receiver) = flume::unbounded();
        let (event_sender, event_receiver) = flume::unbounded();

        let mut watcher = notify::recommended_watcher(
            move |result: Result<notify::Event, notify::Error>| match result {
                Ok(event) => {
                    if let Err(e) = raw_sender.send(event) {
                        error!("Failed to forward file event: {e}");
                    }
                }
                Err(e) => error!("Watch error: {e}"),
            },
        )?;

        std::thread::spawn(move || translate_events(raw_receiver, event_sender));

        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(root, mode)?;

        Ok((
            FolderWatcher {
                watcher,
                root: root.to_path_buf(),
            },
            event_receiver,
        ))
    }

    /// Stop delivering events for the watched root.
    pub fn stop(&mut self) {
        let _ = self.watcher.unwatch(&self.root);
    }
}

/// Translation loop between the backend callback and the consumer. While a
/// rename half is held the wait for its partner is bounded; everything
/// else passes through as it arrives.
fn translate_events(raw: Receiver<notify::Event>, out: Sender<FileEvent>) {
    let mut tracker = RenameTracker::new();
    loop {
        let raw_event = if tracker.has_pending() {
            match raw.recv_timeout(RENAME_FLUSH_WINDOW) {
                Ok(event) => Some(event),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match raw.recv() {
                Ok(event) => Some(event),
                Err(_) => break,
            }
        };

        let events = match raw_event {
            Some(event) => tracker.translate(event),
            None => tracker.flush_pending(),
        };
        for event in events {
            if out.send(event).is_err() {
                return;
            }
        }
    }

    // The watcher is gone; report whatever half was still waiting.
    for event in tracker.flush_pending() {
        let _ = out.send(event);
    }
}
