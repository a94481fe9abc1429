//! Domain events produced by directory watching
//!
//! Raw `notify` events are translated into flat [`FileEvent`]s here, so the
//! rest of the pipeline never touches backend-specific event kinds. The
//! translation is stateful: backends split one rename into several tracked
//! half-events, and [`RenameTracker`] collapses each pair into a single
//! move.

use std::path::PathBuf;

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::EventKind;

/// Kind of file event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    /// File or directory was created.
    Created,
    /// File contents or metadata changed.
    Modified,
    /// File or directory was removed.
    Deleted,
    /// File or directory was renamed or moved.
    Moved,
}

/// A file system event ready for filtering and notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    /// The kind of event.
    pub kind: FileEventKind,
    /// Path to the affected file or directory (the source for moves).
    pub path: PathBuf,
    /// Destination path, present only for [`FileEventKind::Moved`].
    pub dest_path: Option<PathBuf>,
    /// Whether the subject of the event is a directory.
    pub is_directory: bool,
}

impl FileEvent {
    /// Create a new file event.
    pub fn new(kind: FileEventKind, path: impl Into<PathBuf>, is_directory: bool) -> Self {
        Self {
            kind,
            path: path.into(),
            dest_path: None,
            is_directory,
        }
    }

    /// Create a move event. The directory flag is probed on the destination
    /// since the source no longer exists.
    pub fn moved(path: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        let dest = dest.into();
        let is_directory = dest.is_dir();
        Self {
            kind: FileEventKind::Moved,
            path: path.into(),
            dest_path: Some(dest),
            is_directory,
        }
    }
}

/// Pairs the split rename halves some backends emit.
///
/// The inotify backend reports one rename inside the watched tree as
/// `Name(From)`, `Name(To)` and `Name(Both)` back to back, all carrying the
/// same tracker id (the kernel cookie). The `From` half is held until its
/// partner arrives; the completed pair emits one move and the confirming
/// `Both` is dropped. A half whose partner never shows up, as with moves in
/// or out of the watched tree, surfaces as a create or delete instead.
#[derive(Debug, Default)]
pub struct RenameTracker {
    pending: Option<PendingRename>,
    completed: Option<usize>,
}

#[derive(Debug)]
struct PendingRename {
    tracker: usize,
    source: PathBuf,
}

impl RenameTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a rename half is being held for its partner.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Translate a raw watcher event into zero or more domain events.
    ///
    /// Access events and unclassified kinds are dropped. Any event that
    /// does not continue the held rename pair proves the half unpaired and
    /// flushes it first.
    pub fn translate(&mut self, event: notify::Event) -> Vec<FileEvent> {
        let tracker = event.tracker();
        match event.kind {
            EventKind::Modify(ModifyKind::Name(mode)) => {
                self.translate_rename(mode, tracker, event.paths)
            }
            _ => {
                let mut events = self.flush_pending();
                events.extend(translate_plain(event));
                events
            }
        }
    }

    /// Report the held rename half as a deletion; its partner never
    /// arrived.
    pub fn flush_pending(&mut self) -> Vec<FileEvent> {
        flush_unpaired(self.pending.take())
    }

    fn translate_rename(
        &mut self,
        mode: RenameMode,
        tracker: Option<usize>,
        paths: Vec<PathBuf>,
    ) -> Vec<FileEvent> {
        match mode {
            RenameMode::From => {
                let mut events = self.flush_pending();
                match (tracker, paths.into_iter().next()) {
                    (Some(id), Some(source)) => {
                        self.pending = Some(PendingRename {
                            tracker: id,
                            source,
                        });
                    }
                    (None, Some(source)) => {
                        // Untracked halves cannot be paired at all.
                        let is_directory = source.is_dir();
                        events.push(FileEvent::new(FileEventKind::Deleted, source, is_directory));
                    }
                    _ => {}
                }
                events
            }
            RenameMode::To => {
                let mut paths = paths.into_iter();
                let dest = match paths.next() {
                    Some(dest) => dest,
                    None => return self.flush_pending(),
                };
                match self.pending.take() {
                    Some(pending) if Some(pending.tracker) == tracker => {
                        // The backend confirms the pair with a Both event;
                        // remember the id so it does not fire a second move.
                        self.completed = tracker;
                        vec![FileEvent::moved(pending.source, dest)]
                    }
                    pending => {
                        let mut events = flush_unpaired(pending);
                        let is_directory = dest.is_dir();
                        events.push(FileEvent::new(FileEventKind::Created, dest, is_directory));
                        events
                    }
                }
            }
            RenameMode::Both => {
                if tracker.is_some() && self.completed == tracker {
                    self.completed = None;
                    return Vec::new();
                }
                let mut events = match self.pending.take() {
                    // The held half belongs to this pair; the Both covers it.
                    Some(pending) if Some(pending.tracker) == tracker => Vec::new(),
                    pending => flush_unpaired(pending),
                };
                events.extend(translate_loose_rename(paths));
                events
            }
            RenameMode::Any | RenameMode::Other => {
                let mut events = self.flush_pending();
                events.extend(translate_loose_rename(paths));
                events
            }
        }
    }
}

/// Flush a half whose partner never arrived as a deletion.
fn flush_unpaired(pending: Option<PendingRename>) -> Vec<FileEvent> {
    match pending {
        Some(pending) => {
            // Rename halves carry no directory flag; probe what is left.
            let is_directory = pending.source.is_dir();
            vec![FileEvent::new(
                FileEventKind::Deleted,
                pending.source,
                is_directory,
            )]
        }
        None => Vec::new(),
    }
}

/// A rename with both endpoints is one move; a single ambiguous path maps
/// to whichever of create and delete the disk agrees with.
fn translate_loose_rename(paths: Vec<PathBuf>) -> Option<FileEvent> {
    let mut paths = paths.into_iter();
    match (paths.next(), paths.next()) {
        (Some(source), Some(dest)) => Some(FileEvent::moved(source, dest)),
        (Some(path), None) => {
            if path.exists() {
                let is_directory = path.is_dir();
                Some(FileEvent::new(FileEventKind::Created, path, is_directory))
            } else {
                Some(FileEvent::new(FileEventKind::Deleted, path, false))
            }
        }
        _ => None,
    }
}

fn translate_plain(event: notify::Event) -> Vec<FileEvent> {
    match event.kind {
        EventKind::Create(create_kind) => event
            .paths
            .into_iter()
            .map(|path| {
                let is_directory = match create_kind {
                    CreateKind::Folder => true,
                    CreateKind::File => false,
                    _ => path.is_dir(),
                };
                FileEvent::new(FileEventKind::Created, path, is_directory)
            })
            .collect(),
        EventKind::Remove(remove_kind) => event
            .paths
            .into_iter()
            .map(|path| {
                // The path is gone, only the event kind knows what it was.
                let is_directory = matches!(remove_kind, RemoveKind::Folder);
                FileEvent::new(FileEventKind::Deleted, path, is_directory)
            })
            .collect(),
        EventKind::Modify(_) => event
            .paths
            .into_iter()
            .map(|path| {
                let is_directory = path.is_dir();
                FileEvent::new(FileEventKind::Modified, path, is_directory)
            })
            .collect(),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Vec::new(),
    }
}
