//! File system watcher with debouncing for development mode.
//!
//! Only directories outside the configured foreign trees (and the dependency
//! and output trees no dev server watches) are registered, one non-recursive
//! watch each, so excluded trees cost no watch handles. Directories created
//! later are registered as they appear.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Weak, mpsc as std_mpsc};
use std::thread;
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use shellpack_config::WatchFilter;
use tokio::sync::mpsc;
use walkdir::WalkDir;

use crate::error::{CliError, Result};

/// Trees ignored regardless of the project's foreign directories.
pub const ALWAYS_IGNORED: &[&str] = &["**/node_modules/**", "**/.git/**", "**/dist/**"];

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FileChange::Modified(_) => "modified",
            FileChange::Created(_) => "created",
            FileChange::Removed(_) => "removed",
        }
    }

    fn from_event(kind: &EventKind, path: &Path) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path.to_path_buf())),
            EventKind::Modify(_) => Some(FileChange::Modified(path.to_path_buf())),
            EventKind::Remove(_) => Some(FileChange::Removed(path.to_path_buf())),
            _ => None,
        }
    }
}

/// Decides which absolute paths under `root` are watched and reported.
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    root: PathBuf,
    project: WatchFilter,
    always: WatchFilter,
}

impl ChangeFilter {
    pub fn new(root: impl Into<PathBuf>, project: WatchFilter) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            project,
            always: WatchFilter::new(ALWAYS_IGNORED.iter().copied())?,
        })
    }

    /// Whether a change at `path` should be dropped.
    ///
    /// Paths outside the root are always dropped. Globs match the
    /// root-relative path.
    pub fn should_ignore(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return true;
        };
        if relative.as_os_str().is_empty() {
            return true;
        }
        self.excludes(relative)
    }

    /// Whether the directory at `path` lies in an excluded tree. The root
    /// itself never does.
    pub fn is_excluded_dir(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return true;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }
        // Directory globs like `**/src-tauri/**` match children, not the directory itself.
        self.excludes(relative) || self.excludes(&relative.join("_"))
    }

    /// Directories at or below `start` that need a watch, parents first.
    /// Excluded trees are not descended into.
    pub fn watch_targets(&self, start: &Path) -> Vec<PathBuf> {
        WalkDir::new(start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_type().is_dir() && !self.is_excluded_dir(entry.path()))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.into_path()),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable directory");
                    None
                }
            })
            .collect()
    }

    fn excludes(&self, relative: &Path) -> bool {
        self.project.is_excluded(relative) || self.always.is_excluded(relative)
    }
}

/// File watcher with debouncing and filtering.
///
/// Dropping the watcher stops event delivery and closes the channel.
pub struct FileWatcher {
    _watcher: Arc<Mutex<RecommendedWatcher>>,
    root: PathBuf,
    watched: usize,
}

impl FileWatcher {
    /// Start watching `root` and every non-excluded directory below it.
    ///
    /// Repeated events for the same file inside `debounce_ms` are collapsed
    /// into the first one.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::FileNotFound`] if `root` does not exist, or
    /// [`CliError::Watch`] if the platform watcher cannot start.
    pub fn new(
        root: PathBuf,
        filter: WatchFilter,
        debounce_ms: u64,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.is_dir() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);
        let (raw_tx, raw_rx) = std_mpsc::channel();
        let filter = ChangeFilter::new(root.clone(), filter)?;

        // The handler runs on the backend's event thread, which must stay free
        // to service `watch` calls; registration happens on the pump thread.
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = raw_tx.send(res);
        })?;

        let targets = filter.watch_targets(&root);
        for dir in &targets {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
        }
        tracing::debug!(root = %root.display(), directories = targets.len(), "watching");

        let watcher = Arc::new(Mutex::new(watcher));
        let pump = EventPump {
            filter,
            debounce: Duration::from_millis(debounce_ms),
            watcher: Arc::downgrade(&watcher),
            tx,
        };
        thread::Builder::new()
            .name("shellpack-watch".to_string())
            .spawn(move || pump.run(raw_rx))?;

        Ok((
            Self {
                _watcher: watcher,
                root,
                watched: targets.len(),
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directories registered at startup.
    pub fn watched_dirs(&self) -> usize {
        self.watched
    }
}

/// Turns raw backend events into filtered, debounced changes.
struct EventPump {
    filter: ChangeFilter,
    debounce: Duration,
    watcher: Weak<Mutex<RecommendedWatcher>>,
    tx: mpsc::Sender<FileChange>,
}

impl EventPump {
    /// Runs until the watcher is dropped or the receiver goes away.
    fn run(self, raw: std_mpsc::Receiver<notify::Result<Event>>) {
        let mut last_event: Option<(PathBuf, Instant)> = None;

        for res in raw {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "watch error");
                    continue;
                }
            };

            if matches!(event.kind, EventKind::Create(_)) {
                for path in &event.paths {
                    if path.is_dir() && !self.filter.is_excluded_dir(path) {
                        self.register(path);
                    }
                }
            }

            for path in &event.paths {
                if self.filter.should_ignore(path) {
                    tracing::trace!(path = %path.display(), "ignored change");
                    continue;
                }

                let now = Instant::now();
                if let Some((last_path, last_time)) = &last_event {
                    if last_path == path && now.duration_since(*last_time) < self.debounce {
                        continue;
                    }
                }

                let Some(change) = FileChange::from_event(&event.kind, path) else {
                    continue;
                };
                last_event = Some((path.clone(), now));

                if self.tx.blocking_send(change).is_err() {
                    return;
                }
            }
        }
    }

    fn register(&self, dir: &Path) {
        let Some(watcher) = self.watcher.upgrade() else {
            return;
        };
        let Ok(mut watcher) = watcher.lock() else {
            return;
        };
        for target in self.filter.watch_targets(dir) {
            match watcher.watch(&target, RecursiveMode::NonRecursive) {
                Ok(()) => tracing::debug!(path = %target.display(), "watching new directory"),
                Err(err) => tracing::warn!(path = %target.display(), error = %err, "cannot watch directory"),
            }
        }
    }
}
