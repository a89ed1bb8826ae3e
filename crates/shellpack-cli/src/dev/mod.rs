//! Development-mode support for `shellpack dev --watch`.
//!
//! The watcher only reports changes; the external dev server runtime does the
//! rebuilding. Its job here is to show which paths the watch filter lets
//! through.

pub mod watcher;

pub use watcher::{ALWAYS_IGNORED, ChangeFilter, FileChange, FileWatcher};
