// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling per-class `watch` / `exclude` glob patterns.
//! - Wiring up a cross-platform filesystem watcher (`notify`) with a short
//!   debounce window.
//! - Content hashing to drop events for files whose bytes did not actually
//!   change (editor touch/atomic-save noise).
//! - The static binding table from asset class to the task sequence to
//!   re-run.
//!
//! It does **not** run tasks itself; it only turns filesystem changes into
//! class-level change events for the engine runtime.

pub mod bindings;
pub mod hash;
pub mod patterns;
pub mod watcher;

pub use bindings::sequence_for;
pub use hash::HashCache;
pub use patterns::{ClassWatchProfile, build_watch_profiles};
pub use watcher::{WatcherHandle, spawn_watcher};
