// src/engine/mod.rs

//! Orchestration engine for watch mode.
//!
//! This module ties together:
//! - the watch-binding table (class -> task sequence)
//! - the change queue (what happens when changes arrive while a binding's
//!   sequence is already running)
//! - the main runtime event loop that reacts to:
//!   - debounced file-change batches from the watcher
//!   - binding-sequence completion events
//!   - shutdown signals (ctrl-c)

pub mod queue;
pub mod runtime;

pub use queue::ChangeQueue;
pub use runtime::{Runtime, RuntimeEvent, RuntimeOptions};
