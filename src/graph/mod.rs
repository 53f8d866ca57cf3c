// src/graph/mod.rs

//! Task graphs.
//!
//! - [`task`] names the units of build work.
//! - [`compose`] provides the sequence/parallel combinators and the fixed
//!   `build` graph, executed over a [`crate::pipeline::Pipeline`].

pub mod compose;
pub mod task;

pub use compose::{RunSummary, TaskGraph, build_graph, par, seq};
pub use task::TaskKind;
