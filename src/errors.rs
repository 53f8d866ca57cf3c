// src/errors.rs

//! Crate-wide error types.
//!
//! Fatal configuration and wiring errors travel as `anyhow::Error`. Per-file
//! transform failures use [`PipelineError`] so that logs can name the failure
//! class without tearing down the orchestrator.

use std::path::PathBuf;

use thiserror::Error;

pub use anyhow::{Error, Result};

/// A failure while transforming a single source file.
///
/// These are contained at the task boundary: the failing file writes no
/// output, the rest of the batch proceeds, and the task is reported as
/// failed for that run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unresolvable include '{reference}' in {parent:?}: {detail}")]
    Include {
        parent: PathBuf,
        reference: String,
        detail: String,
    },

    #[error("circular include chain through {0:?}")]
    IncludeCycle(PathBuf),

    #[error("scss compilation failed: {0}")]
    Scss(String),

    #[error("css processing failed: {0}")]
    Css(String),

    #[error("js minification failed: {0}")]
    Js(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
