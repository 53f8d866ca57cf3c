// src/pipeline/clean.rs

//! Clean task: recursively remove the contents of the build output root.
//!
//! The root directory itself survives, so the dev server's serve directory
//! stays valid across rebuilds. Ordering before the class tasks is enforced
//! by sequence composition in the build graph, not by locking.

use std::io::ErrorKind;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;

use crate::pipeline::{Pipeline, TaskReport};

pub(crate) async fn run(p: &Pipeline) -> Result<TaskReport> {
    let root = &p.config().paths.build_root;

    let mut entries = match fs::read_dir(root).await {
        Ok(entries) => entries,
        // Nothing to remove.
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(TaskReport::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("listing build root {root:?}"));
        }
    };

    let mut report = TaskReport::default();

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("listing build root {root:?}"))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("inspecting {path:?}"))?;

        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_file(&path).await
        };
        removed.with_context(|| format!("removing {path:?}"))?;

        debug!(path = %path.display(), "removed");
        report.succeeded += 1;
    }

    Ok(report)
}
