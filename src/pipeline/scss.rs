// src/pipeline/scss.rs

//! SCSS build task: compile with `grass`, post-process with the same
//! prefix-and-minify pass as hand-authored CSS, write `<stem>.min.css`.
//!
//! Underscore-prefixed files are SCSS partials, pulled in via `@use`/`@import`
//! by their parents; they are never compiled as roots.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::AssetClass;
use crate::errors::PipelineError;
use crate::pipeline::{Pipeline, TaskReport, is_partial, minified_name, minify};

pub(crate) async fn run(p: &Pipeline) -> Result<TaskReport> {
    let class_paths = p.config().paths.class(AssetClass::Scss);
    let files = p.sources(AssetClass::Scss)?;

    let mut report = TaskReport::default();
    let mut written = Vec::new();

    for file in files {
        if is_partial(&file) {
            debug!(file = %file.display(), "skipping scss partial");
            continue;
        }

        match build_one(p, &class_paths.dest, &file).await {
            Ok(out) => {
                report.succeeded += 1;
                written.push(out);
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "scss build failed");
                report.failed += 1;
            }
        }
    }

    if !written.is_empty() {
        p.notify_reload(AssetClass::Scss, &written);
    }
    Ok(report)
}

async fn build_one(p: &Pipeline, dest: &Path, file: &Path) -> Result<PathBuf, PipelineError> {
    let compiled = grass::from_path(file, &grass::Options::default())
        .map_err(|e| PipelineError::Scss(e.to_string()))?;
    let processed = minify::process_css(&compiled)?;
    let name = minified_name(file, "css");
    Ok(p.write_output(dest, &name, processed.as_bytes()).await?)
}
