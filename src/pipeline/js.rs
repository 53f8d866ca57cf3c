// src/pipeline/js.rs

//! JS build task: resolve `//=` include directives, minify, write
//! `<stem>.min.js`. Pre-minified files are excluded by the class's exclude
//! glob and handled by the passthrough task instead.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::config::AssetClass;
use crate::errors::PipelineError;
use crate::pipeline::include::{self, IncludeSyntax};
use crate::pipeline::{Pipeline, TaskReport, minified_name, minify};

pub(crate) async fn run(p: &Pipeline) -> Result<TaskReport> {
    let class_paths = p.config().paths.class(AssetClass::Js);
    let files = p.sources(AssetClass::Js)?;

    let mut report = TaskReport::default();
    let mut written = Vec::new();

    for file in files {
        match build_one(p, &class_paths.dest, &file).await {
            Ok(out) => {
                report.succeeded += 1;
                written.push(out);
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "js build failed");
                report.failed += 1;
            }
        }
    }

    if !written.is_empty() {
        p.notify_reload(AssetClass::Js, &written);
    }
    Ok(report)
}

async fn build_one(p: &Pipeline, dest: &Path, file: &Path) -> Result<PathBuf, PipelineError> {
    let resolved = include::resolve_file(file, IncludeSyntax::Js)?;
    let minified = minify::minify_js(&resolved)?;
    let name = minified_name(file, "js");
    Ok(p.write_output(dest, &name, minified.as_bytes()).await?)
}
