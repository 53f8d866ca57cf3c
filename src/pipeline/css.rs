// src/pipeline/css.rs

//! Hand-authored CSS build task: vendor-prefix and minify in one pass,
//! writing a single `.min`-suffixed file per input.
//!
//! The unminified prefixed file is not preserved in output; pages reference
//! the `.min.css` name directly.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::fs;
use tracing::warn;

use crate::config::AssetClass;
use crate::errors::PipelineError;
use crate::pipeline::{Pipeline, TaskReport, minified_name, minify};

pub(crate) async fn run(p: &Pipeline) -> Result<TaskReport> {
    let class_paths = p.config().paths.class(AssetClass::Css);
    let files = p.sources(AssetClass::Css)?;

    let mut report = TaskReport::default();
    let mut written = Vec::new();

    for file in files {
        match build_one(p, &class_paths.dest, &file).await {
            Ok(out) => {
                report.succeeded += 1;
                written.push(out);
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "css build failed");
                report.failed += 1;
            }
        }
    }

    if !written.is_empty() {
        p.notify_reload(AssetClass::Css, &written);
    }
    Ok(report)
}

async fn build_one(p: &Pipeline, dest: &Path, file: &Path) -> Result<PathBuf, PipelineError> {
    let source = fs::read_to_string(file).await?;
    let processed = minify::process_css(&source)?;
    let name = minified_name(file, "css");
    Ok(p.write_output(dest, &name, processed.as_bytes()).await?)
}
