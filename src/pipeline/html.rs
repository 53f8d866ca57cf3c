// src/pipeline/html.rs

//! HTML build task: resolve include directives, normalize formatting, write
//! to the output directory.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::AssetClass;
use crate::errors::PipelineError;
use crate::pipeline::include::{self, IncludeSyntax};
use crate::pipeline::{Pipeline, TaskReport, is_partial};

pub(crate) async fn run(p: &Pipeline) -> Result<TaskReport> {
    let class_paths = p.config().paths.class(AssetClass::Html);
    let files = p.sources(AssetClass::Html)?;

    let mut report = TaskReport::default();
    let mut written = Vec::new();

    for file in files {
        if is_partial(&file) {
            debug!(file = %file.display(), "skipping html partial");
            continue;
        }

        match build_one(p, &class_paths.dest, &file).await {
            Ok(out) => {
                report.succeeded += 1;
                written.push(out);
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "html build failed");
                report.failed += 1;
            }
        }
    }

    if !written.is_empty() {
        p.notify_reload(AssetClass::Html, &written);
    }
    Ok(report)
}

async fn build_one(p: &Pipeline, dest: &Path, file: &Path) -> Result<PathBuf, PipelineError> {
    let resolved = include::resolve_file(file, IncludeSyntax::Html)?;
    let formatted = normalize(&resolved);

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index.html".to_string());

    Ok(p.write_output(dest, &name, formatted.as_bytes()).await?)
}

/// Light reformat pass: strip trailing whitespace, collapse runs of blank
/// lines (which include resolution tends to produce) and end with a single
/// newline.
fn normalize(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut blank_run = 0usize;

    for line in html.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_whitespace_and_blank_runs() {
        let input = "<div>  \n\n\n\n  <p>x</p>\n</div>";
        assert_eq!(normalize(input), "<div>\n\n  <p>x</p>\n</div>\n");
    }
}
