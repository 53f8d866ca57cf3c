// src/pipeline/mod.rs

//! The per-asset-class build tasks.
//!
//! [`Pipeline`] owns the immutable configuration plus the reload channel, and
//! dispatches [`TaskKind`]s to the per-class task modules. Each task is a
//! linear transform pipeline over the files matched by its class's source
//! glob:
//!
//! - [`html`]: resolve includes -> normalize formatting -> write
//! - [`css`]: vendor-prefix + minify -> write `<stem>.min.css`
//! - [`scss`]: compile -> vendor-prefix + minify -> write `<stem>.min.css`
//! - [`js`]: resolve includes -> minify -> write `<stem>.min.js`
//! - [`passthrough`]: copy pre-minified files verbatim
//! - [`image`]: copy byte-for-byte, mirroring subdirectories
//! - [`clean`]: empty the build root
//!
//! Failure semantics: a transform failure on one file never crashes the
//! orchestrator and never writes output for that file; independent files in
//! the same batch still write, and the task reports `Failed` for the run.

pub mod clean;
pub mod css;
pub mod html;
pub mod image;
pub mod include;
pub mod js;
pub mod minify;
pub mod passthrough;
pub mod scss;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use globset::Glob;
use tokio::fs;
use tracing::{error, info, warn};

use crate::config::{AssetClass, Config};
use crate::graph::TaskKind;
use crate::reload::{ReloadEvent, ReloadSender};

/// Result of a task run, as seen by the task graph and the watch runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed,
}

/// Per-run file counts for one task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Executes build tasks against an immutable configuration.
///
/// Cheap to share (`Arc`); holds no mutable state between runs — tasks are
/// pure functions of the filesystem at invocation time.
pub struct Pipeline {
    config: Arc<Config>,
    reload_tx: ReloadSender,
}

impl Pipeline {
    pub fn new(config: Arc<Config>, reload_tx: ReloadSender) -> Self {
        Self { config, reload_tx }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a single task to completion.
    ///
    /// This is the containment boundary of the error-handling design: any
    /// error — configuration, transform or filesystem — ends up logged here
    /// and folded into the returned [`TaskOutcome`], keeping the long-lived
    /// watch process alive.
    pub async fn run_task(&self, kind: TaskKind) -> TaskOutcome {
        info!(task = %kind, "task started");

        let result = match kind {
            TaskKind::Clean => clean::run(self).await,
            TaskKind::Html => html::run(self).await,
            TaskKind::Css => css::run(self).await,
            TaskKind::MinCss => passthrough::run(self, AssetClass::MinCss).await,
            TaskKind::Scss => scss::run(self).await,
            TaskKind::Js => js::run(self).await,
            TaskKind::MinJs => passthrough::run(self, AssetClass::MinJs).await,
            TaskKind::Image => image::run(self).await,
        };

        match result {
            Ok(report) if report.failed == 0 => {
                info!(task = %kind, files = report.succeeded, "task completed");
                TaskOutcome::Success
            }
            Ok(report) => {
                warn!(
                    task = %kind,
                    files = report.succeeded,
                    failed = report.failed,
                    "task completed with failures"
                );
                TaskOutcome::Failed
            }
            Err(err) => {
                error!(task = %kind, error = %format!("{err:#}"), "task aborted");
                TaskOutcome::Failed
            }
        }
    }

    /// Enumerate the source files for a class: expand the `src` glob, drop
    /// exclude matches, keep regular files only. Sorted for determinism.
    ///
    /// A glob that fails to expand is a configuration error and aborts the
    /// task (fatal at task start, per the error taxonomy).
    pub(crate) fn sources(&self, class: AssetClass) -> Result<Vec<PathBuf>> {
        let paths = self.config.paths.class(class);

        let exclude = paths
            .exclude
            .as_deref()
            .map(|pat| {
                Glob::new(pat)
                    .map(|g| g.compile_matcher())
                    .with_context(|| format!("compiling exclude glob for class '{class}'"))
            })
            .transpose()?;

        let mut files = Vec::new();
        for entry in glob::glob(&paths.src)
            .with_context(|| format!("expanding src glob for class '{class}': {}", paths.src))?
        {
            let path = entry.with_context(|| format!("reading src glob match for '{class}'"))?;
            if !path.is_file() {
                continue;
            }
            if let Some(ex) = &exclude {
                if ex.is_match(&path) {
                    continue;
                }
            }
            files.push(path);
        }

        files.sort();
        Ok(files)
    }

    /// Write one output file under the class's output directory, creating
    /// the directory if needed. Returns the written path.
    pub(crate) async fn write_output(
        &self,
        dest_dir: &Path,
        file_name: &str,
        contents: &[u8],
    ) -> std::io::Result<PathBuf> {
        fs::create_dir_all(dest_dir).await?;
        let out = dest_dir.join(file_name);
        fs::write(&out, contents).await?;
        Ok(out)
    }

    /// Publish a reload signal for the given outputs. Fire-and-forget: a
    /// send error just means no dev server is listening.
    pub(crate) fn notify_reload(&self, class: AssetClass, written: &[PathBuf]) {
        let event = ReloadEvent {
            class,
            paths: written
                .iter()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .collect(),
        };
        let _ = self.reload_tx.send(event);
    }
}

/// `<stem>.min.<ext>` naming for minified outputs, e.g. `app.js` ->
/// `app.min.js` and `style.scss` -> `style.min.css`.
pub(crate) fn minified_name(source: &Path, out_ext: &str) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    format!("{stem}.min.{out_ext}")
}

/// Underscore-prefixed files are partials: they are inlined into parents
/// (HTML includes, SCSS imports) and never built as task roots.
pub(crate) fn is_partial(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('_'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minified_name_applies_suffix() {
        assert_eq!(minified_name(Path::new("src/js/app.js"), "js"), "app.min.js");
        assert_eq!(
            minified_name(Path::new("style/main.scss"), "css"),
            "main.min.css"
        );
    }

    #[test]
    fn partials_are_underscore_prefixed() {
        assert!(is_partial(Path::new("assets/src/_head.html")));
        assert!(!is_partial(Path::new("assets/src/index.html")));
    }
}
