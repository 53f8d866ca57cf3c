// src/pipeline/passthrough.rs

//! Verbatim copy for assets that arrive pre-minified from third parties
//! (`*.min.js`, `*.min.css`). These must not be reprocessed: re-minifying
//! vendored bundles is at best wasted work and at worst breaks them.

use anyhow::Result;
use tokio::fs;
use tracing::warn;

use crate::config::AssetClass;
use crate::pipeline::{Pipeline, TaskReport};

pub(crate) async fn run(p: &Pipeline, class: AssetClass) -> Result<TaskReport> {
    let class_paths = p.config().paths.class(class);
    let files = p.sources(class)?;

    let mut report = TaskReport::default();
    let mut written = Vec::new();

    for file in files {
        let Some(name) = file.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };

        let copied = async {
            let bytes = fs::read(&file).await?;
            p.write_output(&class_paths.dest, &name, &bytes).await
        }
        .await;

        match copied {
            Ok(out) => {
                report.succeeded += 1;
                written.push(out);
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "passthrough copy failed");
                report.failed += 1;
            }
        }
    }

    if !written.is_empty() {
        p.notify_reload(class, &written);
    }
    Ok(report)
}
