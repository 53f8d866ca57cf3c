// src/pipeline/image.rs

//! Image build task: byte-for-byte copy into the output directory, mirroring
//! the source subdirectory layout (the image glob is recursive).

use anyhow::Result;
use tokio::fs;
use tracing::warn;

use crate::config::AssetClass;
use crate::pipeline::{Pipeline, TaskReport};

pub(crate) async fn run(p: &Pipeline) -> Result<TaskReport> {
    let class_paths = p.config().paths.class(AssetClass::Img);
    let base = class_paths.glob_base();
    let files = p.sources(AssetClass::Img)?;

    let mut report = TaskReport::default();
    let mut written = Vec::new();

    for file in files {
        // Mirror `img/icons/x.png` -> `<dest>/icons/x.png`.
        let rel = file
            .strip_prefix(&base)
            .map(|r| r.to_path_buf())
            .unwrap_or_else(|_| file.file_name().map(Into::into).unwrap_or_default());
        if rel.as_os_str().is_empty() {
            continue;
        }

        let out = class_paths.dest.join(&rel);
        let copied = async {
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::copy(&file, &out).await
        }
        .await;

        match copied {
            Ok(_) => {
                report.succeeded += 1;
                written.push(out);
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "image copy failed");
                report.failed += 1;
            }
        }
    }

    if !written.is_empty() {
        p.notify_reload(AssetClass::Img, &written);
    }
    Ok(report)
}
