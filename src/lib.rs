// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod pipeline;
pub mod reload;
pub mod serve;
pub mod watch;

use std::sync::Arc;

use anyhow::{Result, anyhow};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cli::{CliArgs, TaskArg};
use crate::config::Config;
use crate::engine::{Runtime, RuntimeEvent, RuntimeOptions};
use crate::graph::{TaskGraph, TaskKind, build_graph};
use crate::pipeline::{Pipeline, TaskOutcome};
use crate::watch::build_watch_profiles;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + validation
/// - the pipeline and reload channel
/// - the requested task: one-shot graphs, watch mode, or the full default
///   (build, then dev server + watcher)
pub async fn run(args: CliArgs) -> Result<()> {
    let config = Arc::new(config::load_and_validate(&args.config)?);
    let reload_tx = reload::channel();
    let pipeline = Arc::new(Pipeline::new(Arc::clone(&config), reload_tx.clone()));

    match args.task {
        TaskArg::Default => {
            run_graph(build_graph(), Arc::clone(&pipeline), false).await?;
            run_watch_mode(config, pipeline, reload_tx, true).await
        }
        TaskArg::Build => run_graph(build_graph(), pipeline, true).await,
        TaskArg::Watch => run_watch_mode(config, pipeline, reload_tx, false).await,
        TaskArg::CleanBuild => run_single(pipeline, TaskKind::Clean).await,
        TaskArg::HtmlBuild => run_single(pipeline, TaskKind::Html).await,
        TaskArg::CssBuild => run_single(pipeline, TaskKind::Css).await,
        TaskArg::ScssBuild => run_single(pipeline, TaskKind::Scss).await,
        TaskArg::JsBuild => run_single(pipeline, TaskKind::Js).await,
        TaskArg::MinJsBuild => run_single(pipeline, TaskKind::MinJs).await,
        TaskArg::MinCssBuild => run_single(pipeline, TaskKind::MinCss).await,
        TaskArg::ImageBuild => run_single(pipeline, TaskKind::Image).await,
    }
}

/// Run a one-shot task graph.
///
/// With `strict`, any failed task turns into a non-zero exit; otherwise
/// failures are logged and the caller proceeds (the default task keeps
/// serving even when the initial build had failures).
async fn run_graph(graph: TaskGraph, pipeline: Arc<Pipeline>, strict: bool) -> Result<()> {
    let summary = graph.run(pipeline).await;

    if summary.success() {
        return Ok(());
    }

    let names: Vec<&str> = summary.failed.iter().map(|k| k.name()).collect();
    if strict {
        Err(anyhow!("tasks failed: {}", names.join(", ")))
    } else {
        warn!(tasks = ?names, "continuing despite failed tasks");
        Ok(())
    }
}

/// Run a single named task, failing the invocation if the task failed.
async fn run_single(pipeline: Arc<Pipeline>, kind: TaskKind) -> Result<()> {
    match pipeline.run_task(kind).await {
        TaskOutcome::Success => Ok(()),
        TaskOutcome::Failed => Err(anyhow!("task '{kind}' failed")),
    }
}

/// Start the watcher (and optionally the dev server) and run the engine
/// runtime until ctrl-c.
async fn run_watch_mode(
    config: Arc<Config>,
    pipeline: Arc<Pipeline>,
    reload_tx: reload::ReloadSender,
    with_server: bool,
) -> Result<()> {
    let (events_tx, events_rx) = mpsc::channel::<RuntimeEvent>(64);

    let profiles = build_watch_profiles(&config)?;
    let _watcher_handle = watch::spawn_watcher(
        ".",
        &config.paths.src_root,
        profiles,
        events_tx.clone(),
    )?;

    // Ctrl-C -> graceful shutdown.
    {
        let tx = events_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    if with_server {
        let server_config = Arc::clone(&config);
        tokio::spawn(async move {
            if let Err(err) = serve::serve(server_config, reload_tx).await {
                // The watcher remains useful without the server, so log
                // rather than tear everything down.
                warn!(error = %format!("{err:#}"), "dev server stopped");
            }
        });
    }

    info!(src = %config.paths.src_root.display(), "watching for changes");

    let runtime = Runtime::new(pipeline, RuntimeOptions::default(), events_rx, events_tx);
    runtime.run().await
}
