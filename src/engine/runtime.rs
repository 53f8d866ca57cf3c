// src/engine/runtime.rs

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::AssetClass;
use crate::engine::queue::ChangeQueue;
use crate::pipeline::{Pipeline, TaskOutcome};
use crate::watch::bindings;

/// Events sent into the runtime from the watcher, finished binding
/// sequences, or external signals.
///
/// - the watcher sends `Changed` (debounced, per class)
/// - spawned binding sequences send `SequenceFinished`
/// - ctrl-c handling sends `ShutdownRequested`
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Changed {
        class: AssetClass,
        paths: Vec<PathBuf>,
    },
    SequenceFinished {
        class: AssetClass,
        failed: bool,
    },
    ShutdownRequested,
}

/// Options that influence how the runtime behaves.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// If true, exit as soon as no binding sequence is running and nothing
    /// is queued. In watch mode this should be `false`.
    pub exit_when_idle: bool,
}

/// The watch-mode orchestration runtime.
///
/// Responsibilities:
/// - Consume `RuntimeEvent`s.
/// - Run the bound task sequence for a changed class, each binding
///   serialized (changes arriving mid-run coalesce into one follow-up run),
///   while distinct bindings run concurrently.
/// - Keep running across task failures — the user learns of them through
///   log output, and the next change event gets a fresh chance.
pub struct Runtime {
    pipeline: Arc<Pipeline>,
    queue: ChangeQueue,
    options: RuntimeOptions,

    /// Classes whose binding sequence is currently executing.
    running: HashSet<AssetClass>,

    /// Unified event stream from all producers (watcher, sequences, signal
    /// handler).
    events_rx: mpsc::Receiver<RuntimeEvent>,

    /// Sender handed to spawned sequences so they can report completion.
    events_tx: mpsc::Sender<RuntimeEvent>,
}

impl Runtime {
    pub fn new(
        pipeline: Arc<Pipeline>,
        options: RuntimeOptions,
        events_rx: mpsc::Receiver<RuntimeEvent>,
        events_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Self {
        Self {
            pipeline,
            queue: ChangeQueue::new(),
            options,
            running: HashSet::new(),
            events_rx,
            events_tx,
        }
    }

    /// Main event loop. Runs until shutdown is requested (or, with
    /// `exit_when_idle`, until there is nothing left to do).
    pub async fn run(mut self) -> Result<()> {
        info!("watch runtime started");

        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "runtime received event");

            let keep_running = match event {
                RuntimeEvent::Changed { class, paths } => self.handle_changed(class, paths),
                RuntimeEvent::SequenceFinished { class, failed } => {
                    self.handle_finished(class, failed)
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested, stopping runtime");
                    false
                }
            };

            if !keep_running {
                break;
            }
        }

        info!("watch runtime exiting");
        Ok(())
    }

    /// Handle a debounced change batch for one asset class.
    fn handle_changed(&mut self, class: AssetClass, paths: Vec<PathBuf>) -> bool {
        info!(class = %class, files = ?paths, "files changed");

        if self.running.contains(&class) {
            // Binding sequence already running; remember for one rerun after
            // it completes rather than racing writes to the same outputs.
            self.queue.record(class, paths);
        } else {
            self.spawn_sequence(class);
        }

        true
    }

    /// Handle completion of a binding's task sequence.
    fn handle_finished(&mut self, class: AssetClass, failed: bool) -> bool {
        if failed {
            warn!(class = %class, "binding sequence finished with failures");
        } else {
            debug!(class = %class, "binding sequence finished");
        }

        self.running.remove(&class);

        // Changes queued while we were running get exactly one follow-up run.
        if let Some(paths) = self.queue.take(class) {
            info!(class = %class, files = ?paths, "running queued changes");
            self.spawn_sequence(class);
        }

        if self.options.exit_when_idle && self.running.is_empty() && self.queue.is_empty() {
            info!("runtime idle and exit_when_idle=true, stopping");
            return false;
        }

        true
    }

    /// Run the class's bound task sequence on a spawned tokio task. Failures
    /// within the sequence are contained per task; later tasks in the
    /// sequence still run.
    fn spawn_sequence(&mut self, class: AssetClass) {
        self.running.insert(class);

        let pipeline = Arc::clone(&self.pipeline);
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            let mut failed = false;
            for kind in bindings::sequence_for(class) {
                if pipeline.run_task(*kind).await == TaskOutcome::Failed {
                    failed = true;
                }
            }

            // Receiver gone means we're shutting down; nothing to report to.
            let _ = events_tx
                .send(RuntimeEvent::SequenceFinished { class, failed })
                .await;
        });
    }
}
