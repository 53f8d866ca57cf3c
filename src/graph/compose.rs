// src/graph/compose.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::graph::task::TaskKind;
use crate::pipeline::{Pipeline, TaskOutcome};

/// A directed graph over tasks with two composition operators.
///
/// `Sequence` runs its children in strict completion order and stops at the
/// first child that reports failure: later children depend on the earlier
/// ones having done their job (class tasks must not write into a directory
/// `clean` failed to empty). `Parallel` fires all children concurrently and
/// joins when every branch has completed. No ordering is guaranteed between
/// parallel branches — only the join barrier.
///
/// Graphs are plain values built programmatically (no string-keyed task
/// registry) and are consumed by [`TaskGraph::run`].
#[derive(Debug, Clone)]
pub enum TaskGraph {
    Task(TaskKind),
    Sequence(Vec<TaskGraph>),
    Parallel(Vec<TaskGraph>),
}

/// Sequence combinator: complete each node before starting the next.
pub fn seq(nodes: impl IntoIterator<Item = TaskGraph>) -> TaskGraph {
    TaskGraph::Sequence(nodes.into_iter().collect())
}

/// Parallel combinator: fire all nodes, complete when all complete.
pub fn par(nodes: impl IntoIterator<Item = TaskGraph>) -> TaskGraph {
    TaskGraph::Parallel(nodes.into_iter().collect())
}

impl From<TaskKind> for TaskGraph {
    fn from(kind: TaskKind) -> Self {
        TaskGraph::Task(kind)
    }
}

/// Aggregated result of running a graph.
///
/// Task failures are contained at the task boundary (logged, no partial
/// output for the failing files); the summary only records which tasks
/// reported failure so one-shot invocations can exit non-zero.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub failed: Vec<TaskKind>,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }

    fn merge(&mut self, other: RunSummary) {
        self.failed.extend(other.failed);
    }
}

impl TaskGraph {
    /// Execute the graph against the given pipeline.
    ///
    /// Always resolves: individual task failures are recorded in the
    /// [`RunSummary`], never propagated as panics or errors.
    pub fn run(self, pipeline: Arc<Pipeline>) -> Pin<Box<dyn Future<Output = RunSummary> + Send>> {
        Box::pin(async move {
            let mut summary = RunSummary::default();

            match self {
                TaskGraph::Task(kind) => {
                    if pipeline.run_task(kind).await == TaskOutcome::Failed {
                        summary.failed.push(kind);
                    }
                }
                TaskGraph::Sequence(nodes) => {
                    for node in nodes {
                        summary.merge(node.run(Arc::clone(&pipeline)).await);
                        if !summary.success() {
                            warn!("sequence node failed; skipping remaining nodes");
                            break;
                        }
                    }
                }
                TaskGraph::Parallel(nodes) => {
                    let mut set = JoinSet::new();
                    for node in nodes {
                        set.spawn(node.run(Arc::clone(&pipeline)));
                    }
                    while let Some(joined) = set.join_next().await {
                        match joined {
                            Ok(branch) => summary.merge(branch),
                            Err(err) => error!(error = %err, "graph branch panicked"),
                        }
                    }
                }
            }

            debug!(failed = summary.failed.len(), "graph node finished");
            summary
        })
    }
}

/// The fixed full-build graph: clean first, then every asset class in
/// parallel. The sequencing is what guarantees the output directory is fully
/// regenerated — no class task starts writing before clean has completed,
/// and if clean fails no class task runs at all.
pub fn build_graph() -> TaskGraph {
    seq([
        TaskGraph::Task(TaskKind::Clean),
        par([
            TaskKind::Html.into(),
            TaskKind::Css.into(),
            TaskKind::MinCss.into(),
            TaskKind::Scss.into(),
            TaskKind::Js.into(),
            TaskKind::MinJs.into(),
            TaskKind::Image.into(),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_graph_cleans_before_class_tasks() {
        let TaskGraph::Sequence(nodes) = build_graph() else {
            panic!("build graph must be a sequence");
        };

        assert!(matches!(nodes[0], TaskGraph::Task(TaskKind::Clean)));

        let TaskGraph::Parallel(classes) = &nodes[1] else {
            panic!("second stage must be parallel");
        };
        assert_eq!(classes.len(), 7);
    }
}
