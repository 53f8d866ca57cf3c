// src/engine/queue.rs

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use tracing::debug;

use crate::config::AssetClass;

/// Queue of changes that arrive while a binding's task sequence is already
/// executing.
///
/// Semantics:
/// - Changes for a class whose sequence is running are recorded here and
///   coalesced into a single pending rerun (one set of paths, duplicates
///   merged). Overlapping invocations of the same binding are a race on the
///   binding's output files, so the runtime serializes them through this
///   queue.
/// - Changes for *different* classes are unaffected — their sequences run
///   concurrently.
#[derive(Debug, Default)]
pub struct ChangeQueue {
    pending: HashMap<AssetClass, BTreeSet<PathBuf>>,
}

impl ChangeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no queued changes for any class.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Record changed paths for a class whose sequence is currently running.
    /// Repeated records merge into the same pending rerun.
    pub fn record(&mut self, class: AssetClass, paths: impl IntoIterator<Item = PathBuf>) {
        let entry = self.pending.entry(class).or_default();
        entry.extend(paths);
        debug!(class = %class, pending = entry.len(), "change recorded for queued rerun");
    }

    /// Take the pending changes for a class, if any. Called when the class's
    /// running sequence finishes, to decide whether to go again.
    pub fn take(&mut self, class: AssetClass) -> Option<Vec<PathBuf>> {
        self.pending
            .remove(&class)
            .map(|set| set.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_coalesce_into_one_rerun() {
        let mut queue = ChangeQueue::new();
        queue.record(AssetClass::Js, [PathBuf::from("assets/src/js/a.js")]);
        queue.record(
            AssetClass::Js,
            [
                PathBuf::from("assets/src/js/a.js"),
                PathBuf::from("assets/src/js/b.js"),
            ],
        );

        let drained = queue.take(AssetClass::Js).expect("pending changes");
        assert_eq!(drained.len(), 2, "duplicates merge");
        assert!(queue.take(AssetClass::Js).is_none(), "take drains");
    }

    #[test]
    fn classes_are_independent() {
        let mut queue = ChangeQueue::new();
        queue.record(AssetClass::Scss, [PathBuf::from("x.scss")]);

        assert!(queue.take(AssetClass::Css).is_none());
        assert!(queue.take(AssetClass::Scss).is_some());
        assert!(queue.is_empty());
    }
}
