// src/watch/watcher.rs

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::AssetClass;
use crate::engine::RuntimeEvent;
use crate::watch::hash::HashCache;
use crate::watch::patterns::ClassWatchProfile;

/// Events arriving within this window are batched into one dispatch, so an
/// editor's save dance produces a single rebuild per class.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher observing the source root recursively, sending
/// `RuntimeEvent::Changed` batches for asset classes whose watch globs match
/// a changed path.
///
/// - `project_root` is the directory all glob patterns are relative to.
/// - `src_root` (under it) is the tree actually watched; the build output
///   directory is never observed, so task writes cannot re-trigger tasks.
/// - `runtime_tx` is the channel into the engine runtime.
pub fn spawn_watcher(
    project_root: impl Into<PathBuf>,
    src_root: &Path,
    profiles: Vec<ClassWatchProfile>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let project_root = project_root.into();
    let project_root = project_root
        .canonicalize()
        .unwrap_or_else(|_| project_root.clone());

    let profiles = Arc::new(profiles);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // Can't log via tracing from this thread reliably.
                    eprintln!("assetpipe: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("assetpipe: file watch error: {err}");
            }
        },
        NotifyConfig::default(),
    )?;

    watcher.watch(src_root, RecursiveMode::Recursive)?;
    info!(root = %src_root.display(), "file watcher started");

    tokio::spawn(forward_events(
        project_root,
        Arc::clone(&profiles),
        event_rx,
        runtime_tx,
    ));

    Ok(WatcherHandle { _inner: watcher })
}

/// Async loop: batch notify events over the debounce window, drop content
/// no-ops via the hash cache, then emit one `Changed` per affected class.
async fn forward_events(
    root: PathBuf,
    profiles: Arc<Vec<ClassWatchProfile>>,
    mut event_rx: mpsc::UnboundedReceiver<Event>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) {
    let mut cache = HashCache::new();

    while let Some(event) = event_rx.recv().await {
        let mut pending: BTreeMap<AssetClass, BTreeSet<PathBuf>> = BTreeMap::new();
        collect_matches(&root, &profiles, &event, &mut pending);

        let deadline = tokio::time::sleep(DEBOUNCE_WINDOW);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                _ = &mut deadline => break,
                next = event_rx.recv() => match next {
                    Some(event) => collect_matches(&root, &profiles, &event, &mut pending),
                    None => break,
                },
            }
        }

        // Hash each unique path once; a path can match several classes.
        let unique: BTreeSet<PathBuf> = pending.values().flatten().cloned().collect();
        let changed: BTreeSet<PathBuf> = unique
            .into_iter()
            .filter(|rel| cache.changed(&root.join(rel)))
            .collect();

        for (class, paths) in pending {
            let paths: Vec<PathBuf> = paths.into_iter().filter(|p| changed.contains(p)).collect();
            if paths.is_empty() {
                continue;
            }

            debug!(class = %class, count = paths.len(), "watch match -> change event");
            if runtime_tx
                .send(RuntimeEvent::Changed { class, paths })
                .await
                .is_err()
            {
                // Runtime gone; no point keeping the watcher loop alive.
                warn!("runtime channel closed; stopping watcher loop");
                return;
            }
        }
    }

    debug!("file watcher loop ended");
}

fn collect_matches(
    root: &Path,
    profiles: &[ClassWatchProfile],
    event: &Event,
    pending: &mut BTreeMap<AssetClass, BTreeSet<PathBuf>>,
) {
    if !matches!(
        event.kind,
        EventKind::Create(..) | EventKind::Modify(..) | EventKind::Remove(..)
    ) {
        return;
    }

    for path in &event.paths {
        let Some(rel_str) = relative_str(root, path) else {
            warn!("could not relativize path {path:?} against root {root:?}");
            continue;
        };

        for profile in profiles {
            if profile.matches(&rel_str) {
                pending
                    .entry(profile.class())
                    .or_default()
                    .insert(PathBuf::from(&rel_str));
            }
        }
    }
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if the path is not under `root` and cannot be relativized.
fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let s = rel.to_string_lossy().replace('\\', "/");
    Some(s)
}
