// tests/graph_semantics.rs

//! Composite-graph behaviour: clean-before-build ordering, idempotence of
//! full builds, and failure reporting in the run summary.

mod common;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use assetpipe::graph::{TaskKind, build_graph, seq};
use assetpipe::pipeline::TaskOutcome;
use common::{test_pipeline, write};

/// Recursively collect `relative path -> content` for a directory tree.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn visit(base: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                visit(base, &path, out);
            } else {
                let rel = path.strip_prefix(base).expect("under base").to_path_buf();
                out.insert(rel, fs::read(&path).expect("readable"));
            }
        }
    }

    let mut out = BTreeMap::new();
    visit(root, root, &mut out);
    out
}

fn seed_sources(root: &Path) {
    write(&root.join("src/index.html"), "<h1>home</h1>\n");
    write(&root.join("src/js/app.js"), "window.app = 1;\n");
    write(&root.join("src/js/vendor.min.js"), "var v=1;\n");
    write(&root.join("src/style/css/site.css"), "a { color: #00ff00; }\n");
    write(&root.join("src/style/scss/main.scss"), "b { color: #0000ff; }\n");
    write(&root.join("src/img/pixel.gif"), [0x47u8, 0x49, 0x46]);
}

#[tokio::test]
async fn full_build_replaces_stale_outputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    seed_sources(root);
    // Leftover from a previous run with different sources.
    write(&root.join("build/js/removed.min.js"), "var gone=1;\n");

    let (pipeline, _tx) = test_pipeline(root);
    let summary = build_graph().run(Arc::clone(&pipeline)).await;
    assert!(summary.success(), "failed: {:?}", summary.failed);

    assert!(
        !root.join("build/js/removed.min.js").exists(),
        "clean must complete before class tasks write"
    );
    assert!(root.join("build/index.html").exists());
    assert!(root.join("build/js/app.min.js").exists());
    assert!(root.join("build/js/vendor.min.js").exists());
    assert!(root.join("build/css/site.min.css").exists());
    assert!(root.join("build/css/main.min.css").exists());
    assert!(root.join("build/img/pixel.gif").exists());
}

#[tokio::test]
async fn build_twice_is_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    seed_sources(root);

    let (pipeline, _tx) = test_pipeline(root);

    let summary = build_graph().run(Arc::clone(&pipeline)).await;
    assert!(summary.success());
    let first = snapshot(&root.join("build"));

    let summary = build_graph().run(Arc::clone(&pipeline)).await;
    assert!(summary.success());
    let second = snapshot(&root.join("build"));

    assert!(!first.is_empty());
    assert_eq!(first, second, "build must be idempotent on unchanged sources");
}

#[tokio::test]
async fn clean_task_empties_the_build_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    write(&root.join("build/css/old.min.css"), "x{}");
    write(&root.join("build/top.html"), "<p>old</p>");

    let (pipeline, _tx) = test_pipeline(root);
    assert_eq!(pipeline.run_task(TaskKind::Clean).await, TaskOutcome::Success);

    let remaining: Vec<_> = fs::read_dir(root.join("build"))
        .expect("root survives")
        .collect();
    assert!(remaining.is_empty(), "build root must be empty after clean");
}

#[tokio::test]
async fn clean_of_missing_root_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (pipeline, _tx) = test_pipeline(dir.path());

    assert_eq!(pipeline.run_task(TaskKind::Clean).await, TaskOutcome::Success);
}

#[tokio::test]
async fn sequence_skips_remaining_nodes_after_a_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    write(&root.join("src/style/scss/broken.scss"), "body { color: ;\n");
    write(&root.join("src/style/css/fine.css"), "p { margin: 0; }\n");

    let (pipeline, _tx) = test_pipeline(root);
    let summary = seq([TaskKind::Scss.into(), TaskKind::Css.into()])
        .run(pipeline)
        .await;

    assert_eq!(summary.failed, vec![TaskKind::Scss]);
    // Later nodes depend on earlier ones; they must not run after a failure
    // (a failed clean must never be followed by class tasks writing into the
    // un-cleaned directory).
    assert!(
        !root.join("build/css/fine.min.css").exists(),
        "nodes after a failed one must not run"
    );
}

#[tokio::test]
async fn summary_names_the_failed_tasks() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    seed_sources(root);
    write(&root.join("src/style/scss/broken.scss"), "body { color: ;\n");

    let (pipeline, _tx) = test_pipeline(root);
    let summary = build_graph().run(pipeline).await;

    assert!(!summary.success());
    assert_eq!(summary.failed, vec![TaskKind::Scss]);
}
