// tests/common/mod.rs

// Not every integration test uses every helper.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use assetpipe::config::{ClassPaths, Config};
use assetpipe::pipeline::Pipeline;
use assetpipe::reload::{ReloadSender, channel};

/// Build a config rooted at a temp directory: sources under `<root>/src`,
/// outputs under `<root>/build`, same shape as the default layout.
pub fn test_config(root: &Path) -> Config {
    let r = root.display();
    let mut cfg = Config::default();

    cfg.paths.src_root = root.join("src");
    cfg.paths.build_root = root.join("build");

    cfg.paths.html = ClassPaths {
        src: format!("{r}/src/*.html"),
        dest: root.join("build"),
        watch: format!("{r}/src/**/*.html"),
        exclude: None,
    };
    cfg.paths.js = ClassPaths {
        src: format!("{r}/src/js/*.js"),
        dest: root.join("build/js"),
        watch: format!("{r}/src/js/**/*.js"),
        exclude: Some("**/*.min.js".into()),
    };
    cfg.paths.min_js = ClassPaths {
        src: format!("{r}/src/js/*.min.js"),
        dest: root.join("build/js"),
        watch: format!("{r}/src/js/**/*.min.js"),
        exclude: None,
    };
    cfg.paths.css = ClassPaths {
        src: format!("{r}/src/style/css/*.css"),
        dest: root.join("build/css"),
        watch: format!("{r}/src/style/css/**/*.css"),
        exclude: Some("**/*.min.css".into()),
    };
    cfg.paths.min_css = ClassPaths {
        src: format!("{r}/src/style/css/*.min.css"),
        dest: root.join("build/css"),
        watch: format!("{r}/src/style/css/**/*.min.css"),
        exclude: None,
    };
    cfg.paths.scss = ClassPaths {
        src: format!("{r}/src/style/scss/*.scss"),
        dest: root.join("build/css"),
        watch: format!("{r}/src/style/scss/**/*.scss"),
        exclude: None,
    };
    cfg.paths.img = ClassPaths {
        src: format!("{r}/src/img/**/*"),
        dest: root.join("build/img"),
        watch: format!("{r}/src/img/**/*"),
        exclude: None,
    };

    cfg
}

pub fn test_pipeline(root: &Path) -> (Arc<Pipeline>, ReloadSender) {
    let tx = channel();
    let pipeline = Arc::new(Pipeline::new(Arc::new(test_config(root)), tx.clone()));
    (pipeline, tx)
}

/// Write a file, creating parent directories.
pub fn write(path: &Path, contents: impl AsRef<[u8]>) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, contents).expect("write fixture file");
}
