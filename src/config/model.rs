// src/config/model.rs

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The categories of source file sharing a build pipeline.
///
/// `MinJs` / `MinCss` cover assets that arrive pre-minified from third
/// parties; they are copied verbatim and never reprocessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Html,
    Js,
    MinJs,
    Css,
    MinCss,
    Scss,
    Img,
}

impl AssetClass {
    pub const ALL: [AssetClass; 7] = [
        AssetClass::Html,
        AssetClass::Js,
        AssetClass::MinJs,
        AssetClass::Css,
        AssetClass::MinCss,
        AssetClass::Scss,
        AssetClass::Img,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AssetClass::Html => "html",
            AssetClass::Js => "js",
            AssetClass::MinJs => "min_js",
            AssetClass::Css => "css",
            AssetClass::MinCss => "min_css",
            AssetClass::Scss => "scss",
            AssetClass::Img => "img",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Top-level configuration as read from a TOML file.
///
/// Every section is optional; the defaults reproduce the canonical layout:
///
/// ```toml
/// [server]
/// port = 2001
///
/// [paths]
/// src_root = "assets/src"
/// build_root = "assets/build"
///
/// [paths.js]
/// src = "assets/src/js/*.js"
/// dest = "assets/build/js"
/// watch = "assets/src/js/**/*.js"
/// exclude = "**/*.min.js"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Dev-server settings from `[server]`.
    #[serde(default)]
    pub server: ServerSection,

    /// The path table from `[paths]` and `[paths.<class>]`.
    #[serde(default)]
    pub paths: PathsSection,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    /// Port the dev server binds on localhost.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    2001
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

/// `[paths]` section: the single source of truth for where each asset class
/// is read from and written to.
///
/// The per-class table is typed rather than string-keyed, so a missing class
/// is unrepresentable; bad entries are rejected by `validate` at startup.
/// The value is built once and passed around behind an `Arc` — there is no
/// ambient global configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsSection {
    /// Root of the source tree; this is what the watcher observes.
    #[serde(default = "default_src_root")]
    pub src_root: PathBuf,

    /// Root of the build output tree; this is what `clean` empties and the
    /// dev server serves.
    #[serde(default = "default_build_root")]
    pub build_root: PathBuf,

    #[serde(default = "defaults::html")]
    pub html: ClassPaths,
    #[serde(default = "defaults::js")]
    pub js: ClassPaths,
    #[serde(default = "defaults::min_js")]
    pub min_js: ClassPaths,
    #[serde(default = "defaults::css")]
    pub css: ClassPaths,
    #[serde(default = "defaults::min_css")]
    pub min_css: ClassPaths,
    #[serde(default = "defaults::scss")]
    pub scss: ClassPaths,
    #[serde(default = "defaults::img")]
    pub img: ClassPaths,
}

fn default_src_root() -> PathBuf {
    PathBuf::from("assets/src")
}

fn default_build_root() -> PathBuf {
    PathBuf::from("assets/build")
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            src_root: default_src_root(),
            build_root: default_build_root(),
            html: defaults::html(),
            js: defaults::js(),
            min_js: defaults::min_js(),
            css: defaults::css(),
            min_css: defaults::min_css(),
            scss: defaults::scss(),
            img: defaults::img(),
        }
    }
}

impl PathsSection {
    /// Read-only lookup of the path triple for an asset class.
    pub fn class(&self, class: AssetClass) -> &ClassPaths {
        match class {
            AssetClass::Html => &self.html,
            AssetClass::Js => &self.js,
            AssetClass::MinJs => &self.min_js,
            AssetClass::Css => &self.css,
            AssetClass::MinCss => &self.min_css,
            AssetClass::Scss => &self.scss,
            AssetClass::Img => &self.img,
        }
    }
}

/// Source, output and watch locations for one asset class.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassPaths {
    /// Glob selecting the task's input files, relative to the project root.
    pub src: String,

    /// Directory the task writes into.
    pub dest: PathBuf,

    /// Glob the watcher matches change events against. Typically wider than
    /// `src` (recursive), so that e.g. partials in subdirectories still
    /// trigger a rebuild of their parents.
    pub watch: String,

    /// Optional glob removing files from both `src` and `watch` matches.
    /// Used to keep pre-minified files out of the minifying tasks.
    #[serde(default)]
    pub exclude: Option<String>,
}

impl ClassPaths {
    /// The static directory prefix of the `src` glob — the part before the
    /// first wildcard. Used to mirror source subdirectories into `dest`
    /// (images keep their tree; everything else writes flat).
    pub fn glob_base(&self) -> PathBuf {
        let mut base = PathBuf::new();
        for comp in std::path::Path::new(&self.src).components() {
            let s = comp.as_os_str().to_string_lossy();
            if s.contains('*') || s.contains('?') || s.contains('[') {
                break;
            }
            base.push(comp);
        }
        base
    }
}

mod defaults {
    use super::ClassPaths;
    use std::path::PathBuf;

    pub fn html() -> ClassPaths {
        ClassPaths {
            src: "assets/src/*.html".into(),
            dest: PathBuf::from("assets/build"),
            watch: "assets/src/**/*.html".into(),
            exclude: None,
        }
    }

    pub fn js() -> ClassPaths {
        ClassPaths {
            src: "assets/src/js/*.js".into(),
            dest: PathBuf::from("assets/build/js"),
            watch: "assets/src/js/**/*.js".into(),
            exclude: Some("**/*.min.js".into()),
        }
    }

    pub fn min_js() -> ClassPaths {
        ClassPaths {
            src: "assets/src/js/*.min.js".into(),
            dest: PathBuf::from("assets/build/js"),
            watch: "assets/src/js/**/*.min.js".into(),
            exclude: None,
        }
    }

    pub fn css() -> ClassPaths {
        ClassPaths {
            src: "assets/src/style/css/*.css".into(),
            dest: PathBuf::from("assets/build/css"),
            watch: "assets/src/style/css/**/*.css".into(),
            exclude: Some("**/*.min.css".into()),
        }
    }

    pub fn min_css() -> ClassPaths {
        ClassPaths {
            src: "assets/src/style/css/*.min.css".into(),
            dest: PathBuf::from("assets/build/css"),
            watch: "assets/src/style/css/**/*.min.css".into(),
            exclude: None,
        }
    }

    pub fn scss() -> ClassPaths {
        ClassPaths {
            src: "assets/src/style/scss/*.scss".into(),
            dest: PathBuf::from("assets/build/css"),
            watch: "assets/src/style/scss/**/*.scss".into(),
            exclude: None,
        }
    }

    pub fn img() -> ClassPaths {
        ClassPaths {
            src: "assets/src/img/**/*".into(),
            dest: PathBuf::from("assets/build/img"),
            watch: "assets/src/img/**/*".into(),
            exclude: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn defaults_cover_every_class() {
        let cfg = Config::default();
        for class in AssetClass::ALL {
            let paths = cfg.paths.class(class);
            assert!(!paths.src.is_empty(), "{class} has an empty src glob");
            assert!(!paths.watch.is_empty(), "{class} has an empty watch glob");
        }
    }

    #[test]
    fn empty_toml_equals_defaults() {
        let cfg: Config = toml::from_str("").expect("empty config parses");
        assert_eq!(cfg.server.port, 2001);
        assert_eq!(cfg.paths.build_root, Path::new("assets/build"));
        assert_eq!(cfg.paths.js.exclude.as_deref(), Some("**/*.min.js"));
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [server]
            port = 3000

            [paths]
            build_root = "dist"
            "#,
        )
        .expect("config parses");

        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.paths.build_root, Path::new("dist"));
        // Untouched sections keep their defaults.
        assert_eq!(cfg.paths.scss.src, "assets/src/style/scss/*.scss");
    }

    #[test]
    fn glob_base_stops_at_first_wildcard() {
        let img = defaults::img();
        assert_eq!(img.glob_base(), Path::new("assets/src/img"));

        let html = defaults::html();
        assert_eq!(html.glob_base(), Path::new("assets/src"));
    }
}
