// src/graph/task.rs

use std::fmt;

use crate::config::AssetClass;

/// A named, invokable unit of build work.
///
/// Each task is a pure function of the filesystem at invocation time: it
/// reads the files matching its class's source glob, applies its transforms
/// and writes into the class's output directory. `Clean` is the odd one out,
/// emptying the build root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Clean,
    Html,
    Css,
    MinCss,
    Scss,
    Js,
    MinJs,
    Image,
}

impl TaskKind {
    /// CLI-style task name, e.g. `html:build`.
    pub fn name(self) -> &'static str {
        match self {
            TaskKind::Clean => "clean:build",
            TaskKind::Html => "html:build",
            TaskKind::Css => "css:build",
            TaskKind::MinCss => "min_css:build",
            TaskKind::Scss => "scss:build",
            TaskKind::Js => "js:build",
            TaskKind::MinJs => "min_js:build",
            TaskKind::Image => "image:build",
        }
    }

    /// The asset class this task builds, if any.
    pub fn class(self) -> Option<AssetClass> {
        match self {
            TaskKind::Clean => None,
            TaskKind::Html => Some(AssetClass::Html),
            TaskKind::Css => Some(AssetClass::Css),
            TaskKind::MinCss => Some(AssetClass::MinCss),
            TaskKind::Scss => Some(AssetClass::Scss),
            TaskKind::Js => Some(AssetClass::Js),
            TaskKind::MinJs => Some(AssetClass::MinJs),
            TaskKind::Image => Some(AssetClass::Img),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
