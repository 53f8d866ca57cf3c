// src/pipeline/include.rs

//! Include-directive resolution for HTML and JS sources.
//!
//! Directives are textual: the referenced file's content replaces the
//! directive at its location, resolved relative to the including file.
//! Resolution recurses into included files; a cycle is a per-file error.
//!
//! Syntax:
//! - HTML: `<!--= partials/_head.html -->`
//! - JS: a line of the form `//= lib/util.js`

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::PipelineError;

static HTML_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--=\s*([^\s>][^>]*?)\s*-->").expect("static regex"));

static JS_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*//=[ \t]*(\S[^\r\n]*?)[ \t]*$").expect("static regex"));

/// Which directive syntax to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeSyntax {
    Html,
    Js,
}

impl IncludeSyntax {
    fn directive(self) -> &'static Regex {
        match self {
            IncludeSyntax::Html => &HTML_DIRECTIVE,
            IncludeSyntax::Js => &JS_DIRECTIVE,
        }
    }
}

/// Read `path` and return its content with all include directives resolved,
/// recursively.
pub fn resolve_file(path: &Path, syntax: IncludeSyntax) -> Result<String, PipelineError> {
    let mut stack = Vec::new();
    resolve_inner(path, syntax, &mut stack)
}

fn resolve_inner(
    path: &Path,
    syntax: IncludeSyntax,
    stack: &mut Vec<PathBuf>,
) -> Result<String, PipelineError> {
    // Canonicalize for cycle detection so `a.html` and `./a.html` collide.
    let identity = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if stack.contains(&identity) {
        return Err(PipelineError::IncludeCycle(identity));
    }
    stack.push(identity);

    let source = fs::read_to_string(path)?;
    let dir = path.parent().unwrap_or(Path::new("."));
    let re = syntax.directive();

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    for caps in re.captures_iter(&source) {
        let (Some(whole), Some(reference)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        out.push_str(&source[cursor..whole.start()]);
        cursor = whole.end();

        let target = dir.join(reference.as_str());
        let included = resolve_inner(&target, syntax, stack).map_err(|err| match err {
            // Attribute read failures to the directive that referenced them.
            PipelineError::Io(io) => PipelineError::Include {
                parent: path.to_path_buf(),
                reference: reference.as_str().to_string(),
                detail: io.to_string(),
            },
            other => other,
        })?;
        out.push_str(&included);
    }

    out.push_str(&source[cursor..]);
    stack.pop();
    Ok(out)
}
