// src/pipeline/minify.rs

//! Delegated transforms: CSS prefixing/minification via `lightningcss`,
//! JS minification via `oxc`.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use crate::errors::PipelineError;

/// Encode a browser version the way `lightningcss` expects.
const fn v(major: u32, minor: u32) -> u32 {
    (major << 16) | (minor << 8)
}

/// Browser support matrix driving vendor prefixing and syntax lowering.
fn browser_targets() -> Targets {
    Targets {
        browsers: Some(Browsers {
            chrome: Some(v(90, 0)),
            edge: Some(v(90, 0)),
            firefox: Some(v(88, 0)),
            safari: Some(v(13, 0)),
            ios_saf: Some(v(13, 0)),
            ..Browsers::default()
        }),
        ..Targets::default()
    }
}

/// Add vendor prefixes for the target browsers and minify in a single pass.
pub fn process_css(source: &str) -> Result<String, PipelineError> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| PipelineError::Css(e.to_string()))?;

    let out = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            targets: browser_targets(),
            ..PrinterOptions::default()
        })
        .map_err(|e| PipelineError::Css(e.to_string()))?;

    Ok(out.code)
}

/// Minify JavaScript source code (compress + mangle, comments stripped).
pub fn minify_js(source: &str) -> Result<String, PipelineError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::mjs()).parse();
    if !ret.errors.is_empty() {
        let detail = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(PipelineError::Js(detail));
    }

    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);

    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_is_minified() {
        let out = process_css("body {\n    color: #ff0000;\n}\n").expect("valid css");
        assert!(!out.contains('\n'), "expected single-line output: {out}");
        assert!(out.contains("body"), "selector survives: {out}");
    }

    #[test]
    fn css_prefixing_targets_old_safari() {
        let out = process_css(".box { user-select: none; }").expect("valid css");
        assert!(
            out.contains("-webkit-user-select"),
            "expected webkit prefix in: {out}"
        );
    }

    #[test]
    fn invalid_css_is_an_error() {
        assert!(process_css("body { color: ").is_err());
    }

    #[test]
    fn js_is_minified() {
        let out = minify_js("function add(first, second) {\n  return first + second;\n}\nexport { add };\n")
            .expect("valid js");
        assert!(out.len() < 60, "expected compact output: {out}");
        assert!(!out.contains("first"), "parameters should be mangled: {out}");
    }

    #[test]
    fn invalid_js_is_an_error() {
        assert!(minify_js("function (").is_err());
    }
}
