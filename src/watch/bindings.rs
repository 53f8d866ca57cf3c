// src/watch/bindings.rs

//! The watch-binding table: which task sequence re-runs when a file of a
//! given asset class changes.
//!
//! An HTML change re-runs HTML, then SCSS, then CSS — new markup may
//! reference styles (and, with utility-class generation in the style
//! post-processor, generate them) that did not exist before. Every other
//! class rebuilds only itself.

use crate::config::AssetClass;
use crate::graph::TaskKind;

/// The task sequence bound to a class's watch glob. Registered once when the
/// watcher starts; fires for the life of the process.
pub fn sequence_for(class: AssetClass) -> &'static [TaskKind] {
    match class {
        AssetClass::Html => &[TaskKind::Html, TaskKind::Scss, TaskKind::Css],
        AssetClass::Js => &[TaskKind::Js],
        AssetClass::MinJs => &[TaskKind::MinJs],
        AssetClass::Css => &[TaskKind::Css],
        AssetClass::MinCss => &[TaskKind::MinCss],
        AssetClass::Scss => &[TaskKind::Scss],
        AssetClass::Img => &[TaskKind::Image],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_changes_rerun_html_then_scss_then_css() {
        assert_eq!(
            sequence_for(AssetClass::Html),
            &[TaskKind::Html, TaskKind::Scss, TaskKind::Css]
        );
    }

    #[test]
    fn non_html_classes_rerun_only_themselves() {
        for class in [
            AssetClass::Js,
            AssetClass::MinJs,
            AssetClass::Css,
            AssetClass::MinCss,
            AssetClass::Scss,
            AssetClass::Img,
        ] {
            let seq = sequence_for(class);
            assert_eq!(seq.len(), 1, "{class} must map to exactly one task");
            assert_eq!(seq[0].class(), Some(class));
        }
    }
}
