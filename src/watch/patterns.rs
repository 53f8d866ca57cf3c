// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::{AssetClass, Config};

/// Compiled watch/exclude glob patterns for a single asset class.
///
/// Patterns are relative to the project root; the watcher passes relative
/// paths (e.g. `"assets/src/js/app.js"`) into [`ClassWatchProfile::matches`].
#[derive(Clone)]
pub struct ClassWatchProfile {
    class: AssetClass,
    watch_set: GlobSet,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for ClassWatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassWatchProfile")
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

impl ClassWatchProfile {
    pub fn class(&self) -> AssetClass {
        self.class
    }

    /// Returns true if this class is interested in the given path (relative
    /// to the project root, forward slashes).
    pub fn matches(&self, rel_path: &str) -> bool {
        if !self.watch_set.is_match(rel_path) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

/// Build a compiled watch profile for every asset class in the path table.
pub fn build_watch_profiles(config: &Config) -> Result<Vec<ClassWatchProfile>> {
    let mut profiles = Vec::with_capacity(AssetClass::ALL.len());

    for class in AssetClass::ALL {
        let paths = config.paths.class(class);

        let watch_set = build_globset(std::slice::from_ref(&paths.watch))
            .with_context(|| format!("building watch globset for class '{class}'"))?;

        let exclude_set = paths
            .exclude
            .as_ref()
            .map(|pat| {
                build_globset(std::slice::from_ref(pat))
                    .with_context(|| format!("building exclude globset for class '{class}'"))
            })
            .transpose()?;

        profiles.push(ClassWatchProfile {
            class,
            watch_set,
            exclude_set,
        });
    }

    Ok(profiles)
}

/// Build a GlobSet from simple string patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
