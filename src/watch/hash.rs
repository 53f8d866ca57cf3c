// src/watch/hash.rs

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

/// In-memory content-hash cache used to drop watch events for files whose
/// bytes did not actually change.
///
/// Editors commonly produce metadata-only events (touch, atomic-save rename
/// dances); hashing the content with `blake3` lets the watcher skip rebuild
/// sequences those would otherwise trigger. The cache lives for the duration
/// of the watch process; a removed file counts as changed and evicts its
/// entry.
#[derive(Debug, Default)]
pub struct HashCache {
    entries: HashMap<PathBuf, blake3::Hash>,
}

impl HashCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the file's content differs from the cached hash (or
    /// was never seen), updating the cache. Unreadable or removed files are
    /// treated as changed.
    pub fn changed(&mut self, path: &Path) -> bool {
        match hash_file(path) {
            Some(hash) => {
                let previous = self.entries.insert(path.to_path_buf(), hash);
                let changed = previous != Some(hash);
                if !changed {
                    debug!(path = %path.display(), "content unchanged; ignoring event");
                }
                changed
            }
            None => {
                self.entries.remove(path);
                true
            }
        }
    }
}

fn hash_file(path: &Path) -> Option<blake3::Hash> {
    let mut file = File::open(path).ok()?;
    let mut hasher = blake3::Hasher::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Some(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn repeated_events_without_edits_are_filtered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("style.css");
        fs::write(&file, "body{}").expect("write");

        let mut cache = HashCache::new();
        assert!(cache.changed(&file), "first sighting counts as changed");
        assert!(!cache.changed(&file), "same content must be filtered");

        fs::write(&file, "body{color:red}").expect("write");
        assert!(cache.changed(&file), "new content counts as changed");
    }

    #[test]
    fn removed_file_counts_as_changed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("gone.css");
        fs::write(&file, "x").expect("write");

        let mut cache = HashCache::new();
        cache.changed(&file);
        fs::remove_file(&file).expect("remove");
        assert!(cache.changed(&file));
    }
}
