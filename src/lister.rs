//! One-level directory listings filtered by a caller-supplied predicate.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PickError, Result};
use crate::stream::PathStream;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListStats {
    /// Immediate children of the listed directory
    pub entries: usize,
    pub emitted: usize,
    /// Paths emitted as joined paths because they could not be made absolute
    pub fallbacks: usize,
    pub cancelled: bool,
}

/// Lists the immediate children of `root` accepted by `predicate`.
///
/// Entries are visited in file name order. The predicate sees each entry's
/// own metadata (symlinks are not followed). Listing errors are logged and
/// close the stream without emitting anything.
pub fn pick_in<F>(root: impl Into<PathBuf>, predicate: F) -> PathStream<ListStats>
where
    F: Fn(&Metadata) -> bool + Send + 'static,
{
    let root = root.into();

    PathStream::spawn_blocking(move |tx| {
        let picked = match read_sorted(&root) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("{}", e);
                return Err(e);
            }
        };

        let mut stats = ListStats {
            entries: picked.len(),
            ..ListStats::default()
        };

        for (name, metadata) in picked {
            if !predicate(&metadata) {
                continue;
            }

            let joined = root.join(&name);
            // Only fails if the working directory is gone and `root` is relative
            let path = match std::path::absolute(&joined) {
                Ok(abs) => abs,
                Err(e) => {
                    log::warn!("Cannot resolve {:?}, using it as is: {}", joined, e);
                    stats.fallbacks += 1;
                    joined
                }
            };

            if tx.blocking_send(path).is_err() {
                stats.cancelled = true;
                break;
            }
            stats.emitted += 1;
        }

        log::debug!("Listed {} of {} entries in {:?}", stats.emitted, stats.entries, root);
        Ok(stats)
    })
}

/// Immediate subdirectories of `root`
pub fn dirs_in(root: impl Into<PathBuf>) -> PathStream<ListStats> {
    pick_in(root, is_dir)
}

/// Immediate non-empty regular files of `root`
pub fn files_in(root: impl Into<PathBuf>) -> PathStream<ListStats> {
    pick_in(root, is_non_empty_file)
}

/// Real directories. A symlink to a directory is not one: the metadata
/// handed to predicates is the entry's own.
pub fn is_dir(metadata: &Metadata) -> bool {
    metadata.is_dir()
}

/// Regular files with content. Symlinks and other special entries are excluded.
pub fn is_non_empty_file(metadata: &Metadata) -> bool {
    metadata.is_file() && metadata.len() > 0
}

fn read_sorted(root: &Path) -> Result<Vec<(std::ffi::OsString, Metadata)>> {
    let read_err = |source| PickError::ReadDir {
        path: root.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(root).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let metadata = entry.metadata().map_err(read_err)?;
        entries.push((entry.file_name(), metadata));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn canned_predicates() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("full"), "data").unwrap();
        fs::write(dir.path().join("empty"), "").unwrap();

        let sub = fs::metadata(dir.path().join("sub")).unwrap();
        let full = fs::metadata(dir.path().join("full")).unwrap();
        let empty = fs::metadata(dir.path().join("empty")).unwrap();

        assert!(is_dir(&sub));
        assert!(!is_dir(&full));
        assert!(!is_non_empty_file(&sub));
        assert!(is_non_empty_file(&full));
        assert!(!is_non_empty_file(&empty));
    }

    #[test]
    fn read_sorted_orders_by_name() {
        let dir = TempDir::new().unwrap();
        for name in ["c", "a", "b"] {
            fs::write(dir.path().join(name), name).unwrap();
        }

        let names: Vec<_> = read_sorted(dir.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
