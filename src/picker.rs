use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::sync::mpsc;
use walkdir::{DirEntry, WalkDir};

use crate::config::PickerConfig;
use crate::error::{PickError, Result};
use crate::hashing::sha256_file;
use crate::stream::PathStream;

/// Recursive file enumerator.
///
/// Each call to [`pick`](Picker::pick) starts an independent walk with its own
/// dedup state; nothing carries over between walks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Picker {
    config: PickerConfig,
}

/// Counters for one completed (or aborted) walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PickStats {
    /// Entries reported by the walk, directories included
    pub visited: usize,
    pub directories: usize,
    pub emitted: usize,
    pub skipped_empty: usize,
    pub skipped_seen: usize,
    pub hash_failures: usize,
    /// The consumer went away before the walk finished
    pub cancelled: bool,
}

impl Picker {
    pub fn new(config: PickerConfig) -> Self {
        Self { config }
    }

    /// Starts walking `root` in the background and returns the result stream.
    ///
    /// Errors never surface here: they are logged and the stream just ends.
    /// Must be called from within a tokio runtime.
    pub fn pick(&self, root: impl Into<PathBuf>) -> PathStream<PickStats> {
        let root = root.into();
        let config = self.config;

        PathStream::spawn_blocking(move |tx| {
            let mut walk = Walk::new(&root, config, tx);
            let outcome = walk.run();
            match &outcome {
                Ok(stats) => log::info!(
                    "Picked {} of {} entries under {:?}{}",
                    stats.emitted,
                    stats.visited,
                    root,
                    if stats.cancelled { " (cancelled)" } else { "" }
                ),
                Err(e) => log::error!("Pick under {:?} aborted: {}", root, e),
            }
            outcome
        })
    }
}

/// Closure form of [`Picker`]: fixes the policy, takes the root per call.
pub fn make_picker(config: PickerConfig) -> impl Fn(PathBuf) -> PathStream<PickStats> {
    let picker = Picker::new(config);
    move |root| picker.pick(root)
}

/// State of a single walk. Only the walking thread touches it.
struct Walk<'a> {
    root: &'a Path,
    config: PickerConfig,
    tx: mpsc::Sender<PathBuf>,
    seen: HashSet<String>,
    stats: PickStats,
}

impl<'a> Walk<'a> {
    fn new(root: &'a Path, config: PickerConfig, tx: mpsc::Sender<PathBuf>) -> Self {
        Self {
            root,
            config,
            tx,
            seen: HashSet::new(),
            stats: PickStats::default(),
        }
    }

    fn run(&mut self) -> Result<PickStats> {
        for entry in WalkDir::new(self.root).sort_by_file_name() {
            if self.tx.is_closed() {
                return Ok(self.cancel());
            }

            let entry = entry?;
            self.stats.visited += 1;

            let Some(path) = self.accept(&entry)? else {
                continue;
            };

            log::debug!("Picked {:?}", path);
            if self.tx.blocking_send(path).is_err() {
                return Ok(self.cancel());
            }
            self.stats.emitted += 1;
        }

        Ok(std::mem::take(&mut self.stats))
    }

    /// Applies the policy to one entry; `Ok(None)` means skip it.
    fn accept(&mut self, entry: &DirEntry) -> Result<Option<PathBuf>> {
        // Symlinked directories are not descended into, but are still directories
        if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir()) {
            self.stats.directories += 1;
            return Ok(None);
        }

        if !self.config.include_empty_files && entry.metadata()?.len() == 0 {
            log::debug!("Skipping empty file {:?}", entry.path());
            self.stats.skipped_empty += 1;
            return Ok(None);
        }

        let path = self.render(entry.path())?;

        if self.config.dedup() {
            let sum = match sha256_file(entry.path()) {
                Ok(sum) => sum,
                Err(source) => {
                    let e = PickError::Hash {
                        path: entry.path().to_path_buf(),
                        source,
                    };
                    log::warn!("{}", e);
                    self.stats.hash_failures += 1;
                    return Ok(None);
                }
            };

            if !self.seen.insert(sum) {
                log::debug!("Skipping already seen content {:?}", entry.path());
                self.stats.skipped_seen += 1;
                return Ok(None);
            }
        }

        Ok(Some(path))
    }

    /// Path to emit for a walked entry.
    ///
    /// Walked paths always start with the root and are never empty, so on
    /// Unix both error branches only fire if the working directory has gone
    /// away (absolute mode).
    fn render(&self, walked: &Path) -> Result<PathBuf> {
        if self.config.use_relative_paths {
            let relative = walked.strip_prefix(self.root).map_err(|e| PickError::Resolve {
                path: walked.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
            })?;
            if relative.as_os_str().is_empty() {
                // The root itself is a file
                Ok(self.root.to_path_buf())
            } else {
                Ok(self.root.join(relative))
            }
        } else {
            std::path::absolute(walked).map_err(|source| PickError::Resolve {
                path: walked.to_path_buf(),
                source,
            })
        }
    }

    fn cancel(&mut self) -> PickStats {
        log::debug!("Consumer dropped, stopping pick under {:?}", self.root);
        self.stats.cancelled = true;
        std::mem::take(&mut self.stats)
    }
}
