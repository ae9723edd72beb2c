use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;

/// Everything one pick or listing produced, for JSON output.
///
/// A walk that ends early still reports the paths it delivered; `stats` is
/// then absent and `error` says why it stopped.
#[derive(Debug, Serialize)]
pub struct Report<S> {
    pub root: PathBuf,
    pub paths: Vec<PathBuf>,
    pub stats: Option<S>,
    pub error: Option<String>,
}

impl<S> Report<S> {
    pub fn new(root: PathBuf, paths: Vec<PathBuf>, outcome: Result<S>) -> Self {
        let (stats, error) = match outcome {
            Ok(stats) => (Some(stats), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            root,
            paths,
            stats,
            error,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}
