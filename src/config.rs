use serde::{Deserialize, Serialize};

/// Inclusion policy for one recursive pick.
///
/// The default picks unique, non-empty files and renders absolute paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Emit files whose content was already emitted during the same walk
    pub include_already_seen: bool,
    /// Emit zero-length files
    pub include_empty_files: bool,
    /// Emit `root`-joined paths instead of absolute ones
    pub use_relative_paths: bool,
}

impl PickerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_already_seen(mut self, yes: bool) -> Self {
        self.include_already_seen = yes;
        self
    }

    pub fn include_empty_files(mut self, yes: bool) -> Self {
        self.include_empty_files = yes;
        self
    }

    pub fn use_relative_paths(mut self, yes: bool) -> Self {
        self.use_relative_paths = yes;
        self
    }

    /// Whether files need hashing at all
    pub fn dedup(&self) -> bool {
        !self.include_already_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dedups_and_skips_empty() {
        let config = PickerConfig::default();
        assert!(config.dedup());
        assert!(!config.include_empty_files);
        assert!(!config.use_relative_paths);
    }

    #[test]
    fn setters_chain() {
        let config = PickerConfig::new()
            .include_already_seen(true)
            .include_empty_files(true)
            .use_relative_paths(true);
        assert!(!config.dedup());
        assert!(config.include_empty_files);
        assert!(config.use_relative_paths);
    }

    #[test]
    fn deserializes_from_json() {
        let config: PickerConfig = serde_json::from_str(
            r#"{"include_already_seen":false,"include_empty_files":true,"use_relative_paths":true}"#,
        )
        .unwrap();
        assert_eq!(config, PickerConfig::new().include_empty_files(true).use_relative_paths(true));
    }
}
