//! Build and walk configuration types.

use std::collections::BTreeSet;
use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::indent::DEFAULT_INDENT_UNIT;

/// Maximum bytes read per file by content consumers (1 MiB).
pub const DEFAULT_MAX_READ_SIZE: u64 = 1024 * 1024;

const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "__pycache__",
    ".git",
    "node_modules",
    "venv",
    "env",
    "build",
    "dist",
    ".idea",
    ".vscode",
];

const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pyc", ".pyo", ".so", ".o", ".obj", ".dll", ".exe", ".bin", // compiled
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".ico", // images
    ".mp3", ".mp4", ".avi", ".mov", ".flv", ".wav", // media
    ".zip", ".tar", ".gz", ".rar", ".7z", // archives
    ".pdf", ".doc", ".docx", ".ppt", ".pptx", ".xls", ".xlsx", // documents
];

/// Directory names pruned while walking and file suffixes left out of listings.
///
/// Supplying a set replaces the corresponding default set entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRules {
    /// Directory names skipped before descending (exact match).
    pub excluded_dirs: BTreeSet<String>,
    /// File name suffixes to omit (suffix match, no globbing).
    pub excluded_extensions: BTreeSet<String>,
}

impl ExclusionRules {
    /// Rules that exclude nothing.
    pub fn none() -> Self {
        Self {
            excluded_dirs: BTreeSet::new(),
            excluded_extensions: BTreeSet::new(),
        }
    }

    /// Replace the pruned directory names.
    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the excluded file suffixes.
    pub fn with_excluded_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Check if a directory with this name is pruned.
    pub fn prunes_dir(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    /// Check if a file with this name is excluded by suffix.
    pub fn excludes_file(&self, name: &str) -> bool {
        self.excluded_extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
    }
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::none()
            .with_excluded_dirs(DEFAULT_EXCLUDED_DIRS.iter().copied())
            .with_excluded_extensions(DEFAULT_EXCLUDED_EXTENSIONS.iter().copied())
    }
}

/// Configuration for materializing structure text.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct BuildConfig {
    /// Directory the structure is created under. Never renamed.
    pub output_root: PathBuf,

    /// Spaces per nesting level.
    #[builder(default = "DEFAULT_INDENT_UNIT")]
    #[serde(default = "default_indent_unit")]
    pub indent_unit: usize,
}

impl BuildConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.output_root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Output root cannot be empty".to_string());
            }
            None => return Err("Output root is required".to_string()),
            _ => {}
        }
        validate_indent_unit(self.indent_unit)
    }
}

impl BuildConfig {
    /// Create a new build config builder.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::default()
    }

    /// Create a config with the default indent unit.
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            indent_unit: DEFAULT_INDENT_UNIT,
        }
    }

    /// Re-check invariants on a config that may have been edited in place.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.indent_unit == 0 {
            return Err(CodecError::invalid_config("Indent unit must be positive"));
        }
        Ok(())
    }
}

/// Configuration for walking a directory tree.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Spaces per nesting level in encoded output.
    #[builder(default = "DEFAULT_INDENT_UNIT")]
    #[serde(default = "default_indent_unit")]
    pub indent_unit: usize,

    /// Pruned directories and excluded suffixes.
    #[builder(default)]
    #[serde(default)]
    pub exclusions: ExclusionRules,

    /// Sort entries by name instead of keeping directory-entry order.
    #[builder(default = "false")]
    #[serde(default)]
    pub sort_entries: bool,

    /// Per-file read cap for content consumers.
    #[builder(default = "DEFAULT_MAX_READ_SIZE")]
    #[serde(default = "default_max_read_size")]
    pub max_read_size: u64,
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        validate_indent_unit(self.indent_unit)
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a config for walking a path with default rules.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            indent_unit: DEFAULT_INDENT_UNIT,
            exclusions: ExclusionRules::default(),
            sort_entries: false,
            max_read_size: DEFAULT_MAX_READ_SIZE,
        }
    }

    /// Re-check invariants on a config that may have been edited in place.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.indent_unit == 0 {
            return Err(CodecError::invalid_config("Indent unit must be positive"));
        }
        Ok(())
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

fn validate_indent_unit(indent_unit: Option<usize>) -> Result<(), String> {
    if indent_unit == Some(0) {
        return Err("Indent unit must be positive".to_string());
    }
    Ok(())
}

fn default_indent_unit() -> usize {
    DEFAULT_INDENT_UNIT
}

fn default_max_read_size() -> u64 {
    DEFAULT_MAX_READ_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclusions() {
        let rules = ExclusionRules::default();
        assert!(rules.prunes_dir("node_modules"));
        assert!(rules.prunes_dir(".git"));
        assert!(!rules.prunes_dir("src"));
        assert!(rules.excludes_file("logo.png"));
        assert!(rules.excludes_file("archive.tar.gz"));
        assert!(!rules.excludes_file("main.rs"));
    }

    #[test]
    fn test_override_replaces_defaults() {
        let rules = ExclusionRules::default().with_excluded_dirs(["target"]);
        assert!(rules.prunes_dir("target"));
        assert!(!rules.prunes_dir("node_modules"));
        // Extensions untouched
        assert!(rules.excludes_file("a.pyc"));

        let rules = rules.with_excluded_extensions(Vec::<String>::new());
        assert!(!rules.excludes_file("a.pyc"));
    }

    #[test]
    fn test_suffix_match_only() {
        let rules = ExclusionRules::none().with_excluded_extensions([".log"]);
        assert!(rules.excludes_file("server.log"));
        assert!(!rules.excludes_file("server.log.1"));
        assert!(!rules.excludes_file("*.log.txt"));
    }

    #[test]
    fn test_walk_config_builder() {
        let config = WalkConfig::builder()
            .root("/srv/project")
            .indent_unit(2usize)
            .sort_entries(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/srv/project"));
        assert_eq!(config.indent_unit, 2);
        assert!(config.sort_entries);
        assert_eq!(config.exclusions, ExclusionRules::default());
        assert_eq!(config.max_read_size, DEFAULT_MAX_READ_SIZE);
    }

    #[test]
    fn test_builders_reject_zero_indent() {
        assert!(WalkConfig::builder().root("/a").indent_unit(0usize).build().is_err());
        assert!(BuildConfig::builder().output_root("/a").indent_unit(0usize).build().is_err());
        assert!(BuildConfig::builder().build().is_err());
    }

    #[test]
    fn test_validate_catches_in_place_edits() {
        let mut config = BuildConfig::new("/out");
        assert!(config.validate().is_ok());
        config.indent_unit = 0;
        assert!(matches!(config.validate(), Err(CodecError::InvalidConfig { .. })));
    }
}
