//! Structure file to filesystem, end to end.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use dirscribe_core::{BuildConfig, CodecError, CodecWarning, FileSystem, NodeTree, RealFs};

use crate::decode::decode;
use crate::materialize::{MaterializeReport, Materializer};

/// Outcome of a build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Decoded tree, rooted at the output directory. Its warnings are the
    /// decode warnings.
    pub tree: NodeTree,
    /// What happened on disk.
    pub materialized: MaterializeReport,
}

impl BuildReport {
    /// Decode warnings followed by creation failures.
    pub fn warnings(&self) -> impl Iterator<Item = &CodecWarning> {
        self.tree
            .warnings
            .iter()
            .chain(self.materialized.failures.iter())
    }

    /// Whether decoding and materialization were both free of problems.
    pub fn is_clean(&self) -> bool {
        !self.tree.has_warnings() && self.materialized.is_clean()
    }
}

/// Builds directory trees from structure text.
#[derive(Debug, Default)]
pub struct TreeBuilder<F: FileSystem = RealFs> {
    fs: F,
}

impl TreeBuilder<RealFs> {
    /// Create a builder that works on the real filesystem.
    pub fn new() -> Self {
        Self { fs: RealFs }
    }
}

impl<F: FileSystem> TreeBuilder<F> {
    /// Create a builder over any filesystem.
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Access the underlying filesystem.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Read a structure file and materialize it.
    ///
    /// A missing structure file fails before anything is created.
    pub fn build_from_file(
        &self,
        structure_file: &Path,
        config: &BuildConfig,
    ) -> Result<BuildReport, CodecError> {
        config.validate()?;
        if !self.fs.exists(structure_file) {
            return Err(CodecError::InputNotFound {
                path: structure_file.to_path_buf(),
            });
        }

        let text = self
            .fs
            .read_to_string(structure_file)
            .map_err(|e| CodecError::io(structure_file, e))?;

        info!(
            "Creating project structure from {} in {}",
            structure_file.display(),
            config.output_root.display()
        );
        self.build_from_str(&text, config)
    }

    /// Materialize structure text under `config.output_root`.
    ///
    /// The output root is created if missing; failing to create it is fatal.
    /// Per-entry failures are collected in the report.
    pub fn build_from_str(&self, text: &str, config: &BuildConfig) -> Result<BuildReport, CodecError> {
        config.validate()?;
        let decoded = decode(text, config.indent_unit)?;

        let output_root = &config.output_root;
        self.fs
            .create_dir_all(output_root)
            .map_err(|source| CodecError::Io {
                path: output_root.clone(),
                source,
            })?;

        let materialized = Materializer::new(&self.fs).materialize(&decoded.root, output_root);

        let mut root = decoded.root;
        if let Some(name) = output_root.file_name() {
            root.name = name.to_string_lossy().into();
        }
        let tree = NodeTree::new(root, output_root.clone(), decoded.warnings);

        info!(
            dirs = materialized.dirs_ensured,
            files_created = materialized.files_created,
            files_preserved = materialized.files_preserved,
            failed = materialized.failed(),
            "Project structure created in {}",
            output_root.display()
        );

        Ok(BuildReport { tree, materialized })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirscribe_core::{MemoryFs, WarningKind};

    #[test]
    fn test_build_from_str_in_memory() {
        let builder = TreeBuilder::with_fs(MemoryFs::new());
        let config = BuildConfig::new("/tmp/out");

        let report = builder
            .build_from_str("project/\n    src/\n        main.ext\n", &config)
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(report.tree.root.name.as_str(), "out");
        assert_eq!(report.tree.total_dirs(), 2);
        assert_eq!(report.tree.total_files(), 1);

        let fs = builder.fs();
        assert!(fs.is_dir(Path::new("/tmp/out/project")));
        assert!(fs.is_dir(Path::new("/tmp/out/project/src")));
        assert_eq!(fs.contents("/tmp/out/project/src/main.ext").unwrap(), b"");
    }

    #[test]
    fn test_missing_structure_file_is_fatal_and_creates_nothing() {
        let builder = TreeBuilder::with_fs(MemoryFs::new());
        let config = BuildConfig::new("/out");

        let err = builder
            .build_from_file(Path::new("/missing.txt"), &config)
            .unwrap_err();

        assert!(matches!(err, CodecError::InputNotFound { .. }));
        assert!(builder.fs().paths().is_empty());
    }

    #[test]
    fn test_build_from_file_in_memory() {
        let fs = MemoryFs::new();
        fs.add_file("/specs/layout.txt", "docs/\n  guide.md\n");
        let builder = TreeBuilder::with_fs(fs);
        let config = BuildConfig::builder()
            .output_root("/site")
            .indent_unit(2usize)
            .build()
            .unwrap();

        let report = builder
            .build_from_file(Path::new("/specs/layout.txt"), &config)
            .unwrap();

        assert!(report.is_clean());
        assert!(builder.fs().is_file("/site/docs/guide.md"));
    }

    #[test]
    fn test_output_root_failure_is_fatal() {
        let fs = MemoryFs::new();
        fs.fail_on("/out");
        let builder = TreeBuilder::with_fs(fs);

        let err = builder
            .build_from_str("a.txt\n", &BuildConfig::new("/out"))
            .unwrap_err();
        assert!(matches!(err, CodecError::Io { .. }));
    }

    #[test]
    fn test_warnings_are_combined() {
        let fs = MemoryFs::new();
        fs.fail_on("/out/locked");
        let builder = TreeBuilder::with_fs(fs);

        let report = builder
            .build_from_str("  skewed.txt\nlocked/\n", &BuildConfig::new("/out"))
            .unwrap();

        let kinds: Vec<_> = report.warnings().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![WarningKind::MalformedIndentation, WarningKind::EntryCreationFailure]
        );
        assert!(!report.is_clean());
        assert!(builder.fs().is_file("/out/skewed.txt"));
    }
}
