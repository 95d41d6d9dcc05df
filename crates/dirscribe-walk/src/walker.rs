//! Filesystem to node tree.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use dirscribe_core::{
    CodecError, CodecWarning, FileSystem, FsEntry, Node, NodeKind, NodeTree, RealFs, WalkConfig,
};

use crate::included::IncludedFiles;
use crate::read::{TextContent, read_capped};

/// Root line name used when walking `/`.
pub const FILESYSTEM_ROOT_NAME: &str = "root";

/// Walks directory trees, applying exclusion rules.
#[derive(Debug, Default)]
pub struct TreeWalker<F: FileSystem = RealFs> {
    fs: F,
}

impl TreeWalker<RealFs> {
    /// Create a walker over the real filesystem.
    pub fn new() -> Self {
        Self { fs: RealFs }
    }
}

impl<F: FileSystem> TreeWalker<F> {
    /// Create a walker over any filesystem.
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Access the underlying filesystem.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Walk `config.root` into a tree.
    ///
    /// Pruned directories are skipped before descending and contribute
    /// nothing. A directory that cannot be listed is kept as an empty node
    /// and reported as a warning.
    pub fn walk(&self, config: &WalkConfig) -> Result<NodeTree, CodecError> {
        config.validate()?;
        self.check_root(&config.root)?;

        let mut warnings = Vec::new();
        let mut root = Node::directory(self.root_name(&config.root));
        self.walk_dir(&config.root, &mut root, config, &mut warnings);

        let tree = NodeTree::new(root, config.root.clone(), warnings);
        info!(
            files = tree.total_files(),
            dirs = tree.total_dirs(),
            warnings = tree.warnings.len(),
            "Walked {}",
            config.root.display()
        );
        Ok(tree)
    }

    /// Lazily list the files a content consumer should process.
    ///
    /// Root checks happen here; directories are read only as the iterator
    /// reaches them.
    pub fn included_files<'a>(
        &'a self,
        config: &'a WalkConfig,
    ) -> Result<IncludedFiles<'a, F>, CodecError> {
        config.validate()?;
        self.check_root(&config.root)?;
        Ok(IncludedFiles::new(self, config))
    }

    /// Read a file for display, capped at `config.max_read_size`.
    pub fn read_text(&self, path: &Path, config: &WalkConfig) -> io::Result<TextContent> {
        read_capped(&self.fs, path, config.max_read_size)
    }

    fn check_root(&self, root: &Path) -> Result<(), CodecError> {
        if !self.fs.exists(root) {
            return Err(CodecError::InputNotFound {
                path: root.to_path_buf(),
            });
        }
        if !self.fs.is_dir(root) {
            return Err(CodecError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        Ok(())
    }

    fn walk_dir(
        &self,
        path: &Path,
        node: &mut Node,
        config: &WalkConfig,
        warnings: &mut Vec<CodecWarning>,
    ) {
        let entries = match self.visible_entries(path, config) {
            Ok(entries) => entries,
            Err(e) => {
                let warning = CodecWarning::read_error(path, &e);
                warn!("{warning}");
                warnings.push(warning);
                return;
            }
        };

        for entry in entries {
            match entry.kind {
                NodeKind::Directory => {
                    let child_path = path.join(entry.name.as_str());
                    let mut child = Node::directory(entry.name);
                    self.walk_dir(&child_path, &mut child, config, warnings);
                    node.children.push(child);
                }
                NodeKind::File => node.children.push(Node::file(entry.name)),
            }
        }
    }

    /// Name written on the root line.
    ///
    /// Paths without a final component (`.`, `..`, `/`) are resolved first.
    /// A filesystem root keeps its prefix, or becomes [`FILESYSTEM_ROOT_NAME`].
    fn root_name(&self, root: &Path) -> String {
        if let Some(name) = root.file_name() {
            return name.to_string_lossy().into_owned();
        }

        let resolved = self
            .fs
            .canonicalize(root)
            .unwrap_or_else(|_| root.to_path_buf());
        if let Some(name) = resolved.file_name() {
            return name.to_string_lossy().into_owned();
        }

        let prefix = resolved.to_string_lossy();
        let prefix = prefix.trim_end_matches(['/', '\\']);
        if prefix.is_empty() {
            FILESYSTEM_ROOT_NAME.to_string()
        } else {
            prefix.to_string()
        }
    }

    /// Entries of `path` that survive the exclusion rules.
    pub(crate) fn visible_entries(
        &self,
        path: &Path,
        config: &WalkConfig,
    ) -> io::Result<Vec<FsEntry>> {
        let rules = &config.exclusions;
        let mut entries = self.fs.list_entries(path)?;

        entries.retain(|entry| {
            let skip = match entry.kind {
                NodeKind::Directory => rules.prunes_dir(&entry.name),
                NodeKind::File => rules.excludes_file(&entry.name),
            };
            if skip {
                debug!("Excluded {}", path.join(entry.name.as_str()).display());
            }
            !skip
        });

        if config.sort_entries {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(entries)
    }
}


/// Full path of every file under `root` in a walked tree, in tree order.
pub fn file_paths(tree: &NodeTree) -> Vec<PathBuf> {
    fn collect(node: &Node, path: &Path, out: &mut Vec<PathBuf>) {
        for child in &node.children {
            let child_path = path.join(child.name.as_str());
            if child.is_dir() {
                collect(child, &child_path, out);
            } else {
                out.push(child_path);
            }
        }
    }
    let mut out = Vec::new();
    collect(&tree.root, &tree.root_path, &mut out);
    out
}
