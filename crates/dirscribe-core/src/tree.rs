//! Tree container and statistics.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CodecWarning;
use crate::node::Node;

/// Summary statistics for a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories, excluding the root.
    pub total_dirs: u64,
    /// Deepest level reached (root children are level 1).
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute stats for an existing tree.
    pub fn from_root(root: &Node) -> Self {
        let mut stats = Self::new();
        stats.collect(root, 0);
        stats
    }

    fn collect(&mut self, node: &Node, depth: u32) {
        for child in &node.children {
            if child.is_dir() {
                self.record_dir(depth + 1);
                self.collect(child, depth + 1);
            } else {
                self.record_file(depth + 1);
            }
        }
    }

    /// Record a file.
    pub fn record_file(&mut self, depth: u32) {
        self.total_files += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// A decoded or walked tree together with where it lives on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTree {
    /// Root node of the tree.
    pub root: Node,

    /// Filesystem path the root corresponds to.
    pub root_path: PathBuf,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Warnings encountered while producing the tree.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CodecWarning>,
}

impl NodeTree {
    /// Create a tree, computing stats from the root.
    pub fn new(root: Node, root_path: impl Into<PathBuf>, warnings: Vec<CodecWarning>) -> Self {
        let stats = TreeStats::from_root(&root);
        Self {
            root,
            root_path: root_path.into(),
            stats,
            warnings,
        }
    }

    /// Get the total number of files.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Get the total number of directories.
    pub fn total_dirs(&self) -> u64 {
        self.stats.total_dirs
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_stats_default() {
        let stats = TreeStats::default();
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_dirs, 0);
        assert_eq!(stats.max_depth, 0);
    }

    #[test]
    fn test_tree_stats_from_root() {
        let mut src = Node::directory("src");
        src.children.push(Node::file("main.rs"));
        let mut root = Node::directory("project");
        root.children.push(src);
        root.children.push(Node::file("Cargo.toml"));

        let tree = NodeTree::new(root, "/work/project", Vec::new());
        assert_eq!(tree.total_files(), 2);
        assert_eq!(tree.total_dirs(), 1);
        assert_eq!(tree.stats.max_depth, 2);
        assert!(!tree.has_warnings());
    }
}
