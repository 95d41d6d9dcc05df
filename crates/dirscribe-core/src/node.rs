//! File and directory node types.

use std::path::MAIN_SEPARATOR;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::NodeError;

/// Type of file system node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Directory.
    Directory,
    /// Regular file.
    File,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// A single file or directory in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Entry name (not full path).
    pub name: CompactString,

    /// Whether this is a file or a directory.
    pub kind: NodeKind,

    /// Children nodes (directories only), in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new directory node.
    pub fn directory(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children: Vec::new(),
        }
    }

    /// Create a new file node.
    pub fn file(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    /// Check that `name` can name a single entry.
    ///
    /// Names must be non-empty, must not be `.` or `..`, and must not contain
    /// a path separator.
    pub fn validate_name(name: &str) -> Result<(), NodeError> {
        if name.is_empty() {
            return Err(NodeError::EmptyName);
        }
        if name == "." || name == ".." {
            return Err(NodeError::ReservedName {
                name: name.to_string(),
            });
        }
        if name.contains('/') || name.contains(MAIN_SEPARATOR) {
            return Err(NodeError::ContainsSeparator {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Position of a direct child with the given name and kind.
    pub fn child_position(&self, name: &str, kind: NodeKind) -> Option<usize> {
        self.children
            .iter()
            .position(|c| c.kind == kind && c.name == name)
    }

    /// Return a copy with children sorted by name at every level.
    pub fn sorted(&self) -> Node {
        let mut node = self.clone();
        node.sort_children_by_name();
        node
    }

    /// Sort children by name (directories and files interleaved) recursively.
    pub fn sort_children_by_name(&mut self) {
        self.children
            .sort_by(|a, b| a.name.cmp(&b.name).then(a.is_file().cmp(&b.is_file())));
        for child in &mut self.children {
            child.sort_children_by_name();
        }
    }

    /// Compare names, kinds and nesting, ignoring child order.
    pub fn is_isomorphic(&self, other: &Node) -> bool {
        self.sorted() == other.sorted()
    }
}
