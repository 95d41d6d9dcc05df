//! Tree walker for dirscribe.
//!
//! Walks an existing directory tree and describes it in the same indented
//! text format the builder consumes.
//!
//! # Overview
//!
//! - **Walk**: [`TreeWalker::walk`] builds a [`NodeTree`], pruning excluded
//!   directory names before descending and dropping excluded file suffixes.
//! - **Encode**: [`encode`] renders the tree, one line per entry, with
//!   directories marked by a trailing `/`.
//! - **Included files**: [`TreeWalker::included_files`] lazily yields the
//!   files a content consumer should read, each flagged with whether it looks
//!   like text.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirscribe_walk::{TreeWalker, WalkConfig, encode};
//!
//! let config = WalkConfig::new("/path/to/project");
//! let walker = TreeWalker::new();
//! let tree = walker.walk(&config).unwrap();
//!
//! for line in encode(&tree.root, config.indent_unit) {
//!     println!("{line}");
//! }
//!
//! for file in walker.included_files(&config).unwrap() {
//!     if file.text_eligible {
//!         let content = walker.read_text(&file.path, &config).unwrap();
//!         println!("{}: {} bytes", file.path.display(), content.text.len());
//!     }
//! }
//! ```

mod classify;
mod encode;
mod included;
mod read;
mod walker;

pub use classify::is_text_eligible;
pub use encode::{encode, encode_to_string};
pub use included::{IncludedFile, IncludedFiles};
pub use read::{TextContent, read_capped};
pub use walker::{FILESYSTEM_ROOT_NAME, TreeWalker, file_paths};

// Re-export core types for convenience
pub use dirscribe_core::{
    CodecError, CodecWarning, ExclusionRules, Node, NodeKind, NodeTree, WalkConfig, WarningKind,
};
