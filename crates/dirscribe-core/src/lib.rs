//! Core types and traits for dirscribe.
//!
//! This crate provides the data structures shared by the tree builder and
//! the tree walker: nodes and trees, the indented text format, exclusion
//! rules, configuration, and the filesystem capability both components
//! perform their side effects through.

mod config;
mod error;
mod fs;
mod indent;
mod node;
mod tree;

pub use config::{
    BuildConfig, BuildConfigBuilder, DEFAULT_MAX_READ_SIZE, ExclusionRules, WalkConfig,
    WalkConfigBuilder,
};
pub use error::{CodecError, CodecWarning, NodeError, WarningKind};
pub use fs::{FileSystem, FsEntry, MemoryFs, RealFs};
pub use indent::{DEFAULT_INDENT_UNIT, DIR_MARKER, IndentedLine, parse_lines, render_line};
pub use node::{Node, NodeKind};
pub use tree::{NodeTree, TreeStats};
