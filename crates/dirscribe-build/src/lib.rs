//! Tree builder for dirscribe.
//!
//! Turns indented structure text into real directories and empty files.
//!
//! # Overview
//!
//! Building happens in two steps:
//!
//! 1. **Decode**: lines are parsed into a [`Node`] tree. Indentation decides
//!    nesting, a trailing `/` marks a directory, blank lines are ignored.
//!    Misaligned indentation is floored and reported, and a line that jumps
//!    several levels deeper attaches to the deepest open directory.
//! 2. **Materialize**: the tree is created under an output root. Directory
//!    creation is idempotent and existing files are never truncated. A failed
//!    entry is reported and the run continues.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dirscribe_build::{BuildConfig, TreeBuilder};
//!
//! let config = BuildConfig::new("/tmp/out");
//! let report = TreeBuilder::new()
//!     .build_from_file(Path::new("structure.txt"), &config)
//!     .unwrap();
//!
//! for warning in report.warnings() {
//!     eprintln!("{warning}");
//! }
//! ```

mod builder;
mod decode;
mod materialize;

pub use builder::{BuildReport, TreeBuilder};
pub use decode::{DECODED_ROOT_NAME, Decoded, OpenDirs, decode};
pub use materialize::{MaterializeReport, Materializer};

// Re-export core types for convenience
pub use dirscribe_core::{BuildConfig, CodecError, CodecWarning, Node, NodeKind, NodeTree, WarningKind};
