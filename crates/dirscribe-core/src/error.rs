//! Error and warning types for building and walking trees.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors. These are raised before any filesystem mutation happens.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Structure file or walk root does not exist.
    #[error("Input not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Walk root is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::InputNotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Reasons an entry name cannot become a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("entry name is empty")]
    EmptyName,

    #[error("entry name '{name}' is reserved")]
    ReservedName { name: String },

    #[error("entry name '{name}' contains a path separator")]
    ContainsSeparator { name: String },
}

/// Kind of codec warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Leading whitespace is not a multiple of the indent unit.
    MalformedIndentation,
    /// A single directory or file could not be created.
    EntryCreationFailure,
    /// A directory could not be listed.
    ReadError,
}

/// Non-fatal problem recorded while building or walking a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecWarning {
    /// Path where the warning occurred, if one is known.
    pub path: Option<PathBuf>,
    /// 1-based line of the structure text, for decode warnings.
    pub line: Option<usize>,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl CodecWarning {
    /// Indentation of `line` is not a multiple of `indent_unit`.
    pub fn malformed_indentation(line: usize, indent_unit: usize) -> Self {
        Self {
            path: None,
            line: Some(line),
            message: format!("Line {line}: Indentation is not a multiple of {indent_unit}"),
            kind: WarningKind::MalformedIndentation,
        }
    }

    /// A structure line names an entry that cannot exist.
    pub fn invalid_name(line: usize, error: &crate::NodeError) -> Self {
        Self {
            path: None,
            line: Some(line),
            message: format!("Line {line}: {error}"),
            kind: WarningKind::EntryCreationFailure,
        }
    }

    /// The OS refused to create an entry.
    pub fn creation_failed(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Error creating {}: {error}", path.display()),
            path: Some(path),
            line: None,
            kind: WarningKind::EntryCreationFailure,
        }
    }

    /// A directory could not be listed.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Read error at {}: {error}", path.display()),
            path: Some(path),
            line: None,
            kind: WarningKind::ReadError,
        }
    }
}

impl std::fmt::Display for CodecWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
