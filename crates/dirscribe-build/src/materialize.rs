//! Node tree to directories and files.

use std::path::Path;

use serde::Serialize;
use tracing::{error, info};

use dirscribe_core::{CodecWarning, FileSystem, Node, NodeKind};

/// Outcome of materializing a tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaterializeReport {
    /// Directories created or found already present.
    pub dirs_ensured: u64,
    /// Files newly created empty.
    pub files_created: u64,
    /// Files that already existed and were left untouched.
    pub files_preserved: u64,
    /// One entry per directory or file that could not be created.
    pub failures: Vec<CodecWarning>,
}

impl MaterializeReport {
    /// Number of entries that could not be created.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Whether every entry was created.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Creates the entries of a node tree through a [`FileSystem`].
pub struct Materializer<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> Materializer<'a, F> {
    /// Create a materializer over `fs`.
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Create the children of `root` under `output_root`, depth first.
    ///
    /// `root` itself stands for `output_root` and is not created. A failed
    /// entry is recorded and the run moves on; nothing is rolled back.
    pub fn materialize(&self, root: &Node, output_root: &Path) -> MaterializeReport {
        let mut report = MaterializeReport::default();
        for child in &root.children {
            self.materialize_node(child, output_root, &mut report);
        }
        report
    }

    fn materialize_node(&self, node: &Node, parent: &Path, report: &mut MaterializeReport) {
        let path = parent.join(node.name.as_str());

        match node.kind {
            NodeKind::Directory => {
                match self.fs.create_dir_all(&path) {
                    Ok(()) => {
                        report.dirs_ensured += 1;
                        info!("Created directory: {}", path.display());
                    }
                    Err(e) => {
                        let failure = CodecWarning::creation_failed(&path, &e);
                        error!("{failure}");
                        report.failures.push(failure);
                    }
                }
                // Children are still attempted so each failure is reported on its own.
                for child in &node.children {
                    self.materialize_node(child, &path, report);
                }
            }
            NodeKind::File => match self.fs.create_file_if_absent(&path) {
                Ok(true) => {
                    report.files_created += 1;
                    info!("Created file: {}", path.display());
                }
                Ok(false) => {
                    report.files_preserved += 1;
                    info!("File exists, left unchanged: {}", path.display());
                }
                Err(e) => {
                    let failure = CodecWarning::creation_failed(&path, &e);
                    error!("{failure}");
                    report.failures.push(failure);
                }
            },
        }
    }
}
