//! Lazy sequence of files for content consumers.

use std::collections::VecDeque;
use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use dirscribe_core::{FileSystem, NodeKind, WalkConfig};

use crate::classify::is_text_eligible;
use crate::walker::TreeWalker;

/// A file that survived the exclusion rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludedFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// Whether a content consumer should treat it as text.
    pub text_eligible: bool,
}

/// Iterator over included files, top-down.
///
/// Each directory's files are yielded before any of its subdirectories are
/// read. A directory that cannot be listed is logged and skipped.
pub struct IncludedFiles<'a, F: FileSystem> {
    walker: &'a TreeWalker<F>,
    config: &'a WalkConfig,
    pending_dirs: Vec<PathBuf>,
    ready: VecDeque<PathBuf>,
}

impl<'a, F: FileSystem> IncludedFiles<'a, F> {
    pub(crate) fn new(walker: &'a TreeWalker<F>, config: &'a WalkConfig) -> Self {
        Self {
            walker,
            config,
            pending_dirs: vec![config.root.clone()],
            ready: VecDeque::new(),
        }
    }

    fn expand(&mut self, dir: PathBuf) {
        let entries = match self.walker.visible_entries(&dir, self.config) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping unreadable directory {}: {e}", dir.display());
                return;
            }
        };

        let mut subdirs = Vec::new();
        for entry in entries {
            let path = dir.join(entry.name.as_str());
            match entry.kind {
                NodeKind::File => self.ready.push_back(path),
                NodeKind::Directory => subdirs.push(path),
            }
        }
        // Stack order: first subdirectory is visited next.
        self.pending_dirs.extend(subdirs.into_iter().rev());
    }
}

impl<F: FileSystem> Iterator for IncludedFiles<'_, F> {
    type Item = IncludedFile;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(path) = self.ready.pop_front() {
                let text_eligible = is_text_eligible(&path, &self.config.exclusions);
                return Some(IncludedFile {
                    path,
                    text_eligible,
                });
            }
            let dir = self.pending_dirs.pop()?;
            self.expand(dir);
        }
    }
}
