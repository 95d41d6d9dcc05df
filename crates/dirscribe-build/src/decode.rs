//! Structure text to node tree.

use tracing::{debug, error, warn};

use dirscribe_core::{CodecError, CodecWarning, Node, NodeKind, parse_lines};

/// Name given to the synthetic root of a decoded tree.
pub const DECODED_ROOT_NAME: &str = ".";

/// Result of decoding structure text.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// Synthetic root standing in for the output directory.
    pub root: Node,
    /// Malformed indentation and rejected names, in line order.
    pub warnings: Vec<CodecWarning>,
}

/// Directories currently open while decoding.
///
/// Each element is a child index into the directory above it, so the stack
/// of open directories is the root followed by one entry per level.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OpenDirs {
    path: Vec<usize>,
}

impl OpenDirs {
    /// Only the root is open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open directories, counting the root.
    pub fn depth(&self) -> usize {
        self.path.len() + 1
    }

    /// Close directories until at most `level + 1` remain open.
    ///
    /// A level deeper than the open stack leaves it untouched, which attaches
    /// the next entry to the deepest open directory.
    pub fn close_to_level(&mut self, level: usize) {
        self.path.truncate(level);
    }

    /// Open the child at `index` of the current directory.
    pub fn open(&mut self, index: usize) {
        self.path.push(index);
    }

    /// The deepest open directory.
    pub fn current<'a>(&self, root: &'a mut Node) -> &'a mut Node {
        self.path
            .iter()
            .fold(root, |node, &index| &mut node.children[index])
    }
}

/// Decode structure text into a tree rooted at a synthetic directory.
///
/// Blank lines are ignored. Misaligned indentation is floored and recorded
/// as a warning. Lines naming impossible entries are skipped with a warning.
pub fn decode(text: &str, indent_unit: usize) -> Result<Decoded, CodecError> {
    if indent_unit == 0 {
        return Err(CodecError::invalid_config("Indent unit must be positive"));
    }

    let mut root = Node::directory(DECODED_ROOT_NAME);
    let mut open = OpenDirs::new();
    let mut warnings = Vec::new();

    for line in parse_lines(text, indent_unit) {
        if !line.is_aligned() {
            let warning = CodecWarning::malformed_indentation(line.line_number, indent_unit);
            warn!("{warning}");
            warnings.push(warning);
        }

        if line.level + 1 > open.depth() {
            debug!(
                line = line.line_number,
                level = line.level,
                open = open.depth(),
                "Clamping entry to deepest open directory"
            );
        }
        // Rejected lines still close deeper directories.
        open.close_to_level(line.level);

        if let Err(e) = Node::validate_name(&line.name) {
            let warning = CodecWarning::invalid_name(line.line_number, &e);
            error!("{warning}");
            warnings.push(warning);
            continue;
        }

        let parent = open.current(&mut root);
        let kind = if line.is_dir {
            NodeKind::Directory
        } else {
            NodeKind::File
        };

        let index = match parent.child_position(&line.name, kind) {
            Some(existing) => existing,
            None => {
                parent.children.push(match kind {
                    NodeKind::Directory => Node::directory(line.name.as_str()),
                    NodeKind::File => Node::file(line.name.as_str()),
                });
                parent.children.len() - 1
            }
        };

        if line.is_dir {
            open.open(index);
        }
    }

    Ok(Decoded { root, warnings })
}
