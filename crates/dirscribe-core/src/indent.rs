//! The indented text format shared by the builder and the walker.
//!
//! Each non-blank line names one entry. Leading whitespace encodes nesting,
//! `indent_unit` characters per level, and a trailing `/` marks a directory:
//!
//! ```text
//! project/
//!     src/
//!         main.rs
//!     README.md
//! ```

/// Default number of spaces per nesting level.
pub const DEFAULT_INDENT_UNIT: usize = 4;

/// Suffix that marks a directory line.
pub const DIR_MARKER: char = '/';

/// One parsed line of structure text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentedLine {
    /// 1-based position in the input.
    pub line_number: usize,
    /// Count of leading whitespace characters.
    pub depth: usize,
    /// Nesting level, `depth / indent_unit`.
    pub level: usize,
    /// Entry name with surrounding whitespace and directory marker removed.
    pub name: String,
    /// Whether the line ended with the directory marker.
    pub is_dir: bool,
    indent_unit: usize,
}

impl IndentedLine {
    /// Parse a raw line. Returns `None` for blank lines.
    ///
    /// `indent_unit` must be positive.
    pub fn parse(line_number: usize, raw: &str, indent_unit: usize) -> Option<Self> {
        let raw = raw.trim_end();
        if raw.is_empty() {
            return None;
        }

        let depth = raw.chars().take_while(|c| c.is_whitespace()).count();
        let trimmed = raw.trim_start();
        let (name, is_dir) = match trimmed.strip_suffix(DIR_MARKER) {
            Some(stripped) => (stripped, true),
            None => (trimmed, false),
        };

        Some(Self {
            line_number,
            depth,
            level: depth / indent_unit,
            name: name.to_string(),
            is_dir,
            indent_unit,
        })
    }

    /// Whether the leading whitespace is a whole number of indent units.
    pub fn is_aligned(&self) -> bool {
        self.depth % self.indent_unit == 0
    }
}

/// Iterate over the non-blank lines of `text`.
pub fn parse_lines(text: &str, indent_unit: usize) -> impl Iterator<Item = IndentedLine> + '_ {
    text.lines()
        .enumerate()
        .filter_map(move |(i, raw)| IndentedLine::parse(i + 1, raw, indent_unit))
}

/// Render one entry at `level`.
pub fn render_line(level: usize, name: &str, is_dir: bool, indent_unit: usize) -> String {
    let mut line = " ".repeat(level * indent_unit);
    line.push_str(name);
    if is_dir {
        line.push(DIR_MARKER);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directory_line() {
        let line = IndentedLine::parse(1, "    src/", 4).unwrap();
        assert_eq!(line.depth, 4);
        assert_eq!(line.level, 1);
        assert_eq!(line.name, "src");
        assert!(line.is_dir);
        assert!(line.is_aligned());
    }

    #[test]
    fn test_parse_file_line_with_trailing_whitespace() {
        let line = IndentedLine::parse(2, "main.rs  \r", 4).unwrap();
        assert_eq!(line.depth, 0);
        assert_eq!(line.name, "main.rs");
        assert!(!line.is_dir);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert!(IndentedLine::parse(1, "", 4).is_none());
        assert!(IndentedLine::parse(1, "     \t ", 4).is_none());
    }

    #[test]
    fn test_misaligned_line_is_floored() {
        let line = IndentedLine::parse(3, "   notes.txt", 4).unwrap();
        assert_eq!(line.level, 0);
        assert!(!line.is_aligned());

        let line = IndentedLine::parse(3, "       notes.txt", 4).unwrap();
        assert_eq!(line.level, 1);
        assert!(!line.is_aligned());
    }

    #[test]
    fn test_parse_lines_numbers_from_one() {
        let lines: Vec<_> = parse_lines("a/\n\n  b\n", 2).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 1);
        assert_eq!(lines[1].line_number, 3);
        assert_eq!(lines[1].level, 1);
    }

    #[test]
    fn test_render_line() {
        assert_eq!(render_line(0, "project", true, 4), "project/");
        assert_eq!(render_line(2, "main.rs", false, 4), "        main.rs");
        assert_eq!(render_line(1, "src", true, 2), "  src/");
    }
}
