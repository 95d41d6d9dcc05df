//! Node tree to structure text.

use dirscribe_core::{Node, render_line};

/// Render a tree as structure lines, root first at level 0.
pub fn encode(root: &Node, indent_unit: usize) -> Vec<String> {
    let mut lines = Vec::new();
    encode_node(root, 0, indent_unit, &mut lines);
    lines
}

/// Render a tree as newline-terminated structure text.
pub fn encode_to_string(root: &Node, indent_unit: usize) -> String {
    let mut text = String::new();
    for line in encode(root, indent_unit) {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

fn encode_node(node: &Node, level: usize, indent_unit: usize, lines: &mut Vec<String>) {
    lines.push(render_line(level, &node.name, node.is_dir(), indent_unit));
    for child in &node.children {
        encode_node(child, level + 1, indent_unit, lines);
    }
}
