//! Plain-text rendering of a tree, used by the command-line host.

use super::node::{CollapsibleState, TreeItem, ViewNode};

/// Render `nodes` and every expandable descendant as an indented outline.
///
/// Each line is `label` followed by the tooltip in parentheses when it
/// differs from the label. Collapsed nodes are expanded too.
#[must_use]
pub fn render_tree(nodes: &[ViewNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, 0, &mut out);
    }
    out
}

fn render_node(node: &ViewNode, depth: usize, out: &mut String) {
    let marker = match node.collapsible_state() {
        CollapsibleState::None => "-",
        CollapsibleState::Collapsed | CollapsibleState::Expanded => "+",
    };
    out.push_str(&"  ".repeat(depth));
    out.push_str(marker);
    out.push(' ');
    out.push_str(node.label());
    if let Some(tooltip) = node.tooltip().filter(|t| !t.is_empty() && *t != node.label()) {
        out.push_str(&format!("  ({})", tooltip));
    }
    out.push('\n');

    for child in node.children() {
        render_node(&child, depth + 1, out);
    }
}
