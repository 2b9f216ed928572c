use crate::{focus::FocusManager, id::NodeId, tree::Tree};

/// Traverses a tree of nodes and returns a string showing the node names,
/// sibling indices and frames for each node. This is a debug function.
pub fn dump(tree: &Tree, root: NodeId) -> String {
    let mut out = String::new();
    dump_node(&mut out, tree, root, 0);
    out
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(out: &mut String, tree: &Tree, id: NodeId, level: usize) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let indent = "    ".repeat(level);
    let frame = tree.frame(id);
    out.push_str(&format!(
        "{indent}{} #{} [{},{} {}x{}]",
        node.name(),
        node.sibling_index(),
        frame.tl.x,
        frame.tl.y,
        frame.size.w,
        frame.size.h
    ));
    if tree.is_first_responder(id) {
        out.push_str(" FOCUSED");
    }
    if node.has_direct_window() {
        out.push_str(" window");
    }
    out.push('\n');
    for child in node.children() {
        dump_node(out, tree, *child, level + 1);
    }
}
