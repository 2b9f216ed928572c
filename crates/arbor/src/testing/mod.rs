//! Test utilities: instrumented controls, a recording window and tree checks.

/// Instrumented probe control.
mod probe;
/// Redraw-counting window.
mod window;

pub use probe::{Probe, get_log, reset_log};
pub use window::RecordingWindow;

use tracing::{Level, trace};

use crate::{focus::FocusManager, geom::Position, id::NodeId, tree::Tree};

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_logging() {
    if let Err(e) = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::TRACE)
        .try_init()
    {
        trace!("subscriber already installed: {e}");
    }
}

/// Composite the frame of `root` into text lines, one per row. Transparent
/// cells render as spaces.
pub fn render_lines(tree: &Tree, root: NodeId) -> Vec<String> {
    let size = tree.frame(root).size;
    (0..size.h)
        .map(|y| {
            (0..size.w)
                .map(|x| {
                    tree.composite(root, Position::new(x, y))
                        .map_or(' ', |c| c.ch)
                })
                .collect()
        })
        .collect()
}

/// Check every structural invariant for the subtree under `root`.
///
/// Verifies parent links, sibling numbering, layer mirroring and that the
/// first responder, if any, is a live node.
///
/// # Panics
///
/// Panics with a description of the first violation found.
pub fn assert_tree_invariants(tree: &Tree, root: NodeId) {
    if let Some(focus) = tree.first_responder() {
        assert!(tree.contains(focus), "first responder {focus:?} is gone");
    }
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = tree.node(id) else {
            panic!("missing node {id:?}");
        };
        let layer_children = node
            .layer()
            .and_then(|l| tree.layers().get(l))
            .map(|l| l.children().to_vec())
            .unwrap_or_default();
        assert_eq!(
            layer_children.len(),
            node.children().len(),
            "layer children diverge under {id:?}"
        );
        for (i, child) in node.children().iter().enumerate() {
            let Some(child_node) = tree.node(*child) else {
                panic!("missing child {child:?}");
            };
            assert_eq!(child_node.parent(), Some(id), "parent of {child:?}");
            assert_eq!(child_node.sibling_index(), i, "sibling index of {child:?}");
            assert_eq!(
                child_node.layer(),
                Some(layer_children[i]),
                "layer of {child:?} at {i}"
            );
            let bound = tree
                .layers()
                .get(layer_children[i])
                .and_then(|l| l.parent());
            assert_eq!(bound, node.layer(), "layer parent of {child:?}");
            stack.push(*child);
        }
    }
}
