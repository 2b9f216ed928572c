//! Integration tests for tree mutation, layer mirroring and window resolution.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arbor::{
        Group, NodeId, SharedWindow, Size, Tree,
        dump::dump,
        testing::{Probe, RecordingWindow, assert_tree_invariants, init_logging},
        window::same_window,
    };
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Build a tree rooted at a node holding a fresh window.
    fn rooted() -> (Tree, NodeId, SharedWindow) {
        let window: SharedWindow = Arc::new(RecordingWindow::new(Size::new(40, 10)));
        let (tree, root) = Tree::with_root(Probe::new("r"), Arc::clone(&window));
        (tree, root, window)
    }

    /// Collect a subtree in pre-order, including its root.
    fn subtree(tree: &Tree, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(tree.children(id).iter().rev());
        }
        out
    }

    /// Sibling indices of a node's children, in order.
    fn indices(tree: &Tree, parent: NodeId) -> Vec<usize> {
        tree.children(parent)
            .iter()
            .map(|c| tree.sibling_index(*c))
            .collect()
    }

    /// Does the node resolve to exactly this window?
    fn resolves_to(tree: &Tree, node: NodeId, window: &SharedWindow) -> bool {
        tree.root_window(node)
            .is_some_and(|w| same_window(&w, window))
    }

    #[test]
    fn insert_and_remove_scenario() {
        init_logging();
        let (mut tree, r, window) = rooted();
        let a = tree.add(Probe::new("a"));
        let b = tree.add(Probe::new("b"));
        let c = tree.add(Probe::new("c"));
        let d = tree.add(Probe::new("d"));
        let e = tree.add(Probe::new("e"));
        tree.insert_child(r, a, 0);
        tree.insert_child(r, b, 1);
        tree.insert_child(b, c, 0);
        tree.insert_child(b, d, 1);

        tree.insert_child(b, e, 1);
        assert_eq!(tree.children(b), &[c, e, d]);
        assert_eq!(indices(&tree, b), vec![0, 1, 2]);
        assert_tree_invariants(&tree, r);

        assert_eq!(tree.remove_child(b, 0), c);
        assert_eq!(tree.children(b), &[e, d]);
        assert_eq!(indices(&tree, b), vec![0, 1]);
        assert_tree_invariants(&tree, r);

        assert!(tree.root_window(c).is_none());
        assert!(tree.parent(c).is_none());
        assert!(resolves_to(&tree, e, &window));
        assert!(resolves_to(&tree, d, &window));
        assert!(resolves_to(&tree, a, &window));
    }

    #[test]
    fn layers_mirror_children() {
        let (mut tree, r, _) = rooted();
        let kids: Vec<NodeId> = (0..4).map(|i| tree.add(Probe::new(format!("k{i}")))).collect();
        tree.insert_child(r, kids[0], 0);
        tree.insert_child(r, kids[1], 0);
        tree.insert_child(r, kids[2], 1);
        tree.insert_child(kids[2], kids[3], 0);

        let r_layer = tree.layer(r);
        let expected: Vec<_> = tree
            .children(r)
            .iter()
            .filter_map(|c| tree.node(*c).and_then(|n| n.layer()))
            .collect();
        assert_eq!(
            tree.layers().get(r_layer).map(|l| l.children().to_vec()),
            Some(expected)
        );

        let removed = tree.remove_child(r, 1);
        assert_eq!(removed, kids[2]);
        assert_tree_invariants(&tree, r);
        assert_tree_invariants(&tree, removed);
        let removed_layer = tree.layer(removed);
        assert_eq!(tree.layers().get(removed_layer).and_then(|l| l.parent()), None);
        assert_eq!(
            tree.layers().get(removed_layer).map(|l| l.children().len()),
            Some(1)
        );
    }

    #[test]
    fn detached_subtree_rejoins_elsewhere() {
        let (mut tree, r, window) = rooted();
        let x = tree.add(Probe::new("x"));
        let y = tree.add(Probe::new("y"));
        let deep = tree.add(Probe::new("deep"));
        tree.insert_child(r, x, 0);
        tree.insert_child(r, y, 1);
        tree.insert_child(y, deep, 0);

        let moved = tree.remove_child(r, 1);
        assert!(tree.root_window(deep).is_none());
        assert_eq!(tree.sibling_index(x), 0);

        tree.insert_child(x, moved, 0);
        assert!(resolves_to(&tree, deep, &window));
        assert_eq!(tree.parent(moved), Some(x));
        assert_tree_invariants(&tree, r);
    }

    #[test]
    fn subtree_built_detached_inherits_on_attach() {
        let (mut tree, r, window) = rooted();
        let top = tree.add(Group);
        let mid = tree.add(Group);
        let leaf = tree.add(Group);
        tree.insert_child(top, mid, 0);
        tree.insert_child(mid, leaf, 0);
        for n in [top, mid, leaf] {
            assert!(tree.root_window(n).is_none());
        }
        tree.insert_child(r, top, 0);
        for n in [top, mid, leaf] {
            assert!(resolves_to(&tree, n, &window));
        }
    }

    #[test]
    fn late_grandchild_loses_window_with_its_parent() {
        let (mut tree, r, window) = rooted();
        let a = tree.add(Group);
        let b = tree.add(Group);
        tree.insert_child(r, a, 0);
        tree.insert_child(a, b, 0);
        assert!(resolves_to(&tree, b, &window));
        assert!(!tree.node(b).is_some_and(|n| n.has_direct_window()));

        let detached = tree.remove_child(r, 0);
        assert_eq!(detached, a);
        assert!(tree.root_window(a).is_none());
        assert!(tree.root_window(b).is_none());
    }

    #[test]
    fn reattached_subtree_follows_new_root() {
        let (mut tree, r, _) = rooted();
        let a = tree.add(Group);
        let b = tree.add(Group);
        tree.insert_child(r, a, 0);
        tree.insert_child(a, b, 0);
        tree.remove_child(r, 0);

        let other: SharedWindow = Arc::new(RecordingWindow::new(Size::new(9, 9)));
        let r2 = tree.add(Group);
        tree.set_window(r2, Some(Arc::clone(&other)));
        tree.insert_child(r2, a, 0);
        assert!(resolves_to(&tree, a, &other));
        assert!(resolves_to(&tree, b, &other));
        assert_eq!(tree.root_window(b).map(|w| w.size()), Some(Size::new(9, 9)));
    }

    #[test]
    fn inserted_root_drops_its_own_window() {
        let (mut tree, r, window) = rooted();
        let inner_window: SharedWindow = Arc::new(RecordingWindow::new(Size::new(2, 2)));
        let inner = tree.add(Group);
        tree.set_window(inner, Some(Arc::clone(&inner_window)));
        assert!(resolves_to(&tree, inner, &inner_window));
        tree.insert_child(r, inner, 0);
        assert!(resolves_to(&tree, inner, &window));
    }

    #[test]
    fn destroyed_nodes_free_layers() {
        let (mut tree, r, _) = rooted();
        let a = tree.add(Group);
        let b = tree.add(Group);
        tree.insert_child(r, a, 0);
        tree.insert_child(a, b, 0);
        assert_eq!(tree.layers().len(), 3);
        let a = tree.remove_child(r, 0);
        tree.destroy(a).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.layers().len(), 1);
        assert!(tree.children(r).is_empty());
        assert_tree_invariants(&tree, r);
    }

    #[test]
    fn dump_marks_window_holder() {
        let (mut tree, r, _) = rooted();
        let a = tree.add(Group);
        tree.insert_child(r, a, 0);
        assert_eq!(
            dump(&tree, r),
            "Probe #0 [0,0 0x0] window\n    Group #0 [0,0 0x0]\n"
        );
    }

    /// One randomized mutation: insert or remove, with selectors reduced
    /// modulo whatever is valid at the time.
    fn mutation() -> impl Strategy<Value = (bool, usize, usize)> {
        (any::<bool>(), any::<usize>(), any::<usize>())
    }

    proptest! {
        #[test]
        fn invariants_hold_under_random_mutation(ops in prop::collection::vec(mutation(), 1..64)) {
            let (mut tree, root, window) = rooted();
            let mut attached = vec![root];
            for (insert, a, b) in ops {
                if insert || attached.len() == 1 {
                    let parent = attached[a % attached.len()];
                    let index = b % (tree.children(parent).len() + 1);
                    let child = tree.add(Group);
                    tree.insert_child(parent, child, index);
                    attached.push(child);
                } else {
                    let parents: Vec<NodeId> = attached
                        .iter()
                        .copied()
                        .filter(|n| !tree.children(*n).is_empty())
                        .collect();
                    let parent = parents[a % parents.len()];
                    let index = b % tree.children(parent).len();
                    let removed = tree.remove_child(parent, index);
                    let gone = subtree(&tree, removed);
                    for n in &gone {
                        prop_assert!(tree.root_window(*n).is_none());
                    }
                    prop_assert!(tree.parent(removed).is_none());
                    attached.retain(|n| !gone.contains(n));
                }
                assert_tree_invariants(&tree, root);
                for n in &attached {
                    prop_assert!(resolves_to(&tree, *n, &window));
                }
            }
        }
    }
}
