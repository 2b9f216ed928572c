//! The node arena and the tree-level protocol drivers.

use std::any::Any;

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::{
    cell::Cell,
    context::{Context, TreeContext, TreeViewContext},
    control::Control,
    error::{Error, Result},
    focus::FocusManager,
    geom::{Direction, Position, Rect, Size},
    id::{LayerId, NodeId},
    layer::Layers,
    node::Node,
    window::SharedWindow,
};

/// Arena owning every node, its layer and the focus state.
///
/// The reconciler holds [`NodeId`] handles and reshapes the tree through
/// [`insert_child`](Self::insert_child) and
/// [`remove_child`](Self::remove_child). A node removed from its parent stays
/// in the arena, detached, until it is reinserted or
/// [`destroy`](Self::destroy)ed.
#[derive(Default)]
pub struct Tree {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Layer storage, mirroring the node tree.
    pub(crate) layers: Layers,
    /// Current first responder.
    pub(crate) focus: Option<NodeId>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree with a single root node that holds `window` directly.
    pub fn with_root<C>(control: C, window: SharedWindow) -> (Self, NodeId)
    where
        C: Control + 'static,
    {
        let mut tree = Self::new();
        let root = tree.add(control);
        tree.set_window(root, Some(window));
        (tree, root)
    }

    /// Create a detached node.
    pub fn add<C>(&mut self, control: C) -> NodeId
    where
        C: Control + 'static,
    {
        self.add_boxed(control.into())
    }

    /// Create a detached node from a boxed control.
    pub fn add_boxed(&mut self, control: Box<dyn Control>) -> NodeId {
        let name = control.name();
        let id = self.nodes.insert(Node::new(control));
        trace!(node = ?id, name, "add");
        id
    }

    /// Number of nodes in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the arena empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Does the arena hold this node?
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Return the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Return a node's children, or an empty slice for an unknown node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Return a node's position among its siblings. Roots report zero.
    pub fn sibling_index(&self, id: NodeId) -> usize {
        self.nodes.get(id).map_or(0, |n| n.sibling_index)
    }

    /// Borrow a node's control as a concrete type.
    pub fn control<C>(&self, id: NodeId) -> Option<&C>
    where
        C: Control + 'static,
    {
        let control = self.nodes.get(id)?.control.as_deref()?;
        (control as &dyn Any).downcast_ref::<C>()
    }

    /// Mutably borrow a node's control as a concrete type.
    pub fn control_mut<C>(&mut self, id: NodeId) -> Option<&mut C>
    where
        C: Control + 'static,
    {
        let control = self.nodes.get_mut(id)?.control.as_deref_mut()?;
        (control as &mut dyn Any).downcast_mut::<C>()
    }

    /// Return the node's layer, creating it on first access.
    ///
    /// # Panics
    ///
    /// Panics if the node does not exist.
    pub fn layer(&mut self, id: NodeId) -> LayerId {
        let Some(node) = self.nodes.get(id) else {
            panic!("{}", Error::NodeNotFound(id));
        };
        if let Some(layer) = node.layer {
            return layer;
        }
        let layer = self.layers.create(id);
        self.nodes[id].layer = Some(layer);
        layer
    }

    /// The layer arena.
    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    /// A node's layer frame. Nodes whose layer was never created report an
    /// empty frame.
    pub fn frame(&self, id: NodeId) -> Rect {
        self.nodes
            .get(id)
            .and_then(|n| n.layer)
            .and_then(|l| self.layers.get(l))
            .map(|l| l.frame())
            .unwrap_or_default()
    }

    /// Set or clear the window held directly by a node.
    pub fn set_window(&mut self, id: NodeId, window: Option<SharedWindow>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.window = window;
        }
    }

    /// Resolve the window for a node by walking up to the nearest ancestor
    /// that holds one directly.
    pub fn root_window(&self, id: NodeId) -> Option<SharedWindow> {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            if let Some(window) = &node.window {
                return Some(window.clone());
            }
            current = node.parent;
        }
        None
    }

    /// Is `ancestor` on the parent chain of `node`, or `node` itself?
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Insert `child` into `parent`'s children at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds, either node is unknown, the
    /// child is already attached or the insertion would create a cycle. These
    /// are caller bugs; clamping would corrupt sibling numbering.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) {
        if let Err(e) = self.try_insert_child(parent, child, index) {
            panic!("insert_child: {e}");
        }
    }

    /// Fallible form of [`insert_child`](Self::insert_child).
    pub fn try_insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        let Some(parent_node) = self.nodes.get(parent) else {
            return Err(Error::NodeNotFound(parent));
        };
        let len = parent_node.children.len();
        let Some(child_node) = self.nodes.get(child) else {
            return Err(Error::NodeNotFound(child));
        };
        if child_node.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        if index > len {
            return Err(Error::IndexOutOfBounds { parent, index, len });
        }

        let parent_layer = self.layer(parent);
        let child_layer = self.layer(child);

        self.nodes[parent].children.insert(index, child);
        self.layers.add_layer(parent_layer, child_layer, index);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        // Only roots hold a window; attached nodes resolve it through the parent chain.
        node.window = None;
        self.renumber_from(parent, index);

        debug!(?parent, ?child, index, "insert child");
        self.debug_assert_links(parent);
        Ok(())
    }

    /// Detach and return the child at `index` of `parent`.
    ///
    /// The removed subtree stays in the arena. It has no parent and resolves
    /// no window until it is inserted somewhere else.
    ///
    /// # Panics
    ///
    /// Panics if the parent is unknown or the index is out of bounds.
    pub fn remove_child(&mut self, parent: NodeId, index: usize) -> NodeId {
        match self.try_remove_child(parent, index) {
            Ok(child) => child,
            Err(e) => panic!("remove_child: {e}"),
        }
    }

    /// Fallible form of [`remove_child`](Self::remove_child).
    pub fn try_remove_child(&mut self, parent: NodeId, index: usize) -> Result<NodeId> {
        let Some(parent_node) = self.nodes.get(parent) else {
            return Err(Error::NodeNotFound(parent));
        };
        let len = parent_node.children.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { parent, index, len });
        }
        let child = parent_node.children[index];
        self.release_focus_within(child);

        let node = &mut self.nodes[child];
        node.window = None;
        node.parent = None;
        node.sibling_index = 0;
        self.nodes[parent].children.remove(index);
        let parent_layer = self.layer(parent);
        self.layers.remove_layer(parent_layer, index);
        self.renumber_from(parent, index);

        debug!(?parent, ?child, index, "remove child");
        self.debug_assert_links(parent);
        Ok(child)
    }

    /// Free a detached node and its whole subtree, layers included.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        let Some(node) = self.nodes.get(id) else {
            return Err(Error::NodeNotFound(id));
        };
        if node.parent.is_some() {
            return Err(Error::NotDetached(id));
        }
        self.release_focus_within(id);

        let mut stack = vec![id];
        let mut count = 0usize;
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.remove(current) else {
                continue;
            };
            if let Some(layer) = node.layer {
                self.layers.remove(layer);
            }
            stack.extend(node.children);
            count += 1;
        }
        debug!(root = ?id, count, "destroy subtree");
        Ok(())
    }

    /// Rewrite sibling indices for the children of `parent` from `start` on.
    fn renumber_from(&mut self, parent: NodeId, start: usize) {
        let children = self.nodes[parent].children.clone();
        for (i, child) in children.iter().enumerate().skip(start) {
            self.nodes[*child].sibling_index = i;
        }
    }

    /// Borrow a node's control for a read-only protocol call.
    ///
    /// # Panics
    ///
    /// Panics if the node is unknown, or if its control is already running a
    /// mutable protocol method further up the stack.
    fn control_ref(&self, id: NodeId) -> &dyn Control {
        match self.nodes.get(id) {
            Some(Node {
                control: Some(control),
                ..
            }) => control.as_ref(),
            Some(_) => panic!("control of {id:?} is in use"),
            None => panic!("{}", Error::NodeNotFound(id)),
        }
    }

    /// Run a mutable protocol method with the control taken out of its slot.
    pub(crate) fn with_control_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Control, &mut dyn Context) -> R,
    ) -> R {
        let control = match self.nodes.get_mut(id) {
            Some(node) => node.control.take(),
            None => panic!("{}", Error::NodeNotFound(id)),
        };
        let Some(mut control) = control else {
            panic!("control of {id:?} is in use");
        };
        let out = {
            let mut ctx = TreeContext::new(self, id);
            f(control.as_mut(), &mut ctx)
        };
        if let Some(node) = self.nodes.get_mut(id) {
            node.control = Some(control);
        }
        out
    }

    /// Record a node's committed size on its layer.
    pub(crate) fn set_frame_size(&mut self, id: NodeId, size: Size) {
        let layer = self.layer(id);
        self.layers.set_size(layer, size);
    }

    /// Record a node's position within its parent on its layer.
    pub(crate) fn set_frame_position(&mut self, id: NodeId, position: Position) {
        let layer = self.layer(id);
        self.layers.set_position(layer, position);
    }

    /// Ask a node what size it wants for a proposal.
    pub fn measure(&self, id: NodeId, proposed: Size) -> Size {
        self.control_ref(id)
            .measure(proposed, &TreeViewContext::new(self, id))
    }

    /// Commit a node's final size.
    pub fn commit(&mut self, id: NodeId, size: Size) {
        self.with_control_mut(id, |control, ctx| control.commit(size, ctx));
    }

    /// Lay out a root at `size`, placing it at the origin of its layer.
    pub fn layout(&mut self, id: NodeId, size: Size) {
        trace!(node = ?id, w = size.w, h = size.h, "layout");
        self.set_frame_position(id, Position::zero());
        self.commit(id, size);
    }

    /// Lay out a node at the size of its resolved window. Returns the size
    /// used, or `None` if no window is resolvable.
    pub fn layout_to_window(&mut self, id: NodeId) -> Option<Size> {
        let size = self.root_window(id)?.size();
        self.layout(id, size);
        Some(size)
    }

    /// The cell a node draws at a node-local position.
    pub fn cell_at(&self, id: NodeId, position: Position) -> Option<Cell> {
        self.control_ref(id)
            .cell_at(position, &TreeViewContext::new(self, id))
    }

    /// Resolve the visible cell at a node-local position by compositing the
    /// layer tree under `id`.
    ///
    /// Later children sit on top of earlier ones. A child is consulted only
    /// where its frame covers the position, and transparent cells fall
    /// through to whatever lies beneath.
    pub fn composite(&self, id: NodeId, position: Position) -> Option<Cell> {
        let layer = self.nodes.get(id)?.layer.and_then(|l| self.layers.get(l));
        if let Some(layer) = layer {
            for child in layer.children().iter().rev() {
                let Some(child) = self.layers.get(*child) else {
                    continue;
                };
                let frame = child.frame();
                if frame.contains(position)
                    && let Some(cell) = self.composite(child.node(), position - frame.tl)
                {
                    return Some(cell);
                }
            }
        }
        self.cell_at(id, position)
    }

    /// Deliver one input byte to a node.
    pub fn handle_input(&mut self, id: NodeId, byte: u8) {
        trace!(node = ?id, byte, "input");
        self.with_control_mut(id, |control, ctx| control.handle_input(byte, ctx));
    }

    /// Can this node take focus?
    pub fn selectable(&self, id: NodeId) -> bool {
        self.control_ref(id).selectable()
    }

    /// Depth-first search for the first selectable node in a subtree,
    /// including its root.
    pub fn first_selectable(&self, id: NodeId) -> Option<NodeId> {
        if self.selectable(id) {
            return Some(id);
        }
        self.children(id)
            .iter()
            .find_map(|child| self.first_selectable(*child))
    }

    /// Ask `id` for the selectable neighbor of its child at `index`.
    pub fn neighbor(&self, id: NodeId, direction: Direction, index: usize) -> Option<NodeId> {
        let found = self
            .control_ref(id)
            .neighbor(direction, index, &TreeViewContext::new(self, id));
        trace!(node = ?id, ?direction, index, ?found, "neighbor");
        found
    }

    /// The selectable element below the child at `index`.
    pub fn selectable_below(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.neighbor(id, Direction::Below, index)
    }

    /// The selectable element above the child at `index`.
    pub fn selectable_above(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.neighbor(id, Direction::Above, index)
    }

    /// The selectable element right of the child at `index`.
    pub fn selectable_right_of(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.neighbor(id, Direction::RightOf, index)
    }

    /// The selectable element left of the child at `index`.
    pub fn selectable_left_of(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.neighbor(id, Direction::LeftOf, index)
    }

    /// Assert the sibling numbering and layer mirroring of one parent.
    #[cfg(debug_assertions)]
    fn debug_assert_links(&self, parent: NodeId) {
        let node = &self.nodes[parent];
        let layer = node.layer.and_then(|l| self.layers.get(l));
        if let Some(layer) = layer {
            debug_assert_eq!(
                layer.children().len(),
                node.children.len(),
                "layer child count diverged under {parent:?}"
            );
        }
        for (i, child) in node.children.iter().enumerate() {
            let child_node = &self.nodes[*child];
            debug_assert_eq!(child_node.parent, Some(parent), "parent mismatch");
            debug_assert_eq!(child_node.sibling_index, i, "sibling index mismatch");
            if let Some(layer) = layer {
                debug_assert_eq!(
                    layer.children().get(i).copied(),
                    child_node.layer,
                    "layer order diverged under {parent:?}"
                );
            }
        }
    }

    #[cfg(not(debug_assertions))]
    fn debug_assert_links(&self, _parent: NodeId) {}
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{control::Group, testing::RecordingWindow};

    #[test]
    fn insert_renumbers_following_siblings() {
        let mut tree = Tree::new();
        let p = tree.add(Group);
        let a = tree.add(Group);
        let b = tree.add(Group);
        let c = tree.add(Group);
        tree.insert_child(p, a, 0);
        tree.insert_child(p, b, 1);
        tree.insert_child(p, c, 0);
        assert_eq!(tree.children(p), &[c, a, b]);
        assert_eq!(
            [c, a, b].map(|n| tree.sibling_index(n)),
            [0, 1, 2]
        );
    }

    #[test]
    fn removal_keeps_node_alive() {
        let mut tree = Tree::new();
        let p = tree.add(Group);
        let a = tree.add(Group);
        let b = tree.add(Group);
        tree.insert_child(p, a, 0);
        tree.insert_child(a, b, 0);
        assert_eq!(tree.remove_child(p, 0), a);
        assert!(tree.contains(a));
        assert!(tree.contains(b));
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.parent(b), Some(a));
        assert!(tree.children(p).is_empty());
    }

    #[test]
    fn try_insert_errors() {
        let mut tree = Tree::new();
        let p = tree.add(Group);
        let a = tree.add(Group);
        let b = tree.add(Group);
        assert_eq!(
            tree.try_insert_child(p, a, 1),
            Err(Error::IndexOutOfBounds {
                parent: p,
                index: 1,
                len: 0
            })
        );
        tree.insert_child(p, a, 0);
        assert_eq!(tree.try_insert_child(b, a, 0), Err(Error::AlreadyAttached(a)));
        assert_eq!(
            tree.try_insert_child(a, p, 0),
            Err(Error::WouldCreateCycle {
                parent: a,
                child: p
            })
        );
        assert_eq!(
            tree.try_insert_child(p, p, 0),
            Err(Error::WouldCreateCycle {
                parent: p,
                child: p
            })
        );
        assert_eq!(
            tree.try_remove_child(p, 1),
            Err(Error::IndexOutOfBounds {
                parent: p,
                index: 1,
                len: 1
            })
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn insert_past_end_panics() {
        let mut tree = Tree::new();
        let p = tree.add(Group);
        let a = tree.add(Group);
        tree.insert_child(p, a, 3);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn remove_from_empty_panics() {
        let mut tree = Tree::new();
        let p = tree.add(Group);
        tree.remove_child(p, 0);
    }

    #[test]
    fn layer_is_created_once() {
        let mut tree = Tree::new();
        let a = tree.add(Group);
        assert_eq!(tree.node(a).and_then(Node::layer), None);
        assert_eq!(tree.layers().len(), 0);
        let first = tree.layer(a);
        let second = tree.layer(a);
        assert_eq!(first, second);
        assert_eq!(tree.layers().len(), 1);
        assert_eq!(tree.layers().get(first).map(|l| l.node()), Some(a));
    }

    #[test]
    fn window_resolves_through_ancestors() {
        let window = Arc::new(RecordingWindow::new(Size::new(10, 4)));
        let (mut tree, root) = Tree::with_root(Group, window);
        let mid = tree.add(Group);
        let leaf = tree.add(Group);
        tree.insert_child(mid, leaf, 0);
        assert!(tree.root_window(leaf).is_none());

        tree.insert_child(root, mid, 0);
        assert!(tree.root_window(leaf).is_some());
        assert_eq!(tree.layout_to_window(root), Some(Size::new(10, 4)));
        assert_eq!(tree.frame(root).size, Size::new(10, 4));

        tree.remove_child(root, 0);
        assert!(tree.root_window(mid).is_none());
        assert!(tree.root_window(leaf).is_none());
        assert_eq!(tree.layout_to_window(mid), None);
    }

    #[test]
    fn destroy_requires_detached() {
        let mut tree = Tree::new();
        let p = tree.add(Group);
        let a = tree.add(Group);
        let b = tree.add(Group);
        tree.insert_child(p, a, 0);
        tree.insert_child(a, b, 0);
        assert_eq!(tree.destroy(a), Err(Error::NotDetached(a)));

        tree.remove_child(p, 0);
        tree.destroy(a).unwrap();
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.layers().len(), 1);
        assert_eq!(tree.destroy(a), Err(Error::NodeNotFound(a)));
    }

    #[test]
    fn default_commit_sets_frame() {
        let mut tree = Tree::new();
        let a = tree.add(Group);
        assert_eq!(tree.measure(a, Size::new(7, 3)), Size::new(7, 3));
        tree.commit(a, Size::new(2, 9));
        assert_eq!(tree.frame(a).size, Size::new(2, 9));
        assert_eq!(tree.cell_at(a, Position::zero()), None);
    }

    #[test]
    fn control_downcast() {
        let mut tree = Tree::new();
        let a = tree.add(Group);
        assert!(tree.control::<Group>(a).is_some());
        assert!(tree.control::<Other>(a).is_none());
        assert_eq!(tree.node(a).map(Node::name), Some("Group"));
    }

    /// A second control type for failed downcasts.
    struct Other;

    impl Control for Other {}
}
