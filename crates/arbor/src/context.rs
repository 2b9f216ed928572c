//! Contexts handed to controls while they run protocol methods.

use crate::{
    focus::FocusManager,
    geom::{Direction, Position, Rect, Size},
    id::NodeId,
    tree::Tree,
    window::SharedWindow,
};

/// Read-only view of the tree from the perspective of one node.
pub trait ReadContext {
    /// The node being called.
    fn node_id(&self) -> NodeId;

    /// Parent of the current node.
    fn parent(&self) -> Option<NodeId>;

    /// Children of the current node in tree order.
    fn children(&self) -> Vec<NodeId>;

    /// Position of the current node among its siblings.
    fn sibling_index(&self) -> usize;

    /// Current layer frame of a node, in its parent's coordinates.
    fn frame_of(&self, node: NodeId) -> Rect;

    /// Current layer frame of this node.
    fn frame(&self) -> Rect {
        self.frame_of(self.node_id())
    }

    /// The window resolved by walking up from the current node.
    fn window(&self) -> Option<SharedWindow>;

    /// Ask a node what size it wants for a proposal.
    fn measure(&self, node: NodeId, proposed: Size) -> Size;

    /// Depth-first search for the first selectable node under `node`.
    fn first_selectable(&self, node: NodeId) -> Option<NodeId>;

    /// Ask `node` for the neighbor of its child at `index`.
    fn neighbor(&self, node: NodeId, direction: Direction, index: usize) -> Option<NodeId>;

    /// Ask the parent for this node's neighbor, or `None` at a root.
    fn parent_neighbor(&self, direction: Direction) -> Option<NodeId> {
        let parent = self.parent()?;
        self.neighbor(parent, direction, self.sibling_index())
    }

    /// Is the current node the first responder?
    fn is_first_responder(&self) -> bool;
}

/// Mutable context available to controls during commit and input handling.
///
/// Structural mutation is deliberately absent: the tree can only be reshaped
/// from outside a traversal.
pub trait Context: ReadContext {
    /// Record the final size of the current node.
    fn set_size(&mut self, size: Size);

    /// Commit a child's final size.
    fn commit_child(&mut self, child: NodeId, size: Size);

    /// Place a child within the current node.
    fn set_child_position(&mut self, child: NodeId, position: Position);

    /// Deliver an input byte to one child.
    fn send_input(&mut self, child: NodeId, byte: u8);

    /// Deliver an input byte to every child, in order.
    fn broadcast_input(&mut self, byte: u8) {
        for child in self.children() {
            self.send_input(child, byte);
        }
    }

    /// Ask the resolved window, if any, to redraw.
    fn request_redraw(&self) {
        if let Some(window) = self.window() {
            window.request_redraw();
        }
    }
}

/// Read-only context over a shared tree borrow.
pub(crate) struct TreeViewContext<'a> {
    /// Tree being read.
    tree: &'a Tree,
    /// Node being called.
    node: NodeId,
}

impl<'a> TreeViewContext<'a> {
    /// Construct a view context for `node`.
    pub(crate) fn new(tree: &'a Tree, node: NodeId) -> Self {
        Self { tree, node }
    }
}

impl ReadContext for TreeViewContext<'_> {
    fn node_id(&self) -> NodeId {
        self.node
    }

    fn parent(&self) -> Option<NodeId> {
        self.tree.parent(self.node)
    }

    fn children(&self) -> Vec<NodeId> {
        self.tree.children(self.node).to_vec()
    }

    fn sibling_index(&self) -> usize {
        self.tree.sibling_index(self.node)
    }

    fn frame_of(&self, node: NodeId) -> Rect {
        self.tree.frame(node)
    }

    fn window(&self) -> Option<SharedWindow> {
        self.tree.root_window(self.node)
    }

    fn measure(&self, node: NodeId, proposed: Size) -> Size {
        self.tree.measure(node, proposed)
    }

    fn first_selectable(&self, node: NodeId) -> Option<NodeId> {
        self.tree.first_selectable(node)
    }

    fn neighbor(&self, node: NodeId, direction: Direction, index: usize) -> Option<NodeId> {
        self.tree.neighbor(node, direction, index)
    }

    fn is_first_responder(&self) -> bool {
        self.tree.first_responder() == Some(self.node)
    }
}

/// Mutable context over an exclusive tree borrow.
pub(crate) struct TreeContext<'a> {
    /// Tree being driven.
    tree: &'a mut Tree,
    /// Node being called.
    node: NodeId,
}

impl<'a> TreeContext<'a> {
    /// Construct a context for `node`.
    pub(crate) fn new(tree: &'a mut Tree, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// Borrow a read-only view of the same node.
    fn view(&self) -> TreeViewContext<'_> {
        TreeViewContext::new(&*self.tree, self.node)
    }

    /// Assert that `child` belongs to the current node.
    fn debug_assert_child(&self, child: NodeId) {
        debug_assert_eq!(
            self.tree.parent(child),
            Some(self.node),
            "{child:?} is not a child of {:?}",
            self.node
        );
    }
}

impl ReadContext for TreeContext<'_> {
    fn node_id(&self) -> NodeId {
        self.node
    }

    fn parent(&self) -> Option<NodeId> {
        self.view().parent()
    }

    fn children(&self) -> Vec<NodeId> {
        self.view().children()
    }

    fn sibling_index(&self) -> usize {
        self.view().sibling_index()
    }

    fn frame_of(&self, node: NodeId) -> Rect {
        self.view().frame_of(node)
    }

    fn window(&self) -> Option<SharedWindow> {
        self.view().window()
    }

    fn measure(&self, node: NodeId, proposed: Size) -> Size {
        self.view().measure(node, proposed)
    }

    fn first_selectable(&self, node: NodeId) -> Option<NodeId> {
        self.view().first_selectable(node)
    }

    fn neighbor(&self, node: NodeId, direction: Direction, index: usize) -> Option<NodeId> {
        self.view().neighbor(node, direction, index)
    }

    fn is_first_responder(&self) -> bool {
        self.view().is_first_responder()
    }
}

impl Context for TreeContext<'_> {
    fn set_size(&mut self, size: Size) {
        self.tree.set_frame_size(self.node, size);
    }

    fn commit_child(&mut self, child: NodeId, size: Size) {
        self.debug_assert_child(child);
        self.tree.commit(child, size);
    }

    fn set_child_position(&mut self, child: NodeId, position: Position) {
        self.debug_assert_child(child);
        self.tree.set_frame_position(child, position);
    }

    fn send_input(&mut self, child: NodeId, byte: u8) {
        self.debug_assert_child(child);
        self.tree.handle_input(child, byte);
    }
}
