use crate::{
    control::Control,
    id::{LayerId, NodeId},
    window::SharedWindow,
};

/// Core node data stored in the arena.
pub struct Node {
    /// Control behavior and state. Empty only while the control is running a
    /// mutable protocol method.
    pub(crate) control: Option<Box<dyn Control>>,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in the arena tree, in visual order.
    pub(crate) children: Vec<NodeId>,
    /// Position of this node in its parent's children.
    pub(crate) sibling_index: usize,

    /// Compositing surface, created on first use.
    pub(crate) layer: Option<LayerId>,
    /// Directly held window. Most nodes resolve theirs through an ancestor.
    pub(crate) window: Option<SharedWindow>,
}

impl Node {
    /// Construct a detached node around a control.
    pub(crate) fn new(control: Box<dyn Control>) -> Self {
        Self {
            control: Some(control),
            parent: None,
            children: Vec::new(),
            sibling_index: 0,
            layer: None,
            window: None,
        }
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return this node's position among its siblings.
    pub fn sibling_index(&self) -> usize {
        self.sibling_index
    }

    /// Return the node's layer if it has been created.
    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    /// Does this node hold a window directly?
    pub fn has_direct_window(&self) -> bool {
        self.window.is_some()
    }

    /// Return the control's name, or a placeholder while it is in use.
    pub fn name(&self) -> &'static str {
        self.control.as_ref().map_or("<in use>", |c| c.name())
    }
}
