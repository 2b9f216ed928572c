//! Compositing surfaces.
//!
//! Every node owns at most one [`Layer`], created the first time the node's
//! surface is needed. Layers form their own tree that mirrors the node tree:
//! the tree binds and unbinds child layers in lockstep with its own
//! structural changes, so a layer's children are always the layers of its
//! node's children, in the same order.

use slotmap::SlotMap;

use crate::{
    geom::{Position, Rect, Size},
    id::{LayerId, NodeId},
};

/// A compositing surface.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Frame in the parent layer's coordinate space.
    frame: Rect,
    /// The node whose control draws into this layer.
    node: NodeId,
    /// Containing layer, if bound.
    parent: Option<LayerId>,
    /// Child layers, bottom-most first.
    children: Vec<LayerId>,
}

impl Layer {
    /// The frame in parent coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The node that owns this layer.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The containing layer, if any.
    pub fn parent(&self) -> Option<LayerId> {
        self.parent
    }

    /// Child layers, bottom-most first.
    pub fn children(&self) -> &[LayerId] {
        &self.children
    }
}

/// Arena holding every layer of a tree.
#[derive(Debug, Default)]
pub struct Layers {
    /// Layer storage.
    layers: SlotMap<LayerId, Layer>,
}

impl Layers {
    /// Construct an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unbound layer for `node` with an empty frame.
    pub(crate) fn create(&mut self, node: NodeId) -> LayerId {
        self.layers.insert(Layer {
            frame: Rect::default(),
            node,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Look up a layer.
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    /// Number of live layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Is the arena empty?
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Bind `child` into `parent` at position `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is greater than the number of children of `parent`, or
    /// if either layer is missing. The tree validates both before calling.
    pub(crate) fn add_layer(&mut self, parent: LayerId, child: LayerId, at: usize) {
        self.layers[parent].children.insert(at, child);
        self.layers[child].parent = Some(parent);
    }

    /// Unbind and return the child layer at position `at` of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is out of bounds.
    pub(crate) fn remove_layer(&mut self, parent: LayerId, at: usize) -> LayerId {
        let child = self.layers[parent].children.remove(at);
        self.layers[child].parent = None;
        child
    }

    /// Drop a layer from the arena. Bindings are not updated; the caller
    /// removes whole unbound subtrees at once.
    pub(crate) fn remove(&mut self, id: LayerId) {
        self.layers.remove(id);
    }

    /// Set the frame size, keeping the origin.
    pub(crate) fn set_size(&mut self, id: LayerId, size: Size) {
        if let Some(layer) = self.layers.get_mut(id) {
            layer.frame.size = size;
        }
    }

    /// Set the frame origin, keeping the size.
    pub(crate) fn set_position(&mut self, id: LayerId, position: Position) {
        if let Some(layer) = self.layers.get_mut(id) {
            layer.frame.tl = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::KeyData;

    use super::*;

    /// Fabricate a node id for layers created without a tree.
    fn nid(n: u64) -> NodeId {
        NodeId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn bind_and_unbind() {
        let mut layers = Layers::new();
        let root = layers.create(nid(1));
        let a = layers.create(nid(2));
        let b = layers.create(nid(3));
        let c = layers.create(nid(4));

        layers.add_layer(root, a, 0);
        layers.add_layer(root, b, 1);
        layers.add_layer(root, c, 1);
        assert_eq!(layers.get(root).map(|l| l.children().to_vec()), Some(vec![a, c, b]));
        assert_eq!(layers.get(c).and_then(Layer::parent), Some(root));

        let removed = layers.remove_layer(root, 0);
        assert_eq!(removed, a);
        assert_eq!(layers.get(a).and_then(Layer::parent), None);
        assert_eq!(layers.get(root).map(|l| l.children().to_vec()), Some(vec![c, b]));

        layers.remove(a);
        assert_eq!(layers.len(), 3);
    }

    #[test]
    fn frame_updates() {
        let mut layers = Layers::new();
        let l = layers.create(nid(1));
        layers.set_size(l, Size::new(3, 2));
        layers.set_position(l, Position::new(1, 1));
        assert_eq!(
            layers.get(l).map(Layer::frame),
            Some(Rect::new(Position::new(1, 1), Size::new(3, 2)))
        );
        assert_eq!(layers.get(l).map(Layer::node), Some(nid(1)));
    }
}
