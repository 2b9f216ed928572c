use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a node stored in the tree arena.
    pub struct NodeId;

    /// Opaque identifier for a compositing layer.
    pub struct LayerId;
}
