//! The overridable node protocol.

use std::any::{Any, type_name};

use crate::{
    cell::Cell,
    context::{Context, ReadContext},
    geom::{Direction, Position, Size},
    id::NodeId,
};

/// Controls are the behavior attached to nodes in the tree arena.
///
/// Every method has a default body implementing the base node behavior, so
/// a control overrides only what it needs. Read-only protocol methods get a
/// [`ReadContext`] and cannot mutate anything; the mutable ones get a
/// [`Context`] scoped to the node being called.
pub trait Control: Any + Send {
    /// Report the size this control wants, given a proposal from its parent.
    ///
    /// Parents may probe several proposals before committing, so this must be
    /// a pure function of `proposed` and the current tree.
    fn measure(&self, proposed: Size, _ctx: &dyn ReadContext) -> Size {
        proposed
    }

    /// Accept the final size chosen by the parent.
    ///
    /// The size may differ from anything passed to or returned from
    /// [`measure`](Self::measure). Containers override this to place and
    /// commit their children; overrides must still record their own size.
    fn commit(&mut self, size: Size, ctx: &mut dyn Context) {
        ctx.set_size(size);
    }

    /// The cell drawn at a node-local position, or `None` if transparent.
    fn cell_at(&self, _position: Position, _ctx: &dyn ReadContext) -> Option<Cell> {
        None
    }

    /// Handle one input byte.
    ///
    /// The default forwards the byte to every child in order. Controls that
    /// consume input override this without calling the broadcast.
    fn handle_input(&mut self, byte: u8, ctx: &mut dyn Context) {
        ctx.broadcast_input(byte);
    }

    /// Called when this node becomes the first responder.
    fn become_first_responder(&mut self, _ctx: &mut dyn Context) {}

    /// Called when this node stops being the first responder.
    fn resign_first_responder(&mut self, _ctx: &mut dyn Context) {}

    /// Can this node take focus?
    fn selectable(&self) -> bool {
        false
    }

    /// Resolve the selectable neighbor of the child at `index`.
    ///
    /// The base node has no spatial knowledge and passes the question to its
    /// parent, substituting its own sibling index. Containers override this to
    /// answer from their own arrangement.
    fn neighbor(
        &self,
        direction: Direction,
        _index: usize,
        ctx: &dyn ReadContext,
    ) -> Option<NodeId> {
        ctx.parent_neighbor(direction)
    }

    /// Name used in logs and tree dumps.
    fn name(&self) -> &'static str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

/// Convert controls into boxed trait objects.
impl<C> From<C> for Box<dyn Control>
where
    C: Control + 'static,
{
    fn from(control: C) -> Self {
        Box::new(control)
    }
}

/// A control with no behavior beyond the defaults.
///
/// Useful as a plain grouping node.
#[derive(Debug, Default, Clone, Copy)]
pub struct Group;

impl Control for Group {}
