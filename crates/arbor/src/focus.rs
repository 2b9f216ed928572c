//! First-responder tracking and directional focus moves.

use tracing::debug;

use crate::{geom::Direction, id::NodeId, tree::Tree};

/// Trait for managing the first responder.
pub trait FocusManager {
    /// The current first responder.
    fn first_responder(&self) -> Option<NodeId>;

    /// Is the node the first responder?
    fn is_first_responder(&self, node: NodeId) -> bool {
        self.first_responder() == Some(node)
    }

    /// Change the first responder, running the resign and become hooks.
    /// Returns `true` if focus changed.
    fn set_first_responder(&mut self, node: Option<NodeId>) -> bool;

    /// Focus the first selectable node under `root`. Returns `true` if focus
    /// changed.
    fn focus_first(&mut self, root: NodeId) -> bool;

    /// Move focus to the selectable neighbor of the first responder in a
    /// direction. Returns `true` if focus moved.
    fn move_focus(&mut self, direction: Direction) -> bool;

    /// Drop focus if it lies within the subtree rooted at `root`.
    fn release_focus_within(&mut self, root: NodeId);
}

impl FocusManager for Tree {
    fn first_responder(&self) -> Option<NodeId> {
        self.focus
    }

    fn set_first_responder(&mut self, node: Option<NodeId>) -> bool {
        if self.focus == node {
            return false;
        }
        if let Some(old) = self.focus.take()
            && self.contains(old)
        {
            self.with_control_mut(old, |control, ctx| control.resign_first_responder(ctx));
        }
        let node = node.filter(|n| self.contains(*n));
        self.focus = node;
        if let Some(new) = node {
            self.with_control_mut(new, |control, ctx| control.become_first_responder(ctx));
        }
        debug!(focus = ?node, "first responder");
        true
    }

    fn focus_first(&mut self, root: NodeId) -> bool {
        match self.first_selectable(root) {
            Some(target) => self.set_first_responder(Some(target)),
            None => false,
        }
    }

    fn move_focus(&mut self, direction: Direction) -> bool {
        let Some(current) = self.focus else {
            return false;
        };
        let index = self.sibling_index(current);
        let target = self
            .neighbor(current, direction, index)
            .and_then(|n| self.first_selectable(n));
        match target {
            Some(target) if target != current => self.set_first_responder(Some(target)),
            _ => false,
        }
    }

    fn release_focus_within(&mut self, root: NodeId) {
        let Some(focus) = self.focus else {
            return;
        };
        let mut current = Some(focus);
        while let Some(id) = current {
            if id == root {
                self.set_first_responder(None);
                return;
            }
            current = self.parent(id);
        }
    }
}
