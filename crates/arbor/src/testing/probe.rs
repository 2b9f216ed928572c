/*! An instrumented control that records every protocol call it receives. */
use std::cell::RefCell;

use crate::{
    cell::Cell,
    context::{Context, ReadContext},
    control::Control,
    geom::{Direction, Position, Size},
    id::NodeId,
};

thread_local! {
    /// Events recorded by probes on this thread.
    static LOG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Clear the probe log for the current thread.
pub fn reset_log() {
    LOG.with(|l| l.borrow_mut().clear());
}

/// Return a copy of the probe log for the current thread.
pub fn get_log() -> Vec<String> {
    LOG.with(|l| l.borrow().clone())
}

/// Append an entry to the probe log.
fn record(entry: String) {
    LOG.with(|l| l.borrow_mut().push(entry));
}

/// A configurable test control.
///
/// Probes record input, focus hooks and commits into a thread-local log as
/// `name@event` strings. By default a probe behaves exactly like a plain
/// node: it broadcasts input, passes proposals through and delegates
/// navigation to its parent.
#[derive(Debug, Clone)]
pub struct Probe {
    /// Name used in log entries.
    name: String,
    /// Reported selectability.
    selectable: bool,
    /// Swallow input instead of broadcasting.
    consume: bool,
    /// Fixed desired size, instead of echoing the proposal.
    desired: Option<Size>,
    /// Character drawn across the committed frame.
    fill: Option<char>,
}

impl Probe {
    /// Construct a probe with default node behavior.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selectable: false,
            consume: false,
            desired: None,
            fill: None,
        }
    }

    /// Mark the probe selectable.
    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    /// Consume input instead of broadcasting it.
    pub fn consuming(mut self) -> Self {
        self.consume = true;
        self
    }

    /// Report a fixed desired size.
    pub fn desired(mut self, size: Size) -> Self {
        self.desired = Some(size);
        self
    }

    /// Draw a character over the whole frame.
    pub fn fill(mut self, ch: char) -> Self {
        self.fill = Some(ch);
        self
    }
}

impl Control for Probe {
    fn measure(&self, proposed: Size, _ctx: &dyn ReadContext) -> Size {
        self.desired.unwrap_or(proposed)
    }

    fn commit(&mut self, size: Size, ctx: &mut dyn Context) {
        record(format!("{}@commit:{}x{}", self.name, size.w, size.h));
        ctx.set_size(size);
    }

    fn cell_at(&self, position: Position, ctx: &dyn ReadContext) -> Option<Cell> {
        let ch = self.fill?;
        ctx.frame()
            .size
            .rect()
            .contains(position)
            .then_some(Cell::new(ch))
    }

    fn handle_input(&mut self, byte: u8, ctx: &mut dyn Context) {
        record(format!("{}@input:{}", self.name, byte as char));
        if !self.consume {
            ctx.broadcast_input(byte);
        }
    }

    fn become_first_responder(&mut self, _ctx: &mut dyn Context) {
        record(format!("{}@become", self.name));
    }

    fn resign_first_responder(&mut self, _ctx: &mut dyn Context) {
        record(format!("{}@resign", self.name));
    }

    fn selectable(&self) -> bool {
        self.selectable
    }

    fn neighbor(
        &self,
        direction: Direction,
        index: usize,
        ctx: &dyn ReadContext,
    ) -> Option<NodeId> {
        record(format!("{}@neighbor:{direction:?}:{index}", self.name));
        ctx.parent_neighbor(direction)
    }
}
