use unicode_width::UnicodeWidthStr;

use super::text::char_at_column;
use crate::{
    cell::{Attr, AttrSet, Cell},
    context::{Context, ReadContext},
    control::Control,
    geom::{Position, Size},
};

/// A focusable label that counts activations.
///
/// While it is the first responder the button renders inverted, and a
/// carriage return or space activates it. It never forwards input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Label text.
    label: String,
    /// Is this button the first responder?
    focused: bool,
    /// Number of times the button was activated.
    activations: usize,
}

impl Button {
    /// Construct a button.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            focused: false,
            activations: 0,
        }
    }

    /// The label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Is the button currently focused?
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// How many times has the button been activated?
    pub fn activations(&self) -> usize {
        self.activations
    }
}

impl Control for Button {
    fn measure(&self, proposed: Size, _ctx: &dyn ReadContext) -> Size {
        Size::new(self.label.width() as u32, 1).clamp_to(proposed)
    }

    fn cell_at(&self, position: Position, _ctx: &dyn ReadContext) -> Option<Cell> {
        if position.y != 0 {
            return None;
        }
        let attrs = if self.focused {
            AttrSet::new(Attr::Inverse)
        } else {
            AttrSet::default()
        };
        char_at_column(&self.label, position.x).map(|ch| Cell::new(ch).with_attrs(attrs))
    }

    fn handle_input(&mut self, byte: u8, ctx: &mut dyn Context) {
        if self.focused && matches!(byte, b'\r' | b' ') {
            self.activations += 1;
            ctx.request_redraw();
        }
    }

    fn become_first_responder(&mut self, ctx: &mut dyn Context) {
        self.focused = true;
        ctx.request_redraw();
    }

    fn resign_first_responder(&mut self, ctx: &mut dyn Context) {
        self.focused = false;
        ctx.request_redraw();
    }

    fn selectable(&self) -> bool {
        true
    }
}
