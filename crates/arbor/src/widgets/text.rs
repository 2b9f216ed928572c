use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    cell::{AttrSet, Cell},
    context::ReadContext,
    control::Control,
    geom::{Position, Size},
};

/// Find the character that covers `column` in a single line of text.
///
/// Returns `None` past the end of the text and for the trailing columns of
/// a wide glyph.
pub(super) fn char_at_column(text: &str, column: u32) -> Option<char> {
    let mut x = 0u32;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0) as u32;
        if width == 0 {
            continue;
        }
        if column == x {
            return Some(ch);
        }
        if column < x + width {
            return None;
        }
        x += width;
    }
    None
}

/// A single line of static text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// Displayed text.
    text: String,
    /// Attributes applied to every cell.
    attrs: AttrSet,
}

impl Text {
    /// Construct a text control.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attrs: AttrSet::default(),
        }
    }

    /// Apply attributes to the whole text.
    pub fn with_attrs(mut self, attrs: AttrSet) -> Self {
        self.attrs = attrs;
        self
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the displayed text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Control for Text {
    fn measure(&self, proposed: Size, _ctx: &dyn ReadContext) -> Size {
        let width = self.text.width() as u32;
        let height = u32::from(width > 0);
        Size::new(width, height).clamp_to(proposed)
    }

    fn cell_at(&self, position: Position, _ctx: &dyn ReadContext) -> Option<Cell> {
        if position.y != 0 {
            return None;
        }
        char_at_column(&self.text, position.x).map(|ch| Cell::new(ch).with_attrs(self.attrs))
    }
}
