//! A single terminal cell: one glyph plus its text attributes.

/// A text attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Attr {
    /// Bold text.
    Bold,
    /// Dim text.
    Dim,
    /// Italic text.
    Italic,
    /// Underlined text.
    Underline,
    /// Swapped foreground and background.
    Inverse,
}

/// A set of active text attributes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct AttrSet {
    /// Bold flag.
    pub bold: bool,
    /// Dim flag.
    pub dim: bool,
    /// Italic flag.
    pub italic: bool,
    /// Underline flag.
    pub underline: bool,
    /// Inverse flag.
    pub inverse: bool,
}

impl AttrSet {
    /// Construct a set of text attributes with a single attribute turned on.
    pub fn new(attr: Attr) -> Self {
        Self::default().with(attr)
    }

    /// Is this attribute set empty?
    pub fn is_empty(&self) -> bool {
        !(self.bold || self.dim || self.italic || self.underline || self.inverse)
    }

    /// Return a copy with the attribute turned on.
    pub fn with(mut self, attr: Attr) -> Self {
        *self.flag(attr) = true;
        self
    }

    /// Return a copy with the attribute turned off.
    pub fn without(mut self, attr: Attr) -> Self {
        *self.flag(attr) = false;
        self
    }

    /// Is the attribute set?
    pub fn has(&self, attr: Attr) -> bool {
        match attr {
            Attr::Bold => self.bold,
            Attr::Dim => self.dim,
            Attr::Italic => self.italic,
            Attr::Underline => self.underline,
            Attr::Inverse => self.inverse,
        }
    }

    /// Mutable access to the flag backing an attribute.
    fn flag(&mut self, attr: Attr) -> &mut bool {
        match attr {
            Attr::Bold => &mut self.bold,
            Attr::Dim => &mut self.dim,
            Attr::Italic => &mut self.italic,
            Attr::Underline => &mut self.underline,
            Attr::Inverse => &mut self.inverse,
        }
    }
}

/// A character and its attributes at one screen position.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Cell {
    /// Glyph.
    pub ch: char,
    /// Text attributes.
    pub attrs: AttrSet,
}

impl Cell {
    /// A plain cell with no attributes.
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            attrs: AttrSet::default(),
        }
    }

    /// Return a copy with the given attributes.
    pub fn with_attrs(mut self, attrs: AttrSet) -> Self {
        self.attrs = attrs;
        self
    }
}

impl From<char> for Cell {
    fn from(ch: char) -> Self {
        Self::new(ch)
    }
}
