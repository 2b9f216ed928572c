//! The root rendering context shared by every node in an attached tree.

use std::sync::Arc;

use crate::geom::Size;

/// The output target a tree renders into.
///
/// The tree only cares whether a window is resolvable from a node. Controls
/// use the handle to ask for a redraw or to read the terminal dimensions.
pub trait Window: Send + Sync {
    /// Current terminal dimensions.
    fn size(&self) -> Size;

    /// Ask the driver to redraw on its next pass.
    fn request_redraw(&self);
}

/// A shared handle to a window.
pub type SharedWindow = Arc<dyn Window>;

/// Do two handles point at the same window?
pub fn same_window(a: &SharedWindow, b: &SharedWindow) -> bool {
    Arc::ptr_eq(a, b)
}

