use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{geom::Size, window::Window};

/// A window that counts redraw requests.
#[derive(Debug)]
pub struct RecordingWindow {
    /// Reported terminal size.
    size: Size,
    /// Number of redraw requests received.
    redraws: AtomicUsize,
}

impl RecordingWindow {
    /// Construct a window of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            redraws: AtomicUsize::new(0),
        }
    }

    /// Number of redraw requests so far.
    pub fn redraws(&self) -> usize {
        self.redraws.load(Ordering::SeqCst)
    }
}

impl Window for RecordingWindow {
    fn size(&self) -> Size {
        self.size
    }

    fn request_redraw(&self) {
        self.redraws.fetch_add(1, Ordering::SeqCst);
    }
}
