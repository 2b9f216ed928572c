//! Reference controls built on the node protocol.

/// Focusable button.
mod button;
/// Stacking containers.
mod stack;
/// Static text.
mod text;

pub use button::Button;
pub use stack::{HStack, VStack};
pub use text::Text;
