//! Arbor: the node tree under a retained-mode terminal UI.
//!
//! A [`Tree`] owns every node in an arena. Nodes carry a boxed [`Control`]
//! implementing the layout, drawing, input and selection protocols, a
//! lazily created compositing [`Layer`](layer::Layer), and a non-owning link
//! to their parent. The window a node renders into is resolved on demand
//! by walking up to the nearest ancestor that holds one.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Tree`] - The arena and the protocol drivers
//! - [`Control`] - The trait implemented by all controls
//! - [`FocusManager`] - First-responder tracking on the tree
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry value types (Size, Position, Rect, Direction)
//! - [`widgets`] - Reference controls built on the protocol

#![warn(missing_docs)]

/// Terminal cells and attributes.
pub mod cell;
/// Controls: the overridable node protocol.
pub mod control;
/// Contexts handed to controls.
pub mod context;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// First-responder management.
pub mod focus;
/// Geometry primitives.
pub mod geom;
/// Node ID types.
pub mod id;
/// Compositing layers.
pub mod layer;
/// Node data stored in the arena.
pub mod node;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
/// The node arena.
pub mod tree;
/// Reference controls.
pub mod widgets;
/// Root rendering context.
pub mod window;

pub use cell::{Attr, AttrSet, Cell};
pub use context::{Context, ReadContext};
pub use control::{Control, Group};
pub use focus::FocusManager;
pub use geom::{Direction, Position, Rect, Size};
pub use id::{LayerId, NodeId};
pub use tree::Tree;
pub use window::{SharedWindow, Window};
