#![forbid(unsafe_code)]

//! Core: geometry, fonts, the layout-oracle capability and editor notifications.
//!
//! Nothing in this crate knows how text is stored, laid out or painted. It only
//! describes the seams between a text surface and the components that decorate it.

pub mod event;
pub mod font;
pub mod geometry;
pub mod oracle;

pub use event::{EditorEvent, EditorListener, EventHub, EventKind, Subscription};
pub use font::{FontFamily, FontMetrics, FontSpec};
pub use geometry::{Point, Rect, Size};
pub use oracle::{LayoutError, LayoutOracle};
