#![forbid(unsafe_code)]

//! A reference text surface.
//!
//! [`TextSurface`] stores a document in a rope, keeps a caret, soft-wraps
//! logical lines into visual rows for its viewport width, and reports every
//! change through an [`EventHub`](rowhead_core::event::EventHub). It answers the
//! [`LayoutOracle`](rowhead_core::oracle::LayoutOracle) queries a gutter needs.
//!
//! # Example
//! ```
//! use rowhead_core::geometry::Size;
//! use rowhead_core::oracle::LayoutOracle;
//! use rowhead_text::{TextSurface, WrapMode};
//!
//! let surface = TextSurface::new("a\nbb\nccc")
//!     .with_wrap(WrapMode::Char)
//!     .with_viewport(Size::new(200, 100));
//! assert_eq!(surface.document().line_count(), 3);
//! assert_eq!(surface.line_index_of(3).unwrap(), 1);
//! ```

pub mod document;
pub mod layout;
pub mod surface;
pub mod wrap;

pub use document::Document;
pub use layout::{Layout, VisualRow};
pub use surface::TextSurface;
pub use wrap::{WrapMode, wrap_line};
