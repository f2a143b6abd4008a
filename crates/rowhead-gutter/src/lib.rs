#![forbid(unsafe_code)]

//! Line-number gutter for rowhead text surfaces.
//!
//! The gutter shows the logical line number next to the first visual row of
//! every line, skips rows produced by soft wrapping, and highlights the line
//! holding the caret. It talks to its editor only through a
//! [`LayoutOracle`](rowhead_core::oracle::LayoutOracle) and the editor's
//! [`EventHub`](rowhead_core::event::EventHub).
//!
//! - [`renderer`]: the scan that turns a clip rectangle into labels.
//! - [`sync`]: notification handling and repaint coalescing.
//! - [`gutter`]: [`LineNumberGutter`], the component a host embeds.
//!
//! # Example
//!
//! ```
//! use rowhead_core::geometry::{Rect, Size};
//! use rowhead_gutter::{GutterConfig, LineNumberGutter};
//! use rowhead_harness::RecordingCanvas;
//! use rowhead_text::TextSurface;
//!
//! let mut surface = TextSurface::new("a\nbb\nccc").with_viewport(Size::new(200, 48));
//! let gutter = LineNumberGutter::attach(surface.hub(), GutterConfig::default(), 48);
//!
//! surface.set_caret(3);
//! assert!(gutter.needs_repaint());
//!
//! let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 28, 48));
//! let report = gutter.paint_if_dirty(&surface, &mut canvas).unwrap();
//! assert_eq!(report.labels, 3);
//! assert_eq!(canvas.text_strings(), vec!["  1", "  2", "  3"]);
//! ```

pub mod config;
pub mod gutter;
pub mod label;
pub mod renderer;
pub mod sync;

pub use config::{ConfigError, ConfigParse, GutterConfig};
pub use gutter::LineNumberGutter;
pub use label::format_line_number;
pub use renderer::{GutterLabel, GutterRenderer, PaintOutcome, PaintReport};
pub use sync::{Effect, RepaintSignal, SyncController, effect_of};
