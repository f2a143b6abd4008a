#![forbid(unsafe_code)]

//! Render targets: a cell grid, the [`Canvas`](canvas::Canvas) paint trait and
//! an ANSI presenter.

pub mod buffer;
pub mod canvas;
pub mod cell;
pub mod present;

pub use buffer::Buffer;
pub use canvas::{Canvas, CellCanvas, CellGeometry};
pub use cell::{Cell, PackedRgba, StyleFlags};

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a single grapheme cluster in cells.
#[inline]
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_ascii() {
        return usize::from(grapheme.bytes().all(|b| !b.is_ascii_control()));
    }
    UnicodeWidthStr::width(grapheme)
}

/// Display width of `text` in cells.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_width).sum()
}
