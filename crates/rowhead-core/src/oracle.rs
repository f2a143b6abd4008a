#![forbid(unsafe_code)]

//! The layout-oracle capability.
//!
//! A [`LayoutOracle`] is anything that can translate between document offsets,
//! logical lines and the rectangles of laid-out visual rows. Components that
//! decorate a text surface (gutters, rulers, minimaps) query it and never touch
//! the surface's storage or layout engine directly.
//!
//! # Offsets
//!
//! Offsets are character indices into the document. Valid offsets are
//! `0..=len_chars()`: the end position belongs to the last logical line, so an
//! empty document still has one line at offset 0.

use std::fmt;

use crate::font::{FontMetrics, FontSpec};
use crate::geometry::{Point, Rect};

/// Failure of a single oracle query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The offset lies outside `0..=len`, usually because the document changed
    /// between two queries.
    InvalidOffset { offset: usize, len: usize },
    /// The surface has been torn down or has no layout to answer from.
    Unavailable,
}

impl LayoutError {
    /// Whether later queries in the same pass can still succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidOffset { .. })
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOffset { offset, len } => {
                write!(f, "offset {offset} outside document of length {len}")
            }
            Self::Unavailable => write!(f, "layout is unavailable"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Read-only view of a text surface's layout.
///
/// Every method answers from the surface's *current* state; nothing here is
/// cached by callers across notifications.
pub trait LayoutOracle {
    /// Map a point in the surface's coordinate space to the closest document
    /// offset. Points above or below the laid-out text clamp to the first or
    /// last row. `None` means the surface cannot answer at all.
    fn point_to_offset(&self, point: Point) -> Option<usize>;

    /// Rectangle of the visual row containing `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOffset`] when `offset > len_chars()`.
    fn offset_to_row_rect(&self, offset: usize) -> Result<Rect, LayoutError>;

    /// Last offset (inclusive) of the visual row containing `offset`.
    ///
    /// For a row that ends its logical line this is the position of the line
    /// terminator, or `len_chars()` for the last line, so `row_end + 1` is
    /// always the start of the next visual row.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOffset`] when `offset > len_chars()`.
    fn row_end(&self, offset: usize) -> Result<usize, LayoutError>;

    /// Zero-based index of the logical line containing `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOffset`] when `offset > len_chars()`.
    fn line_index_of(&self, offset: usize) -> Result<usize, LayoutError>;

    /// Whether `offset` is the first offset of its logical line.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOffset`] when `offset > len_chars()`.
    fn is_line_start(&self, offset: usize) -> Result<bool, LayoutError>;

    /// Current caret offset. May be stale relative to the document.
    fn caret_offset(&self) -> usize;

    /// Document length in characters.
    fn len_chars(&self) -> usize;

    /// Current height of the surface.
    fn height(&self) -> u32;

    /// Font the surface renders text with.
    fn font(&self) -> FontSpec;

    /// Metrics of [`LayoutOracle::font`].
    fn font_metrics(&self) -> FontMetrics;

    /// `false` once the surface has been torn down.
    fn is_available(&self) -> bool {
        true
    }
}

impl<T: LayoutOracle + ?Sized> LayoutOracle for &T {
    fn point_to_offset(&self, point: Point) -> Option<usize> {
        (**self).point_to_offset(point)
    }

    fn offset_to_row_rect(&self, offset: usize) -> Result<Rect, LayoutError> {
        (**self).offset_to_row_rect(offset)
    }

    fn row_end(&self, offset: usize) -> Result<usize, LayoutError> {
        (**self).row_end(offset)
    }

    fn line_index_of(&self, offset: usize) -> Result<usize, LayoutError> {
        (**self).line_index_of(offset)
    }

    fn is_line_start(&self, offset: usize) -> Result<bool, LayoutError> {
        (**self).is_line_start(offset)
    }

    fn caret_offset(&self) -> usize {
        (**self).caret_offset()
    }

    fn len_chars(&self) -> usize {
        (**self).len_chars()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn font(&self) -> FontSpec {
        (**self).font()
    }

    fn font_metrics(&self) -> FontMetrics {
        (**self).font_metrics()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
