#![forbid(unsafe_code)]

//! Visual row layout of a [`Document`].

use rowhead_core::oracle::LayoutError;

use crate::document::Document;
use crate::wrap::{WrapMode, wrap_line};

/// One laid-out visual row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualRow {
    /// Logical line the row belongs to.
    pub line: usize,
    /// First char offset of the row.
    pub start: usize,
    /// End of the row's visible text (exclusive, never includes a terminator).
    pub end: usize,
    /// Start of the following row. For the final row of the document this is
    /// `len + 1`, so `next_start - 1` is always the row's inclusive end.
    pub next_start: usize,
}

impl VisualRow {
    /// Whether this row starts its logical line.
    #[inline]
    #[must_use]
    pub const fn is_line_start(&self, line_start: usize) -> bool {
        self.start == line_start
    }

    /// Inclusive last offset covered by the row.
    #[inline]
    #[must_use]
    pub const fn last_offset(&self) -> usize {
        self.next_start - 1
    }
}

/// All visual rows of a document for a given width.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    rows: Vec<VisualRow>,
    len_chars: usize,
    columns: usize,
    mode: WrapMode,
}

impl Layout {
    /// Lay out `document` into rows at most `columns` cells wide.
    #[must_use]
    pub fn build(document: &Document, columns: usize, mode: WrapMode) -> Self {
        let len = document.len_chars();
        let line_count = document.line_count();
        let mut rows = Vec::with_capacity(line_count);

        for line in 0..line_count {
            let Ok(line_start) = document.line_to_char(line) else {
                break;
            };
            let content = document.line_content(line).unwrap_or_default();
            let content_len = content.chars().count();
            let line_next = if line + 1 < line_count {
                document.line_to_char(line + 1).unwrap_or(len + 1)
            } else {
                len + 1
            };

            let starts = wrap_line(&content, columns, mode);
            for (i, &rel) in starts.iter().enumerate() {
                let start = line_start + rel;
                let (end, next_start) = match starts.get(i + 1) {
                    Some(&next) => (line_start + next, line_start + next),
                    None => (line_start + content_len, line_next),
                };
                rows.push(VisualRow {
                    line,
                    start,
                    end,
                    next_start,
                });
            }
        }

        tracing::trace!(rows = rows.len(), lines = line_count, columns, "layout built");
        Self {
            rows,
            len_chars: len,
            columns,
            mode,
        }
    }

    /// Rows in document order.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[VisualRow] {
        &self.rows
    }

    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&VisualRow> {
        self.rows.get(index)
    }

    /// Column limit the layout was built for (zero when unwrapped).
    #[inline]
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> WrapMode {
        self.mode
    }

    /// Index of the row containing `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOffset`] when `offset` is past the end of
    /// the document the layout was built from.
    pub fn row_index_of(&self, offset: usize) -> Result<usize, LayoutError> {
        if offset > self.len_chars || self.rows.is_empty() {
            return Err(LayoutError::InvalidOffset {
                offset,
                len: self.len_chars,
            });
        }
        let after = self.rows.partition_point(|row| row.start <= offset);
        Ok(after.saturating_sub(1))
    }

    /// Row containing `offset`.
    ///
    /// # Errors
    ///
    /// See [`Layout::row_index_of`].
    pub fn row_of(&self, offset: usize) -> Result<&VisualRow, LayoutError> {
        let index = self.row_index_of(offset)?;
        self.rows.get(index).ok_or(LayoutError::InvalidOffset {
            offset,
            len: self.len_chars,
        })
    }

    /// Index of the first row of logical line `line`.
    #[must_use]
    pub fn first_row_of_line(&self, line: usize) -> Option<usize> {
        let index = self.rows.partition_point(|row| row.line < line);
        (self.rows.get(index)?.line == line).then_some(index)
    }
}
