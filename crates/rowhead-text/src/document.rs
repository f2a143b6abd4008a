#![forbid(unsafe_code)]

//! Rope-backed document with a char-offset line index.
//!
//! Lines are terminated by `\n` (a preceding `\r` is treated as part of the
//! terminator). The document always has at least one line: an empty document
//! and a document ending in `\n` both end with an empty last line.

use std::ops::Range;

use ropey::Rope;
use rowhead_core::oracle::LayoutError;

/// Text storage.
#[derive(Debug, Clone, Default)]
pub struct Document {
    rope: Rope,
}

impl Document {
    /// Create a document holding `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Length in chars.
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whether the document holds no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of logical lines, never zero.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn check_offset(&self, offset: usize) -> Result<(), LayoutError> {
        let len = self.len_chars();
        if offset > len {
            Err(LayoutError::InvalidOffset { offset, len })
        } else {
            Ok(())
        }
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), LayoutError> {
        self.check_offset(range.end)?;
        if range.start > range.end {
            return Err(LayoutError::InvalidOffset {
                offset: range.start,
                len: self.len_chars(),
            });
        }
        Ok(())
    }

    /// Logical line containing `offset` (`offset == len` is on the last line).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOffset`] past the end of the document.
    pub fn char_to_line(&self, offset: usize) -> Result<usize, LayoutError> {
        self.check_offset(offset)?;
        Ok(self.rope.char_to_line(offset))
    }

    /// First offset of `line`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOffset`] if the line does not exist; the
    /// reported offset is the line index.
    pub fn line_to_char(&self, line: usize) -> Result<usize, LayoutError> {
        if line >= self.line_count() {
            return Err(LayoutError::InvalidOffset {
                offset: line,
                len: self.len_chars(),
            });
        }
        Ok(self.rope.line_to_char(line))
    }

    /// Text of `line` without its terminator, or `None` if the line does not
    /// exist.
    #[must_use]
    pub fn line_content(&self, line: usize) -> Option<String> {
        if line >= self.line_count() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Some(text)
    }

    /// Text in `range`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOffset`] for a range outside the document.
    pub fn slice(&self, range: Range<usize>) -> Result<String, LayoutError> {
        self.check_range(&range)?;
        Ok(self.rope.slice(range).to_string())
    }

    /// Full text.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Insert `text` at `offset`; returns the number of chars inserted.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOffset`] past the end of the document.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<usize, LayoutError> {
        self.check_offset(offset)?;
        self.rope.insert(offset, text);
        Ok(text.chars().count())
    }

    /// Remove the chars in `range`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOffset`] for a range outside the document.
    pub fn remove(&mut self, range: Range<usize>) -> Result<(), LayoutError> {
        self.check_range(&range)?;
        self.rope.remove(range);
        Ok(())
    }
}
