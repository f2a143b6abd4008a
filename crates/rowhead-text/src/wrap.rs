#![forbid(unsafe_code)]

//! Soft-wrapping of a single logical line into visual rows.
//!
//! Widths are measured per grapheme cluster in terminal cells. Wrapping only
//! decides where rows *start*; it never alters the text.
//!
//! ```
//! use rowhead_text::wrap::{WrapMode, wrap_line};
//!
//! assert_eq!(wrap_line("hello world", 6, WrapMode::Word), vec![0, 6]);
//! assert_eq!(wrap_line("hello world", 4, WrapMode::Char), vec![0, 4, 8]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

/// Text wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// No wrapping: one visual row per logical line.
    None,
    /// Wrap at grapheme boundaries.
    Char,
    /// Wrap after whitespace, falling back to grapheme boundaries for words
    /// longer than a row.
    #[default]
    Word,
}

#[derive(Debug, Clone, Copy)]
struct Glyph {
    /// Char offset of the grapheme within the line.
    offset: usize,
    width: usize,
    whitespace: bool,
}

fn glyphs(text: &str) -> Vec<Glyph> {
    let mut offset = 0;
    text.graphemes(true)
        .map(|g| {
            let glyph = Glyph {
                offset,
                width: rowhead_render::grapheme_width(g),
                whitespace: g.chars().all(char::is_whitespace),
            };
            offset += g.chars().count();
            glyph
        })
        .collect()
}

/// Char offsets (relative to the line) at which each visual row of `text`
/// starts. The first entry is always `0`.
///
/// `text` must not contain its line terminator. A `columns` of zero means the
/// viewport has no width yet and disables wrapping. Every row holds at least
/// one grapheme, and whitespace in word mode hangs past the row edge instead
/// of starting a new row.
#[must_use]
pub fn wrap_line(text: &str, columns: usize, mode: WrapMode) -> Vec<usize> {
    let mut starts = vec![0];
    if columns == 0 || mode == WrapMode::None {
        return starts;
    }

    let glyphs = glyphs(text);
    let mut row_start = 0;
    let mut row_width = 0;
    let mut last_break: Option<usize> = None;
    let mut i = 0;

    while i < glyphs.len() {
        let glyph = glyphs[i];
        if mode == WrapMode::Word && glyph.whitespace {
            row_width += glyph.width;
            i += 1;
            last_break = Some(i);
            continue;
        }

        if row_width + glyph.width > columns && i > row_start {
            let next = match (mode, last_break) {
                (WrapMode::Word, Some(b)) if b > row_start && b <= i => b,
                _ => i,
            };
            starts.push(glyphs[next].offset);
            row_start = next;
            row_width = glyphs[next..i].iter().map(|g| g.width).sum();
            last_break = None;
            continue;
        }

        row_width += glyph.width;
        i += 1;
    }

    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_line_is_one_row() {
        assert_eq!(wrap_line("abc", 10, WrapMode::Word), vec![0]);
        assert_eq!(wrap_line("", 10, WrapMode::Char), vec![0]);
    }

    #[test]
    fn exact_fit_does_not_wrap() {
        assert_eq!(wrap_line("abcd", 4, WrapMode::Char), vec![0]);
        assert_eq!(wrap_line("abcde", 4, WrapMode::Char), vec![0, 4]);
    }

    #[test]
    fn word_mode_breaks_after_whitespace() {
        assert_eq!(wrap_line("aa bb cc", 4, WrapMode::Word), vec![0, 3, 6]);
        assert_eq!(wrap_line("aa bb cc", 5, WrapMode::Word), vec![0, 6]);
    }

    #[test]
    fn word_mode_falls_back_for_long_words() {
        assert_eq!(wrap_line("abcdefgh", 3, WrapMode::Word), vec![0, 3, 6]);
    }

    #[test]
    fn whitespace_hangs_in_word_mode() {
        assert_eq!(wrap_line("ab     ", 3, WrapMode::Word), vec![0]);
    }

    #[test]
    fn none_mode_and_zero_columns_never_wrap() {
        let long = "x".repeat(500);
        assert_eq!(wrap_line(&long, 10, WrapMode::None), vec![0]);
        assert_eq!(wrap_line(&long, 0, WrapMode::Char), vec![0]);
    }

    #[test]
    fn wide_graphemes_count_two_cells() {
        assert_eq!(wrap_line("日本語", 4, WrapMode::Char), vec![0, 2]);
    }

    #[test]
    fn single_grapheme_wider_than_row_still_progresses() {
        assert_eq!(wrap_line("日日", 1, WrapMode::Char), vec![0, 1]);
    }

    #[test]
    fn offsets_are_chars_not_graphemes() {
        // "e" + combining acute is one grapheme of two chars.
        assert_eq!(wrap_line("e\u{301}e\u{301}", 1, WrapMode::Char), vec![0, 2]);
    }
}
