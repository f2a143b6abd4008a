#![forbid(unsafe_code)]

//! Test support for rowhead crates.
//!
//! - **Buffer text**: render a [`Buffer`] as plain rows and diff it against
//!   expected rows.
//! - **[`RecordingCanvas`]**: a [`Canvas`](rowhead_render::canvas::Canvas)
//!   that records every call for assertions on labels, colors and clipping.
//! - **[`FaultyOracle`]**: wraps a layout oracle and injects failures at
//!   chosen offsets, or turns unavailable after a number of queries.

pub mod faulty;
pub mod recording;

use std::fmt::Write as FmtWrite;

use rowhead_render::buffer::Buffer;

pub use faulty::FaultyOracle;
pub use recording::{DrawOp, DrawnText, RecordingCanvas};

/// Convert a `Buffer` to a plain text string.
///
/// Each row becomes one line. Empty cells become spaces and continuation
/// cells are skipped, so wide characters keep their display width.
#[must_use]
pub fn buffer_to_text(buf: &Buffer) -> String {
    let capacity = (buf.width() as usize + 1) * buf.height() as usize;
    let mut out = String::with_capacity(capacity);
    for y in 0..buf.height() {
        if y > 0 {
            out.push('\n');
        }
        out.push_str(&buf.row_text(y));
    }
    out
}

/// Line diff between `expected` and `actual`.
///
/// Lines prefixed with ` ` match, `-` appear only in `expected` and `+` only
/// in `actual`. Returns an empty string when the inputs are identical.
#[must_use]
pub fn diff_text(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let mut out = String::new();
    let mut has_diff = false;
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        // Writing to a String cannot fail.
        let _ = match (expected_lines.get(i), actual_lines.get(i)) {
            (Some(e), Some(a)) if e == a => writeln!(out, " {e}"),
            (Some(e), Some(a)) => {
                has_diff = true;
                writeln!(out, "-{e}\n+{a}")
            }
            (Some(e), None) => {
                has_diff = true;
                writeln!(out, "-{e}")
            }
            (None, Some(a)) => {
                has_diff = true;
                writeln!(out, "+{a}")
            }
            (None, None) => Ok(()),
        };
    }

    if has_diff { out } else { String::new() }
}

/// Assert that `buf` renders to exactly `expected` rows.
///
/// # Panics
///
/// Panics with a line diff when the buffer differs.
#[track_caller]
pub fn assert_buffer_rows(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_to_text(buf);
    let expected = expected.join("\n");
    let diff = diff_text(&expected, &actual);
    assert!(diff.is_empty(), "buffer mismatch:\n{diff}");
}
