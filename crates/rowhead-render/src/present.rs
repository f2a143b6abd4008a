#![forbid(unsafe_code)]

//! ANSI presentation of a [`Buffer`].
//!
//! Emits SGR sequences only when foreground, background or style flags change
//! between adjacent cells, and resets styling at the end of each row.

use std::io::{self, Write};

use crossterm::QueueableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};

fn to_color(color: PackedRgba) -> Color {
    Color::Rgb {
        r: color.r(),
        g: color.g(),
        b: color.b(),
    }
}

fn queue_style<W: Write>(out: &mut W, cell: &Cell) -> io::Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    if cell.flags.contains(StyleFlags::BOLD) {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if cell.flags.contains(StyleFlags::DIM) {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    if cell.flags.contains(StyleFlags::ITALIC) {
        out.queue(SetAttribute(Attribute::Italic))?;
    }
    if cell.flags.contains(StyleFlags::UNDERLINE) {
        out.queue(SetAttribute(Attribute::Underlined))?;
    }
    if cell.flags.contains(StyleFlags::REVERSE) {
        out.queue(SetAttribute(Attribute::Reverse))?;
    }
    if cell.fg.a() > 0 && cell.fg != PackedRgba::WHITE {
        out.queue(SetForegroundColor(to_color(cell.fg)))?;
    }
    if cell.bg.a() > 0 {
        out.queue(SetBackgroundColor(to_color(cell.bg)))?;
    }
    Ok(())
}

/// Write `buffer` to `out` as lines of styled text.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_ansi<W: Write>(buffer: &Buffer, out: &mut W) -> io::Result<()> {
    for y in 0..buffer.height() {
        let mut prev: Option<(PackedRgba, PackedRgba, StyleFlags)> = None;
        for cell in buffer.row_cells(y) {
            if cell.is_continuation() {
                continue;
            }
            let style = (cell.fg, cell.bg, cell.flags);
            if prev != Some(style) {
                queue_style(out, cell)?;
                prev = Some(style);
            }
            out.queue(Print(cell.ch.unwrap_or(' ')))?;
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(ResetColor)?;
        out.queue(Print('\n'))?;
    }
    out.flush()
}
