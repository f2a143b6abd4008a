#![forbid(unsafe_code)]

//! Font description and metrics.

/// Broad font family classes a surface can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    /// Fixed-advance font. Line numbers are always drawn with one.
    #[default]
    Monospace,
    /// Variable-advance font.
    Proportional,
}

/// A requested font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub family: FontFamily,
    pub bold: bool,
    /// Nominal size in device units.
    pub size_px: u16,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: FontFamily::Monospace,
            bold: false,
            size_px: 12,
        }
    }
}

impl FontSpec {
    /// Create a regular-weight font.
    #[must_use]
    pub const fn new(family: FontFamily, size_px: u16) -> Self {
        Self {
            family,
            bold: false,
            size_px,
        }
    }

    /// Same font, bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// The font used for line numbers next to an editor using `editor_font`:
    /// bold monospace at the editor's size, so numbers line up with text rows.
    #[must_use]
    pub const fn line_numbers(editor_font: FontSpec) -> Self {
        Self {
            family: FontFamily::Monospace,
            bold: true,
            size_px: editor_font.size_px,
        }
    }
}

/// Vertical and horizontal metrics of a font, in device units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascent: u32,
    /// Distance from the baseline to the bottom of the lowest glyph.
    pub descent: u32,
    /// Height of one visual row.
    pub line_height: u32,
    /// Advance of one narrow cell.
    pub advance: u32,
}

impl FontMetrics {
    /// Monospace metrics derived from a nominal pixel size.
    ///
    /// `ascent + descent == line_height` and the advance is roughly 0.6em,
    /// never below one unit.
    #[must_use]
    pub const fn for_size(size_px: u16) -> Self {
        let size = if size_px == 0 { 1 } else { size_px as u32 };
        let line_height = size + size.div_ceil(3);
        let descent = line_height / 4;
        let advance = (size * 3 + 4) / 5;
        Self {
            ascent: line_height - descent,
            descent,
            line_height,
            advance: if advance == 0 { 1 } else { advance },
        }
    }

    /// Baseline y-coordinate for a row whose top edge is `row_top` and whose
    /// height is `row_height`.
    #[inline]
    #[must_use]
    pub const fn baseline_in(&self, row_top: i32, row_height: u32) -> i32 {
        let bottom = row_top as i64 + row_height as i64 - self.descent as i64;
        if bottom > i32::MAX as i64 {
            i32::MAX
        } else if bottom < i32::MIN as i64 {
            i32::MIN
        } else {
            bottom as i32
        }
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::for_size(FontSpec::default().size_px)
    }
}
