#![forbid(unsafe_code)]

//! Paint targets.
//!
//! [`Canvas`] is the minimal graphics-context contract a decoration paints
//! through: a clip rectangle, a current font and color, and baseline-anchored
//! text. All coordinates are in the surface's device space.
//!
//! [`CellCanvas`] implements it on top of a [`Buffer`] by mapping device units
//! onto cells of a fixed pixel size. A text baseline anywhere inside a row of
//! cells lands in that row:
//!
//! ```text
//! row = (baseline_y - 1 - origin_y) / cell_height
//! col = (x - origin_x) / cell_width
//! ```

use rowhead_core::font::FontSpec;
use rowhead_core::geometry::{Point, Rect};
use unicode_segmentation::UnicodeSegmentation;

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};
use crate::grapheme_width;

/// A graphics context.
pub trait Canvas {
    /// Region that currently needs painting. Drawing outside it has no effect.
    fn clip_bounds(&self) -> Rect;

    /// Erase `rect` (intersected with the clip) to the background.
    fn clear(&mut self, rect: Rect);

    /// Font for subsequent text.
    fn set_font(&mut self, font: &FontSpec);

    /// Color for subsequent text.
    fn set_color(&mut self, color: PackedRgba);

    /// Draw `text` with its baseline's left end at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point);
}

/// Pixel size of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub cell_width_px: u32,
    pub cell_height_px: u32,
}

impl CellGeometry {
    /// Create a geometry; zero sizes are raised to one unit.
    #[must_use]
    pub const fn new(cell_width_px: u32, cell_height_px: u32) -> Self {
        Self {
            cell_width_px: if cell_width_px == 0 { 1 } else { cell_width_px },
            cell_height_px: if cell_height_px == 0 { 1 } else { cell_height_px },
        }
    }

    /// Number of whole or partial cells needed to cover `px` device units.
    #[must_use]
    pub const fn cells_for(&self, px: u32) -> u32 {
        px.div_ceil(self.cell_width_px)
    }

    /// Number of whole or partial rows needed to cover `px` device units.
    #[must_use]
    pub const fn rows_for(&self, px: u32) -> u32 {
        px.div_ceil(self.cell_height_px)
    }
}

/// A [`Canvas`] backed by a region of a [`Buffer`].
#[derive(Debug)]
pub struct CellCanvas<'a> {
    buffer: &'a mut Buffer,
    region: Rect,
    geometry: CellGeometry,
    origin: Point,
    clip: Rect,
    color: PackedRgba,
    flags: StyleFlags,
}

impl<'a> CellCanvas<'a> {
    /// Paint into `region` (in cells) of `buffer`. The region's top-left cell
    /// shows device point `origin`; the clip covers the whole region.
    pub fn new(buffer: &'a mut Buffer, region: Rect, geometry: CellGeometry, origin: Point) -> Self {
        let region = region.intersection(&buffer.bounds());
        let clip = Rect::new(
            origin.x,
            origin.y,
            region.width.saturating_mul(geometry.cell_width_px),
            region.height.saturating_mul(geometry.cell_height_px),
        );
        Self {
            buffer,
            region,
            geometry,
            origin,
            clip,
            color: PackedRgba::WHITE,
            flags: StyleFlags::empty(),
        }
    }

    /// Narrow the clip to `damage` (device units).
    #[must_use]
    pub fn with_clip(mut self, damage: Rect) -> Self {
        self.clip = self.clip.intersection(&damage);
        self
    }

    /// The cell region this canvas paints into.
    #[must_use]
    pub const fn region(&self) -> Rect {
        self.region
    }

    /// Cell rectangle (buffer coordinates) covering device rect `rect`,
    /// limited to the region.
    fn cells_covering(&self, rect: Rect) -> Rect {
        if rect.is_empty() {
            return Rect::default();
        }
        let cw = i64::from(self.geometry.cell_width_px);
        let ch = i64::from(self.geometry.cell_height_px);
        let left = (i64::from(rect.left()) - i64::from(self.origin.x)).div_euclid(cw);
        let top = (i64::from(rect.top()) - i64::from(self.origin.y)).div_euclid(ch);
        let right = (i64::from(rect.right()) - i64::from(self.origin.x) + cw - 1).div_euclid(cw);
        let bottom = (i64::from(rect.bottom()) - i64::from(self.origin.y) + ch - 1).div_euclid(ch);

        let clamp = |v: i64| v.clamp(0, i64::from(u16::MAX)) as i32;
        let (left, top, right, bottom) = (clamp(left), clamp(top), clamp(right), clamp(bottom));
        let local = Rect::new(
            left,
            top,
            right.saturating_sub(left).max(0).unsigned_abs(),
            bottom.saturating_sub(top).max(0).unsigned_abs(),
        );
        local
            .translate(self.region.x, self.region.y)
            .intersection(&self.region)
    }
}

impl Canvas for CellCanvas<'_> {
    fn clip_bounds(&self) -> Rect {
        self.clip
    }

    fn clear(&mut self, rect: Rect) {
        let area = self.cells_covering(rect.intersection(&self.clip));
        self.buffer.fill(area, Cell::default());
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.flags = if font.bold {
            StyleFlags::BOLD
        } else {
            StyleFlags::empty()
        };
    }

    fn set_color(&mut self, color: PackedRgba) {
        self.color = color;
    }

    fn draw_text(&mut self, text: &str, origin: Point) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("canvas_draw_text", x = origin.x, y = origin.y).entered();

        let cw = i64::from(self.geometry.cell_width_px);
        let ch = i64::from(self.geometry.cell_height_px);
        let row = (i64::from(origin.y) - 1 - i64::from(self.origin.y)).div_euclid(ch);
        let mut col = (i64::from(origin.x) - i64::from(self.origin.x)).div_euclid(cw);

        let allowed = self.cells_covering(self.clip);
        if allowed.is_empty() {
            return;
        }
        self.buffer.push_scissor(allowed);

        let y = i64::from(self.region.y) + row;
        for grapheme in text.graphemes(true) {
            let width = grapheme_width(grapheme);
            if width == 0 {
                continue;
            }
            let x = i64::from(self.region.x) + col;
            if let (Ok(x), Ok(y), Some(c)) = (u16::try_from(x), u16::try_from(y), grapheme.chars().next()) {
                let cell = Cell::from_char(c).with_fg(self.color).with_flags(self.flags);
                self.buffer.set_wide(x, y, cell, width);
            }
            col += width as i64;
        }

        self.buffer.pop_scissor();
    }
}
