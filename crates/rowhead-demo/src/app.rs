#![forbid(unsafe_code)]

//! The demo window: a gutter and an editor side by side in a scroll view
//! that follows the end of the document.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rowhead_core::geometry::{Point, Rect, Size};
use rowhead_core::oracle::LayoutOracle;
use rowhead_gutter::{GutterConfig, LineNumberGutter, PaintReport};
use rowhead_render::buffer::Buffer;
use rowhead_render::canvas::{CellCanvas, CellGeometry};
use rowhead_text::TextSurface;
use tracing::{debug, info};

/// Shared handle to the editor, written by the background thread.
pub type SharedSurface = Arc<Mutex<TextSurface>>;

pub fn lock(surface: &SharedSurface) -> MutexGuard<'_, TextSurface> {
    surface.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Window composed of a gutter region and an editor region of one buffer.
#[derive(Debug)]
pub struct DemoWindow {
    surface: SharedSurface,
    gutter: LineNumberGutter,
    buffer: Buffer,
    geometry: CellGeometry,
    gutter_cols: u16,
    viewport: Size,
    frames: usize,
}

impl DemoWindow {
    /// Lay out a `window` sized view: the gutter takes its fixed width, the
    /// editor gets the rest.
    pub fn new(surface: SharedSurface, config: GutterConfig, window: Size) -> Self {
        let (gutter, geometry, viewport) = {
            let mut editor = lock(&surface);
            let metrics = editor.font_metrics();
            let geometry = CellGeometry::new(metrics.advance, metrics.line_height);
            let viewport = Size::new(window.width.saturating_sub(config.width_px), window.height);
            let gutter = LineNumberGutter::attach(editor.hub(), config, editor.height());
            editor.resize(viewport);
            (gutter, geometry, viewport)
        };

        let gutter_cols = cells(geometry.cells_for(config.width_px));
        let editor_cols = cells(geometry.cells_for(viewport.width));
        let rows = cells(geometry.rows_for(window.height));
        let buffer = Buffer::new(gutter_cols.saturating_add(editor_cols).max(1), rows.max(1));
        info!(
            cols = buffer.width(),
            rows = buffer.height(),
            gutter_cols,
            "demo window laid out"
        );

        Self {
            surface,
            gutter,
            buffer,
            geometry,
            gutter_cols,
            viewport,
            frames: 0,
        }
    }

    #[must_use]
    pub fn gutter(&self) -> &LineNumberGutter {
        &self.gutter
    }

    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[must_use]
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// One host paint cycle. Does nothing unless the gutter reported a change.
    pub fn paint_cycle(&mut self) -> Option<PaintReport> {
        if !self.gutter.needs_repaint() {
            return None;
        }
        let editor = lock(&self.surface);
        if let Some(size) = self.gutter.take_relayout() {
            debug!(width = size.width, height = size.height, "gutter relayout");
        }

        let scroll = i32::try_from(editor.height().saturating_sub(self.viewport.height)).unwrap_or(0);
        let origin = Point::new(0, scroll);
        let rows = u32::from(self.buffer.height());
        let gutter_region = Rect::new(0, 0, u32::from(self.gutter_cols), rows);
        let editor_region = Rect::new(
            i32::from(self.gutter_cols),
            0,
            u32::from(self.buffer.width().saturating_sub(self.gutter_cols)),
            rows,
        );

        let report = {
            let mut canvas = CellCanvas::new(&mut self.buffer, gutter_region, self.geometry, origin);
            self.gutter.paint_if_dirty(&*editor, &mut canvas)
        };
        let mut canvas = CellCanvas::new(&mut self.buffer, editor_region, self.geometry, origin);
        editor.render_text(&mut canvas);

        self.frames += 1;
        report
    }
}

fn cells(n: u32) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use rowhead_harness::buffer_to_text;
    use rowhead_text::WrapMode;

    use super::*;

    fn window(text: &str, size: Size) -> (SharedSurface, DemoWindow) {
        let surface = Arc::new(Mutex::new(TextSurface::new(text).with_wrap(WrapMode::Word)));
        let window = DemoWindow::new(Arc::clone(&surface), GutterConfig::default(), size);
        (surface, window)
    }

    #[test]
    fn first_frame_shows_gutter_and_text() {
        // 28 + 80 wide = 4 gutter cells and 10 editor cells; 3 rows.
        let (_surface, mut win) = window("one\ntwo", Size::new(108, 48));
        assert!(win.paint_cycle().is_some());
        assert_eq!(buffer_to_text(win.buffer()), "  1 one       \n  2 two       \n              ");
    }

    #[test]
    fn idle_cycles_do_not_paint() {
        let (_surface, mut win) = window("x", Size::new(108, 48));
        win.paint_cycle();
        assert!(win.paint_cycle().is_none());
        assert_eq!(win.frames(), 1);
    }

    #[test]
    fn view_follows_the_end_of_the_document() {
        let (surface, mut win) = window("a", Size::new(108, 32));
        win.paint_cycle();
        lock(&surface).append("\nb\nc\nd").unwrap();
        assert!(win.paint_cycle().is_some());
        assert_eq!(buffer_to_text(win.buffer()), "  3 c         \n  4 d         ");
    }
}
