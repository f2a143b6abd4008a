#![forbid(unsafe_code)]

//! The editable text surface.
//!
//! Every mutator re-lays the document out and then reports what changed
//! through the surface's [`EventHub`]. Edits that grow or shrink the laid-out
//! height additionally report a [`EditorEvent::ViewportResized`], the way a
//! text component inside a scroll container grows with its content.

use std::ops::Range;

use rowhead_core::event::{EditorEvent, EventHub};
use rowhead_core::font::{FontMetrics, FontSpec};
use rowhead_core::geometry::{Point, Rect, Size};
use rowhead_core::oracle::{LayoutError, LayoutOracle};
use rowhead_render::canvas::Canvas;
use rowhead_render::cell::PackedRgba;
use unicode_segmentation::UnicodeSegmentation;

use crate::document::Document;
use crate::layout::{Layout, VisualRow};
use crate::wrap::WrapMode;

/// A document with a caret, laid out for a viewport.
#[derive(Debug)]
pub struct TextSurface {
    document: Document,
    caret: usize,
    font: FontSpec,
    metrics: FontMetrics,
    wrap: WrapMode,
    viewport: Size,
    origin: Point,
    visible: bool,
    closed: bool,
    layout: Layout,
    hub: EventHub,
}

impl TextSurface {
    /// Create a surface holding `text` with the caret at offset 0 and an
    /// unsized viewport.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let font = FontSpec::default();
        let mut surface = Self {
            document: Document::new(text),
            caret: 0,
            font,
            metrics: FontMetrics::for_size(font.size_px),
            wrap: WrapMode::default(),
            viewport: Size::ZERO,
            origin: Point::ZERO,
            visible: true,
            closed: false,
            layout: Layout::default(),
            hub: EventHub::new(),
        };
        surface.relayout();
        surface
    }

    #[must_use]
    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self.relayout();
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self.relayout();
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self.metrics = FontMetrics::for_size(font.size_px);
        self.relayout();
        self
    }

    /// Notification hub for this surface.
    #[inline]
    #[must_use]
    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    #[inline]
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    #[must_use]
    pub const fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// Size the surface occupies: viewport width by laid-out height.
    #[must_use]
    pub fn editor_size(&self) -> Size {
        Size::new(self.viewport.width, self.content_height())
    }

    fn content_height(&self) -> u32 {
        let rows = u32::try_from(self.layout.row_count()).unwrap_or(u32::MAX);
        rows.saturating_mul(self.metrics.line_height)
            .max(self.viewport.height)
    }

    fn columns(&self) -> usize {
        (self.viewport.width / self.metrics.advance.max(1)) as usize
    }

    /// Rebuild the layout; returns whether the laid-out height changed.
    fn relayout(&mut self) -> bool {
        let before = self.content_height();
        self.layout = Layout::build(&self.document, self.columns(), self.wrap);
        before != self.content_height()
    }

    fn emit(&self, event: EditorEvent) {
        tracing::trace!(?event, "surface event");
        self.hub.emit(&event);
    }

    fn emit_resize_if(&self, changed: bool) {
        if changed {
            self.emit(EditorEvent::ViewportResized {
                size: self.editor_size(),
            });
        }
    }

    fn ensure_open(&self) -> Result<(), LayoutError> {
        if self.closed {
            Err(LayoutError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn move_caret(&mut self, caret: usize) {
        if caret != self.caret {
            self.caret = caret;
            self.emit(EditorEvent::CaretMoved { offset: caret });
        }
    }

    /// Insert `text` at `offset`. A caret at or after `offset` moves with the
    /// inserted text.
    ///
    /// # Errors
    ///
    /// [`LayoutError::InvalidOffset`] past the end of the document, or
    /// [`LayoutError::Unavailable`] once the surface is closed.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), LayoutError> {
        self.ensure_open()?;
        let len = self.document.insert(offset, text)?;
        if len == 0 {
            return Ok(());
        }
        let resized = self.relayout();
        self.emit(EditorEvent::TextInserted { offset, len });
        if self.caret >= offset {
            self.move_caret(self.caret + len);
        }
        self.emit_resize_if(resized);
        Ok(())
    }

    /// Append `text` at the end of the document.
    ///
    /// # Errors
    ///
    /// [`LayoutError::Unavailable`] once the surface is closed.
    pub fn append(&mut self, text: &str) -> Result<(), LayoutError> {
        self.insert(self.document.len_chars(), text)
    }

    /// Remove the chars in `range`. A caret inside the range collapses to its
    /// start; a caret after it shifts back.
    ///
    /// # Errors
    ///
    /// [`LayoutError::InvalidOffset`] for a range outside the document, or
    /// [`LayoutError::Unavailable`] once the surface is closed.
    pub fn remove(&mut self, range: Range<usize>) -> Result<(), LayoutError> {
        self.ensure_open()?;
        let Range { start, end } = range;
        self.document.remove(start..end)?;
        let len = end - start;
        if len == 0 {
            return Ok(());
        }
        let resized = self.relayout();
        self.emit(EditorEvent::TextRemoved { offset: start, len });
        if self.caret >= end {
            self.move_caret(self.caret - len);
        } else if self.caret > start {
            self.move_caret(start);
        }
        self.emit_resize_if(resized);
        Ok(())
    }

    /// Replace the chars in `range` with `text`, reported as one change.
    ///
    /// # Errors
    ///
    /// Same as [`TextSurface::remove`].
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), LayoutError> {
        self.ensure_open()?;
        let Range { start, end } = range;
        self.document.remove(start..end)?;
        let inserted = self.document.insert(start, text)?;
        let resized = self.relayout();
        self.emit(EditorEvent::TextChanged {
            offset: start,
            len: inserted.max(end - start),
        });
        let len = self.document.len_chars();
        if self.caret > len {
            self.move_caret(len);
        }
        self.emit_resize_if(resized);
        Ok(())
    }

    /// Replace the whole document and put the caret at its end.
    ///
    /// # Errors
    ///
    /// [`LayoutError::Unavailable`] once the surface is closed.
    pub fn set_text(&mut self, text: &str) -> Result<(), LayoutError> {
        self.ensure_open()?;
        let old_len = self.document.len_chars();
        self.document = Document::new(text);
        let resized = self.relayout();
        if old_len > 0 {
            self.emit(EditorEvent::TextRemoved {
                offset: 0,
                len: old_len,
            });
        }
        let len = self.document.len_chars();
        if len > 0 {
            self.emit(EditorEvent::TextInserted { offset: 0, len });
        }
        self.move_caret(len);
        self.emit_resize_if(resized);
        Ok(())
    }

    /// Move the caret, clamped to the document.
    pub fn set_caret(&mut self, offset: usize) {
        if self.closed {
            return;
        }
        self.move_caret(offset.min(self.document.len_chars()));
    }

    /// Resize the viewport. Nothing is reported when the size is unchanged.
    pub fn resize(&mut self, viewport: Size) {
        if self.closed || viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.relayout();
        self.emit(EditorEvent::ViewportResized {
            size: self.editor_size(),
        });
    }

    /// Make the surface visible.
    pub fn show(&mut self) {
        if self.closed || self.visible {
            return;
        }
        self.visible = true;
        self.emit(EditorEvent::ViewportShown {
            size: self.editor_size(),
        });
    }

    pub fn hide(&mut self) {
        if self.closed || !self.visible {
            return;
        }
        self.visible = false;
        self.emit(EditorEvent::ViewportHidden);
    }

    /// Move the surface inside its container without resizing it.
    pub fn move_to(&mut self, origin: Point) {
        if self.closed || origin == self.origin {
            return;
        }
        self.origin = origin;
        self.emit(EditorEvent::ViewportMoved { origin });
    }

    /// Change the text font. Reported as an attribute change over the whole
    /// document.
    pub fn set_font(&mut self, font: FontSpec) {
        if self.closed || font == self.font {
            return;
        }
        self.font = font;
        self.metrics = FontMetrics::for_size(font.size_px);
        let resized = self.relayout();
        self.emit(EditorEvent::TextChanged {
            offset: 0,
            len: self.document.len_chars(),
        });
        self.emit_resize_if(resized);
    }

    /// Change the wrap mode. Reported like [`TextSurface::set_font`].
    pub fn set_wrap(&mut self, wrap: WrapMode) {
        if self.closed || wrap == self.wrap {
            return;
        }
        self.wrap = wrap;
        let resized = self.relayout();
        self.emit(EditorEvent::TextChanged {
            offset: 0,
            len: self.document.len_chars(),
        });
        self.emit_resize_if(resized);
    }

    /// Tear the surface down. Every later oracle query fails with
    /// [`LayoutError::Unavailable`].
    pub fn close(&mut self) {
        if !self.closed {
            tracing::debug!(len = self.document.len_chars(), "text surface closed");
            self.closed = true;
        }
    }

    fn row_top(&self, index: usize) -> i32 {
        let top = (index as u64).saturating_mul(u64::from(self.metrics.line_height));
        i32::try_from(top).unwrap_or(i32::MAX)
    }

    fn row_text(&self, row: &VisualRow) -> String {
        self.document.slice(row.start..row.end).unwrap_or_default()
    }

    /// Paint the rows intersecting the canvas clip.
    pub fn render_text(&self, canvas: &mut dyn Canvas) {
        if self.closed {
            return;
        }
        let clip = canvas.clip_bounds();
        if clip.is_empty() {
            return;
        }
        let lh = i64::from(self.metrics.line_height.max(1));
        let first = (i64::from(clip.top()).max(0) / lh) as usize;
        let last = ((i64::from(clip.bottom()).max(0) + lh - 1) / lh) as usize;

        canvas.clear(clip);
        canvas.set_font(&self.font);
        canvas.set_color(PackedRgba::WHITE);
        for (index, row) in self
            .layout
            .rows()
            .iter()
            .enumerate()
            .take(last)
            .skip(first)
        {
            let baseline = self
                .metrics
                .baseline_in(self.row_top(index), self.metrics.line_height);
            canvas.draw_text(&self.row_text(row), Point::new(0, baseline));
        }
    }
}

impl LayoutOracle for TextSurface {
    fn point_to_offset(&self, point: Point) -> Option<usize> {
        if self.closed {
            return None;
        }
        let rows = self.layout.row_count();
        let lh = i64::from(self.metrics.line_height.max(1));
        let index = (i64::from(point.y).max(0) / lh) as usize;
        let row = self.layout.row(index.min(rows.checked_sub(1)?))?;

        let target = (point.x.max(0) as u32 / self.metrics.advance.max(1)) as usize;
        let text = self.row_text(row);
        let mut column = 0;
        let mut offset = row.start;
        for grapheme in text.graphemes(true) {
            let width = rowhead_render::grapheme_width(grapheme);
            if column + width > target {
                break;
            }
            column += width;
            offset += grapheme.chars().count();
        }
        Some(offset.min(row.end))
    }

    fn offset_to_row_rect(&self, offset: usize) -> Result<Rect, LayoutError> {
        self.ensure_open()?;
        let index = self.layout.row_index_of(offset)?;
        Ok(Rect::new(
            0,
            self.row_top(index),
            self.viewport.width,
            self.metrics.line_height,
        ))
    }

    fn row_end(&self, offset: usize) -> Result<usize, LayoutError> {
        self.ensure_open()?;
        Ok(self.layout.row_of(offset)?.last_offset())
    }

    fn line_index_of(&self, offset: usize) -> Result<usize, LayoutError> {
        self.ensure_open()?;
        self.document.char_to_line(offset)
    }

    fn is_line_start(&self, offset: usize) -> Result<bool, LayoutError> {
        self.ensure_open()?;
        let line = self.document.char_to_line(offset)?;
        Ok(self.document.line_to_char(line)? == offset)
    }

    fn caret_offset(&self) -> usize {
        self.caret
    }

    fn len_chars(&self) -> usize {
        self.document.len_chars()
    }

    fn height(&self) -> u32 {
        self.content_height()
    }

    fn font(&self) -> FontSpec {
        self.font
    }

    fn font_metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn is_available(&self) -> bool {
        !self.closed
    }
}
