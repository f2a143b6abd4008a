#![forbid(unsafe_code)]

//! A canvas that records what was painted.

use rowhead_core::font::FontSpec;
use rowhead_core::geometry::{Point, Rect};
use rowhead_render::canvas::Canvas;
use rowhead_render::cell::PackedRgba;

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear(Rect),
    SetFont(FontSpec),
    SetColor(PackedRgba),
    Text { text: String, origin: Point },
}

/// A text draw together with the state it was drawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnText {
    pub text: String,
    pub origin: Point,
    pub color: PackedRgba,
    pub font: Option<FontSpec>,
}

/// [`Canvas`] that stores every call instead of rasterizing.
///
/// Text outside the clip is still recorded; use [`RecordingCanvas::texts`]
/// to inspect what the painter asked for, or
/// [`RecordingCanvas::visible_texts`] for draws whose baseline falls inside
/// the clip.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    clip: Rect,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new(clip: Rect) -> Self {
        Self {
            clip,
            ops: Vec::new(),
        }
    }

    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded calls, keeping the clip.
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    pub fn set_clip(&mut self, clip: Rect) {
        self.clip = clip;
    }

    /// Text draws in call order, with the color and font active at the time.
    #[must_use]
    pub fn texts(&self) -> Vec<DrawnText> {
        let mut color = PackedRgba::WHITE;
        let mut font = None;
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::SetColor(c) => color = *c,
                DrawOp::SetFont(f) => font = Some(*f),
                DrawOp::Text { text, origin } => out.push(DrawnText {
                    text: text.clone(),
                    origin: *origin,
                    color,
                    font,
                }),
                DrawOp::Clear(_) => {}
            }
        }
        out
    }

    /// Text draws whose baseline lies inside the clip.
    #[must_use]
    pub fn visible_texts(&self) -> Vec<DrawnText> {
        let clip = self.clip;
        self.texts()
            .into_iter()
            .filter(|t| t.origin.y > clip.top() && t.origin.y <= clip.bottom())
            .collect()
    }

    /// Just the strings drawn, in order.
    #[must_use]
    pub fn text_strings(&self) -> Vec<String> {
        self.texts().into_iter().map(|t| t.text).collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clip_bounds(&self) -> Rect {
        self.clip
    }

    fn clear(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clear(rect));
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.ops.push(DrawOp::SetFont(*font));
    }

    fn set_color(&mut self, color: PackedRgba) {
        self.ops.push(DrawOp::SetColor(color));
    }

    fn draw_text(&mut self, text: &str, origin: Point) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texts_carry_active_state() {
        let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 10, 32));
        canvas.draw_text("a", Point::new(0, 12));
        canvas.set_color(PackedRgba::RED);
        canvas.set_font(&FontSpec::default().bold());
        canvas.draw_text("b", Point::new(0, 28));
        canvas.draw_text("c", Point::new(0, 60));

        let texts = canvas.texts();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0].color, PackedRgba::WHITE);
        assert_eq!(texts[0].font, None);
        assert_eq!(texts[1].color, PackedRgba::RED);
        assert!(texts[1].font.is_some_and(|f| f.bold));
        assert_eq!(canvas.visible_texts().len(), 2);
        assert_eq!(canvas.text_strings(), vec!["a", "b", "c"]);
    }
}
