#![forbid(unsafe_code)]

//! Line-number painting.
//!
//! # Scan
//!
//! 1. Map the clip's top and bottom edges to document offsets. A top edge
//!    that cannot be mapped, or maps past the end, starts the scan at the
//!    document start; the bottom edge clamps to `len`.
//! 2. From the start offset, visit one visual row at a time until the end
//!    offset has been passed. Rows whose first offset starts a logical line
//!    get a label; wrapped continuation rows get none.
//! 3. Step to `row_end + 1`, i.e. to the next *visual row*, never the next
//!    logical line.
//!
//! A query that fails for one row skips that row and continues one offset
//! further. An oracle that becomes unavailable ends the pass.

use std::sync::OnceLock;

use rowhead_core::font::{FontMetrics, FontSpec};
use rowhead_core::geometry::{Point, Rect};
use rowhead_core::oracle::{LayoutError, LayoutOracle};
use rowhead_render::canvas::Canvas;
use rowhead_render::cell::PackedRgba;
use tracing::{debug, warn};

use crate::config::GutterConfig;
use crate::label::format_line_number;

/// A label the renderer decided to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterLabel {
    /// Zero-based logical line.
    pub line_index: usize,
    pub text: String,
    /// Left end of the label's baseline.
    pub origin: Point,
    /// Whether the caret is on this line.
    pub current: bool,
}

/// How completely a pass rendered its clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintOutcome {
    /// Every row in range was examined.
    #[default]
    Complete,
    /// Some rows were skipped after layout failures.
    Degraded,
    /// The oracle became unavailable and the pass stopped early.
    Aborted,
}

/// Summary of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaintReport {
    /// Labels drawn.
    pub labels: usize,
    /// Rows skipped because a query failed.
    pub skipped_rows: usize,
    pub outcome: PaintOutcome,
}

impl PaintReport {
    /// Whether the frame may be missing labels and should be repainted once
    /// the surface settles.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        !matches!(self.outcome, PaintOutcome::Complete)
    }
}

/// Why a single row could not be labelled.
#[derive(Debug, Clone, Copy)]
enum RowFault {
    Layout(LayoutError),
    /// The oracle reported a row ending before it starts.
    Regressed { row_end: usize },
}

impl From<LayoutError> for RowFault {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

struct RowStep {
    label: Option<GutterLabel>,
    next: Option<usize>,
}

/// Paints line numbers for a [`LayoutOracle`].
///
/// The renderer keeps no per-document state; every pass answers from the
/// oracle's current layout. Only the label font is cached, on first use.
#[derive(Debug, Default)]
pub struct GutterRenderer {
    config: GutterConfig,
    font: OnceLock<FontSpec>,
}

impl GutterRenderer {
    #[must_use]
    pub fn new(config: GutterConfig) -> Self {
        Self {
            config,
            font: OnceLock::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GutterConfig {
        &self.config
    }

    /// Font labels are drawn with: the line-number variant of the surface
    /// font, resolved on first call.
    pub fn font_for(&self, oracle: &dyn LayoutOracle) -> FontSpec {
        *self.font.get_or_init(|| {
            let mut font = FontSpec::line_numbers(oracle.font());
            font.bold = self.config.bold;
            font
        })
    }

    fn color_of(&self, label: &GutterLabel) -> PackedRgba {
        if label.current {
            self.config.current_line_color
        } else {
            self.config.text_color
        }
    }

    /// Clear the canvas clip and paint the labels inside it.
    pub fn render(&self, oracle: &dyn LayoutOracle, canvas: &mut dyn Canvas) -> PaintReport {
        let clip = canvas.clip_bounds();

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "gutter_render",
            x = clip.x,
            y = clip.y,
            w = clip.width,
            h = clip.height
        )
        .entered();

        if clip.is_empty() {
            return PaintReport::default();
        }
        canvas.clear(clip);

        let (labels, report) = self.labels(oracle, clip);
        if labels.is_empty() {
            return report;
        }

        canvas.set_font(&self.font_for(oracle));
        let mut color = None;
        for label in &labels {
            let wanted = self.color_of(label);
            if color != Some(wanted) {
                canvas.set_color(wanted);
                color = Some(wanted);
            }
            canvas.draw_text(&label.text, label.origin);
        }
        report
    }

    /// Labels that a pass over `clip` would draw, without drawing them.
    pub fn labels(&self, oracle: &dyn LayoutOracle, clip: Rect) -> (Vec<GutterLabel>, PaintReport) {
        let mut labels = Vec::new();
        let mut report = PaintReport::default();
        if clip.is_empty() {
            return (labels, report);
        }
        if !oracle.is_available() {
            warn!("gutter paint aborted: layout is unavailable");
            report.outcome = PaintOutcome::Aborted;
            return (labels, report);
        }

        let len = oracle.len_chars();
        let start = match oracle.point_to_offset(Point::new(0, clip.top())) {
            Some(offset) if offset <= len => offset,
            mapped => {
                // A clamped start would land mid-row and miss that row's label.
                debug!(?mapped, len, "clip top unmapped, scanning from document start");
                0
            }
        };
        let end = oracle
            .point_to_offset(Point::new(0, clip.bottom()))
            .map_or(len, |offset| offset.min(len));
        let current_line = oracle.line_index_of(oracle.caret_offset()).ok();
        let metrics = oracle.font_metrics();

        let mut offset = start;
        while offset <= end {
            match self.row_at(oracle, offset, &metrics, current_line) {
                Ok(step) => {
                    labels.extend(step.label);
                    match step.next {
                        Some(next) => offset = next,
                        None => break,
                    }
                }
                Err(RowFault::Layout(err)) if !err.is_recoverable() => {
                    warn!(offset, error = %err, "gutter paint aborted");
                    report.outcome = PaintOutcome::Aborted;
                    break;
                }
                Err(fault) => {
                    match fault {
                        RowFault::Layout(err) => {
                            warn!(offset, error = %err, "skipping gutter row");
                        }
                        RowFault::Regressed { row_end } => {
                            warn!(offset, row_end, "skipping gutter row: row ends before it starts");
                        }
                    }
                    report.skipped_rows += 1;
                    offset += 1;
                }
            }
        }

        report.labels = labels.len();
        if report.outcome == PaintOutcome::Complete && report.skipped_rows > 0 {
            report.outcome = PaintOutcome::Degraded;
        }
        debug!(
            start,
            end,
            labels = report.labels,
            skipped = report.skipped_rows,
            outcome = ?report.outcome,
            "gutter pass"
        );
        (labels, report)
    }

    fn row_at(
        &self,
        oracle: &dyn LayoutOracle,
        offset: usize,
        metrics: &FontMetrics,
        current_line: Option<usize>,
    ) -> Result<RowStep, RowFault> {
        let label = if oracle.is_line_start(offset)? {
            let line_index = oracle.line_index_of(offset)?;
            let rect = oracle.offset_to_row_rect(offset)?;
            Some(GutterLabel {
                line_index,
                text: format_line_number(line_index, self.config.min_digits),
                origin: Point::new(
                    self.config.left_inset_px,
                    metrics.baseline_in(rect.y, rect.height),
                ),
                current: current_line == Some(line_index),
            })
        } else {
            None
        };

        let row_end = oracle.row_end(offset)?;
        if row_end < offset {
            return Err(RowFault::Regressed { row_end });
        }
        Ok(RowStep {
            label,
            next: row_end.checked_add(1),
        })
    }
}
