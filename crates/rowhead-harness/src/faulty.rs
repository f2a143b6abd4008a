#![forbid(unsafe_code)]

//! Fault injection for layout oracles.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use rowhead_core::font::{FontMetrics, FontSpec};
use rowhead_core::geometry::{Point, Rect};
use rowhead_core::oracle::{LayoutError, LayoutOracle};

/// Wraps an oracle and makes chosen queries fail.
///
/// - [`fail_at`](Self::fail_at): every per-offset query at that offset
///   returns [`LayoutError::InvalidOffset`], as if the document shrank
///   between two queries.
/// - [`regress_at`](Self::regress_at): `row_end` at that offset reports a
///   position before the offset.
/// - [`unavailable_after`](Self::unavailable_after): after that many
///   per-offset queries the oracle behaves as torn down.
/// - [`with_caret`](Self::with_caret): report a fixed (possibly stale) caret.
/// - [`map_points_to`](Self::map_points_to): answer every point query with a
///   fixed mapping, including offsets past the document end.
#[derive(Debug)]
pub struct FaultyOracle<O> {
    inner: O,
    failing: HashSet<usize>,
    regressing: HashSet<usize>,
    unavailable_after: Option<usize>,
    caret: Option<usize>,
    points: Option<Option<usize>>,
    calls: AtomicUsize,
}

impl<O: LayoutOracle> FaultyOracle<O> {
    #[must_use]
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            failing: HashSet::new(),
            regressing: HashSet::new(),
            unavailable_after: None,
            caret: None,
            points: None,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn fail_at(mut self, offset: usize) -> Self {
        self.failing.insert(offset);
        self
    }

    #[must_use]
    pub fn regress_at(mut self, offset: usize) -> Self {
        self.regressing.insert(offset);
        self
    }

    #[must_use]
    pub fn unavailable_after(mut self, calls: usize) -> Self {
        self.unavailable_after = Some(calls);
        self
    }

    #[must_use]
    pub fn with_caret(mut self, offset: usize) -> Self {
        self.caret = Some(offset);
        self
    }

    #[must_use]
    pub fn map_points_to(mut self, mapped: Option<usize>) -> Self {
        self.points = Some(mapped);
        self
    }

    /// Per-offset queries answered or refused so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    fn torn_down(&self) -> bool {
        self.unavailable_after
            .is_some_and(|limit| self.calls.load(Ordering::Relaxed) >= limit)
    }

    fn check(&self, offset: usize) -> Result<(), LayoutError> {
        if self.torn_down() {
            return Err(LayoutError::Unavailable);
        }
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.failing.contains(&offset) {
            return Err(LayoutError::InvalidOffset {
                offset,
                len: self.inner.len_chars(),
            });
        }
        Ok(())
    }
}

impl<O: LayoutOracle> LayoutOracle for FaultyOracle<O> {
    fn point_to_offset(&self, point: Point) -> Option<usize> {
        if self.torn_down() {
            return None;
        }
        match self.points {
            Some(mapped) => mapped,
            None => self.inner.point_to_offset(point),
        }
    }

    fn offset_to_row_rect(&self, offset: usize) -> Result<Rect, LayoutError> {
        self.check(offset)?;
        self.inner.offset_to_row_rect(offset)
    }

    fn row_end(&self, offset: usize) -> Result<usize, LayoutError> {
        self.check(offset)?;
        if self.regressing.contains(&offset) {
            return Ok(offset.saturating_sub(1));
        }
        self.inner.row_end(offset)
    }

    fn line_index_of(&self, offset: usize) -> Result<usize, LayoutError> {
        self.check(offset)?;
        self.inner.line_index_of(offset)
    }

    fn is_line_start(&self, offset: usize) -> Result<bool, LayoutError> {
        self.check(offset)?;
        self.inner.is_line_start(offset)
    }

    fn caret_offset(&self) -> usize {
        self.caret.unwrap_or_else(|| self.inner.caret_offset())
    }

    fn len_chars(&self) -> usize {
        self.inner.len_chars()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn font(&self) -> FontSpec {
        self.inner.font()
    }

    fn font_metrics(&self) -> FontMetrics {
        self.inner.font_metrics()
    }

    fn is_available(&self) -> bool {
        !self.torn_down() && self.inner.is_available()
    }
}
