#![forbid(unsafe_code)]

//! Keeping the gutter in step with its editor.
//!
//! The [`SyncController`] listens to editor notifications and turns each one
//! into an [`Effect`]. It never paints: marking dirty only raises the
//! [`RepaintSignal`], and the thread that owns painting consumes the signal on
//! its next cycle. Any number of marks between two cycles yield one paint.
//!
//! | Notification | Effect |
//! |---|---|
//! | text inserted / removed / changed | mark dirty |
//! | caret moved | mark dirty |
//! | viewport resized / shown | resize, then mark dirty |
//! | viewport hidden / moved | none |

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use bitflags::bitflags;
use rowhead_core::event::{EditorEvent, EditorListener};
use rowhead_core::geometry::Size;
use tracing::{debug, trace};

bitflags! {
    /// What a notification requires of the gutter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Effect: u8 {
        /// Schedule a repaint.
        const MARK_DIRTY = 0b01;
        /// Recompute the preferred size.
        const RESIZE     = 0b10;
    }
}

/// Effect of `event` on the gutter.
#[must_use]
pub const fn effect_of(event: &EditorEvent) -> Effect {
    match event {
        EditorEvent::TextInserted { .. }
        | EditorEvent::TextRemoved { .. }
        | EditorEvent::TextChanged { .. }
        | EditorEvent::CaretMoved { .. } => Effect::MARK_DIRTY,
        EditorEvent::ViewportResized { .. } | EditorEvent::ViewportShown { .. } => {
            Effect::RESIZE.union(Effect::MARK_DIRTY)
        }
        EditorEvent::ViewportHidden | EditorEvent::ViewportMoved { .. } => Effect::empty(),
    }
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Coalescing "repaint pending" flag.
///
/// Safe to mark from any thread. The optional waker runs on the marking
/// thread, once per idle-to-pending transition, so a host event loop can be
/// nudged without being flooded. The waker runs outside the signal's lock and
/// may replace or clear itself.
#[derive(Default)]
pub struct RepaintSignal {
    pending: AtomicBool,
    waker: Mutex<Option<Waker>>,
}

impl fmt::Debug for RepaintSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepaintSignal")
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

impl RepaintSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a repaint. Returns `true` if this call moved the signal from
    /// idle to pending.
    pub fn mark_dirty(&self) -> bool {
        let raised = !self.pending.swap(true, Ordering::AcqRel);
        if raised {
            let waker = self
                .waker
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            if let Some(wake) = waker {
                wake();
            }
        }
        raised
    }

    /// Consume the pending request. Returns whether one was pending.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Install the callback run on each idle-to-pending transition.
    pub fn set_waker<F>(&self, wake: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.waker.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(wake));
    }

    pub fn clear_waker(&self) {
        *self.waker.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Editor listener that records the gutter's pending work.
#[derive(Debug)]
pub struct SyncController {
    signal: Arc<RepaintSignal>,
    width_px: u32,
    height_px: AtomicU32,
    relayout_pending: AtomicBool,
}

impl SyncController {
    /// Controller for a gutter `width_px` wide next to an editor
    /// `editor_height` tall.
    #[must_use]
    pub fn new(width_px: u32, editor_height: u32) -> Self {
        Self {
            signal: Arc::new(RepaintSignal::new()),
            width_px,
            height_px: AtomicU32::new(editor_height),
            relayout_pending: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn signal(&self) -> &Arc<RepaintSignal> {
        &self.signal
    }

    /// Fixed width by the editor's last reported height.
    #[must_use]
    pub fn preferred_size(&self) -> Size {
        Size::new(self.width_px, self.height_px.load(Ordering::Acquire))
    }

    /// Take the size the container should lay the gutter out at, if it changed
    /// since the last call.
    pub fn take_relayout(&self) -> Option<Size> {
        self.relayout_pending
            .swap(false, Ordering::AcqRel)
            .then(|| self.preferred_size())
    }

    fn resize(&self, editor: Size) {
        let previous = self.height_px.swap(editor.height, Ordering::AcqRel);
        if previous != editor.height {
            debug!(from = previous, to = editor.height, "gutter height follows editor");
            self.relayout_pending.store(true, Ordering::Release);
        }
    }
}

impl EditorListener for SyncController {
    fn on_event(&self, event: &EditorEvent) {
        let effect = effect_of(event);
        trace!(?event, ?effect, "gutter notified");
        if effect.contains(Effect::RESIZE) {
            if let EditorEvent::ViewportResized { size } | EditorEvent::ViewportShown { size } = event {
                self.resize(*size);
            }
        }
        if effect.contains(Effect::MARK_DIRTY) {
            self.signal.mark_dirty();
        }
    }
}
