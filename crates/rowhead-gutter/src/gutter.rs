#![forbid(unsafe_code)]

//! The line-number gutter component.

use std::sync::Arc;

use rowhead_core::event::{EventHub, EventKind, Subscription};
use rowhead_core::geometry::Size;
use rowhead_core::oracle::LayoutOracle;
use rowhead_render::canvas::Canvas;
use tracing::debug;

use crate::config::GutterConfig;
use crate::renderer::{GutterRenderer, PaintReport};
use crate::sync::{RepaintSignal, SyncController};

/// A line-number margin bound to one editor.
///
/// Attaching registers a listener on the editor's [`EventHub`]; dropping the
/// gutter (or calling [`detach`](Self::detach)) removes it again.
///
/// The host drives painting: after any notification [`needs_repaint`]
/// turns true, and [`paint_if_dirty`] paints once no matter how many
/// notifications arrived in between.
///
/// [`needs_repaint`]: Self::needs_repaint
/// [`paint_if_dirty`]: Self::paint_if_dirty
#[derive(Debug)]
pub struct LineNumberGutter {
    renderer: GutterRenderer,
    controller: Arc<SyncController>,
    subscription: Option<Subscription>,
}

impl LineNumberGutter {
    /// Create a gutter and subscribe it to `hub`. `editor_height` seeds the
    /// preferred height until the first resize notification.
    #[must_use]
    pub fn attach(hub: &EventHub, config: GutterConfig, editor_height: u32) -> Self {
        let controller = Arc::new(SyncController::new(config.width_px, editor_height));
        let subscription = hub.subscribe(EventKind::all(), controller.clone());
        debug!(
            listener = subscription.id(),
            width = config.width_px,
            height = editor_height,
            "gutter attached"
        );
        Self {
            renderer: GutterRenderer::new(config),
            controller,
            subscription: Some(subscription),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GutterConfig {
        self.renderer.config()
    }

    /// Fixed width by the editor's current height.
    #[must_use]
    pub fn preferred_size(&self) -> Size {
        self.controller.preferred_size()
    }

    /// Whether a notification arrived since the last paint cycle.
    #[must_use]
    pub fn needs_repaint(&self) -> bool {
        self.controller.signal().is_pending()
    }

    /// New size for the container, if the editor height changed since the
    /// last call.
    pub fn take_relayout(&self) -> Option<Size> {
        self.controller.take_relayout()
    }

    /// Shared handle to the repaint flag, for hosts that poll it elsewhere.
    #[must_use]
    pub fn repaint_signal(&self) -> Arc<RepaintSignal> {
        Arc::clone(self.controller.signal())
    }

    /// Run `wake` whenever the gutter goes from clean to dirty. It runs on
    /// the thread that delivered the notification.
    pub fn set_waker<F>(&self, wake: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.controller.signal().set_waker(wake);
    }

    /// Paint the canvas clip unconditionally, as on an expose.
    pub fn paint(&self, oracle: &dyn LayoutOracle, canvas: &mut dyn Canvas) -> PaintReport {
        self.renderer.render(oracle, canvas)
    }

    /// Paint-cycle entry point: paint if dirty and consume the request.
    pub fn paint_if_dirty(
        &self,
        oracle: &dyn LayoutOracle,
        canvas: &mut dyn Canvas,
    ) -> Option<PaintReport> {
        if !self.controller.signal().take() {
            return None;
        }
        Some(self.renderer.render(oracle, canvas))
    }

    /// Whether the gutter is still registered with a live hub.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Stop listening to the editor. Returns `true` if the gutter was still
    /// registered.
    pub fn detach(&mut self) -> bool {
        let detached = self
            .subscription
            .take()
            .is_some_and(Subscription::cancel);
        if detached {
            debug!("gutter detached");
        }
        detached
    }
}
