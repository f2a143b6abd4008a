#![forbid(unsafe_code)]

//! Editor notifications and the observer hub that delivers them.
//!
//! A text surface owns an [`EventHub`] and emits an [`EditorEvent`] for every
//! document edit, caret move and viewport change. Decorations register an
//! [`EditorListener`] and keep the returned [`Subscription`] for as long as they
//! want to be notified; dropping it deregisters the listener.
//!
//! # Threading
//!
//! Events may be emitted from any thread (for example a background task that
//! inserts text programmatically). Listeners therefore must be `Send + Sync` and
//! should do no more than record what happened; the thread that owns painting
//! picks the recorded state up on its next cycle.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use rowhead_core::event::{EditorEvent, EditorListener, EventHub, EventKind};
//!
//! struct Counter(AtomicUsize);
//!
//! impl EditorListener for Counter {
//!     fn on_event(&self, _event: &EditorEvent) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//! }
//!
//! let hub = EventHub::new();
//! let counter = Arc::new(Counter(AtomicUsize::new(0)));
//! let sub = hub.subscribe(EventKind::all(), counter.clone());
//! hub.emit(&EditorEvent::CaretMoved { offset: 3 });
//! drop(sub);
//! hub.emit(&EditorEvent::CaretMoved { offset: 4 });
//! assert_eq!(counter.0.load(Ordering::Relaxed), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use bitflags::bitflags;

use crate::geometry::{Point, Size};

bitflags! {
    /// Categories of editor notifications, used to filter subscriptions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventKind: u8 {
        /// Text inserted, removed or changed.
        const DOCUMENT = 0b001;
        /// Caret moved.
        const CARET    = 0b010;
        /// Viewport resized, moved, shown or hidden.
        const VIEWPORT = 0b100;
    }
}

/// A state change reported by a text surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// `len` characters were inserted at `offset`.
    TextInserted { offset: usize, len: usize },
    /// `len` characters starting at `offset` were removed.
    TextRemoved { offset: usize, len: usize },
    /// `len` characters starting at `offset` changed in place (replacement
    /// or attribute change).
    TextChanged { offset: usize, len: usize },
    /// The caret is now at `offset`.
    CaretMoved { offset: usize },
    /// The editor now has `size`.
    ViewportResized { size: Size },
    /// The editor became visible with `size`.
    ViewportShown { size: Size },
    /// The editor was hidden.
    ViewportHidden,
    /// The editor moved without changing size.
    ViewportMoved { origin: Point },
}

impl EditorEvent {
    /// The category this event belongs to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::TextInserted { .. } | Self::TextRemoved { .. } | Self::TextChanged { .. } => {
                EventKind::DOCUMENT
            }
            Self::CaretMoved { .. } => EventKind::CARET,
            Self::ViewportResized { .. }
            | Self::ViewportShown { .. }
            | Self::ViewportHidden
            | Self::ViewportMoved { .. } => EventKind::VIEWPORT,
        }
    }
}

/// Receiver of editor notifications.
pub trait EditorListener: Send + Sync {
    /// Called once per matching event, on the emitting thread.
    fn on_event(&self, event: &EditorEvent);
}

/// Unique identifier of a registered listener.
pub type ListenerId = u64;

struct Entry {
    id: ListenerId,
    kinds: EventKind,
    listener: Arc<dyn EditorListener>,
}

#[derive(Default)]
struct HubShared {
    next_id: AtomicU64,
    entries: Mutex<Vec<Entry>>,
}

impl HubShared {
    fn entries(&self) -> MutexGuard<'_, Vec<Entry>> {
        // A panicking listener never runs under this lock, so the list is
        // consistent even if poisoned.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }
}

/// Fan-out point for editor notifications.
///
/// Cloning a hub yields another handle to the same listener set.
#[derive(Clone, Default)]
pub struct EventHub {
    shared: Arc<HubShared>,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventHub {
    /// Create a hub with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events whose kind intersects `kinds`.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or cancelled.
    #[must_use = "dropping the subscription deregisters the listener immediately"]
    pub fn subscribe(&self, kinds: EventKind, listener: Arc<dyn EditorListener>) -> Subscription {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        self.shared.entries().push(Entry {
            id,
            kinds,
            listener,
        });
        Subscription {
            hub: Arc::downgrade(&self.shared),
            id,
            active: true,
        }
    }

    /// Deliver `event` to every interested listener, in registration order.
    ///
    /// Listeners run outside the hub's lock, so they may emit further events
    /// or drop subscriptions.
    pub fn emit(&self, event: &EditorEvent) {
        let kind = event.kind();
        let targets: Vec<Arc<dyn EditorListener>> = self
            .shared
            .entries()
            .iter()
            .filter(|entry| entry.kinds.intersects(kind))
            .map(|entry| Arc::clone(&entry.listener))
            .collect();
        for listener in targets {
            listener.on_event(event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared.entries().len()
    }
}

/// Registration handle returned by [`EventHub::subscribe`].
///
/// Dropping it deregisters the listener. A subscription that outlives its hub
/// is inert.
#[derive(Debug)]
pub struct Subscription {
    hub: Weak<HubShared>,
    id: ListenerId,
    active: bool,
}

impl Subscription {
    /// Identifier of the registered listener.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered with a live hub.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active && self.hub.strong_count() > 0
    }

    /// Deregister now. Returns `true` if the listener was still registered.
    pub fn cancel(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if !std::mem::replace(&mut self.active, false) {
            return false;
        }
        self.hub.upgrade().is_some_and(|hub| hub.remove(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<EditorEvent>>);

    impl EditorListener for Recorder {
        fn on_event(&self, event: &EditorEvent) {
            self.0.lock().unwrap().push(*event);
        }
    }

    impl Recorder {
        fn events(&self) -> Vec<EditorEvent> {
            self.0.lock().unwrap().clone()
        }
    }

    #[test]
    fn kinds_classify_events() {
        assert_eq!(
            EditorEvent::TextRemoved { offset: 0, len: 1 }.kind(),
            EventKind::DOCUMENT
        );
        assert_eq!(EditorEvent::CaretMoved { offset: 0 }.kind(), EventKind::CARET);
        assert_eq!(EditorEvent::ViewportHidden.kind(), EventKind::VIEWPORT);
    }

    #[test]
    fn filtered_subscription_only_sees_matching_kinds() {
        let hub = EventHub::new();
        let recorder = Arc::new(Recorder::default());
        let _sub = hub.subscribe(EventKind::CARET, recorder.clone());

        hub.emit(&EditorEvent::TextInserted { offset: 0, len: 2 });
        hub.emit(&EditorEvent::CaretMoved { offset: 2 });

        assert_eq!(recorder.events(), vec![EditorEvent::CaretMoved { offset: 2 }]);
    }

    #[test]
    fn dropping_subscription_deregisters() {
        let hub = EventHub::new();
        let recorder = Arc::new(Recorder::default());
        let sub = hub.subscribe(EventKind::all(), recorder.clone());
        assert_eq!(hub.listener_count(), 1);
        assert!(sub.is_active());

        drop(sub);
        assert_eq!(hub.listener_count(), 0);
        hub.emit(&EditorEvent::ViewportHidden);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn cancel_reports_whether_it_removed() {
        let hub = EventHub::new();
        let sub = hub.subscribe(EventKind::all(), Arc::new(Recorder::default()));
        assert!(sub.cancel());
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_hub_is_inert() {
        let hub = EventHub::new();
        let sub = hub.subscribe(EventKind::all(), Arc::new(Recorder::default()));
        drop(hub);
        assert!(!sub.is_active());
        assert!(!sub.cancel());
    }

    #[test]
    fn listener_may_unsubscribe_reentrantly() {
        struct SelfRemoving(Mutex<Option<Subscription>>);

        impl EditorListener for SelfRemoving {
            fn on_event(&self, _event: &EditorEvent) {
                self.0.lock().unwrap().take();
            }
        }

        let hub = EventHub::new();
        let listener = Arc::new(SelfRemoving(Mutex::new(None)));
        let sub = hub.subscribe(EventKind::all(), listener.clone());
        *listener.0.lock().unwrap() = Some(sub);

        hub.emit(&EditorEvent::ViewportHidden);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn emits_from_other_threads() {
        let hub = EventHub::new();
        let recorder = Arc::new(Recorder::default());
        let _sub = hub.subscribe(EventKind::all(), recorder.clone());

        let remote = hub.clone();
        std::thread::spawn(move || {
            remote.emit(&EditorEvent::TextInserted { offset: 0, len: 5 });
        })
        .join()
        .unwrap();

        assert_eq!(recorder.events().len(), 1);
    }
}
