#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Render spans enabled:
//!   cargo test -p rowhead-gutter --features tracing --test tracing_tests
//!
//! Without the feature only events are emitted:
//!   cargo test -p rowhead-gutter --test tracing_tests

use std::sync::{Arc, Mutex};

use rowhead_core::geometry::{Rect, Size};
use rowhead_gutter::{GutterConfig, LineNumberGutter};
use rowhead_harness::{FaultyOracle, RecordingCanvas};
use rowhead_text::TextSurface;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct Captured {
    name: String,
    fields: Vec<(String, String)>,
}

#[derive(Default, Clone)]
struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            name: event.metadata().level().to_string(),
            fields: visitor.0,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

fn message(event: &Captured) -> Option<&str> {
    event
        .fields
        .iter()
        .find(|(k, _)| k == "message")
        .map(|(_, v)| v.as_str())
}

#[test]
#[cfg(feature = "tracing")]
fn render_pass_opens_a_span_with_clip_fields() {
    let surface = TextSurface::new("a\nb").with_viewport(Size::new(200, 32));
    let gutter = LineNumberGutter::attach(surface.hub(), GutterConfig::default(), 32);
    let captured = capture(|| {
        let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 28, 32));
        gutter.paint(&surface, &mut canvas);
    });

    let spans = captured.spans.lock().unwrap();
    let render = spans
        .iter()
        .find(|s| s.name == "gutter_render")
        .expect("gutter_render span");
    let h = render.fields.iter().find(|(k, _)| k == "h").map(|(_, v)| v.as_str());
    assert_eq!(h, Some("32"));
}

#[test]
fn skipped_rows_are_warned() {
    let surface = TextSurface::new("a\nbb\nccc").with_viewport(Size::new(200, 48));
    let oracle = FaultyOracle::new(surface).fail_at(2);
    let gutter = LineNumberGutter::attach(oracle.inner().hub(), GutterConfig::default(), 48);
    let captured = capture(|| {
        let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 28, 48));
        gutter.paint(&oracle, &mut canvas);
    });

    let events = captured.events.lock().unwrap();
    let warnings: Vec<&Captured> = events.iter().filter(|e| e.name == "WARN").collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(message(warnings[0]), Some("skipping gutter row"));
    assert!(warnings[0].fields.iter().any(|(k, v)| k == "offset" && v == "2"));
}

#[test]
fn aborted_pass_is_warned() {
    let mut surface = TextSurface::new("a").with_viewport(Size::new(200, 16));
    let gutter = LineNumberGutter::attach(surface.hub(), GutterConfig::default(), 16);
    surface.close();
    let captured = capture(|| {
        let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 28, 16));
        gutter.paint(&surface, &mut canvas);
    });

    let events = captured.events.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| e.name == "WARN" && message(e) == Some("gutter paint aborted: layout is unavailable")));
}

#[test]
fn no_render_span_without_feature() {
    let surface = TextSurface::new("a").with_viewport(Size::new(200, 16));
    let gutter = LineNumberGutter::attach(surface.hub(), GutterConfig::default(), 16);
    let captured = capture(|| {
        let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 28, 16));
        gutter.paint(&surface, &mut canvas);
    });
    let spans = captured.spans.lock().unwrap();
    let has_span = spans.iter().any(|s| s.name == "gutter_render");
    assert_eq!(has_span, cfg!(feature = "tracing"));
}
