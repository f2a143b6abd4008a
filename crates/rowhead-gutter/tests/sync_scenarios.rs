//! End-to-end gutter scenarios against the reference text surface.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use rowhead_core::geometry::{Point, Rect, Size};
use rowhead_core::oracle::LayoutOracle;
use rowhead_gutter::{GutterConfig, LineNumberGutter};
use rowhead_harness::{RecordingCanvas, assert_buffer_rows, buffer_to_text};
use rowhead_render::buffer::Buffer;
use rowhead_render::canvas::{CellCanvas, CellGeometry};
use rowhead_render::cell::{PackedRgba, StyleFlags};
use rowhead_text::{TextSurface, WrapMode};

const GEOMETRY: CellGeometry = CellGeometry::new(8, 16);

fn attach(surface: &TextSurface) -> LineNumberGutter {
    LineNumberGutter::attach(surface.hub(), GutterConfig::default(), surface.height())
}

fn paint_to_buffer(gutter: &LineNumberGutter, surface: &TextSurface, rows: u16) -> Buffer {
    let mut buf = Buffer::new(4, rows);
    let region = buf.bounds();
    let mut canvas = CellCanvas::new(&mut buf, region, GEOMETRY, Point::ZERO);
    gutter.paint(surface, &mut canvas);
    buf
}

#[test]
fn three_line_document() {
    let surface = TextSurface::new("a\nbb\nccc").with_viewport(Size::new(200, 48));
    let gutter = attach(&surface);
    let buf = paint_to_buffer(&gutter, &surface, 3);
    assert_buffer_rows(&buf, &["  1 ", "  2 ", "  3 "]);
}

#[test]
fn caret_line_renders_in_highlight_color() {
    let mut surface = TextSurface::new("a\nbb\nccc").with_viewport(Size::new(200, 48));
    let gutter = attach(&surface);
    surface.set_caret(3);
    let buf = paint_to_buffer(&gutter, &surface, 3);

    let digit = |y: u16| *buf.get(2, y).unwrap();
    assert_eq!(digit(0).fg, PackedRgba::BLACK);
    assert_eq!(digit(1).fg, PackedRgba::RED);
    assert_eq!(digit(2).fg, PackedRgba::BLACK);
    assert!(digit(1).flags.contains(StyleFlags::BOLD));

    // Moving the caret moves the highlight.
    surface.set_caret(6);
    let buf = paint_to_buffer(&gutter, &surface, 3);
    assert_eq!(buf.get(2, 1).unwrap().fg, PackedRgba::BLACK);
    assert_eq!(buf.get(2, 2).unwrap().fg, PackedRgba::RED);
}

#[test]
fn wrapped_line_numbers_only_first_row() {
    // 40 units wide = 5 columns.
    let surface = TextSurface::new("hello world\nx")
        .with_wrap(WrapMode::Word)
        .with_viewport(Size::new(40, 48));
    assert_eq!(surface.layout().row_count(), 3);
    let gutter = attach(&surface);
    let buf = paint_to_buffer(&gutter, &surface, 3);
    assert_buffer_rows(&buf, &["  1 ", "    ", "  2 "]);
}

#[test]
fn line_one_thousand_is_not_truncated() {
    let text = "x\n".repeat(1000);
    let surface = TextSurface::new(&text).with_viewport(Size::new(200, 160));
    let gutter = attach(&surface);

    let rows = 1001;
    let mut buf = Buffer::new(4, rows);
    let region = buf.bounds();
    let mut canvas = CellCanvas::new(&mut buf, region, GEOMETRY, Point::ZERO)
        .with_clip(Rect::new(0, 990 * 16, 28, 11 * 16));
    let report = gutter.paint(&surface, &mut canvas);
    drop(canvas);

    assert_eq!(report.labels, 11);
    assert_eq!(buf.row_text(998), "999 ");
    assert_eq!(buf.row_text(999), "1000");
    assert_eq!(buf.row_text(1000), "1001");
    // Rows outside the clip were not touched.
    assert_eq!(buf.row_text(0), "    ");
}

#[test]
fn scrolled_viewport_paints_visible_rows() {
    let text = "x\n".repeat(50);
    let surface = TextSurface::new(&text).with_viewport(Size::new(200, 64));
    let gutter = attach(&surface);

    // Scrolled to y = 320 with a 4-row viewport.
    let mut buf = Buffer::new(4, 4);
    let region = buf.bounds();
    let mut canvas = CellCanvas::new(&mut buf, region, GEOMETRY, Point::new(0, 320));
    gutter.paint(&surface, &mut canvas);
    drop(canvas);
    assert_eq!(buffer_to_text(&buf), " 21 \n 22 \n 23 \n 24 ");
}

#[test]
fn bursts_of_edits_coalesce_into_one_paint() {
    let mut surface = TextSurface::new("").with_viewport(Size::new(200, 64));
    let gutter = attach(&surface);
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&wakes);
    gutter.set_waker(move || {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    for i in 0..100 {
        surface.append(&format!("line {i}\n")).unwrap();
    }
    assert_eq!(wakes.load(Ordering::Relaxed), 1);

    let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 28, 64));
    assert!(gutter.paint_if_dirty(&surface, &mut canvas).is_some());
    assert!(gutter.paint_if_dirty(&surface, &mut canvas).is_none());
    assert_eq!(canvas.text_strings().len(), 5);
}

#[test]
fn edits_and_caret_moves_mark_dirty_but_hide_does_not() {
    let mut surface = TextSurface::new("abc").with_viewport(Size::new(200, 64));
    let gutter = attach(&surface);
    let signal = gutter.repaint_signal();

    surface.insert(1, "x").unwrap();
    assert!(signal.take());
    surface.set_caret(2);
    assert!(signal.take());
    surface.remove(0..1).unwrap();
    assert!(signal.take());
    surface.replace(0..1, "zz").unwrap();
    assert!(signal.take());

    surface.hide();
    surface.move_to(Point::new(10, 10));
    assert!(!signal.is_pending());

    surface.show();
    assert!(signal.take());
}

#[test]
fn growth_resizes_gutter() {
    let mut surface = TextSurface::new("a").with_viewport(Size::new(200, 32));
    let gutter = attach(&surface);
    assert_eq!(gutter.preferred_size(), Size::new(28, 32));

    surface.append("\nb\nc\nd").unwrap();
    assert_eq!(gutter.preferred_size(), Size::new(28, 64));
    assert_eq!(gutter.take_relayout(), Some(Size::new(28, 64)));

    surface.resize(Size::new(100, 500));
    assert_eq!(gutter.preferred_size(), Size::new(28, 500));
}

#[test]
fn background_insertion_reaches_the_paint_thread() {
    let surface = Arc::new(Mutex::new(
        TextSurface::new("start").with_viewport(Size::new(200, 64)),
    ));
    let gutter = attach(&surface.lock().unwrap());
    let (tx, rx) = mpsc::channel();
    gutter.set_waker(move || {
        let _ = tx.send(());
    });

    let writer = Arc::clone(&surface);
    let handle = thread::spawn(move || {
        for _ in 0..20 {
            writer.lock().unwrap().append("\nmore").unwrap();
        }
    });
    rx.recv_timeout(Duration::from_secs(5)).expect("waker not called");
    handle.join().unwrap();

    let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 28, 21 * 16));
    let guard = surface.lock().unwrap();
    let report = gutter.paint_if_dirty(&*guard, &mut canvas).expect("repaint pending");
    assert_eq!(report.labels, 21);
}

#[test]
fn torn_down_surface_paints_nothing() {
    let mut surface = TextSurface::new("a\nb").with_viewport(Size::new(200, 32));
    let gutter = attach(&surface);
    surface.set_caret(2);
    surface.close();

    let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 28, 32));
    let report = gutter.paint_if_dirty(&surface, &mut canvas).unwrap();
    assert!(report.is_stale());
    assert!(canvas.text_strings().is_empty());
}

#[test]
fn dropping_gutter_releases_listener() {
    let mut surface = TextSurface::new("a");
    let gutter = attach(&surface);
    let signal = gutter.repaint_signal();
    assert_eq!(surface.hub().listener_count(), 1);
    drop(gutter);
    assert_eq!(surface.hub().listener_count(), 0);

    surface.append("b").unwrap();
    assert!(!signal.is_pending());
}
