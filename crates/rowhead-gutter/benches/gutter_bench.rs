//! Benchmarks for gutter painting.
//!
//! Run with: cargo bench -p rowhead-gutter

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rowhead_core::geometry::{Point, Rect, Size};
use rowhead_gutter::{GutterConfig, GutterRenderer};
use rowhead_render::buffer::Buffer;
use rowhead_render::canvas::{CellCanvas, CellGeometry};
use rowhead_text::{TextSurface, WrapMode};

const GEOMETRY: CellGeometry = CellGeometry::new(8, 16);

fn document(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {i} with a little text that wraps in narrow views"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_viewport_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("gutter/paint");
    let renderer = GutterRenderer::new(GutterConfig::default());

    for lines in [100, 10_000] {
        for (name, mode) in [("nowrap", WrapMode::None), ("word", WrapMode::Word)] {
            let surface = TextSurface::new(&document(lines))
                .with_wrap(mode)
                .with_viewport(Size::new(160, 800));
            let mut buf = Buffer::new(4, 50);
            let region = buf.bounds();

            group.bench_with_input(
                BenchmarkId::new(name, lines),
                &surface,
                |b, surface| {
                    b.iter(|| {
                        // Scroll to the middle of the document.
                        let mid = i32::try_from(surface.layout().row_count() / 2 * 16).unwrap_or(0);
                        let mut canvas = CellCanvas::new(&mut buf, region, GEOMETRY, Point::new(0, mid));
                        black_box(renderer.render(surface, &mut canvas));
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_label_scan(c: &mut Criterion) {
    let renderer = GutterRenderer::default();
    let surface = TextSurface::new(&document(1_000)).with_viewport(Size::new(400, 16_000));
    c.bench_function("gutter/labels_full_document", |b| {
        b.iter(|| black_box(renderer.labels(&surface, Rect::new(0, 0, 28, 16_000))))
    });
}

criterion_group!(benches, bench_viewport_paint, bench_label_scan);
criterion_main!(benches);
