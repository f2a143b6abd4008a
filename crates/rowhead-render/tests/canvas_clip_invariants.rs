//! Property tests for `CellCanvas` clipping.
//!
//! Whatever is drawn, cells outside the canvas region and outside the cells
//! covering the clip rectangle are never touched.

use proptest::prelude::*;
use rowhead_core::geometry::{Point, Rect};
use rowhead_render::buffer::Buffer;
use rowhead_render::canvas::{Canvas, CellCanvas, CellGeometry};
use rowhead_render::cell::Cell;

const GEOMETRY: CellGeometry = CellGeometry::new(7, 16);

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['1', '9', ' ', 'a', '日']), 0..8)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn drawing_stays_inside_region_and_clip(
        scroll in 0i32..400,
        clip_y in 0i32..600,
        clip_h in 0u32..200,
        draws in prop::collection::vec((text_strategy(), -20i32..60, -50i32..700), 0..12),
    ) {
        let mut buf = Buffer::new(10, 8);
        let region = Rect::new(2, 1, 4, 6);
        {
            let canvas = CellCanvas::new(&mut buf, region, GEOMETRY, Point::new(0, scroll));
            let mut canvas = canvas.with_clip(Rect::new(0, clip_y, 28, clip_h));
            for (text, x, y) in &draws {
                canvas.draw_text(text, Point::new(*x, *y));
            }
        }

        let clip_rows = if clip_h == 0 {
            0..0
        } else {
            let top = (clip_y - scroll).div_euclid(16);
            let bottom = (clip_y + clip_h as i32 - scroll + 15).div_euclid(16);
            top..bottom
        };
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                let cell = buf.get(x, y).unwrap();
                let in_region = region.contains(Point::new(i32::from(x), i32::from(y)));
                let local_row = i32::from(y) - region.y;
                if !in_region || !clip_rows.contains(&local_row) {
                    prop_assert_eq!(*cell, Cell::default(), "cell ({}, {}) was written", x, y);
                }
            }
        }
    }
}
