#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s. It provides cell access and a
//! scissor (clipping) stack.
//!
//! # Layout
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Scissor stack intersection monotonically decreases on push
//! 4. The scissor stack always has at least one element

use rowhead_core::geometry::{Point, Rect};

use crate::cell::Cell;

/// A 2D grid of cells.
///
/// # Example
///
/// ```
/// use rowhead_render::buffer::Buffer;
/// use rowhead_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set(1, 0, Cell::from_char('i'));
/// assert_eq!(buffer.row_text(0).trim_end(), "Hi");
/// ```
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    scissor_stack: Vec<Rect>,
}

impl Buffer {
    /// Create a new buffer of empty cells.
    ///
    /// # Panics
    ///
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0, "buffer width must be > 0");
        assert!(height > 0, "buffer height must be > 0");

        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
            scissor_stack: vec![Rect::new(0, 0, u32::from(width), u32::from(height))],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rect of the entire buffer, in cells.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, u32::from(self.width), u32::from(self.height))
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get a reference to the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    fn writable(&self, x: u16, y: u16) -> Option<usize> {
        let idx = self.index(x, y)?;
        self.current_scissor()
            .contains(Point::new(i32::from(x), i32::from(y)))
            .then_some(idx)
    }

    /// Write `cell` at (x, y) as content `width` cells wide.
    ///
    /// - Respects the current scissor region
    /// - Does nothing if coordinates are out of bounds
    /// - Wide writes are atomic: if the whole glyph does not fit, nothing is
    ///   written
    pub fn set_wide(&mut self, x: u16, y: u16, cell: Cell, width: usize) {
        let width = width.max(1);
        let mut slots = Vec::with_capacity(width);
        for dx in 0..width {
            let Ok(dx) = u16::try_from(dx) else {
                return;
            };
            let Some(idx) = x.checked_add(dx).and_then(|cx| self.writable(cx, y)) else {
                return;
            };
            slots.push(idx);
        }
        for (i, idx) in slots.into_iter().enumerate() {
            self.cells[idx] = if i == 0 {
                cell
            } else {
                Cell {
                    fg: cell.fg,
                    bg: cell.bg,
                    flags: cell.flags,
                    ..Cell::CONTINUATION
                }
            };
        }
    }

    /// Write a single-width `cell` at (x, y), respecting the scissor.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        self.set_wide(x, y, cell, 1);
    }

    /// Fill a rectangular region (in cells) with `cell`, respecting the scissor.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let area = rect.intersection(&self.current_scissor());
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
                    self.set(x, y, cell);
                }
            }
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Cells of row `y`, or an empty slice when out of bounds.
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Plain text of row `y`. Empty cells become spaces; continuation cells
    /// are skipped so wide characters keep their natural width.
    pub fn row_text(&self, y: u16) -> String {
        self.row_cells(y)
            .iter()
            .filter(|cell| !cell.is_continuation())
            .map(|cell| cell.ch.unwrap_or(' '))
            .collect()
    }

    // ========== Scissor Stack ==========

    /// Push a scissor (clipping) region onto the stack.
    ///
    /// The effective scissor is the intersection of all pushed rects.
    /// If the intersection is empty, no cells will be drawn.
    pub fn push_scissor(&mut self, rect: Rect) {
        let intersected = self.current_scissor().intersection(&rect);
        self.scissor_stack.push(intersected);
    }

    /// Pop a scissor region from the stack.
    ///
    /// Does nothing if only the base scissor remains.
    pub fn pop_scissor(&mut self) {
        if self.scissor_stack.len() > 1 {
            self.scissor_stack.pop();
        }
    }

    /// Get the current effective scissor region.
    #[inline]
    pub fn current_scissor(&self) -> Rect {
        self.scissor_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.bounds())
    }

    /// Get the scissor stack depth.
    #[inline]
    pub fn scissor_depth(&self) -> usize {
        self.scissor_stack.len()
    }

    /// Check if two buffers have identical content.
    pub fn content_eq(&self, other: &Buffer) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}
