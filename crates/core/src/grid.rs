//! Grid module - the settled-block occupancy store
//!
//! A `width` x `height` grid of cells, each either [`EMPTY`] or [`FILLED`].
//! Uses a flat row-major vector sized once at construction.
//! Coordinates are `(row, col)`: row 0 is the top, col 0 is the left edge.
//!
//! Reads outside the grid report [`FILLED`]. The walls and the floor behave
//! as solid cells, so collision checks need no separate bounds test. Rows
//! above the top (negative) are solid as well.

use crate::error::EngineError;
use crate::types::{EMPTY, FILLED};

/// The playing grid - flat row-major storage of occupancy markers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Row-major cells (row * width + col)
    cells: Vec<u8>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; usize::from(width) * usize::from(height)],
        }
    }

    /// Build a grid from explicit rows, top row first.
    ///
    /// Any non-zero value is stored as [`FILLED`].
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, EngineError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(EngineError::RaggedRows {
                row: 0,
                expected: 1,
                found: 0,
            });
        }
        if width > usize::from(u16::MAX) || rows.len() > usize::from(u16::MAX) {
            return Err(EngineError::InvalidDimensions {
                width: width as u32,
                height: rows.len() as u32,
            });
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(EngineError::RaggedRows {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().map(|&v| if v == EMPTY { EMPTY } else { FILLED }));
        }

        Ok(Self {
            width: width as u16,
            height: rows.len() as u16,
            cells,
        })
    }

    /// Flat index for an in-bounds coordinate
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= i32::from(self.height) || col >= i32::from(self.width) {
            return None;
        }
        Some((row as usize) * usize::from(self.width) + col as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Cell value at `(row, col)`; out-of-bounds reads are [`FILLED`].
    pub fn get(&self, row: i32, col: i32) -> u8 {
        match self.index(row, col) {
            Some(idx) => self.cells[idx],
            None => FILLED,
        }
    }

    /// True when the cell blocks a piece (occupied or outside the grid).
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col) != EMPTY
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some()
    }

    /// Write a cell. Returns false, leaving the grid untouched, when out of bounds.
    pub fn set(&mut self, row: i32, col: i32, value: u8) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// One row as a slice. Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[u8] {
        let width = usize::from(self.width);
        &self.cells[row * width..(row + 1) * width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= usize::from(self.height) {
            return false;
        }
        self.row(row).iter().all(|&cell| cell != EMPTY)
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Single bottom-to-top pass with a read and a write cursor: full rows are
    /// skipped, other rows are copied down to the write cursor, and whatever
    /// is left above it is zeroed. All rows that are full at call time go in
    /// one call, and surviving rows keep their relative order.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = usize::from(self.width);
        let height = usize::from(self.height);
        let mut write_row = height;
        let mut cleared = 0;

        for read_row in (0..height).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                self.cells.copy_within(src..src + width, write_row * width);
            }
        }

        self.cells[..write_row * width].fill(EMPTY);
        cleared
    }

    /// Raw row-major cells
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Copy cells into `out`, reusing its allocation.
    pub fn write_cells_into(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend_from_slice(&self.cells);
    }
}
