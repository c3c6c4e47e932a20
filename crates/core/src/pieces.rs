//! Pieces module - tetromino shape catalog, rotation and collision
//!
//! A shape is a small rectangular 0/1 matrix (at most 4x4). Rotation turns the
//! matrix 90 degrees clockwise inside its own bounding box: transpose, then
//! reverse the order within each new row. There is no pivot and no wall kick,
//! so long pieces shift their footprint as they turn, and a rotation that does
//! not fit where the piece stands is simply refused.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::PieceKind;

/// Largest edge of any shape matrix.
pub const MAX_SHAPE_DIM: usize = 4;

/// Filled cells of a piece in grid coordinates `(row, col)`.
pub type PieceCells = ArrayVec<(i32, i32), { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Rectangular occupancy matrix of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build from matrix rows. Panics on empty, ragged or oversized input;
    /// shapes only come from the fixed catalog.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_DIM);
        let cols = rows[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_DIM);

        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols);
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = u8::from(v != 0);
            }
        }

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        usize::from(self.rows)
    }

    pub fn cols(&self) -> usize {
        usize::from(self.cols)
    }

    /// Whether `(r, c)` of the matrix is filled. Outside the matrix is empty.
    pub fn is_filled(&self, r: usize, c: usize) -> bool {
        r < self.rows() && c < self.cols() && self.cells[r][c] != 0
    }

    /// Matrix rows as vectors (for display and serialization).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|r| self.cells[r][..self.cols()].to_vec())
            .collect()
    }

    /// Filled `(r, c)` offsets within the matrix, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows())
            .flat_map(move |r| (0..self.cols()).map(move |c| (r, c)))
            .filter(|&(r, c)| self.cells[r][c] != 0)
    }

    /// Clockwise quarter turn: `new[i][j] = old[rows - 1 - j][i]`.
    pub fn rotated(&self) -> Self {
        let rows = self.rows();
        let cols = self.cols();
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, new_row) in cells.iter_mut().enumerate().take(cols) {
            for (j, cell) in new_row.iter_mut().enumerate().take(rows) {
                *cell = self.cells[rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// Catalog shape for a piece kind.
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::T => Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
        PieceKind::L => Shape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]),
        PieceKind::J => Shape::from_rows(&[&[1, 1, 1], &[0, 0, 1]]),
    }
}

/// Spawn column: the shape centered horizontally, rounding left.
pub fn spawn_x(grid_width: u16, shape: &Shape) -> i32 {
    (i32::from(grid_width) - shape.cols() as i32).div_euclid(2)
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Column of the shape's top-left corner
    pub x: i32,
    /// Row of the shape's top-left corner
    pub y: i32,
}

impl Piece {
    /// New piece of `kind` at the top of a grid `grid_width` columns wide.
    pub fn spawn(kind: PieceKind, grid_width: u16) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            x: spawn_x(grid_width, &shape),
            y: 0,
            shape,
        }
    }

    /// Filled cells mapped into grid coordinates `(row, col)`.
    pub fn cells(&self) -> PieceCells {
        self.shape
            .filled()
            .map(|(r, c)| (self.y + r as i32, self.x + c as i32))
            .collect()
    }

    /// True if any filled cell lands on an occupied or out-of-bounds grid cell.
    pub fn collides(&self, grid: &Grid) -> bool {
        self.shape
            .filled()
            .any(|(r, c)| grid.is_occupied(self.y + r as i32, self.x + c as i32))
    }

    /// Copy shifted by `(dx, dy)`.
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy with the shape turned clockwise; position unchanged.
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }
}
