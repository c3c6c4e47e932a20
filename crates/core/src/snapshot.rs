use serde::Serialize;

use crate::pieces::{Piece, Shape};
use crate::types::{Phase, PieceKind, EMPTY};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    /// Shape matrix rows, top first.
    pub shape: Vec<Vec<u8>>,
    pub x: i32,
    pub y: i32,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape.to_rows(),
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Filled cells in grid coordinates `(row, col)`.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != EMPTY)
                .map(move |(c, _)| (self.y + r as i32, self.x + c as i32))
        })
    }
}

/// Read-only view of the engine for renderers and observers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major occupancy, `0` empty and `1` occupied.
    pub grid: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub phase: Phase,
    pub tick_interval_ms: u32,
}

impl GameSnapshot {
    /// Grid cell at `(row, col)`; `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        if row >= usize::from(self.height) || col >= usize::from(self.width) {
            return None;
        }
        self.grid.get(row * usize::from(self.width) + col).copied()
    }

    pub fn game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub(crate) fn set_active(&mut self, piece: Option<&Piece>) {
        match (piece, self.active.as_mut()) {
            (Some(p), Some(slot)) => {
                slot.kind = p.kind;
                slot.x = p.x;
                slot.y = p.y;
                write_shape_into(&p.shape, &mut slot.shape);
            }
            (Some(p), None) => self.active = Some(ActiveSnapshot::from(*p)),
            (None, _) => self.active = None,
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            grid: Vec::new(),
            active: None,
            score: 0,
            level: 1,
            lines: 0,
            phase: Phase::Running,
            tick_interval_ms: 0,
        }
    }
}

fn write_shape_into(shape: &Shape, out: &mut Vec<Vec<u8>>) {
    out.resize_with(shape.rows(), Vec::new);
    for (r, row) in out.iter_mut().enumerate() {
        row.clear();
        row.extend((0..shape.cols()).map(|c| u8::from(shape.is_filled(r, c))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_an_empty_running_game() {
        let snap = GameSnapshot::default();
        assert_eq!((snap.width, snap.height), (0, 0));
        assert!(snap.grid.is_empty());
        assert!(snap.active.is_none());
        assert_eq!(snap.level, 1);
        assert!(!snap.game_over());
        assert_eq!(snap.cell(0, 0), None);
    }

    #[test]
    fn set_active_overwrites_previous_shape() {
        let mut snap = GameSnapshot::default();
        snap.set_active(Some(&Piece::spawn(PieceKind::I, 10)));
        snap.set_active(Some(&Piece::spawn(PieceKind::O, 10)));

        let active = snap.active.as_ref().unwrap();
        assert_eq!(active.kind, PieceKind::O);
        assert_eq!(active.shape, vec![vec![1, 1], vec![1, 1]]);
        assert_eq!(active.x, 4);

        snap.set_active(None);
        assert!(snap.active.is_none());
    }
}
