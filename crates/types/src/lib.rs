//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! They are plain data with no game logic, usable from the engine, the
//! terminal renderer and the input layer alike.
//!
//! # Playing Field
//!
//! The grid size is derived from a playing-field size in pixels and a fixed
//! cell size, so the defaults below describe a 200x400 field of 20px cells:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//!
//! # Speed Progression
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_INTERVAL_MS` | 500 | Gravity interval at level 1 |
//! | `INTERVAL_STEP_MS` | 50 | Interval reduction per level |
//! | `MIN_INTERVAL_MS` | 100 | Floor, never undercut |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{Command, PieceKind, Phase, DEFAULT_GRID_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! let cmd = Command::from_str("rotate").unwrap();
//! assert_eq!(cmd, Command::Rotate);
//!
//! assert!(Phase::GameOver.is_terminal());
//! assert_eq!(DEFAULT_GRID_WIDTH, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Default playing-field width in pixels
pub const DEFAULT_FIELD_WIDTH_PX: u32 = 200;

/// Default playing-field height in pixels
pub const DEFAULT_FIELD_HEIGHT_PX: u32 = 400;

/// Default edge length of one grid cell in pixels
pub const DEFAULT_CELL_SIZE_PX: u32 = 20;

/// Grid width produced by the default field (10 columns)
pub const DEFAULT_GRID_WIDTH: u16 = (DEFAULT_FIELD_WIDTH_PX / DEFAULT_CELL_SIZE_PX) as u16;

/// Grid height produced by the default field (20 rows)
pub const DEFAULT_GRID_HEIGHT: u16 = (DEFAULT_FIELD_HEIGHT_PX / DEFAULT_CELL_SIZE_PX) as u16;

/// Smallest grid width that still fits the widest piece (the I bar).
pub const MIN_GRID_WIDTH: u16 = 4;

/// Smallest usable grid height.
pub const MIN_GRID_HEIGHT: u16 = 2;

/// Largest grid edge accepted by config validation.
pub const MAX_GRID_DIMENSION: u16 = 255;

/// Gravity interval at level 1 (milliseconds per row)
pub const BASE_INTERVAL_MS: u32 = 500;

/// Interval reduction per level gained
pub const INTERVAL_STEP_MS: u32 = 50;

/// Interval floor; the speed formula never goes below this
pub const MIN_INTERVAL_MS: u32 = 100;

/// Points per cleared row, multiplied by rows cleared and current level
pub const POINTS_PER_ROW: u32 = 10;

/// Score needed per level step (`level = 1 + score / LEVEL_SCORE_STEP`)
pub const LEVEL_SCORE_STEP: u32 = 100;

/// Grid cell value for an empty cell
pub const EMPTY: u8 = 0;

/// Grid cell value for an occupied cell
pub const FILLED: u8 = 1;

/// The seven tetromino piece kinds
///
/// Locked cells lose their kind; it only survives on the active piece so a
/// renderer can draw that one distinctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    Z,
    S,
    T,
    L,
    J,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::Z => 2,
            PieceKind::S => 3,
            PieceKind::T => 4,
            PieceKind::L => 5,
            PieceKind::J => 6,
        }
    }
}

/// Discrete commands an input source can send to the engine.
///
/// Every command is a silent no-op once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Advance one row, exactly like a gravity tick.
    SoftDrop,
    Rotate,
}

impl Command {
    /// Parse a command from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(Command::MoveLeft),
            "moveright" | "right" => Some(Command::MoveRight),
            "softdrop" | "down" => Some(Command::SoftDrop),
            "rotate" | "up" => Some(Command::Rotate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
        }
    }
}

/// Coarse engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Running,
    GameOver,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Running => "running",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The active piece moved down one row.
    Moved,
    /// The piece locked, rows were cleared and a new piece spawned.
    Locked { rows_cleared: u32 },
    /// The piece locked and the replacement spawned into occupied cells.
    GameOver { rows_cleared: u32 },
    /// Nothing happened (the game is already over).
    Idle,
}

impl TickOutcome {
    pub fn rows_cleared(&self) -> u32 {
        match self {
            TickOutcome::Locked { rows_cleared } | TickOutcome::GameOver { rows_cleared } => {
                *rows_cleared
            }
            TickOutcome::Moved | TickOutcome::Idle => 0,
        }
    }

    /// Whether the tick changed engine state at all.
    pub fn changed(&self) -> bool {
        !matches!(self, TickOutcome::Idle)
    }
}
