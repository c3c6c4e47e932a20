//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the falling-block game state machine. It has **no
//! dependencies** on terminals, timers or I/O:
//!
//! - **Deterministic**: the same seed (or script) replays the same game
//! - **Clock-free**: gravity advances only when a driver calls [`GameEngine::tick`]
//! - **Total**: every command either applies or is a silent no-op
//!
//! # Module Structure
//!
//! - [`grid`]: occupancy grid; out-of-bounds reads count as occupied
//! - [`pieces`]: the seven shape matrices, rotation and collision
//! - [`rng`]: uniform piece selection and the [`PieceSource`] seam
//! - [`scoring`]: score, level and interval progression
//! - [`config`]: field size and progression rules
//! - [`engine`]: the state machine itself
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{EngineConfig, GameEngine};
//! use tui_blockfall_types::{Command, TickOutcome};
//!
//! let mut game = GameEngine::new(EngineConfig::default(), 12345).unwrap();
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! assert_eq!(game.tick(), TickOutcome::Moved);
//!
//! assert_eq!(game.level(), 1);
//! assert_eq!(game.tick_interval_ms(), 500);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use engine::GameEngine;
pub use error::EngineError;
pub use grid::Grid;
pub use pieces::{get_shape, Piece, Shape};
pub use rng::{PieceSource, ScriptedSource, SimpleRng, UniformSource};
pub use scoring::{level_for_score, line_clear_points, tick_interval_ms, Progression};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
