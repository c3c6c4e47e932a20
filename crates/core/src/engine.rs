//! Game engine module - the complete game state machine
//!
//! Ties the grid, pieces, piece source and scoring together. The engine owns
//! all state and never touches a clock: an external driver calls [`GameEngine::tick`]
//! at the cadence reported by [`GameEngine::tick_interval_ms`], and an input
//! layer sends [`Command`]s. Every operation runs to completion inside one
//! `&mut self` call, so callers never see a half-applied transition.

use log::{debug, info};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::Progression;
use crate::snapshot::GameSnapshot;
use crate::types::{Command, Phase, TickOutcome, FILLED};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine<S = UniformSource> {
    config: EngineConfig,
    progression: Progression,
    grid: Grid,
    /// `None` only once the game is over.
    active: Option<Piece>,
    source: S,
    score: u32,
    level: u32,
    lines: u32,
    tick_interval_ms: u32,
    phase: Phase,
    /// Successful spawns this game (the first piece counts).
    pieces_spawned: u32,
}

impl GameEngine<UniformSource> {
    /// Create a new game with uniform random pieces from `seed`
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, EngineError> {
        Self::with_source(config, UniformSource::new(seed))
    }
}

impl<S: PieceSource> GameEngine<S> {
    /// Create a new game on an empty grid drawing pieces from `source`.
    pub fn with_source(config: EngineConfig, source: S) -> Result<Self, EngineError> {
        let (width, height) = config.validate()?;
        Self::build(config, Grid::new(width, height), source)
    }

    /// Create a game on a preloaded grid.
    ///
    /// The first piece spawns immediately; if it already collides the engine
    /// starts in [`Phase::GameOver`].
    pub fn with_grid(config: EngineConfig, grid: Grid, source: S) -> Result<Self, EngineError> {
        let (width, height) = config.validate()?;
        if (grid.width(), grid.height()) != (width, height) {
            return Err(EngineError::GridMismatch {
                expected: (width, height),
                found: (grid.width(), grid.height()),
            });
        }
        Self::build(config, grid, source)
    }

    fn build(config: EngineConfig, grid: Grid, source: S) -> Result<Self, EngineError> {
        let progression = Progression::new(&config);
        let mut engine = Self {
            config,
            progression,
            grid,
            active: None,
            source,
            score: 0,
            level: 1,
            lines: 0,
            tick_interval_ms: progression.interval_ms(1),
            phase: Phase::Running,
            pieces_spawned: 0,
        };
        engine.spawn_piece();
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Authoritative gravity interval for the current level.
    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    /// Whether `piece` would overlap settled blocks or leave the grid.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.collides(&self.grid)
    }

    /// Draw the next kind and place it at the top. Enters game over when the
    /// new piece has nowhere to go.
    fn spawn_piece(&mut self) -> bool {
        let piece = Piece::spawn(self.source.next_kind(), self.grid.width());
        if piece.collides(&self.grid) {
            self.active = None;
            self.phase = Phase::GameOver;
            info!(
                "game over: {:?} blocked at spawn (score {}, level {}, lines {})",
                piece.kind, self.score, self.level, self.lines
            );
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        true
    }

    /// Apply `change` to a copy of the active piece and keep it only if the
    /// result fits.
    fn try_transform(&mut self, change: impl FnOnce(&Piece) -> Piece) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = change(&active);
        if candidate.collides(&self.grid) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_transform(|p| p.shifted(-1, 0))
    }

    pub fn move_right(&mut self) -> bool {
        self.try_transform(|p| p.shifted(1, 0))
    }

    /// Turn the active piece clockwise in place. Refused if it would collide.
    pub fn rotate(&mut self) -> bool {
        self.try_transform(Piece::rotated)
    }

    /// One row down; the same transition as a gravity tick.
    pub fn soft_drop(&mut self) -> TickOutcome {
        self.tick()
    }

    /// Main game tick - advance gravity by one row
    ///
    /// If the piece cannot move down it locks: its cells merge into the grid,
    /// full rows clear, score/level/interval update, and the next piece spawns.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase.is_terminal() {
            return TickOutcome::Idle;
        }
        if self.try_transform(|p| p.shifted(0, 1)) {
            return TickOutcome::Moved;
        }
        self.lock_active()
    }

    /// Apply a discrete command. Returns whether state changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop().changed(),
            Command::Rotate => self.rotate(),
        }
    }

    /// Merge the active piece, clear rows, score, and respawn.
    fn lock_active(&mut self) -> TickOutcome {
        let Some(active) = self.active.take() else {
            return TickOutcome::Idle;
        };

        for (row, col) in active.cells() {
            // Cannot fail: the piece was collision-free where it stands.
            self.grid.set(row, col, FILLED);
        }

        let rows_cleared = self.grid.clear_full_rows() as u32;
        debug!(
            "locked {:?} at ({}, {}), cleared {} rows",
            active.kind, active.x, active.y, rows_cleared
        );

        if rows_cleared > 0 {
            self.award(rows_cleared);
        }

        if self.spawn_piece() {
            TickOutcome::Locked { rows_cleared }
        } else {
            TickOutcome::GameOver { rows_cleared }
        }
    }

    fn award(&mut self, rows_cleared: u32) {
        let points = self.progression.points(rows_cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows_cleared);

        let level = self.progression.level(self.score).max(self.level);
        if level != self.level {
            self.level = level;
            self.tick_interval_ms = self.progression.interval_ms(level);
            info!(
                "level {} reached at score {}, interval now {}ms",
                level, self.score, self.tick_interval_ms
            );
        }
    }

    /// Start a new game: empty grid, zeroed score, fresh piece.
    ///
    /// Works from any phase. The piece source keeps its position.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.active = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.tick_interval_ms = self.progression.interval_ms(1);
        self.phase = Phase::Running;
        self.pieces_spawned = 0;
        info!("restart");
        self.spawn_piece();
    }

    /// Copy the observable state into `out`, reusing its allocations.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        self.grid.write_cells_into(&mut out.grid);
        out.set_active(self.active.as_ref());
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.phase = self.phase;
        out.tick_interval_ms = self.tick_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
