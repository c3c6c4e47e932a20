//! Construction-time errors.
//!
//! Gameplay itself never fails: blocked moves are reverted and game over is a
//! phase. Only building an engine from a bad config or board can go wrong.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Cell size of zero pixels.
    ZeroCellSize,
    /// Derived grid is too small for the pieces or too large to index.
    InvalidDimensions { width: u32, height: u32 },
    /// A preloaded board has no rows, or rows of different lengths.
    RaggedRows { row: usize, expected: usize, found: usize },
    /// A preloaded board does not match the configured dimensions.
    GridMismatch {
        expected: (u16, u16),
        found: (u16, u16),
    },
    /// Scoring or speed rule that would break monotonicity or the floor.
    InvalidRule(&'static str),
    /// Scripted piece source with nothing to play.
    EmptyScript,
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ZeroCellSize | EngineError::InvalidDimensions { .. } => {
                "invalid_dimensions"
            }
            EngineError::RaggedRows { .. } | EngineError::GridMismatch { .. } => "invalid_grid",
            EngineError::InvalidRule(_) => "invalid_rule",
            EngineError::EmptyScript => "empty_script",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EngineError::ZeroCellSize => "cell size must be at least one pixel",
            EngineError::InvalidDimensions { .. } => "grid dimensions out of range",
            EngineError::RaggedRows { .. } => "grid rows must be non-empty and equally long",
            EngineError::GridMismatch { .. } => "grid does not match configured dimensions",
            EngineError::InvalidRule(_) => "scoring or speed rule rejected",
            EngineError::EmptyScript => "scripted piece source needs at least one piece",
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidDimensions { width, height } => {
                write!(f, "{} ({}x{})", self.message(), width, height)
            }
            EngineError::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "{}: row {} has {} cells, expected {}",
                self.message(),
                row,
                found,
                expected
            ),
            EngineError::GridMismatch { expected, found } => write!(
                f,
                "{}: expected {}x{}, found {}x{}",
                self.message(),
                expected.0,
                expected.1,
                found.0,
                found.1
            ),
            EngineError::InvalidRule(detail) => write!(f, "{}: {}", self.message(), detail),
            EngineError::ZeroCellSize | EngineError::EmptyScript => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for EngineError {}
