//! Engine configuration.
//!
//! The grid size is derived from a playing-field size and a cell size, the
//! same way a canvas of `field_width_px` pixels holds `field_width_px /
//! cell_size_px` columns. Scoring and speed rules live here too so a config
//! file can tune the progression without touching code.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{
    BASE_INTERVAL_MS, DEFAULT_CELL_SIZE_PX, DEFAULT_FIELD_HEIGHT_PX, DEFAULT_FIELD_WIDTH_PX,
    INTERVAL_STEP_MS, LEVEL_SCORE_STEP, MAX_GRID_DIMENSION, MIN_GRID_HEIGHT, MIN_GRID_WIDTH,
    MIN_INTERVAL_MS, POINTS_PER_ROW,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub field_width_px: u32,
    pub field_height_px: u32,
    pub cell_size_px: u32,
    /// Points per row; a clear of `n` rows scores `n * points_per_row * level`.
    pub points_per_row: u32,
    /// Score per level (`level = 1 + score / level_score_step`).
    pub level_score_step: u32,
    pub base_interval_ms: u32,
    pub interval_step_ms: u32,
    pub min_interval_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            field_width_px: DEFAULT_FIELD_WIDTH_PX,
            field_height_px: DEFAULT_FIELD_HEIGHT_PX,
            cell_size_px: DEFAULT_CELL_SIZE_PX,
            points_per_row: POINTS_PER_ROW,
            level_score_step: LEVEL_SCORE_STEP,
            base_interval_ms: BASE_INTERVAL_MS,
            interval_step_ms: INTERVAL_STEP_MS,
            min_interval_ms: MIN_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    /// Default rules on a grid of `width` x `height` cells.
    pub fn with_cells(width: u16, height: u16) -> Self {
        Self::default().resized(width, height)
    }

    /// Same rules, field resized to `width` x `height` cells of the current size.
    pub fn resized(self, width: u16, height: u16) -> Self {
        let cell = self.cell_size_px.max(1);
        Self {
            field_width_px: u32::from(width) * cell,
            field_height_px: u32::from(height) * cell,
            cell_size_px: cell,
            ..self
        }
    }

    /// Grid columns (integer division, like the canvas it models).
    pub fn grid_width(&self) -> u32 {
        self.field_width_px.checked_div(self.cell_size_px).unwrap_or(0)
    }

    /// Grid rows.
    pub fn grid_height(&self) -> u32 {
        self.field_height_px.checked_div(self.cell_size_px).unwrap_or(0)
    }

    /// Check every constraint and return the grid dimensions.
    pub fn validate(&self) -> Result<(u16, u16), EngineError> {
        if self.cell_size_px == 0 {
            return Err(EngineError::ZeroCellSize);
        }

        let width = self.grid_width();
        let height = self.grid_height();
        let max = u32::from(MAX_GRID_DIMENSION);
        if width < u32::from(MIN_GRID_WIDTH)
            || height < u32::from(MIN_GRID_HEIGHT)
            || width > max
            || height > max
        {
            return Err(EngineError::InvalidDimensions { width, height });
        }

        if self.points_per_row == 0 {
            return Err(EngineError::InvalidRule("points_per_row must be positive"));
        }
        if self.level_score_step == 0 {
            return Err(EngineError::InvalidRule("level_score_step must be positive"));
        }
        if self.min_interval_ms == 0 {
            return Err(EngineError::InvalidRule("min_interval_ms must be positive"));
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err(EngineError::InvalidRule(
                "min_interval_ms must not exceed base_interval_ms",
            ));
        }

        Ok((width as u16, height as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_ten_by_twenty() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok((10, 20)));
    }

    #[test]
    fn dimensions_use_integer_division() {
        let config = EngineConfig {
            field_width_px: 215,
            field_height_px: 419,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Ok((10, 20)));
    }

    #[test]
    fn with_cells_keeps_rules() {
        let config = EngineConfig::with_cells(6, 12);
        assert_eq!(config.validate(), Ok((6, 12)));
        assert_eq!(config.points_per_row, POINTS_PER_ROW);
    }

    #[test]
    fn rejects_bad_geometry() {
        let zero = EngineConfig {
            cell_size_px: 0,
            ..EngineConfig::default()
        };
        assert_eq!(zero.validate(), Err(EngineError::ZeroCellSize));

        let narrow = EngineConfig::with_cells(3, 20);
        assert!(matches!(
            narrow.validate(),
            Err(EngineError::InvalidDimensions { width: 3, .. })
        ));

        let huge = EngineConfig::with_cells(10, 300);
        assert!(huge.validate().is_err());
    }

    #[test]
    fn rejects_bad_rules() {
        let floorless = EngineConfig {
            min_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            floorless.validate(),
            Err(EngineError::InvalidRule(_))
        ));

        let inverted = EngineConfig {
            min_interval_ms: 600,
            ..EngineConfig::default()
        };
        assert!(inverted.validate().is_err());

        let stuck = EngineConfig {
            level_score_step: 0,
            ..EngineConfig::default()
        };
        assert!(stuck.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "field_width_px": 240, "min_interval_ms": 80 }"#).unwrap();
        assert_eq!(config.grid_width(), 12);
        assert_eq!(config.grid_height(), 20);
        assert_eq!(config.min_interval_ms, 80);
        assert_eq!(config.base_interval_ms, BASE_INTERVAL_MS);
    }
}
