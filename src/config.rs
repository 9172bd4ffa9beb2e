//! Drawing panel configuration.
//!
//! The defaults are the single source of truth for canvas dimensions and
//! tool widths. The app persists a [`CanvasConfig`] alongside its other state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canvas width and height in pixels
pub const CANVAS_SIZE: u32 = 500;

/// Pencil stroke width in pixels
pub const PENCIL_THICKNESS: f32 = 6.0;

/// Eraser stroke width in pixels
pub const ERASER_THICKNESS: f32 = 20.0;

/// Number of palette swatches per display row
pub const COLORS_PER_ROW: usize = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Canvas size {0} is not supported; stored drawings are {size}x{size}", size = CANVAS_SIZE)]
    UnsupportedCanvasSize(u32),
    #[error("Palette rows must hold at least one color")]
    EmptyPaletteRow,
    #[error("Eraser width {eraser} must exceed pencil width {pencil}")]
    EraserNotWider { pencil: f32, eraser: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // new fields fall back to their defaults when restoring old state
pub struct CanvasConfig {
    pub canvas_size: u32,
    pub pencil_thickness: f32,
    pub eraser_thickness: f32,
    pub colors_per_row: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            pencil_thickness: PENCIL_THICKNESS,
            eraser_thickness: ERASER_THICKNESS,
            colors_per_row: COLORS_PER_ROW,
        }
    }
}

impl CanvasConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_size != CANVAS_SIZE {
            return Err(ConfigError::UnsupportedCanvasSize(self.canvas_size));
        }
        if self.colors_per_row == 0 {
            return Err(ConfigError::EmptyPaletteRow);
        }
        if self.eraser_thickness <= self.pencil_thickness {
            return Err(ConfigError::EraserNotWider {
                pencil: self.pencil_thickness,
                eraser: self.eraser_thickness,
            });
        }
        Ok(())
    }

    /// Canvas size as f32 for layout calculations
    pub fn canvas_size_f32(&self) -> f32 {
        self.canvas_size as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CanvasConfig::default();
        assert_eq!(config.canvas_size, 500);
        assert_eq!(config.pencil_thickness, 6.0);
        assert_eq!(config.eraser_thickness, 20.0);
        assert_eq!(config.colors_per_row, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_eraser_must_be_wider() {
        let config = CanvasConfig {
            eraser_thickness: 4.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EraserNotWider {
                pencil: 6.0,
                eraser: 4.0
            })
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: CanvasConfig = serde_json::from_str(r#"{"eraser_thickness": 24.0}"#).unwrap();
        assert_eq!(config.canvas_size, CANVAS_SIZE);
        assert_eq!(config.eraser_thickness, 24.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_canvas_size_is_fixed() {
        for size in [0, 64, 501, u32::MAX] {
            let config: CanvasConfig =
                serde_json::from_str(&format!(r#"{{"canvas_size": {size}}}"#)).unwrap();
            assert_eq!(
                config.validate(),
                Err(ConfigError::UnsupportedCanvasSize(size))
            );
        }
    }
}
