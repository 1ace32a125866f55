// src/config/mod.rs
//! Visualizer configuration.

use crate::render::VisMode;

/// Lower bound of the practical sensitivity range.
pub const SENSITIVITY_MIN: f32 = 0.1;
/// Upper bound of the practical sensitivity range.
pub const SENSITIVITY_MAX: f32 = 3.0;
/// Step applied per key press when adjusting sensitivity.
pub const SENSITIVITY_STEP: f32 = 0.1;

/// Settings the visualizer is constructed with. Mode and sensitivity
/// remain adjustable at runtime; the surface size is fixed for the
/// lifetime of the visualizer.
#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    /// Drawing surface width in device pixels.
    pub surface_width: u32,
    /// Drawing surface height in device pixels.
    pub surface_height: u32,
    /// Initially selected visualization mode.
    pub mode: VisMode,
    /// Initial amplitude sensitivity scalar.
    pub sensitivity: f32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            surface_width: 800,
            surface_height: 400,
            mode: VisMode::Spectrum,
            sensitivity: 1.0,
        }
    }
}

/// Clamp a sensitivity value into the practical range.
pub fn clamp_sensitivity(value: f32) -> f32 {
    value.clamp(SENSITIVITY_MIN, SENSITIVITY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_embedding() {
        let config = VisualizerConfig::default();
        assert_eq!(config.surface_width, 800);
        assert_eq!(config.surface_height, 400);
        assert_eq!(config.mode, VisMode::Spectrum);
        assert_eq!(config.sensitivity, 1.0);
    }

    #[test]
    fn sensitivity_clamps_to_bounds() {
        assert_eq!(clamp_sensitivity(0.0), SENSITIVITY_MIN);
        assert_eq!(clamp_sensitivity(9.0), SENSITIVITY_MAX);
        assert_eq!(clamp_sensitivity(1.5), 1.5);
    }
}
