//! Export settings.
//!
//! Defaults match what the drawing surface hands over when the user has not
//! touched any slider: a 30px brush at 50% opacity and nonzero lasso fill.

use crate::error::{Result, StagError};

/// Default brush diameter in pixels.
pub const DEFAULT_BRUSH_DIAMETER: f32 = 30.0;

/// Default brush opacity (preview only).
pub const DEFAULT_BRUSH_OPACITY: f32 = 0.5;

/// Brush parameters.
///
/// `opacity` only affects how the stroke is previewed; the mask is binary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushSettings {
    pub diameter: f32,
    pub opacity: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            diameter: DEFAULT_BRUSH_DIAMETER,
            opacity: DEFAULT_BRUSH_OPACITY,
        }
    }
}

impl BrushSettings {
    pub fn new(diameter: f32, opacity: f32) -> Self {
        Self { diameter, opacity }
    }

    pub fn with_diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.diameter.is_finite() || self.diameter <= 0.0 {
            return Err(StagError::InvalidBrushSize(self.diameter));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(StagError::InvalidBrushOpacity(self.opacity));
        }
        Ok(())
    }
}

/// Polygon fill rule for the lasso.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    /// Inside when the winding number is not zero (2D canvas default)
    #[default]
    NonZero,
    /// Inside when an odd number of edges is crossed
    EvenOdd,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LassoSettings {
    pub fill_rule: FillRule,
}

impl LassoSettings {
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }
}

/// Everything the export pipeline needs besides raster, tool and gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExportOptions {
    pub brush: BrushSettings,
    pub lasso: LassoSettings,
}

impl ExportOptions {
    pub fn with_brush(mut self, brush: BrushSettings) -> Self {
        self.brush = brush;
        self
    }

    pub fn with_lasso(mut self, lasso: LassoSettings) -> Self {
        self.lasso = lasso;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ExportOptions::default();
        assert_eq!(opts.brush.diameter, 30.0);
        assert_eq!(opts.brush.opacity, 0.5);
        assert_eq!(opts.lasso.fill_rule, FillRule::NonZero);
        assert!(opts.brush.validate().is_ok());
    }

    #[test]
    fn test_invalid_brush() {
        assert!(matches!(
            BrushSettings::default().with_diameter(0.0).validate(),
            Err(StagError::InvalidBrushSize(_))
        ));
        assert!(matches!(
            BrushSettings::default().with_diameter(f32::NAN).validate(),
            Err(StagError::InvalidBrushSize(_))
        ));
        assert!(matches!(
            BrushSettings::default().with_opacity(1.5).validate(),
            Err(StagError::InvalidBrushOpacity(_))
        ));
    }
}
