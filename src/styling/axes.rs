//! Immutable axes style and its change-diff.

use crate::core::BoundingBox;
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complete visual configuration of the axes decoration.
///
/// A value type: cheap to clone, compared field-by-field by [`diff`].
/// Callers keep the previously applied style and compute the diff against a
/// new one to decide what to rebuild; the style itself carries no dirty
/// state.
///
/// [`diff`]: AxesStyle::diff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesStyle {
    /// Data bounds the axes box is drawn around.
    pub bounds: BoundingBox,
    /// Axis name labels, x/y/z.
    pub labels: [String; 3],
    /// Data-space distance between consecutive ticks, per axis.
    pub tick_spacing: [f64; 3],
    /// Tick line width in pixels.
    pub tick_width: f32,
    /// Whether ticks are drawn, per axis.
    pub show_ticks: [bool; 3],
    /// Per-axis line/label colors.
    pub axis_colors: [Vec4; 3],
    /// Grid line color shared by all faces.
    pub grid_color: Vec4,
    /// Font family for tick and axis labels.
    pub font: String,
    /// Multiplier applied to label text size.
    pub text_scale: f32,
}

impl Default for AxesStyle {
    fn default() -> Self {
        let black = Vec4::new(0.0, 0.0, 0.0, 1.0);
        Self {
            bounds: BoundingBox::new(Vec3::splat(-10.0), Vec3::splat(10.0)),
            labels: ["x".to_string(), "y".to_string(), "z".to_string()],
            tick_spacing: [0.5; 3],
            tick_width: 1.0,
            show_ticks: [true; 3],
            axis_colors: [black; 3],
            grid_color: black,
            font: "sans-serif".to_string(),
            text_scale: 1.0,
        }
    }
}

/// Which fields changed between two [`AxesStyle`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleDiff {
    pub bounds: bool,
    pub labels: bool,
    pub tick_spacing: bool,
    pub tick_width: bool,
    pub show_ticks: bool,
    pub axis_colors: bool,
    pub grid_color: bool,
    pub font: bool,
    pub text_scale: bool,
}

/// Resource classes the renderer must rebuild after a style change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rebuilds {
    /// Grid/tick line vertex buffers.
    pub lines: bool,
    /// Label text meshes and their atlas.
    pub text: bool,
    /// Tick values themselves (positions changed, not just appearance).
    pub ticks: bool,
}

impl StyleDiff {
    pub fn any(&self) -> bool {
        *self != Self::default()
    }

    /// Map changed fields onto the rebuild classes they invalidate.
    ///
    /// Bounds and spacing move tick positions, so they invalidate lines,
    /// text and the tick values; labels, font and text scale only force the
    /// text meshes; colors and widths are uniforms and rebuild nothing.
    pub fn rebuilds(&self) -> Rebuilds {
        let ticks = self.bounds || self.tick_spacing;
        Rebuilds {
            lines: ticks || self.show_ticks,
            text: ticks || self.labels || self.font || self.text_scale,
            ticks,
        }
    }
}

impl AxesStyle {
    /// Field-by-field comparison against `other` (typically the previously
    /// applied style).
    pub fn diff(&self, other: &AxesStyle) -> StyleDiff {
        StyleDiff {
            bounds: self.bounds != other.bounds,
            labels: self.labels != other.labels,
            tick_spacing: self.tick_spacing != other.tick_spacing,
            tick_width: self.tick_width != other.tick_width,
            show_ticks: self.show_ticks != other.show_ticks,
            axis_colors: self.axis_colors != other.axis_colors,
            grid_color: self.grid_color != other.grid_color,
            font: self.font != other.font,
            text_scale: self.text_scale != other.text_scale,
        }
    }
}

/// Errors produced while validating an [`AxesStyle`].
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("bounds must be finite with min <= max on every axis")]
    InvalidBounds,
    #[error("tick spacing for axis {axis} must be positive and finite, got {value}")]
    InvalidTickSpacing { axis: usize, value: f64 },
    #[error("tick width must be non-negative and finite, got {0}")]
    InvalidTickWidth(f32),
    #[error("text scale must be non-negative and finite, got {0}")]
    InvalidTextScale(f32),
}

/// Basic sanity validation. Full option-schema validation belongs to the
/// embedding application; this only rejects values the geometry and tick
/// generation cannot work with.
pub fn validate_style(style: &AxesStyle) -> Result<(), StyleError> {
    if !style.bounds.is_valid() {
        return Err(StyleError::InvalidBounds);
    }
    for (axis, &value) in style.tick_spacing.iter().enumerate() {
        if !(value.is_finite() && value > 0.0) {
            return Err(StyleError::InvalidTickSpacing { axis, value });
        }
    }
    if !(style.tick_width.is_finite() && style.tick_width >= 0.0) {
        return Err(StyleError::InvalidTickWidth(style.tick_width));
    }
    if !(style.text_scale.is_finite() && style.text_scale >= 0.0) {
        return Err(StyleError::InvalidTextScale(style.text_scale));
    }
    Ok(())
}
