//! Tick generation, formatting and density-driven decimation.
//!
//! The geometry core reports where the box is on screen and how dense a data
//! unit is in pixels; this module turns that into concrete tick values and
//! labels for the renderer to draw.

use crate::core::{AxisRange, BoundingBox};
use serde::{Deserialize, Serialize};

/// A single tick mark: a data-space position and its label text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Tick {
    pub fn new(value: f64) -> Self {
        Self {
            label: format_tick_label(value),
            value,
        }
    }
}

/// Generate default ticks for all three axes: multiples of the per-axis
/// spacing walking outward from zero, covering the box bounds, sorted
/// ascending. Non-positive or non-finite spacing yields no ticks for that
/// axis.
pub fn default_ticks(bounds: &BoundingBox, spacing: [f64; 3]) -> [Vec<Tick>; 3] {
    std::array::from_fn(|d| {
        let step = spacing[d];
        if !(step.is_finite() && step > 0.0) {
            return Vec::new();
        }
        let (lo, hi) = bounds.axis(d);
        let mut ticks = Vec::new();
        let mut t = 0.0;
        while t <= hi {
            ticks.push(Tick::new(t));
            t += step;
        }
        let mut t = -step;
        while t >= lo {
            ticks.push(Tick::new(t));
            t -= step;
        }
        ticks.sort_by(|a, b| a.value.total_cmp(&b.value));
        ticks
    })
}

/// Calculate nice tick intervals for axis labeling
pub fn calculate_tick_interval(range: f64) -> f64 {
    let magnitude = 10.0_f64.powf(range.log10().floor());
    let normalized = range / magnitude;

    let nice_interval = if normalized <= 1.0 {
        0.2
    } else if normalized <= 2.0 {
        0.5
    } else if normalized <= 5.0 {
        1.0
    } else {
        2.0
    };

    nice_interval * magnitude
}

/// Round a raw step up to the nearest 1/2/5 ladder value.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let pow10 = 10.0_f64.powf(raw.log10().floor());
    let norm = raw / pow10;
    let mult = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    mult * pow10
}

/// Format a tick label value for display
pub fn format_tick_label(value: f64) -> String {
    if value.abs() < 0.001 {
        "0".to_string()
    } else if value.abs() >= 1000.0 || value.fract().abs() < 0.001 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Thin a tick list to the portion of the axis currently on screen, keeping
/// labels at least `min_label_px` apart at the estimated pixel density.
///
/// An empty range drops everything. An infinite density estimate (nothing
/// measurable on screen) keeps range filtering but skips the stride, since
/// there is no meaningful spacing to enforce.
pub fn decimate(ticks: &[Tick], range: &AxisRange, min_label_px: f64) -> Vec<Tick> {
    if range.is_empty() {
        return Vec::new();
    }
    let visible: Vec<&Tick> = ticks
        .iter()
        .filter(|t| t.value >= range.lo && t.value <= range.hi)
        .collect();

    let stride = if range.pixels_per_data_unit.is_finite() && visible.len() >= 2 {
        // Data-space gap between consecutive ticks, assumed uniform.
        let gap = (visible[1].value - visible[0].value).abs();
        let px_per_tick = gap * range.pixels_per_data_unit;
        if px_per_tick > 0.0 {
            (min_label_px / px_per_tick).ceil().max(1.0) as usize
        } else {
            1
        }
    } else {
        1
    };

    visible
        .into_iter()
        .step_by(stride.max(1))
        .cloned()
        .collect()
}
