//! View-dependent geometry for annotated 3D plot axes.
//!
//! When a plot draws grid lines, tick marks and labels around an axis-aligned
//! data box, the decoration has to move with the camera: ticks belong on the
//! box edges the viewer can actually see, and label density has to follow how
//! many screen pixels one data unit currently covers. This crate computes
//! exactly that, once per frame, from the camera transform and the box bounds:
//!
//! - [`core::classify_cube`] picks the camera-nearest cube corner and derives
//!   which face of the box is front-facing along each axis, plus a per-axis
//!   corner pattern anchoring tick geometry to an unoccluded edge.
//! - [`core::axis_ranges`] clips the box faces against the view frustum to
//!   report, per axis, the data range currently on screen and the minimum
//!   pixel density of one data unit.
//!
//! Everything downstream of these results (vertex buffers, shaders, text
//! rasterization) is the renderer's concern. All entry points are pure
//! functions of their inputs; nothing is cached between frames.

pub mod core;
pub mod styling;
pub mod ticks;

pub use crate::core::{
    axis_ranges, classify_cube, AxisRange, BoundingBox, Camera, CameraTransform, CubeVisibility,
    ProjectionType,
};
pub use styling::{validate_style, AxesStyle, Rebuilds, StyleDiff, StyleError};
pub use ticks::Tick;
