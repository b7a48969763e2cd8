//! Geometry core: projection, visibility classification and range estimation.
//!
//! This module provides the pieces the axes renderer consumes every frame:
//! the data bounding box and its cube-corner encoding, the camera transform,
//! corner projection into clip space, the face-visibility classifier and the
//! frustum range estimator.

pub mod bounds;
pub mod camera;
pub mod clip;
pub mod project;
pub mod range;
pub mod transform;
pub mod visibility;

pub use bounds::BoundingBox;
pub use camera::{Camera, ProjectionType};
pub use project::{project_corners, ProjectedVertex};
pub use range::{axis_ranges, AxisRange};
pub use transform::CameraTransform;
pub use visibility::{classify_cube, CubeVisibility};
