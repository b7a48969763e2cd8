//! Combined camera transform handed to the geometry core each frame.

use glam::{DMat4, Mat4};

/// Model/view/projection triple plus the projection kind.
///
/// `orthographic` is an explicit flag supplied by the caller; it is never
/// inferred from the matrix contents. It controls the "in front of the
/// camera" test during visibility classification: under glam's right-handed
/// perspective a point in front has clip `w > 0`, while an orthographic
/// projection keeps `w = 1` for every point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub orthographic: bool,
}

impl CameraTransform {
    pub fn new(model: Mat4, view: Mat4, projection: Mat4, orthographic: bool) -> Self {
        Self {
            model,
            view,
            projection,
            orthographic,
        }
    }

    /// Combined matrix, promoted to f64 for the geometry core.
    pub fn mvp(&self) -> DMat4 {
        (self.projection * self.view * self.model).as_dmat4()
    }
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            orthographic: false,
        }
    }
}
