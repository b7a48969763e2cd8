//! Camera for 3D plot navigation.
//!
//! Provides perspective and orthographic cameras and builds the
//! [`CameraTransform`] consumed by the geometry core. Input handling
//! (mouse orbit/pan/zoom) lives with the host application, not here.

use crate::core::{BoundingBox, CameraTransform};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Camera projection type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectionType {
    Perspective {
        fov: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

impl Default for ProjectionType {
    fn default() -> Self {
        Self::Perspective {
            fov: 45.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Interactive camera for 3D plotting.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    pub projection: ProjectionType,
    pub aspect_ratio: f32,

    // Cached matrices
    view_matrix: Mat4,
    projection_matrix: Mat4,
    view_proj_dirty: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Create a new camera with default 3D settings.
    pub fn new() -> Self {
        let mut camera = Self {
            // Isometric-ish starting view with Z up, as plot viewports default to.
            position: Vec3::new(3.5, 3.5, 3.5),
            target: Vec3::ZERO,
            up: Vec3::Z,
            projection: ProjectionType::default(),
            aspect_ratio: 16.0 / 9.0,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_proj_dirty: true,
        };
        camera.update_matrices();
        camera
    }

    /// Create a perspective camera at an explicit position looking at a target.
    pub fn perspective(position: Vec3, target: Vec3, up: Vec3, fov: f32) -> Self {
        let mut camera = Self {
            position,
            target,
            up,
            projection: ProjectionType::Perspective {
                fov,
                near: 0.1,
                far: 100.0,
            },
            aspect_ratio: 1.0,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_proj_dirty: true,
        };
        camera.update_matrices();
        camera
    }

    /// Create an orthographic camera with square view bounds of the given half extent.
    pub fn orthographic(position: Vec3, target: Vec3, up: Vec3, half_extent: f32) -> Self {
        let mut camera = Self {
            position,
            target,
            up,
            projection: ProjectionType::Orthographic {
                left: -half_extent,
                right: half_extent,
                bottom: -half_extent,
                top: half_extent,
                near: 0.1,
                far: 100.0,
            },
            aspect_ratio: 1.0,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_proj_dirty: true,
        };
        camera.update_matrices();
        camera
    }

    /// Whether the current projection is orthographic.
    ///
    /// Determined by the projection variant, never by inspecting the
    /// projection matrix.
    pub fn is_orthographic(&self) -> bool {
        matches!(self.projection, ProjectionType::Orthographic { .. })
    }

    /// Update aspect ratio (call when the viewport resizes).
    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.view_proj_dirty = true;
    }

    /// Mark the camera matrices as dirty (call after manually modifying projection).
    pub fn mark_dirty(&mut self) {
        self.view_proj_dirty = true;
    }

    /// Get the view matrix
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.view_proj_dirty {
            self.update_matrices();
        }
        self.view_matrix
    }

    /// Get the projection matrix
    pub fn projection_matrix(&mut self) -> Mat4 {
        if self.view_proj_dirty {
            self.update_matrices();
        }
        self.projection_matrix
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&mut self) -> Mat4 {
        if self.view_proj_dirty {
            self.update_matrices();
        }
        self.projection_matrix * self.view_matrix
    }

    /// Build the transform handed to the geometry core for a given model matrix.
    pub fn transform(&mut self, model: Mat4) -> CameraTransform {
        let orthographic = self.is_orthographic();
        CameraTransform::new(
            model,
            self.view_matrix(),
            self.projection_matrix(),
            orthographic,
        )
    }

    /// Set camera to look at a specific target
    pub fn look_at(&mut self, target: Vec3, distance: Option<f32>) {
        self.target = target;

        if let Some(dist) = distance {
            let direction = (self.position - self.target).normalize();
            self.position = self.target + direction * dist;
        }

        self.view_proj_dirty = true;
    }

    /// Fit the camera to show all data within the given bounds
    pub fn fit_bounds(&mut self, bounds: &BoundingBox) {
        let center = bounds.center();
        let size = bounds.size();

        match &mut self.projection {
            ProjectionType::Perspective { near, far, .. } => {
                let max_size = size.x.max(size.y).max(size.z);
                let distance = max_size * 2.0; // Ensure everything fits

                self.target = center;
                let direction = (self.position - self.target).normalize();
                self.position = self.target + direction * distance;

                // Keep clip planes sane relative to the new view distance.
                let radius = (size.length() * 0.5).max(1e-3);
                let dist = (self.position - self.target).length().max(1e-3);
                let desired_near = (dist - radius * 4.0).max(0.01);
                let desired_far = (dist + radius * 4.0).max(desired_near + 1.0);
                *near = desired_near;
                *far = desired_far;
            }
            ProjectionType::Orthographic {
                left,
                right,
                bottom,
                top,
                ..
            } => {
                let margin = 0.1; // 10% margin
                let width = size.x * (1.0 + margin);
                let height = size.y.max(size.z) * (1.0 + margin);

                // Maintain aspect ratio
                let display_width = width.max(height * self.aspect_ratio);
                let display_height = height.max(width / self.aspect_ratio);

                *left = center.x - display_width / 2.0;
                *right = center.x + display_width / 2.0;
                *bottom = center.y - display_height / 2.0;
                *top = center.y + display_height / 2.0;

                self.target = center;
            }
        }

        self.view_proj_dirty = true;
    }

    /// Update the view and projection matrices
    fn update_matrices(&mut self) {
        self.view_matrix = Mat4::look_at_rh(self.position, self.target, self.up);

        self.projection_matrix = match self.projection {
            ProjectionType::Perspective { fov, near, far } => {
                Mat4::perspective_rh(fov, self.aspect_ratio, near, far)
            }
            ProjectionType::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => {
                log::trace!(
                    target: "axes3d",
                    "ortho matrix bounds l={} r={} b={} t={} n={} f={}",
                    left, right, bottom, top, near, far
                );
                Mat4::orthographic_rh(left, right, bottom, top, near, far)
            }
        };

        self.view_proj_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new();
        assert_eq!(camera.position, Vec3::new(3.5, 3.5, 3.5));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.up, Vec3::Z);
        assert!(!camera.is_orthographic());
    }

    #[test]
    fn test_transform_sets_orthographic_flag() {
        let mut persp = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 0.8);
        assert!(!persp.transform(Mat4::IDENTITY).orthographic);

        let mut ortho = Camera::orthographic(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 2.0);
        assert!(ortho.transform(Mat4::IDENTITY).orthographic);
    }

    #[test]
    fn test_look_at_preserves_distance() {
        let mut camera = Camera::new();
        camera.look_at(Vec3::new(1.0, 1.0, 0.0), Some(10.0));
        assert!(((camera.position - camera.target).length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_fit_bounds_centers_target() {
        let mut camera = Camera::new();
        let bounds = BoundingBox::new(Vec3::new(-5.0, -3.0, -1.0), Vec3::new(5.0, 3.0, 1.0));
        camera.fit_bounds(&bounds);
        assert_eq!(camera.target, Vec3::ZERO);
    }
}
