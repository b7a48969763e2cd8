//! Per-axis visible-range and pixel-density estimation.
//!
//! Clips each face of the axes box against the view frustum to find, for
//! every axis, the data interval currently on screen and how many screen
//! pixels one data unit covers. The renderer uses the former to cull tick
//! values and the latter to thin tick labels as the camera pulls back.

use crate::core::clip::{frustum_planes, split_polygon_3d};
use crate::core::project::project_point;
use crate::core::{BoundingBox, CameraTransform};
use glam::{DMat4, DVec3};

/// Visible sub-range of one axis plus its screen-pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Smallest data-space coordinate of this axis inside the frustum.
    pub lo: f64,
    /// Largest data-space coordinate of this axis inside the frustum.
    pub hi: f64,
    /// Minimum screen pixels covered by one data unit along this axis over
    /// the visible region; `+∞` when no finite sample exists, in which case
    /// the caller should fall back to a default tick spacing.
    pub pixels_per_data_unit: f64,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            lo: f64::INFINITY,
            hi: f64::NEG_INFINITY,
            pixels_per_data_unit: f64::INFINITY,
        }
    }
}

impl AxisRange {
    /// True when no part of this axis's extent is inside the frustum.
    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }
}

/// Estimate the visible range and pixel density of each axis.
///
/// Each of the six box faces is clipped against the six frustum half-spaces
/// in box space; faces reduced below a triangle contribute nothing. Every
/// surviving vertex widens the lo/hi interval of all three axes and, for the
/// two axes spanning the face, contributes a finite-difference density
/// sample (the face's own normal axis is excluded, since density must be
/// measured orthogonally to the displaced axis).
pub fn axis_ranges(
    transform: &CameraTransform,
    bounds: &BoundingBox,
    viewport_px: (u32, u32),
) -> [AxisRange; 3] {
    let mut ranges = [AxisRange::default(); 3];
    if !bounds.is_valid() {
        log::trace!(target: "axes3d", "axis_ranges: invalid bounds, reporting empty ranges");
        return ranges;
    }

    let mvp = transform.mvp();
    let ortho = transform.orthographic;
    let planes = frustum_planes(&mvp);
    let width = viewport_px.0.max(1) as f64;
    let height = viewport_px.1.max(1) as f64;

    for d in 0..3 {
        let u = (d + 1) % 3;
        let v = (d + 2) % 3;

        'faces: for side in 0..2 {
            // The face quad at the lo (side 0) or hi (side 1) bound of axis d.
            let (lo_d, hi_d) = bounds.axis(d);
            let (lo_u, hi_u) = bounds.axis(u);
            let (lo_v, hi_v) = bounds.axis(v);
            let held = if side == 0 { lo_d } else { hi_d };
            let corner = |fu: f64, fv: f64| {
                let mut p = DVec3::ZERO;
                p[d] = held;
                p[u] = fu;
                p[v] = fv;
                p
            };
            let mut poly = vec![
                corner(lo_u, lo_v),
                corner(hi_u, lo_v),
                corner(hi_u, hi_v),
                corner(lo_u, hi_v),
            ];

            for plane in planes {
                poly = split_polygon_3d(&poly, plane);
                if poly.len() < 3 {
                    continue 'faces;
                }
            }

            for point in &poly {
                let gradient = pixel_gradient(&mvp, ortho, *point, width, height);
                for k in 0..3 {
                    ranges[k].lo = ranges[k].lo.min(point[k]);
                    ranges[k].hi = ranges[k].hi.max(point[k]);
                    if k != d {
                        ranges[k].pixels_per_data_unit =
                            ranges[k].pixels_per_data_unit.min(gradient[k].abs());
                    }
                }
            }
        }
    }

    ranges
}

/// Screen-pixel displacement per data unit at `point`, per axis, by central
/// finite difference: reproject the point displaced ±1 data unit and take a
/// quarter of the resulting pixel distance (two units of displacement across
/// a two-unit-wide NDC span). A perturbed point falling behind the camera
/// makes that axis's sample `+∞` so off-screen geometry never drags the
/// density estimate down.
fn pixel_gradient(
    mvp: &DMat4,
    orthographic: bool,
    point: DVec3,
    width: f64,
    height: f64,
) -> [f64; 3] {
    let mut result = [f64::INFINITY; 3];
    for (k, slot) in result.iter_mut().enumerate() {
        let mut step = DVec3::ZERO;
        step[k] = 1.0;

        let fwd = project_point(mvp, point + step);
        let back = project_point(mvp, point - step);
        if !fwd.in_front(orthographic) || !back.in_front(orthographic) {
            continue;
        }
        let a = fwd.ndc();
        let b = back.ndc();
        let dx = (b.x - a.x) * width;
        let dy = (b.y - a.y) * height;
        let distance = 0.25 * (dx * dx + dy * dy).sqrt();
        if distance.is_finite() {
            *slot = distance;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    const VIEWPORT: (u32, u32) = (800, 600);

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    fn perspective_from(position: Vec3) -> CameraTransform {
        let view = Mat4::look_at_rh(position, Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        CameraTransform::new(Mat4::IDENTITY, view, projection, false)
    }

    #[test]
    fn fully_visible_box_reports_full_extent() {
        let ranges = axis_ranges(&perspective_from(Vec3::new(0.0, 0.0, 8.0)), &unit_box(), VIEWPORT);
        for d in 0..3 {
            assert!((ranges[d].lo - -1.0).abs() < 1e-6, "axis {d} lo");
            assert!((ranges[d].hi - 1.0).abs() < 1e-6, "axis {d} hi");
            assert!(ranges[d].pixels_per_data_unit.is_finite());
            assert!(ranges[d].pixels_per_data_unit > 0.0);
        }
    }

    #[test]
    fn box_outside_frustum_reports_empty_ranges() {
        // Looking straight away from the box.
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 10.0), Vec3::Y);
        let projection = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let t = CameraTransform::new(Mat4::IDENTITY, view, projection, false);
        let ranges = axis_ranges(&t, &unit_box(), VIEWPORT);
        for d in 0..3 {
            assert!(ranges[d].is_empty(), "axis {d}");
            assert_eq!(ranges[d].pixels_per_data_unit, f64::INFINITY);
        }
    }

    #[test]
    fn partially_visible_box_narrows_the_range() {
        // Pan the camera so the lo-x edge of the box leaves the view.
        let eye = Vec3::new(1.5, 0.0, 6.0);
        let target = Vec3::new(1.5, 0.0, 0.0);
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let projection = Mat4::perspective_rh(30.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let t = CameraTransform::new(Mat4::IDENTITY, view, projection, false);
        let ranges = axis_ranges(&t, &unit_box(), VIEWPORT);
        assert!(!ranges[0].is_empty());
        assert!(ranges[0].lo > -1.0 + 1e-6, "lo-x edge must be clipped away");
        assert!((ranges[0].hi - 1.0).abs() < 1e-6);
    }

    #[test]
    fn density_roughly_halves_when_distance_doubles() {
        let near = axis_ranges(&perspective_from(Vec3::new(0.0, 0.0, 5.0)), &unit_box(), VIEWPORT);
        let far = axis_ranges(&perspective_from(Vec3::new(0.0, 0.0, 10.0)), &unit_box(), VIEWPORT);
        for d in 0..2 {
            let ratio = near[d].pixels_per_data_unit / far[d].pixels_per_data_unit;
            assert!(
                (1.5..=2.5).contains(&ratio),
                "axis {d}: expected ~2x density falloff, got {ratio}"
            );
        }
    }

    #[test]
    fn orthographic_density_is_distance_invariant() {
        let projection = Mat4::orthographic_rh(-2.0, 2.0, -2.0, 2.0, 0.1, 100.0);
        let make = |z: f32| {
            let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, z), Vec3::ZERO, Vec3::Y);
            CameraTransform::new(Mat4::IDENTITY, view, projection, true)
        };
        let near = axis_ranges(&make(5.0), &unit_box(), VIEWPORT);
        let far = axis_ranges(&make(50.0), &unit_box(), VIEWPORT);
        for d in 0..2 {
            let ratio = near[d].pixels_per_data_unit / far[d].pixels_per_data_unit;
            assert!((ratio - 1.0).abs() < 1e-6, "axis {d}");
        }
    }

    #[test]
    fn invalid_bounds_report_empty() {
        let inverted = BoundingBox::new(Vec3::ONE, -Vec3::ONE);
        let ranges = axis_ranges(&perspective_from(Vec3::new(0.0, 0.0, 5.0)), &inverted, VIEWPORT);
        assert!(ranges.iter().all(|r| r.is_empty()));
    }
}
