//! Shared polygon-clipping and frustum-plane utilities.
//!
//! Two polygon flavors are clipped here: homogeneous clip-space polygons
//! (4D, tested against the canonical clip half-spaces) during visibility
//! tie-breaking, and box-space polygons (3D, tested against frustum planes
//! pulled out of the MVP matrix) during range estimation. Both use the same
//! Sutherland-Hodgman scheme: keep vertices on the non-negative side of each
//! plane, emitting an interpolated vertex wherever an edge crosses it.

use glam::{DMat4, DVec3, DVec4};

/// Canonical clip-space half-spaces, positive side inside the view volume.
///
/// glam's `_rh` projections produce clip z in `[0, w]` (not GL's `[-w, w]`),
/// so the near plane is `z >= 0` rather than `z + w >= 0`. Each plane `p`
/// admits the homogeneous vertex `v` when `p.dot(v) >= 0`.
pub const CLIP_PLANES: [DVec4; 6] = [
    DVec4::new(1.0, 0.0, 0.0, 1.0),  // left:   x + w >= 0
    DVec4::new(-1.0, 0.0, 0.0, 1.0), // right:  w - x >= 0
    DVec4::new(0.0, 1.0, 0.0, 1.0),  // bottom: y + w >= 0
    DVec4::new(0.0, -1.0, 0.0, 1.0), // top:    w - y >= 0
    DVec4::new(0.0, 0.0, 1.0, 0.0),  // near:   z >= 0
    DVec4::new(0.0, 0.0, -1.0, 1.0), // far:    w - z >= 0
];

/// Extract the 6 frustum half-space planes of `mvp` in box space.
///
/// Gribb-Hartmann row combinations of the matrix (`row_w ± row_{x,y}` plus
/// the `[0, w]`-range near/far pair). A plane `(a, b, c, d)` admits the point
/// `p` when `a·p.x + b·p.y + c·p.z + d >= 0`; no normalization is applied
/// since clipping only needs sign and ratio.
pub fn frustum_planes(mvp: &DMat4) -> [DVec4; 6] {
    // glam stores columns; reassemble rows by component.
    let r0 = DVec4::new(mvp.x_axis.x, mvp.y_axis.x, mvp.z_axis.x, mvp.w_axis.x);
    let r1 = DVec4::new(mvp.x_axis.y, mvp.y_axis.y, mvp.z_axis.y, mvp.w_axis.y);
    let r2 = DVec4::new(mvp.x_axis.z, mvp.y_axis.z, mvp.z_axis.z, mvp.w_axis.z);
    let r3 = DVec4::new(mvp.x_axis.w, mvp.y_axis.w, mvp.z_axis.w, mvp.w_axis.w);

    [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r2, r3 - r2]
}

/// Clip a homogeneous polygon against one clip-space half-space.
pub fn split_clip_polygon(poly: &[DVec4], plane: DVec4) -> Vec<DVec4> {
    split_polygon(poly, |v| plane.dot(*v), |a, b, t| a.lerp(*b, t))
}

/// Clip a box-space polygon against one frustum plane `(a, b, c, d)`.
pub fn split_polygon_3d(poly: &[DVec3], plane: DVec4) -> Vec<DVec3> {
    split_polygon(
        poly,
        |p| plane.truncate().dot(*p) + plane.w,
        |a, b, t| a.lerp(*b, t),
    )
}

fn split_polygon<V: Copy>(
    poly: &[V],
    distance: impl Fn(&V) -> f64,
    lerp: impl Fn(&V, &V, f64) -> V,
) -> Vec<V> {
    let mut out = Vec::with_capacity(poly.len() + 1);
    for (i, a) in poly.iter().enumerate() {
        let b = &poly[(i + 1) % poly.len()];
        let da = distance(a);
        let db = distance(b);
        if !da.is_finite() || !db.is_finite() {
            // Degenerate input; drop the edge rather than emit NaN vertices.
            continue;
        }
        if da >= 0.0 {
            out.push(*a);
        }
        if (da >= 0.0) != (db >= 0.0) {
            let t = da / (da - db);
            out.push(lerp(a, b, t));
        }
    }
    out
}

/// Screen-space area of a homogeneous quad after clipping to the view volume.
///
/// Clips against all six [`CLIP_PLANES`]; fewer than three surviving vertices
/// means the quad is off screen and the area is 0. The remainder is fanned
/// into triangles and accumulated via cross products of the
/// perspective-divided x/y coordinates (twice the geometric area, which is
/// all the comparisons downstream need). Vertices whose divide is not finite
/// contribute nothing.
pub fn clipped_screen_area(quad: [DVec4; 4]) -> f64 {
    let mut poly: Vec<DVec4> = quad.to_vec();
    for plane in CLIP_PLANES {
        poly = split_clip_polygon(&poly, plane);
        if poly.len() < 3 {
            return 0.0;
        }
    }

    let screen = |v: &DVec4| -> Option<(f64, f64)> {
        let (x, y) = (v.x / v.w, v.y / v.w);
        (x.is_finite() && y.is_finite()).then_some((x, y))
    };

    let Some((ax, ay)) = screen(&poly[0]) else {
        return 0.0;
    };
    let mut area = 0.0;
    for pair in poly[1..].windows(2) {
        let (Some((bx, by)), Some((cx, cy))) = (screen(&pair[0]), screen(&pair[1])) else {
            continue;
        };
        let (ux, uy) = (bx - ax, by - ay);
        let (vx, vy) = (cx - ax, cy - ay);
        area += (ux * vy - uy * vx).abs();
    }
    area
}
