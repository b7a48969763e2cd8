//! Face-visibility classification for the axes box.
//!
//! Given the camera transform and the data bounds, this decides which cube
//! corner is nearest the camera and, from it, which face pair along each
//! axis faces the viewer, plus the corner pattern anchoring each axis's
//! tick/grid geometry to an unoccluded edge of the projected cube.

use crate::core::clip::clipped_screen_area;
use crate::core::project::project_corners;
use crate::core::{BoundingBox, CameraTransform};
use glam::{DVec3, DVec4};

/// Relative epsilon for the orientation predicate; scaled by the cube of the
/// largest projected coordinate magnitude involved.
const ORIENT_EPSILON: f64 = 1e-10;

/// Result of classifying the axes box against the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeVisibility {
    /// Cube corner index nearest the camera.
    pub closest: u8,
    /// Corner diagonally opposite `closest`; always `closest ^ 7`.
    pub farthest: u8,
    /// Per axis, a 3-bit corner pattern locating the visible edge that
    /// carries this axis's ticks. Bit `j` (for `j != d`) picks the hi face
    /// along axis `j`; bit `d` itself is always clear.
    pub edge_selector: [u8; 3],
    /// Outward normal direction of the camera-facing face along each axis:
    /// `+1` when the hi face fronts the camera, `-1` when the lo face does.
    pub axis_sign: [i32; 3],
}

impl Default for CubeVisibility {
    /// Fixed fallback for degenerate inputs: corner 0 nearest, all lo faces
    /// camera-facing.
    fn default() -> Self {
        Self {
            closest: 0,
            farthest: 7,
            edge_selector: [0; 3],
            axis_sign: [-1; 3],
        }
    }
}

/// Tri-state outcome of the face orientation predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing {
    Front,
    Back,
    Ambiguous,
}

impl Facing {
    fn score(self) -> i32 {
        match self {
            Facing::Front => 1,
            Facing::Back => -1,
            Facing::Ambiguous => 0,
        }
    }
}

/// Classify the box against the camera.
///
/// Pure function of its arguments; never panics. Degenerate inputs (zero or
/// inverted bounds, singular transforms) degrade to [`CubeVisibility::default`]
/// semantics instead of propagating NaN.
pub fn classify_cube(transform: &CameraTransform, bounds: &BoundingBox) -> CubeVisibility {
    if !bounds.is_valid() {
        log::trace!(target: "axes3d", "classify_cube: invalid bounds, using default corner");
        return CubeVisibility::default();
    }

    let mvp = transform.mvp();
    let ortho = transform.orthographic;
    let verts = project_corners(&mvp, bounds);
    let ndc: [DVec3; 8] = std::array::from_fn(|i| verts[i].ndc());

    // Fast path: the corner with minimal screen depth among those in front
    // of the camera. Correct whenever the camera clearly sees one corner as
    // nearest; fails only edge-on or with the camera inside/behind the box.
    let mut closest: Option<usize> = None;
    for i in 0..8 {
        if !verts[i].in_front(ortho) {
            continue;
        }
        let depth = verts[i].depth(ortho);
        if !depth.is_finite() {
            continue;
        }
        match closest {
            Some(c) if depth >= verts[c].depth(ortho) => {}
            _ => closest = Some(i),
        }
    }

    let closest = match closest {
        Some(c) => c,
        // Degenerate fallback: classify each axis independently by face
        // orientation, tie-breaking edge-on axes by clipped screen area.
        None => {
            log::trace!(target: "axes3d", "classify_cube: no corner in front, using orientation fallback");
            let mut c = 0usize;
            for d in 0..3 {
                if hi_face_fronts_camera(d, &ndc, &verts) {
                    c |= 1 << d;
                }
            }
            c
        }
    };
    let farthest = closest ^ 7;

    // Lowest remaining corner on screen anchors the visible edge loop.
    let mut bottom = usize::MAX;
    for i in 0..8 {
        if i == closest || i == farthest {
            continue;
        }
        if bottom == usize::MAX || ndc[i].y < ndc[bottom].y {
            bottom = i;
        }
    }

    // Left/right neighbors of `bottom`, reached by flipping one bit and
    // skipping any flip that lands on closest/farthest. At most one of the
    // three neighbors can be excluded, so both always exist.
    let mut left = usize::MAX;
    for i in 0..3 {
        let idx = bottom ^ (1 << i);
        if idx == closest || idx == farthest {
            continue;
        }
        if left == usize::MAX || ndc[idx].x < ndc[left].x {
            left = idx;
        }
    }
    let mut right = usize::MAX;
    for i in 0..3 {
        let idx = bottom ^ (1 << i);
        if idx == closest || idx == farthest || idx == left {
            continue;
        }
        if right == usize::MAX || ndc[idx].x > ndc[right].x {
            right = idx;
        }
    }
    if left == usize::MAX || right == usize::MAX {
        return CubeVisibility::default();
    }

    // Each visible edge runs along the axis named by the flipped bit; the
    // AND of its endpoints records which side of the other two axes it sits
    // on, which is exactly where ticks must be anchored.
    let mut edge_selector = [0u8; 3];
    edge_selector[bit_axis(left ^ bottom)] = (bottom & left) as u8;
    edge_selector[bit_axis(bottom ^ right)] = (bottom & right) as u8;
    let mut top = right ^ 7;
    if top == closest || top == farthest {
        top = left ^ 7;
        edge_selector[bit_axis(right ^ top)] = (top & right) as u8;
    } else {
        edge_selector[bit_axis(left ^ top)] = (top & left) as u8;
    }

    // The walk can hand an axis an edge whose two touching faces both turn
    // away from the camera (happens when the camera sits inside one axis
    // pair's slab but outside the box); ticks there would hide behind the
    // box. Flip such an edge onto a decisively front-facing face.
    for d in 0..3 {
        let u = (d + 1) % 3;
        let v = (d + 2) % 3;
        let sel = edge_selector[d] as usize;
        let su = (sel >> u) & 1;
        let sv = (sel >> v) & 1;
        if face_winding(&ndc, u, su) != Facing::Back || face_winding(&ndc, v, sv) != Facing::Back {
            continue;
        }
        if face_winding(&ndc, u, su ^ 1) == Facing::Front {
            edge_selector[d] ^= 1 << u;
        } else if face_winding(&ndc, v, sv ^ 1) == Facing::Front {
            edge_selector[d] ^= 1 << v;
        }
    }

    let axis_sign = std::array::from_fn(|d| if closest & (1 << d) != 0 { 1 } else { -1 });

    CubeVisibility {
        closest: closest as u8,
        farthest: farthest as u8,
        edge_selector,
        axis_sign,
    }
}

/// Axis index of a single-bit value (1, 2 or 4).
fn bit_axis(v: usize) -> usize {
    debug_assert!(v.is_power_of_two() && v < 8);
    v.trailing_zeros() as usize
}

/// Outward-wound corner triangle for the face at `side` (0 = lo, 1 = hi)
/// along `axis`. A front-facing face yields a counter-clockwise triangle on
/// screen.
fn face_tri(axis: usize, side: usize) -> [usize; 3] {
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;
    let f0 = side << axis;
    if side == 0 {
        [f0, f0 | (1 << v), f0 | (1 << u)]
    } else {
        [f0, f0 | (1 << u), f0 | (1 << v)]
    }
}

/// Screen-space winding of one box face, with a relative ambiguity band.
///
/// Unlike [`orient_face`] this reads only the projected x/y turn direction,
/// which is the viewer's actual front/back judgement once every vertex is in
/// front of the camera.
fn face_winding(ndc: &[DVec3; 8], axis: usize, side: usize) -> Facing {
    let [a, b, c] = face_tri(axis, side).map(|i| ndc[i]);
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Facing::Ambiguous;
    }

    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    let scale = a
        .truncate()
        .abs()
        .max_element()
        .max(b.truncate().abs().max_element())
        .max(c.truncate().abs().max_element())
        .max(1.0);
    let tolerance = ORIENT_EPSILON * scale * scale;

    if cross > tolerance {
        Facing::Front
    } else if cross < -tolerance {
        Facing::Back
    } else {
        Facing::Ambiguous
    }
}

/// Decide whether the hi face along axis `d` fronts the camera when no
/// projected corner passed the in-front test.
fn hi_face_fronts_camera(d: usize, ndc: &[DVec3; 8], verts: &[crate::core::ProjectedVertex; 8]) -> bool {
    let u = (d + 1) % 3;
    let v = (d + 2) % 3;

    let lo = orient_face(ndc, face_tri(d, 0));
    let hi = orient_face(ndc, face_tri(d, 1));

    if lo.score() != hi.score() {
        // Exactly one face is decisively the more front-facing one.
        return hi.score() > lo.score();
    }

    // Edge-on along this axis: whichever face survives frustum clipping with
    // the larger screen area fronts the camera. Equal (including both fully
    // clipped) deterministically keeps the lo face, so the selection cannot
    // flicker between frames.
    let quad = |s: usize| -> [DVec4; 4] {
        let f0 = s << d;
        [
            verts[f0].clip,
            verts[f0 | (1 << u)].clip,
            verts[f0 | (1 << u) | (1 << v)].clip,
            verts[f0 | (1 << v)].clip,
        ]
    };
    clipped_screen_area(quad(1)) > clipped_screen_area(quad(0))
}

/// Signed-volume orientation predicate over three projected face vertices
/// and the coordinate origin, with a relative ambiguity tolerance.
fn orient_face(ndc: &[DVec3; 8], tri: [usize; 3]) -> Facing {
    let a = ndc[tri[0]];
    let b = ndc[tri[1]];
    let c = ndc[tri[2]];
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Facing::Ambiguous;
    }

    // det [a; b; c] = signed volume of the tetrahedron spanned with origin.
    let det = a.dot(b.cross(c));
    let scale = a
        .abs()
        .max_element()
        .max(b.abs().max_element())
        .max(c.abs().max_element())
        .max(1.0);
    let tolerance = ORIENT_EPSILON * scale * scale * scale;

    if det > tolerance {
        Facing::Front
    } else if det < -tolerance {
        Facing::Back
    } else {
        Facing::Ambiguous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProjectedVertex;
    use glam::{Mat4, Vec3, Vec4};

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    fn perspective_from(position: Vec3) -> CameraTransform {
        let view = Mat4::look_at_rh(position, Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        CameraTransform::new(Mat4::IDENTITY, view, projection, false)
    }

    #[test]
    fn camera_on_positive_z_sees_hi_z_face() {
        let result = classify_cube(&perspective_from(Vec3::new(0.0, 0.0, 5.0)), &unit_box());
        assert_ne!(result.closest & 4, 0, "closest corner must lie on the hi-z face");
        assert_eq!(result.farthest, result.closest ^ 7);
        assert_eq!(result.axis_sign[2], 1);
    }

    #[test]
    fn camera_on_negative_x_sees_lo_x_face() {
        let result = classify_cube(&perspective_from(Vec3::new(-6.0, 0.0, 0.0)), &unit_box());
        assert_eq!(result.closest & 1, 0);
        assert_eq!(result.axis_sign[0], -1);
    }

    #[test]
    fn diagonal_camera_sees_all_hi_faces() {
        let result = classify_cube(&perspective_from(Vec3::new(5.0, 5.0, 5.0)), &unit_box());
        assert_eq!(result.closest, 7);
        assert_eq!(result.farthest, 0);
        assert_eq!(result.axis_sign, [1, 1, 1]);
    }

    #[test]
    fn edge_selector_bits_exclude_own_axis() {
        let result = classify_cube(&perspective_from(Vec3::new(4.0, 3.0, 5.0)), &unit_box());
        for d in 0..3 {
            assert_eq!(result.edge_selector[d] as usize & (1 << d), 0, "axis {d}");
            assert!(result.edge_selector[d] < 8);
        }
    }

    #[test]
    fn slab_interior_camera_keeps_tick_edges_on_front_faces() {
        // Camera inside the y slab but far outside x and z: only two faces
        // are visible, and the naive silhouette walk hands the z axis an
        // edge hidden behind the box unless it is flipped onto a front face.
        let half = Vec3::new(0.906, 3.427, 2.591);
        let bounds = BoundingBox::new(-half, half);
        let eye = Vec3::new(-27.66, -1.55, -37.27);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 200.0);
        let t = CameraTransform::new(Mat4::IDENTITY, view, projection, false);

        let result = classify_cube(&t, &bounds);
        for d in 0..3 {
            let sel = result.edge_selector[d] as usize;
            // Outward-normal test of the two faces touching the edge.
            let fronts = (0..3).filter(|&j| j != d).any(|j| {
                let sign = if (sel >> j) & 1 == 1 { 1.0 } else { -1.0 };
                sign * (eye[j] - sign * half[j]) > 0.0
            });
            assert!(fronts, "axis {d}: edge {sel:03b} lies behind the box");
        }
    }

    #[test]
    fn all_corners_behind_camera_classify_by_face_orientation() {
        // Synthetic projection putting every corner at w = -1 with
        // ndc = corner / 4 + (0, 0, 1): the hi-z face winds decisively
        // front under the orientation predicate, while both x and y faces
        // score equal and the fully-clipped area tie keeps the lo face.
        let projection = Mat4::from_cols(
            Vec4::new(-0.25, 0.0, 0.0, 0.0),
            Vec4::new(0.0, -0.25, 0.0, 0.0),
            Vec4::new(0.0, 0.0, -0.25, 0.0),
            Vec4::new(0.0, 0.0, -1.0, -1.0),
        );
        let t = CameraTransform::new(Mat4::IDENTITY, Mat4::IDENTITY, projection, false);
        let result = classify_cube(&t, &unit_box());
        assert_eq!(result.closest, 4);
        assert_eq!(result.farthest, 3);
        assert_eq!(result.axis_sign, [-1, -1, 1]);
    }

    #[test]
    fn edge_on_tie_prefers_larger_clipped_face() {
        // Both x faces lie in planes through the projective origin, making
        // the orientation predicate ambiguous for each; only one face has
        // screen area after clipping, and the tie-break must pick it.
        let build = |hi_tilted: bool| -> [ProjectedVertex; 8] {
            std::array::from_fn(|i| {
                let y = if i & 2 != 0 { 0.25 } else { -0.25 };
                let z = if i & 4 != 0 { 0.75 } else { 0.5 };
                let tilted = (i & 1 != 0) == hi_tilted;
                let x = if tilted {
                    0.5 * z * if hi_tilted { 1.0 } else { -1.0 }
                } else {
                    0.0
                };
                ProjectedVertex {
                    clip: DVec4::new(x, y, z, 1.0),
                }
            })
        };

        let verts = build(true);
        let ndc: [DVec3; 8] = std::array::from_fn(|i| verts[i].ndc());
        assert!(hi_face_fronts_camera(0, &ndc, &verts));

        let verts = build(false);
        let ndc: [DVec3; 8] = std::array::from_fn(|i| verts[i].ndc());
        assert!(!hi_face_fronts_camera(0, &ndc, &verts));
    }

    #[test]
    fn inverted_bounds_fall_back_to_default() {
        let inverted = BoundingBox::new(Vec3::ONE, -Vec3::ONE);
        let result = classify_cube(&perspective_from(Vec3::new(0.0, 0.0, 5.0)), &inverted);
        assert_eq!(result, CubeVisibility::default());
    }

    #[test]
    fn zero_volume_box_is_deterministic() {
        let flat = BoundingBox::new(Vec3::ZERO, Vec3::ZERO);
        let t = perspective_from(Vec3::new(0.0, 0.0, 5.0));
        let a = classify_cube(&t, &flat);
        let b = classify_cube(&t, &flat);
        assert_eq!(a, b);
        assert_eq!(a.farthest, a.closest ^ 7);
    }

    #[test]
    fn box_behind_camera_uses_fallback_without_panicking() {
        // Camera at the origin looking away from the box: nothing in front.
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -10.0), Vec3::Y);
        let projection = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let t = CameraTransform::new(Mat4::IDENTITY, view, projection, false);
        let result = classify_cube(&t, &unit_box());
        assert_eq!(result.farthest, result.closest ^ 7);
        for d in 0..3 {
            assert!(result.axis_sign[d] == 1 || result.axis_sign[d] == -1);
        }
    }

    #[test]
    fn singular_transform_degrades_gracefully() {
        let t = CameraTransform::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::ZERO, false);
        let result = classify_cube(&t, &unit_box());
        assert_eq!(result.farthest, result.closest ^ 7);
    }

    #[test]
    fn orthographic_all_in_front() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let projection = Mat4::orthographic_rh(-2.0, 2.0, -2.0, 2.0, 0.1, 100.0);
        let t = CameraTransform::new(Mat4::IDENTITY, view, projection, true);
        let result = classify_cube(&t, &unit_box());
        assert_ne!(result.closest & 4, 0);
        assert_eq!(result.axis_sign[2], 1);
    }
}
