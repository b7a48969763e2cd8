//! Projection of box corners into clip space.

use crate::core::BoundingBox;
use glam::{DMat4, DVec3, DVec4};

/// Divisor magnitudes below this are treated as a degenerate homogeneous `w`.
const W_EPSILON: f64 = 1e-12;

/// A box corner projected into homogeneous clip space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedVertex {
    pub clip: DVec4,
}

impl ProjectedVertex {
    /// Whether this vertex is in front of the camera.
    ///
    /// Under glam's right-handed perspective projection, points in front of
    /// the camera come out with `w > 0`. Orthographic projections keep
    /// `w = 1` everywhere, so callers pass `orthographic = true` to treat
    /// every vertex as in front (the flag is explicit input, never derived
    /// from the matrix).
    pub fn in_front(&self, orthographic: bool) -> bool {
        orthographic || self.clip.w > 0.0
    }

    /// Normalized device coordinates `(x/w, y/w, z/w)`.
    ///
    /// A degenerate `w` produces `±∞` components (never NaN) so downstream
    /// min/max accumulation stays well-defined.
    pub fn ndc(&self) -> DVec3 {
        let w = self.clip.w;
        if w.abs() < W_EPSILON {
            DVec3::new(
                inf_with_sign(self.clip.x),
                inf_with_sign(self.clip.y),
                inf_with_sign(self.clip.z),
            )
        } else {
            DVec3::new(self.clip.x / w, self.clip.y / w, self.clip.z / w)
        }
    }

    /// Screen depth used to rank corner nearness.
    ///
    /// Both glam `_rh` projections map nearer points to smaller NDC z, so
    /// the orthographic case reads z without a perspective divide but needs
    /// no sign adjustment.
    pub fn depth(&self, orthographic: bool) -> f64 {
        if orthographic {
            self.clip.z
        } else {
            self.ndc().z
        }
    }
}

fn inf_with_sign(v: f64) -> f64 {
    if v.is_sign_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

/// Project the 8 corners of `bounds` through `mvp`.
///
/// Corner `i` follows the bit mapping on [`BoundingBox::corner`]. Pure
/// function; some results may carry `w = 0` for degenerate transforms, which
/// the consumers guard against.
pub fn project_corners(mvp: &DMat4, bounds: &BoundingBox) -> [ProjectedVertex; 8] {
    std::array::from_fn(|i| ProjectedVertex {
        clip: *mvp * bounds.corner(i).extend(1.0),
    })
}

/// Project an arbitrary box-space point through `mvp`.
pub fn project_point(mvp: &DMat4, point: DVec3) -> ProjectedVertex {
    ProjectedVertex {
        clip: *mvp * point.extend(1.0),
    }
}
