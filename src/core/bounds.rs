//! Axis-aligned bounding box for plot data, with the cube-corner encoding
//! shared by the projector and the visibility classifier.

use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// Cube corners are addressed by an index in `0..8` where bit `d` of the
/// index selects `max[d]` when set and `min[d]` otherwise. Corner 0 is the
/// min corner, corner 7 the max corner, and `i ^ 7` is always the corner
/// diagonally opposite `i`. Every component that reasons about cube corners
/// uses this mapping and no other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Vec3]) -> Self {
        let mut bounds = Self::default();
        for &point in points {
            bounds.expand(point);
        }
        bounds
    }

    /// Corner position for a cube index in `0..8` per the bit mapping above.
    pub fn corner(&self, index: usize) -> DVec3 {
        debug_assert!(index < 8);
        Vec3::new(
            if index & 1 != 0 { self.max.x } else { self.min.x },
            if index & 2 != 0 { self.max.y } else { self.min.y },
            if index & 4 != 0 { self.max.z } else { self.min.z },
        )
        .as_dvec3()
    }

    /// Min/max along a single axis (0 = x, 1 = y, 2 = z).
    pub fn axis(&self, d: usize) -> (f64, f64) {
        (self.min[d] as f64, self.max[d] as f64)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn expand_by_box(&mut self, other: &BoundingBox) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// True when the box has finite, properly ordered bounds on every axis.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_bit_mapping() {
        let b = BoundingBox::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.corner(0), DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.corner(7), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.corner(1), DVec3::new(1.0, -2.0, -3.0));
        assert_eq!(b.corner(2), DVec3::new(-1.0, 2.0, -3.0));
        assert_eq!(b.corner(4), DVec3::new(-1.0, -2.0, 3.0));
        // Opposite corners differ in every bit.
        for i in 0..8 {
            let a = b.corner(i);
            let o = b.corner(i ^ 7);
            assert!(a.x != o.x && a.y != o.y && a.z != o.z);
        }
    }

    #[test]
    fn expand_and_validity() {
        let mut b = BoundingBox::default();
        assert!(!b.is_valid());
        b.expand(Vec3::new(1.0, 0.0, -1.0));
        b.expand(Vec3::new(-1.0, 2.0, 3.0));
        assert!(b.is_valid());
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
        assert!(b.contains_point(Vec3::ZERO));
    }

    #[test]
    fn inverted_bounds_are_invalid() {
        let b = BoundingBox::new(Vec3::ONE, Vec3::ZERO);
        assert!(!b.is_valid());
    }
}
