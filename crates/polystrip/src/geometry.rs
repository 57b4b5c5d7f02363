//! 2D vector primitives used by the tessellator.
//!
//! Thin wrappers over [`Vec2`] that keep the degenerate-input behavior
//! explicit: normalizing a zero-length vector yields non-finite components
//! instead of a silent zero, and callers test for that with [`is_finite`].

use glam::Vec2;

/// `a - b`.
#[inline]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

#[inline]
pub fn length(v: Vec2) -> f32 {
    v.length()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    length(subtract(a, b))
}

/// Scale `v` to unit length.
///
/// A zero-length input produces non-finite components.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v / v.length()
}

/// Unit direction from `from` towards `to`; non-finite when the points coincide.
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    normalize(subtract(to, from))
}

/// Rotate by 90 degrees counter-clockwise: `(x, y) -> (-y, x)`.
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    v.perp()
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.dot(b)
}

#[inline]
pub fn scale(v: Vec2, factor: f32) -> Vec2 {
    v * factor
}

/// `true` when both components are finite.
#[inline]
pub fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_unit_length() {
        let dir = direction(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert!((length(dir) - 1.0).abs() < 1e-6);
        assert_eq!(dir, Vec2::new(0.6, 0.8));
    }

    #[test]
    fn test_direction_of_coincident_points_is_not_finite() {
        let p = Vec2::new(3.0, -2.0);
        assert!(!is_finite(direction(p, p)));
    }

    #[test]
    fn test_perpendicular_rotates_counter_clockwise() {
        assert_eq!(perpendicular(Vec2::X), Vec2::Y);
        assert_eq!(perpendicular(Vec2::Y), Vec2::new(-1.0, 0.0));
        assert_eq!(dot(perpendicular(Vec2::new(0.6, 0.8)), Vec2::new(0.6, 0.8)), 0.0);
    }

    #[test]
    fn test_scale_and_distance() {
        assert_eq!(scale(Vec2::new(1.0, -2.0), 1.5), Vec2::new(1.5, -3.0));
        assert_eq!(distance(Vec2::ZERO, Vec2::new(3.0, 4.0)), 5.0);
    }
}
