// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities and epsilon-aware predicates

use nalgebra::{Point3, Vector3};

/// Point type used throughout the clipping kernel
pub type Point = Point3<f64>;

/// Vector type used throughout the clipping kernel
pub type Vector = Vector3<f64>;

/// Tolerance for plane distances and intersection snapping
pub const EPSILON: f64 = 1e-10;

/// Tolerance used when deciding whether two planes are parallel
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Tolerance for the interior-angle / edge-length sliver test
pub const DEGENERATE_EPSILON: f64 = 1e-15;

/// Check whether a value is within `EPSILON` of zero
#[inline]
pub fn is_near_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Calculate the unit normal of a triangle given three vertices.
/// Returns the zero vector for collinear or coincident points.
pub fn calculate_triangle_normal(p0: &Point, p1: &Point, p2: &Point) -> Vector {
    let n = (p2 - p1).cross(&(p0 - p1));
    let len_sq = n.norm_squared();
    if len_sq > 0.0 {
        n / len_sq.sqrt()
    } else {
        Vector::zeros()
    }
}

/// Linear interpolation between two points
#[inline]
pub fn lerp(a: &Point, b: &Point, t: f64) -> Point {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_near_zero() {
        assert!(is_near_zero(0.0));
        assert!(is_near_zero(-5e-11));
        assert!(!is_near_zero(1e-9));
    }

    #[test]
    fn test_triangle_normal() {
        let n = calculate_triangle_normal(
            &Point::new(0.0, 0.0, 0.0),
            &Point::new(1.0, 0.0, 0.0),
            &Point::new(0.0, 1.0, 0.0),
        );
        assert_eq!(n, Vector::new(0.0, 0.0, 1.0));

        let collinear = calculate_triangle_normal(
            &Point::new(0.0, 0.0, 0.0),
            &Point::new(1.0, 0.0, 0.0),
            &Point::new(2.0, 0.0, 0.0),
        );
        assert_eq!(collinear, Vector::zeros());
    }

    #[test]
    fn test_lerp() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(10.0, 0.0, 0.0);
        assert_eq!(lerp(&a, &b, 0.5), Point::new(5.0, 0.0, 0.0));
    }
}
