// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planes in normal / constant form

use super::Segment;
use crate::utils::math::{calculate_triangle_normal, Point, Vector};
use serde::{Deserialize, Serialize};

/// Plane satisfying `normal . p + constant = 0`.
/// `normal` is expected to be unit length; nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector,
    pub constant: f64,
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(Vector::new(1.0, 0.0, 0.0), 0.0)
    }
}

impl Plane {
    pub fn new(normal: Vector, constant: f64) -> Self {
        Self { normal, constant }
    }

    pub fn from_normal_and_coplanar_point(normal: Vector, point: &Point) -> Self {
        Self {
            normal,
            constant: -point.coords.dot(&normal),
        }
    }

    /// Plane through three points, oriented counter-clockwise.
    /// Collinear input yields a zero normal.
    pub fn from_coplanar_points(a: &Point, b: &Point, c: &Point) -> Self {
        let normal = calculate_triangle_normal(a, b, c);
        Self::from_normal_and_coplanar_point(normal, a)
    }

    /// Signed distance, positive on the side the normal points to
    #[inline]
    pub fn distance_to_point(&self, point: &Point) -> f64 {
        self.normal.dot(&point.coords) + self.constant
    }

    pub fn project_point(&self, point: &Point) -> Point {
        point - self.normal * self.distance_to_point(point)
    }

    /// A point lying on the plane
    pub fn coplanar_point(&self) -> Point {
        Point::from(self.normal * -self.constant)
    }

    pub fn negate(&mut self) {
        self.normal = -self.normal;
        self.constant = -self.constant;
    }

    /// Intersection of the plane with `segment`.
    ///
    /// A segment lying exactly in the plane yields its start point; a segment
    /// parallel to the plane but off it, or one whose crossing lies outside
    /// `[start, end]`, yields `None`.
    pub fn intersect_line(&self, segment: &Segment) -> Option<Point> {
        let direction = segment.delta();
        let denominator = self.normal.dot(&direction);

        if denominator == 0.0 {
            if self.distance_to_point(&segment.start) == 0.0 {
                return Some(segment.start);
            }
            return None;
        }

        let t = -(segment.start.coords.dot(&self.normal) + self.constant) / denominator;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some(segment.start + direction * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x_plane(x: f64) -> Plane {
        Plane::new(Vector::new(1.0, 0.0, 0.0), -x)
    }

    #[test]
    fn test_distance_and_projection() {
        let plane = x_plane(0.5);
        assert_eq!(plane.distance_to_point(&Point::new(2.0, 3.0, 4.0)), 1.5);
        assert_eq!(plane.project_point(&Point::new(2.0, 3.0, 4.0)), Point::new(0.5, 3.0, 4.0));
        assert_eq!(plane.coplanar_point(), Point::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_from_coplanar_points() {
        let plane = Plane::from_coplanar_points(
            &Point::new(0.0, 0.0, 1.0),
            &Point::new(1.0, 0.0, 1.0),
            &Point::new(0.0, 1.0, 1.0),
        );
        assert_relative_eq!(plane.normal, Vector::new(0.0, 0.0, 1.0));
        assert_relative_eq!(plane.constant, -1.0);
    }

    #[test]
    fn test_intersect_line() {
        let plane = x_plane(0.5);
        let crossing = Segment::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 0.0));
        assert_eq!(plane.intersect_line(&crossing), Some(Point::new(0.5, 0.5, 0.0)));

        let short = Segment::new(Point::new(0.0, 0.0, 0.0), Point::new(0.25, 1.0, 0.0));
        assert_eq!(plane.intersect_line(&short), None);

        let parallel = Segment::new(Point::new(1.0, 0.0, 0.0), Point::new(1.0, 1.0, 0.0));
        assert_eq!(plane.intersect_line(&parallel), None);

        let inside = Segment::new(Point::new(0.5, 0.0, 0.0), Point::new(0.5, 1.0, 0.0));
        assert_eq!(plane.intersect_line(&inside), Some(inside.start));
    }
}
