// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Plain triangles and the sliver test

use super::Plane;
use crate::utils::math::{calculate_triangle_normal, Point, Vector, DEGENERATE_EPSILON};
use parry3d_f64::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Triangle defined by three points, wound counter-clockwise around its normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new(Point::origin(), Point::origin(), Point::origin())
    }
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    /// Overwrite all three vertices in place
    #[inline]
    pub fn set(&mut self, a: Point, b: Point, c: Point) {
        self.a = a;
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn points(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// Unit face normal, or the zero vector for a degenerate triangle
    pub fn normal(&self) -> Vector {
        calculate_triangle_normal(&self.a, &self.b, &self.c)
    }

    pub fn plane(&self) -> Plane {
        Plane::from_normal_and_coplanar_point(self.normal(), &self.a)
    }

    pub fn area(&self) -> f64 {
        (self.b - self.a).cross(&(self.c - self.a)).norm() * 0.5
    }

    pub fn centroid(&self) -> Point {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.a.inf(&self.b).inf(&self.c), self.a.sup(&self.b).sup(&self.c))
    }

    /// Same triangle with the opposite winding
    pub fn reversed(&self) -> Self {
        Self::new(self.c, self.b, self.a)
    }

    /// Barycentric weights `(wa, wb, wc)` of `point` projected onto the
    /// triangle's plane. `None` when the triangle is degenerate.
    pub fn barycentric(&self, point: &Point) -> Option<Vector> {
        let v0 = self.c - self.a;
        let v1 = self.b - self.a;
        let v2 = point - self.a;

        let dot00 = v0.dot(&v0);
        let dot01 = v0.dot(&v1);
        let dot02 = v0.dot(&v2);
        let dot11 = v1.dot(&v1);
        let dot12 = v1.dot(&v2);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom == 0.0 {
            return None;
        }

        let inv_denom = 1.0 / denom;
        let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
        let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

        Some(Vector::new(1.0 - u - v, v, u))
    }

    /// Whether the projection of `point` onto the plane lies in the triangle
    pub fn contains_point(&self, point: &Point) -> bool {
        match self.barycentric(point) {
            Some(w) => w.x >= 0.0 && w.y >= 0.0 && w.x + w.y <= 1.0,
            None => false,
        }
    }

    /// Closest point of the triangle to `point` (Ericson, RTCD 5.1.5)
    pub fn closest_point_to_point(&self, point: &Point) -> Point {
        let (a, b, c) = (self.a, self.b, self.c);
        let ab = b - a;
        let ac = c - a;

        let ap = point - a;
        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = point - b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return a + ab * v;
        }

        let cp = point - c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return a + ac * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && d4 - d3 >= 0.0 && d5 - d6 >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return b + (c - b) * w;
        }

        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        a + ab * v + ac * w
    }

    /// Sliver test: an interior angle below `eps` or two vertices closer
    /// than `eps` (squared distance).
    pub fn is_degenerate(&self, eps: f64) -> bool {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let cb = self.b - self.c;

        let angle_a = ab.angle(&ac);
        let angle_b = ab.angle(&cb);
        let angle_c = PI - angle_a - angle_b;

        angle_a.abs() < eps
            || angle_b.abs() < eps
            || angle_c.abs() < eps
            || nalgebra::distance_squared(&self.a, &self.b) < eps
            || nalgebra::distance_squared(&self.a, &self.c) < eps
            || nalgebra::distance_squared(&self.b, &self.c) < eps
    }

    pub fn is_degenerate_default(&self) -> bool {
        self.is_degenerate(DEGENERATE_EPSILON)
    }
}

impl From<[Point; 3]> for Triangle {
    fn from(points: [Point; 3]) -> Self {
        Self::new(points[0], points[1], points[2])
    }
}
