// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Line segments and segment/segment closest points

use crate::utils::math::{lerp, Point, Vector};
use serde::{Deserialize, Serialize};

/// A segment between two points. Used for triangle edges and as the output
/// of intersection queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Default for Segment {
    fn default() -> Self {
        Self::new(Point::origin(), Point::origin())
    }
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Overwrite both end points in place
    #[inline]
    pub fn set(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
    }

    #[inline]
    pub fn delta(&self) -> Vector {
        self.end - self.start
    }

    pub fn center(&self) -> Point {
        nalgebra::center(&self.start, &self.end)
    }

    pub fn length(&self) -> f64 {
        self.delta().norm()
    }

    pub fn length_squared(&self) -> f64 {
        self.delta().norm_squared()
    }

    /// Point at parameter `t` (0 = start, 1 = end)
    #[inline]
    pub fn at(&self, t: f64) -> Point {
        lerp(&self.start, &self.end, t)
    }

    /// Swap start and end
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    /// Parameter of the projection of `point` on the supporting line
    pub fn closest_point_to_point_parameter(&self, point: &Point, clamp: bool) -> f64 {
        let delta = self.delta();
        let len_sq = delta.norm_squared();
        if len_sq == 0.0 {
            return 0.0;
        }

        let t = (point - self.start).dot(&delta) / len_sq;
        if clamp {
            t.clamp(0.0, 1.0)
        } else {
            t
        }
    }

    pub fn closest_point_to_point(&self, point: &Point, clamp: bool) -> Point {
        self.at(self.closest_point_to_point_parameter(point, clamp))
    }

    pub fn distance_to_point(&self, point: &Point) -> f64 {
        (self.closest_point_to_point(point, true) - point).norm()
    }
}

/// Parameters `(s, t)` of the closest points between the infinite lines
/// supporting `l1` and `l2`.
fn closest_line_parameters(l1: &Segment, l2: &Segment) -> (f64, f64) {
    let v02 = l1.start - l2.start;
    let d1 = l1.delta();
    let d2 = l2.delta();

    let d0232 = v02.dot(&d2);
    let d3210 = d2.dot(&d1);
    let d3232 = d2.dot(&d2);
    let d0210 = v02.dot(&d1);
    let d1010 = d1.dot(&d1);

    if d3232 == 0.0 {
        // l2 collapsed to a point
        return (l1.closest_point_to_point_parameter(&l2.start, false), 0.0);
    }

    let denom = d1010 * d3232 - d3210 * d3210;
    let s = if denom != 0.0 {
        (d0232 * d3210 - d0210 * d3232) / denom
    } else {
        0.0
    };
    let t = (d0232 + s * d3210) / d3232;

    (s, t)
}

/// Closest pair of points between two segments, `(on l1, on l2)`
pub fn closest_points_segment_to_segment(l1: &Segment, l2: &Segment) -> (Point, Point) {
    let (s, t) = closest_line_parameters(l1, l2);
    let s_inside = (0.0..=1.0).contains(&s);
    let t_inside = (0.0..=1.0).contains(&t);

    if s_inside && t_inside {
        return (l1.at(s), l2.at(t));
    }

    if s_inside {
        let p2 = if t < 0.0 { l2.start } else { l2.end };
        return (l1.closest_point_to_point(&p2, true), p2);
    }

    if t_inside {
        let p1 = if s < 0.0 { l1.start } else { l1.end };
        return (p1, l2.closest_point_to_point(&p1, true));
    }

    // both parameters are out of range
    let p1 = if s < 0.0 { l1.start } else { l1.end };
    let p2 = if t < 0.0 { l2.start } else { l2.end };
    let on_l1 = l1.closest_point_to_point(&p2, true);
    let on_l2 = l2.closest_point_to_point(&p1, true);

    if (on_l1 - p2).norm_squared() <= (on_l2 - p1).norm_squared() {
        (on_l1, p2)
    } else {
        (p1, on_l2)
    }
}
