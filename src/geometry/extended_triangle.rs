// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle with cached plane, bounding sphere and separating axes.
//! Handles coplanar pairs with a separating-axis test and crossing pairs by
//! clipping each triangle against the other's plane.

use super::interval::SeparatingAxisBounds;
use super::segment::closest_points_segment_to_segment;
use super::{Plane, Segment, Triangle};
use crate::utils::math::{is_near_zero, Point, Vector, PARALLEL_EPSILON};
use parry3d_f64::bounding_volume::{Aabb, BoundingSphere};

/// A triangle plus the derived data used by intersection queries.
///
/// The derived bundle is recomputed whenever the vertices are replaced
/// through [`ExtendedTriangle::set`], so it is never stale.
#[derive(Debug, Clone, Copy)]
pub struct ExtendedTriangle {
    triangle: Triangle,
    normal: Vector,
    plane: Plane,
    sphere: BoundingSphere,
    sat_axes: [Vector; 4],
    sat_bounds: [SeparatingAxisBounds; 4],
}

impl Default for ExtendedTriangle {
    fn default() -> Self {
        Self::from_triangle(&Triangle::default())
    }
}

impl From<Triangle> for ExtendedTriangle {
    fn from(triangle: Triangle) -> Self {
        Self::from_triangle(&triangle)
    }
}

impl ExtendedTriangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self::from_triangle(&Triangle::new(a, b, c))
    }

    pub fn from_triangle(triangle: &Triangle) -> Self {
        let mut tri = Self {
            triangle: *triangle,
            normal: Vector::zeros(),
            plane: Plane::default(),
            sphere: BoundingSphere::new(Point::origin(), 0.0),
            sat_axes: [Vector::zeros(); 4],
            sat_bounds: [SeparatingAxisBounds::default(); 4],
        };
        tri.update();
        tri
    }

    /// Replace the vertices and recompute the derived data
    pub fn set(&mut self, a: Point, b: Point, c: Point) {
        self.triangle.set(a, b, c);
        self.update();
    }

    pub fn set_from_triangle(&mut self, triangle: &Triangle) {
        self.triangle = *triangle;
        self.update();
    }

    /// Recompute normal, plane, bounding sphere and separating axes
    pub fn update(&mut self) {
        let Triangle { a, b, c } = self.triangle;
        let points = self.triangle.points();

        self.normal = self.triangle.normal();
        self.plane = Plane::from_normal_and_coplanar_point(self.normal, &a);

        let aabb = self.triangle.aabb();
        let center = aabb.center();
        let radius = points
            .iter()
            .map(|p| nalgebra::distance_squared(p, &center))
            .fold(0.0, f64::max)
            .sqrt();
        self.sphere = BoundingSphere::new(center, radius);

        self.sat_axes = [self.normal, b - a, c - b, a - c];
        for (axis, bounds) in self.sat_axes.iter().zip(self.sat_bounds.iter_mut()) {
            bounds.set_from_points(axis, &points);
        }
    }

    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn normal(&self) -> &Vector {
        &self.normal
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn sphere(&self) -> &BoundingSphere {
        &self.sphere
    }

    pub fn sat_axes(&self) -> &[Vector; 4] {
        &self.sat_axes
    }

    pub fn sat_bounds(&self) -> &[SeparatingAxisBounds; 4] {
        &self.sat_bounds
    }

    pub fn aabb(&self) -> Aabb {
        self.triangle.aabb()
    }

    /// Test against another triangle.
    ///
    /// When the triangles cross, `target` receives the shared segment. When
    /// they are coplanar and overlap no single segment exists, and `target`
    /// is set to the zero-length segment at the origin.
    pub fn intersects_triangle(&self, other: &ExtendedTriangle, target: Option<&mut Segment>) -> bool {
        if self.plane.normal.dot(&other.plane.normal).abs() > 1.0 - PARALLEL_EPSILON {
            if !self.coplanar_overlap(other) {
                return false;
            }

            if let Some(target) = target {
                log::debug!("coplanar triangles overlap; reporting a zero-length intersection segment");
                target.set(Point::origin(), Point::origin());
            }
            return true;
        }

        let mut edge1 = Segment::default();
        let count1 = compute_edge_against_plane(&self.triangle, &other.plane, &mut edge1);
        if count1 == 1 && other.triangle.contains_point(&edge1.end) {
            if let Some(target) = target {
                target.set(edge1.end, edge1.end);
            }
            return true;
        } else if count1 != 2 {
            return false;
        }

        let mut edge2 = Segment::default();
        let count2 = compute_edge_against_plane(&other.triangle, &self.plane, &mut edge2);
        if count2 == 1 && self.triangle.contains_point(&edge2.end) {
            if let Some(target) = target {
                target.set(edge2.end, edge2.end);
            }
            return true;
        } else if count2 != 2 {
            return false;
        }

        // run both segments in the same direction along the intersection line
        let dir1 = edge1.delta();
        if dir1.dot(&edge2.delta()) < 0.0 {
            edge2.reverse();
        }

        let s1 = edge1.start.coords.dot(&dir1);
        let e1 = edge1.end.coords.dot(&dir1);
        let s2 = edge2.start.coords.dot(&dir1);
        let e2 = edge2.end.coords.dot(&dir1);
        if e1 < s2 || e2 < s1 {
            return false;
        }

        if let Some(target) = target {
            let start = if (edge1.start - edge2.start).dot(&dir1) > 0.0 {
                edge1.start
            } else {
                edge2.start
            };
            let end = if (edge1.end - edge2.end).dot(&dir1) < 0.0 {
                edge1.end
            } else {
                edge2.end
            };
            target.set(start, end);
        }

        true
    }

    /// Separating-axis test for (near) parallel triangles
    fn coplanar_overlap(&self, other: &ExtendedTriangle) -> bool {
        let own_points = self.triangle.points();
        let other_points = other.triangle.points();

        for (axis, bounds) in self.sat_axes.iter().zip(self.sat_bounds.iter()) {
            let projected = SeparatingAxisBounds::from_points(axis, &other_points);
            if bounds.is_separated(&projected) {
                return false;
            }
        }

        for (axis, bounds) in other.sat_axes.iter().zip(other.sat_bounds.iter()) {
            let projected = SeparatingAxisBounds::from_points(axis, &own_points);
            if bounds.is_separated(&projected) {
                return false;
            }
        }

        // face x edge products give the in-plane edge normals, edge x edge
        // products cover slightly tilted pairs
        let mut own = SeparatingAxisBounds::default();
        let mut theirs = SeparatingAxisBounds::default();
        for axis1 in &self.sat_axes {
            for axis2 in &other.sat_axes {
                let axis = axis1.cross(axis2);
                own.set_from_points(&axis, &own_points);
                theirs.set_from_points(&axis, &other_points);
                if own.is_separated(&theirs) {
                    return false;
                }
            }
        }

        true
    }

    /// Sphere overlap: an edge within the radius, or the projected centre
    /// inside the face within the radius.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let center = *sphere.center();
        let radius = sphere.radius();
        let Triangle { a, b, c } = self.triangle;

        for edge in [Segment::new(a, b), Segment::new(a, c), Segment::new(b, c)] {
            if edge.distance_to_point(&center) <= radius {
                return true;
            }
        }

        let dp = self.plane.distance_to_point(&center).abs();
        dp <= radius && self.triangle.contains_point(&self.plane.project_point(&center))
    }

    pub fn closest_point_to_point(&self, point: &Point) -> Point {
        self.triangle.closest_point_to_point(point)
    }

    pub fn distance_to_point(&self, point: &Point) -> f64 {
        nalgebra::distance(&self.closest_point_to_point(point), point)
    }

    /// Distance to `segment` with the closest points `(on triangle, on segment)`
    pub fn closest_point_to_segment(&self, segment: &Segment) -> (f64, Point, Point) {
        if let Some(hit) = self.plane.intersect_line(segment) {
            if self.triangle.contains_point(&hit) {
                return (0.0, hit, hit);
            }
        }

        let points = self.triangle.points();
        let mut closest_sq = f64::INFINITY;
        let mut result = (segment.start, segment.start);

        for i in 0..3 {
            let edge = Segment::new(points[i], points[(i + 1) % 3]);
            let (on_edge, on_segment) = closest_points_segment_to_segment(&edge, segment);
            let dist_sq = nalgebra::distance_squared(&on_edge, &on_segment);
            if dist_sq < closest_sq {
                closest_sq = dist_sq;
                result = (on_edge, on_segment);
            }
        }

        for end in [segment.start, segment.end] {
            let on_face = self.closest_point_to_point(&end);
            let dist_sq = nalgebra::distance_squared(&on_face, &end);
            if dist_sq < closest_sq {
                closest_sq = dist_sq;
                result = (on_face, end);
            }
        }

        (closest_sq.sqrt(), result.0, result.1)
    }

    /// Minimum distance to `other` with the closest points `(on self, on other)`.
    ///
    /// Intersecting triangles report 0 and the centre of the intersection
    /// segment as both points. For coplanar overlaps that centre is the
    /// origin fallback of [`ExtendedTriangle::intersects_triangle`].
    pub fn distance_to_triangle(&self, other: &ExtendedTriangle) -> (f64, Point, Point) {
        let mut shared = Segment::default();
        if self.intersects_triangle(other, Some(&mut shared)) {
            let center = shared.center();
            return (0.0, center, center);
        }

        let own = self.triangle.points();
        let theirs = other.triangle.points();
        let mut closest_sq = f64::INFINITY;
        let mut result = (own[0], theirs[0]);

        for i in 0..3 {
            let on_self = self.closest_point_to_point(&theirs[i]);
            let dist_sq = nalgebra::distance_squared(&on_self, &theirs[i]);
            if dist_sq < closest_sq {
                closest_sq = dist_sq;
                result = (on_self, theirs[i]);
            }

            let on_other = other.closest_point_to_point(&own[i]);
            let dist_sq = nalgebra::distance_squared(&on_other, &own[i]);
            if dist_sq < closest_sq {
                closest_sq = dist_sq;
                result = (own[i], on_other);
            }
        }

        for i in 0..3 {
            let edge1 = Segment::new(own[i], own[(i + 1) % 3]);
            for j in 0..3 {
                let edge2 = Segment::new(theirs[j], theirs[(j + 1) % 3]);
                let (p1, p2) = closest_points_segment_to_segment(&edge1, &edge2);
                let dist_sq = nalgebra::distance_squared(&p1, &p2);
                if dist_sq < closest_sq {
                    closest_sq = dist_sq;
                    result = (p1, p2);
                }
            }
        }

        (closest_sq.sqrt(), result.0, result.1)
    }
}

/// Clip `triangle` against `plane`, writing the crossing into `target`.
///
/// Returns the number of crossing points found (0 to 2). An edge lying in
/// the plane is returned whole with a count of 2. A crossing at an edge's end
/// point is skipped so shared vertices are not counted twice; a vertex that
/// merely touches the plane yields a count of 1 and is stored in
/// `target.end`.
pub fn compute_edge_against_plane(triangle: &Triangle, plane: &Plane, target: &mut Segment) -> usize {
    let points = triangle.points();
    let mut count = 0;
    let mut snapped_start: Option<usize> = None;

    for i in 0..3 {
        let edge = Segment::new(points[i], points[(i + 1) % 3]);
        let start_on_plane = is_near_zero(plane.distance_to_point(&edge.start));

        if start_on_plane && is_near_zero(plane.normal.dot(&edge.delta())) {
            *target = edge;
            return 2;
        }

        // intersect_line misses crossings sitting right on the start point
        let point = match plane.intersect_line(&edge) {
            Some(point) => point,
            None if start_on_plane => edge.start,
            None => continue,
        };

        if is_near_zero(nalgebra::distance(&point, &edge.end)) {
            continue;
        }

        if count <= 1 {
            let slot = if count == 1 {
                &mut target.start
            } else {
                &mut target.end
            };
            *slot = point;
            if start_on_plane {
                snapped_start = Some(count);
            }
        } else {
            // a snapped start point is superseded by a real crossing
            let slot = if snapped_start == Some(1) {
                &mut target.start
            } else {
                &mut target.end
            };
            *slot = point;
            return 2;
        }

        count += 1;
        if count == 2 && snapped_start.is_none() {
            break;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> ExtendedTriangle {
        ExtendedTriangle::new(Point::from(a), Point::from(b), Point::from(c))
    }

    #[test]
    fn test_update_caches() {
        let t = tri([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        assert_eq!(*t.normal(), Vector::new(0.0, 0.0, 1.0));
        assert_relative_eq!(t.plane().constant, 0.0);
        assert_relative_eq!(*t.sphere().center(), Point::new(1.0, 1.0, 0.0));
        assert_relative_eq!(t.sphere().radius(), 2.0f64.sqrt());
        assert_eq!(t.sat_axes()[1], Vector::new(2.0, 0.0, 0.0));
        assert_eq!(t.sat_bounds()[1], SeparatingAxisBounds::new(0.0, 4.0));
    }

    #[test]
    fn test_set_recomputes() {
        let mut t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        t.set(
            Point::new(0.0, 0.0, 3.0),
            Point::new(0.0, 1.0, 3.0),
            Point::new(1.0, 0.0, 3.0),
        );
        assert_eq!(*t.normal(), Vector::new(0.0, 0.0, -1.0));
        assert_relative_eq!(t.plane().distance_to_point(&Point::new(5.0, 5.0, 3.0)), 0.0);
    }

    #[test]
    fn test_crossing_triangles_produce_segment() {
        let a = tri([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([0.0, -0.5, -1.0], [0.0, -0.5, 1.0], [0.0, 0.5, 0.0]);

        let mut segment = Segment::default();
        assert!(a.intersects_triangle(&b, Some(&mut segment)));

        let mut ys = [segment.start.y, segment.end.y];
        ys.sort_by(|l, r| l.partial_cmp(r).unwrap());
        assert_relative_eq!(ys[0], -0.5, epsilon = 1e-12);
        assert_relative_eq!(ys[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(segment.start.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(segment.start.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_separated_triangles() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([5.0, 0.0, -1.0], [5.0, 0.0, 1.0], [5.0, 1.0, 0.0]);
        assert!(!a.intersects_triangle(&b, None));

        // b crosses a's plane but outside a
        let c = tri([0.8, 0.8, -1.0], [0.8, 0.8, 1.0], [2.0, 2.0, 0.0]);
        assert!(!a.intersects_triangle(&c, None));
    }

    #[test]
    fn test_coplanar_triangles() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let overlapping = tri([0.5, 0.0, 0.0], [1.5, 0.0, 0.0], [0.5, 1.0, 0.0]);
        let disjoint = tri([2.0, 0.0, 0.0], [3.0, 0.0, 0.0], [2.0, 1.0, 0.0]);
        let mirrored = tri([0.6, 0.6, 0.0], [1.0, 1.0, 0.0], [0.6, 1.0, 0.0]);

        let mut segment = Segment::new(Point::new(1.0, 1.0, 1.0), Point::new(2.0, 2.0, 2.0));
        assert!(a.intersects_triangle(&overlapping, Some(&mut segment)));
        assert_eq!(segment, Segment::default());

        assert!(!a.intersects_triangle(&disjoint, None));
        // only separable along the hypotenuse normal
        assert!(!a.intersects_triangle(&mirrored, None));
    }

    #[test]
    fn test_parallel_offset_triangles() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);
        assert!(!a.intersects_triangle(&b, None));
    }

    #[test]
    fn test_touching_vertex() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        // apex touches a's interior
        let b = tri([0.25, 0.25, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0]);
        let mut segment = Segment::default();
        assert!(b.intersects_triangle(&a, Some(&mut segment)));
        assert_relative_eq!(segment.start, Point::new(0.25, 0.25, 0.0), epsilon = 1e-12);
        assert_eq!(segment.start, segment.end);
    }

    #[test]
    fn test_edge_against_plane() {
        let t = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );

        let mut segment = Segment::default();
        let plane = Plane::new(Vector::new(1.0, 0.0, 0.0), -0.5);
        assert_eq!(compute_edge_against_plane(&t, &plane, &mut segment), 2);
        assert_relative_eq!(segment.length(), 0.5, epsilon = 1e-12);

        let edge_plane = Plane::new(Vector::new(0.0, 1.0, 0.0), 0.0);
        assert_eq!(compute_edge_against_plane(&t, &edge_plane, &mut segment), 2);
        assert_eq!(segment, Segment::new(t.a, t.b));

        let miss = Plane::new(Vector::new(1.0, 0.0, 0.0), -2.0);
        assert_eq!(compute_edge_against_plane(&t, &miss, &mut segment), 0);

        let touch = Plane::new(Vector::new(1.0, 1.0, 0.0).normalize(), 0.0);
        assert_eq!(compute_edge_against_plane(&t, &touch, &mut segment), 1);
        assert_eq!(segment.end, t.a);
    }

    #[test]
    fn test_intersects_sphere() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(t.intersects_sphere(&BoundingSphere::new(Point::new(0.2, 0.2, 0.5), 0.6)));
        assert!(t.intersects_sphere(&BoundingSphere::new(Point::new(0.5, -0.5, 0.0), 0.6)));
        assert!(!t.intersects_sphere(&BoundingSphere::new(Point::new(0.2, 0.2, 0.5), 0.4)));
        assert!(!t.intersects_sphere(&BoundingSphere::new(Point::new(3.0, 3.0, 0.0), 1.0)));
    }

    #[test]
    fn test_distance_queries() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_relative_eq!(t.distance_to_point(&Point::new(0.25, 0.25, 2.0)), 2.0);

        let segment = Segment::new(Point::new(2.0, 0.0, 0.0), Point::new(2.0, 1.0, 0.0));
        let (dist, on_tri, on_seg) = t.closest_point_to_segment(&segment);
        assert_relative_eq!(dist, 1.0, epsilon = 1e-12);
        assert_relative_eq!(on_tri, Point::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(on_seg, Point::new(2.0, 0.0, 0.0), epsilon = 1e-12);

        let piercing = Segment::new(Point::new(0.2, 0.2, -1.0), Point::new(0.2, 0.2, 1.0));
        let (dist, on_tri, _) = t.closest_point_to_segment(&piercing);
        assert_eq!(dist, 0.0);
        assert_relative_eq!(on_tri, Point::new(0.2, 0.2, 0.0), epsilon = 1e-12);

        let above = tri([0.0, 0.0, 3.0], [1.0, 0.0, 3.0], [0.0, 1.0, 3.0]);
        let (dist, _, _) = t.distance_to_triangle(&above);
        assert_relative_eq!(dist, 3.0, epsilon = 1e-12);

        let crossing = tri([0.2, -1.0, -1.0], [0.2, -1.0, 1.0], [0.2, 2.0, 0.0]);
        let (dist, p1, p2) = t.distance_to_triangle(&crossing);
        assert_eq!(dist, 0.0);
        assert_eq!(p1, p2);
    }
}
