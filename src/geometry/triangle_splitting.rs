// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle splitting for CSG operations
//! Clips a coplanar working set of triangles by planes or by triangles of the
//! opposing mesh, replacing each cut triangle with its pieces

use super::{ExtendedTriangle, Plane, Segment, Triangle, TriangleHandle, TrianglePool};
use crate::config::ClipConfig;
use crate::error::{ClipError, Result};
use crate::utils::math::Vector;

/// Lifecycle of a [`TriangleSplitter`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitterState {
    /// Nothing has been initialized since the last reset
    Empty,
    /// Holds a working set sharing this unit normal
    Initialized(Vector),
}

/// The three half-planes bounding a triangle within its own plane.
///
/// Each plane contains an edge and the face normal; its positive side faces
/// the triangle's interior. Cutting a coplanar working set by all three is
/// equivalent to cutting it by the triangle's outline.
pub fn coplanar_edge_planes(triangle: &Triangle) -> [Plane; 3] {
    let normal = triangle.normal();
    let points = triangle.points();

    std::array::from_fn(|i| {
        let v0 = points[i];
        let v1 = points[(i + 1) % 3];
        let direction = (v1 - v0).normalize();
        Plane::from_normal_and_coplanar_point(normal.cross(&direction), &v0)
    })
}

/// How a single working triangle is cut by a plane
enum SplitPlan {
    /// The plane runs through one vertex and the opposite edge
    Vertex { kept: Triangle, extra: Triangle },
    /// The plane crosses two edges: one triangle on one side, a quad on the other
    Quad { kept: Triangle, extra: [Triangle; 2] },
}

impl SplitPlan {
    /// The rewritten original followed by the appended pieces
    fn into_pieces(self) -> [Option<Triangle>; 3] {
        match self {
            SplitPlan::Vertex { kept, extra } => [Some(kept), Some(extra), None],
            SplitPlan::Quad { kept, extra: [e0, e1] } => [Some(kept), Some(e0), Some(e1)],
        }
    }
}

/// Splits a working set of coplanar triangles.
///
/// Working triangles live in an internal [`TrianglePool`]; `reset` rewinds the
/// pool so the next operation reuses the same storage.
#[derive(Debug, Clone, Default)]
pub struct TriangleSplitter {
    pool: TrianglePool,
    triangles: Vec<TriangleHandle>,
    normal: Option<Vector>,
    coplanar_triangle_used: bool,
    config: ClipConfig,
}

impl TriangleSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClipConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ClipConfig {
        &self.config
    }

    pub fn state(&self) -> SplitterState {
        match self.normal {
            Some(normal) => SplitterState::Initialized(normal),
            None => SplitterState::Empty,
        }
    }

    /// Shared unit normal of the working set
    pub fn normal(&self) -> Option<Vector> {
        self.normal
    }

    /// Whether any `split_by_triangle` call took the coplanar path since the last reset
    pub fn coplanar_triangle_used(&self) -> bool {
        self.coplanar_triangle_used
    }

    pub fn pool(&self) -> &TrianglePool {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Current working triangles
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.triangles.iter().map(move |&handle| self.pool.get(handle))
    }

    pub fn to_vec(&self) -> Vec<Triangle> {
        self.triangles().copied().collect()
    }

    /// Start a new working set from `triangles`.
    ///
    /// Degenerate triangles are skipped. The first remaining triangle fixes
    /// the normal; any later triangle whose normal disagrees fails the call
    /// and leaves the splitter empty.
    pub fn initialize(&mut self, triangles: &[Triangle]) -> Result<()> {
        self.reset();

        for (index, triangle) in triangles.iter().enumerate() {
            if triangle.is_degenerate(self.config.degenerate_epsilon) {
                log::trace!("skipping degenerate input triangle {}", index);
                continue;
            }

            let normal = triangle.normal();
            match self.normal {
                None => self.normal = Some(normal),
                Some(shared) => {
                    if 1.0 - normal.dot(&shared) > self.config.normal_epsilon {
                        self.reset();
                        return Err(ClipError::MixedNormals { index });
                    }
                }
            }

            let handle = self.pool.acquire_with(*triangle);
            self.triangles.push(handle);
        }

        Ok(())
    }

    pub fn initialize_single(&mut self, triangle: &Triangle) {
        let result = self.initialize(std::slice::from_ref(triangle));
        debug_assert!(result.is_ok(), "a single triangle cannot have mixed normals");
    }

    /// Split the working set by another triangle.
    ///
    /// A cutter coplanar with the working set cuts along its three edge
    /// planes; any other cutter cuts along its own plane. Only working
    /// triangles the cutter actually touches are split.
    pub fn split_by_triangle(&mut self, triangle: &Triangle) -> usize {
        let Some(normal) = self.normal else {
            return 0;
        };

        if triangle.is_degenerate(self.config.degenerate_epsilon) {
            log::trace!("ignoring degenerate cutting triangle");
            return 0;
        }

        let cut_normal = triangle.normal();
        if (1.0 - cut_normal.dot(&normal).abs()).abs() < self.config.parallel_epsilon {
            self.coplanar_triangle_used = true;
            coplanar_edge_planes(triangle)
                .iter()
                .map(|plane| self.split_by_plane(plane, Some(triangle)))
                .sum()
        } else {
            self.split_by_plane(&triangle.plane(), Some(triangle))
        }
    }

    /// Split every working triangle crossed by `plane`.
    ///
    /// With a `clipping` triangle, working triangles it does not intersect
    /// are left alone. Returns the number of working triangles that were cut.
    pub fn split_by_plane(&mut self, plane: &Plane, clipping: Option<&Triangle>) -> usize {
        let clipping = clipping.map(ExtendedTriangle::from_triangle);
        let eps = self.config.degenerate_epsilon;

        let mut split_count = 0;
        let mut i = 0;
        let mut len = self.triangles.len();

        while i < len {
            let handle = self.triangles[i];
            let triangle = *self.pool.get(handle);

            if let Some(cutter) = &clipping {
                if !cutter.intersects_triangle(&ExtendedTriangle::from_triangle(&triangle), None) {
                    i += 1;
                    continue;
                }
            }

            let Some(plan) = self.plan_split(&triangle, plane) else {
                i += 1;
                continue;
            };

            split_count += 1;

            // surviving pieces take the original slot first, slivers never get one
            let mut pieces = plan
                .into_pieces()
                .into_iter()
                .flatten()
                .filter(|piece| !piece.is_degenerate(eps));

            match pieces.next() {
                Some(first) => {
                    *self.pool.get_mut(handle) = first;
                    for piece in pieces {
                        let extra = self.pool.acquire_with(piece);
                        self.triangles.push(extra);
                    }
                    i += 1;
                }
                None => {
                    self.triangles.remove(i);
                    len -= 1;
                }
            }
        }

        if split_count > 0 {
            log::trace!(
                "plane split {} triangles, working set now {}",
                split_count,
                self.triangles.len()
            );
        }

        split_count
    }

    /// Walk the edges of `triangle` against `plane` and decide how to cut it
    fn plan_split(&self, triangle: &Triangle, plane: &Plane) -> Option<SplitPlan> {
        let eps = self.config.epsilon;
        let coplanar_eps = self.config.coplanar_epsilon;
        let points = triangle.points();

        let mut found = Segment::default();
        let mut intersects = 0;
        let mut vertex_split_end = None;
        let mut positive = None;
        let mut negative = None;
        let mut positive_count = 0;

        for t in 0..3 {
            let edge = Segment::new(points[t], points[(t + 1) % 3]);
            let start_dist = plane.distance_to_point(&edge.start);
            let end_dist = plane.distance_to_point(&edge.end);

            if start_dist.abs() < coplanar_eps && end_dist.abs() < coplanar_eps {
                // the plane runs along an existing edge
                return None;
            }

            if start_dist > 0.0 {
                positive = positive.or(Some(t));
                positive_count += 1;
            } else {
                negative = negative.or(Some(t));
            }

            // a start point on the plane was counted as the previous edge's end
            if start_dist.abs() < coplanar_eps {
                continue;
            }

            let hit = plane
                .intersect_line(&edge)
                .or_else(|| (end_dist.abs() < coplanar_eps).then_some(edge.end));

            if let Some(point) = hit {
                if nalgebra::distance(&point, &edge.start) < eps {
                    continue;
                }

                if nalgebra::distance(&point, &edge.end) < eps {
                    vertex_split_end = Some(t);
                }

                if intersects == 0 {
                    found.start = point;
                } else {
                    found.end = point;
                }
                intersects += 1;
            }
        }

        if intersects == 3 {
            log::warn!("triangle crosses the cutting plane three times; leaving it unsplit");
            return None;
        }

        if intersects != 2 || found.length() <= coplanar_eps {
            return None;
        }

        if let Some(end) = vertex_split_end {
            let split_vertex = (end + 1) % 3;
            let other1 = if split_vertex == 0 { 1 } else { 0 };
            let other2 = if other1 + 1 == split_vertex {
                (other1 + 2) % 3
            } else {
                other1 + 1
            };

            return Some(SplitPlan::Vertex {
                kept: Triangle::new(points[other1], found.start, found.end),
                extra: Triangle::new(points[other2], found.end, found.start),
            });
        }

        let single = if positive_count >= 2 { negative? } else { positive? };
        if single == 0 {
            // keep the cut edge aligned with the winding order
            found.reverse();
        }

        let next1 = (single + 1) % 3;
        let next2 = (single + 2) % 3;

        // cut the quad along its shorter diagonal
        let extra = if nalgebra::distance_squared(&points[next1], &found.start)
            < nalgebra::distance_squared(&points[next2], &found.end)
        {
            [
                Triangle::new(points[next1], found.start, found.end),
                Triangle::new(points[next1], points[next2], found.start),
            ]
        } else {
            [
                Triangle::new(points[next2], found.start, found.end),
                Triangle::new(points[next1], points[next2], found.end),
            ]
        };

        Some(SplitPlan::Quad {
            kept: Triangle::new(points[single], found.end, found.start),
            extra,
        })
    }

    /// Drop the working set and rewind the pool, keeping its storage
    pub fn reset(&mut self) {
        self.triangles.clear();
        self.pool.clear();
        self.normal = None;
        self.coplanar_triangle_used = false;
    }

    /// Drop the working set and release the pool's storage
    pub fn release(&mut self) {
        self.reset();
        self.triangles = Vec::new();
        self.pool.reset();
    }
}
