// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared fixtures for integration tests

#![allow(dead_code)]

use polyframe_clip::utils::Point;
use polyframe_clip::{Mesh, Triangle};

pub fn unit_right() -> Triangle {
    Triangle::new(
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
    )
}

/// Axis-aligned cube, faces wound counter-clockwise seen from outside
pub fn cube(min: [f64; 3], size: f64) -> Mesh {
    let p = |x: f64, y: f64, z: f64| {
        Point::new(min[0] + x * size, min[1] + y * size, min[2] + z * size)
    };

    let quads = [
        // -z
        [p(0., 0., 0.), p(0., 1., 0.), p(1., 1., 0.), p(1., 0., 0.)],
        // +z
        [p(0., 0., 1.), p(1., 0., 1.), p(1., 1., 1.), p(0., 1., 1.)],
        // -y
        [p(0., 0., 0.), p(1., 0., 0.), p(1., 0., 1.), p(0., 0., 1.)],
        // +y
        [p(0., 1., 0.), p(0., 1., 1.), p(1., 1., 1.), p(1., 1., 0.)],
        // -x
        [p(0., 0., 0.), p(0., 0., 1.), p(0., 1., 1.), p(0., 1., 0.)],
        // +x
        [p(1., 0., 0.), p(1., 1., 0.), p(1., 1., 1.), p(1., 0., 1.)],
    ];

    let triangles: Vec<Triangle> = quads
        .iter()
        .flat_map(|[a, b, c, d]| [Triangle::new(*a, *b, *c), Triangle::new(*a, *c, *d)])
        .collect();

    Mesh::from_triangles(&triangles, 1e-9)
}

/// Order-independent comparison key for triangle sets
pub fn sorted(triangles: &[Triangle]) -> Vec<Triangle> {
    let mut out = triangles.to_vec();
    out.sort_by(|t1, t2| {
        let k1 = t1.points().map(|p| [p.x, p.y, p.z]);
        let k2 = t2.points().map(|p| [p.x, p.y, p.z]);
        k1.partial_cmp(&k2).unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}
