// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh clipping driver
//! Cuts every face of a target mesh along the triangles of a cutter mesh,
//! one splitter per group of faces sharing a normal

use super::{Mesh, NormalGroup, Triangle, TriangleSplitter};
use crate::config::ClipConfig;
use crate::error::Result;
use parry3d_f64::bounding_volume::{Aabb, BoundingVolume};
use rayon::prelude::*;

/// Fragments produced by [`clip_mesh`]
#[derive(Debug, Clone, Default)]
pub struct ClipOutput {
    /// Target fragments, grouped by normal in group order
    pub triangles: Vec<Triangle>,
    /// Number of normal groups in the target
    pub groups: usize,
    /// Groups cut by at least one coplanar cutter triangle
    pub coplanar_groups: usize,
}

impl ClipOutput {
    pub fn surface_area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Weld the fragments back into an indexed mesh
    pub fn into_mesh(self, weld_epsilon: f64) -> Mesh {
        Mesh::from_triangles(&self.triangles, weld_epsilon)
    }
}

struct GroupFragments {
    triangles: Vec<Triangle>,
    coplanar: bool,
}

/// Split `target`'s faces along every triangle of `cutter` that reaches them.
///
/// Faces are grouped by normal; each group gets its own [`TriangleSplitter`]
/// and is cut only by cutter triangles whose bounds overlap the group's.
/// With `config.parallel` the groups run on the rayon pool.
pub fn clip_mesh(target: &Mesh, cutter: &Mesh, config: &ClipConfig) -> Result<ClipOutput> {
    config.validate()?;

    let groups = target.group_by_normal_with(config.normal_epsilon, config.degenerate_epsilon);
    let cutters: Vec<(Triangle, Aabb)> = cutter
        .triangles()
        .filter(|t| !t.is_degenerate(config.degenerate_epsilon))
        .map(|t| (t, t.aabb()))
        .collect();

    log::debug!(
        "clipping {} faces in {} normal groups against {} cutter triangles",
        target.face_count(),
        groups.len(),
        cutters.len()
    );

    let run = |group: &NormalGroup| clip_group(target, group, &cutters, config);

    let fragments: Vec<GroupFragments> = if config.parallel {
        groups.par_iter().map(run).collect::<Result<_>>()?
    } else {
        groups.iter().map(run).collect::<Result<_>>()?
    };

    let mut output = ClipOutput {
        groups: groups.len(),
        ..ClipOutput::default()
    };
    for group in fragments {
        output.coplanar_groups += usize::from(group.coplanar);
        output.triangles.extend(group.triangles);
    }

    log::debug!(
        "clip produced {} fragments ({} coplanar groups)",
        output.triangles.len(),
        output.coplanar_groups
    );

    Ok(output)
}

fn clip_group(
    target: &Mesh,
    group: &NormalGroup,
    cutters: &[(Triangle, Aabb)],
    config: &ClipConfig,
) -> Result<GroupFragments> {
    let bounds = group.bounding_box(target).loosened(config.epsilon);

    let mut splitter = TriangleSplitter::with_config(*config);
    splitter.initialize(&group.triangles(target))?;

    for (triangle, aabb) in cutters {
        if bounds.intersects(aabb) {
            splitter.split_by_triangle(triangle);
        }
    }

    Ok(GroupFragments {
        triangles: splitter.to_vec(),
        coplanar: splitter.coplanar_triangle_used(),
    })
}
