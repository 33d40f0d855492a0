// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh clipping end to end, including file round trips

mod common;

use anyhow::Result;
use approx::assert_relative_eq;
use polyframe_clip::utils::Point;
use polyframe_clip::{clip_mesh, io, ClipConfig, Triangle};

use common::{cube, sorted};

fn inside_box(p: &Point, min: f64, max: f64, tol: f64) -> bool {
    [p.x, p.y, p.z]
        .iter()
        .all(|v| *v >= min - tol && *v <= max + tol)
}

#[test]
fn test_overlapping_cubes() -> Result<()> {
    let target = cube([0.0, 0.0, 0.0], 2.0);
    let cutter = cube([1.0, 1.0, 1.0], 2.0);

    let output = clip_mesh(&target, &cutter, &ClipConfig::default())?;

    println!("\n=== Overlapping cubes ===");
    println!("  Target faces: {}", target.face_count());
    println!("  Fragments: {}", output.triangles.len());
    println!("  Normal groups: {} ({} coplanar)", output.groups, output.coplanar_groups);

    assert_eq!(output.groups, 6);
    assert!(output.triangles.len() > target.face_count());
    assert_relative_eq!(output.surface_area(), 24.0, max_relative = 1e-9);

    // every fragment is either wholly inside the cutter or wholly outside it
    for tri in &output.triangles {
        let all_inside = tri.points().iter().all(|p| inside_box(p, 1.0, 3.0, 1e-9));
        let centroid_outside = !inside_box(&tri.centroid(), 1.0, 3.0, -1e-9);
        assert!(all_inside || centroid_outside, "fragment straddles the cutter: {:?}", tri);
    }

    // the three faces away from the cutter are untouched
    let untouched = output
        .triangles
        .iter()
        .filter(|t| t.points().iter().any(|p| p.x == 0.0 && t.normal().x < -0.5))
        .count();
    assert_eq!(untouched, 2);

    Ok(())
}

#[test]
fn test_separate_cubes_pass_through() -> Result<()> {
    let target = cube([0.0, 0.0, 0.0], 1.0);
    let cutter = cube([5.0, 5.0, 5.0], 1.0);

    let output = clip_mesh(&target, &cutter, &ClipConfig::default())?;
    assert_eq!(sorted(&output.triangles), sorted(&target.to_triangles()));
    assert_eq!(output.coplanar_groups, 0);
    Ok(())
}

#[test]
fn test_sequential_and_parallel_agree() -> Result<()> {
    let target = cube([0.0, 0.0, 0.0], 2.0);
    let cutter = cube([0.5, 0.5, -1.0], 1.0);

    let parallel = clip_mesh(&target, &cutter, &ClipConfig::default())?;
    let sequential = clip_mesh(
        &target,
        &cutter,
        &ClipConfig {
            parallel: false,
            ..ClipConfig::default()
        },
    )?;

    assert_eq!(parallel.triangles, sequential.triangles);
    assert_eq!(parallel.coplanar_groups, sequential.coplanar_groups);
    Ok(())
}

#[test]
fn test_stl_roundtrip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("cube.stl");

    let source = cube([0.0, 0.0, 0.0], 2.0);
    io::write_mesh(&path, &source.to_triangles())?;

    let mesh = io::read_mesh(&path, 1e-9)?;
    assert_eq!(mesh.face_count(), 12);
    assert_eq!(mesh.vertex_count(), 8);
    assert_relative_eq!(mesh.surface_area(), 24.0);
    assert_eq!(sorted(&mesh.to_triangles()), sorted(&source.to_triangles()));
    Ok(())
}

#[test]
fn test_json_roundtrip_of_clip_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fragments.json");

    let output = clip_mesh(
        &cube([0.0, 0.0, 0.0], 2.0),
        &cube([1.0, 1.0, 1.0], 2.0),
        &ClipConfig::default(),
    )?;
    io::write_mesh(&path, &output.triangles)?;

    let triangles: Vec<Triangle> = io::read_triangles(&path)?;
    assert_eq!(triangles.len(), output.triangles.len());
    for (read, written) in triangles.iter().zip(&output.triangles) {
        for (p, q) in read.points().iter().zip(written.points().iter()) {
            assert_relative_eq!(p, q, epsilon = 1e-12);
        }
    }

    let welded = io::read_mesh(&path, 1e-9)?;
    assert_eq!(welded.face_count(), output.triangles.len());
    assert!(welded.vertex_count() < output.triangles.len() * 3);
    Ok(())
}
