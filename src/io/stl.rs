// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL import and export via `stl_io`
//!
//! STL stores single precision; coordinates are widened on read and
//! narrowed on write.

use crate::error::{ClipError, Result};
use crate::geometry::{Face, Mesh, Triangle};
use crate::utils::math::Point;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;
use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

/// Read an ASCII or binary STL file into an indexed mesh
pub fn read_stl(path: impl AsRef<Path>) -> Result<Mesh> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let mesh = read_stl_from(&mut reader)?;
    log::debug!(
        "read {} faces, {} vertices from {:?}",
        mesh.face_count(),
        mesh.vertex_count(),
        path.as_ref()
    );
    Ok(mesh)
}

pub fn read_stl_from<R: Read + Seek>(reader: &mut R) -> Result<Mesh> {
    let stl = stl_io::read_stl(reader).map_err(|e| ClipError::Stl(e.to_string()))?;

    let mut mesh = Mesh::with_capacity(stl.vertices.len(), stl.faces.len());
    for vertex in &stl.vertices {
        mesh.add_vertex(Point::new(
            f64::from(vertex[0]),
            f64::from(vertex[1]),
            f64::from(vertex[2]),
        ));
    }

    // stl_io already shares identical vertices between faces
    for face in &stl.faces {
        mesh.add_face(Face::new(face.vertices));
    }

    Ok(mesh)
}

/// Write triangles as a binary STL file
pub fn write_stl(path: impl AsRef<Path>, triangles: &[Triangle]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_stl_to(&mut writer, triangles)?;
    writer.flush()?;
    Ok(())
}

pub fn write_stl_to<W: Write>(writer: &mut W, triangles: &[Triangle]) -> Result<()> {
    let stl_triangles = triangles.iter().map(|tri| {
        let normal = tri.normal();
        StlTriangle {
            normal: Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
            vertices: tri.points().map(|p| StlVertex::new([p.x as f32, p.y as f32, p.z as f32])),
        }
    });

    stl_io::write_stl(writer, stl_triangles).map_err(|e| ClipError::Stl(e.to_string()))
}
