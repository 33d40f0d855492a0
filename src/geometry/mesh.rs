// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Indexed triangle mesh, vertex welding and normal grouping

use super::Triangle;
use crate::utils::math::{Point, Vector, DEGENERATE_EPSILON};
use ahash::AHashMap;
use parry3d_f64::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

/// Face defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub indices: [usize; 3],
}

impl Face {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }

    /// Two corners share a vertex index
    pub fn is_collapsed(&self) -> bool {
        let [i0, i1, i2] = self.indices;
        i0 == i1 || i1 == i2 || i0 == i2
    }
}

/// Faces of a mesh sharing one unit normal
#[derive(Debug, Clone, PartialEq)]
pub struct NormalGroup {
    pub normal: Vector,
    pub faces: Vec<usize>,
}

impl NormalGroup {
    pub fn triangles(&self, mesh: &Mesh) -> Vec<Triangle> {
        self.faces.iter().map(|&face| mesh.triangle(face)).collect()
    }

    pub fn bounding_box(&self, mesh: &Mesh) -> Aabb {
        bounds_of(
            self.faces
                .iter()
                .flat_map(|&face| mesh.faces[face].indices)
                .map(|index| mesh.vertices[index]),
        )
    }
}

/// Triangular mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Point) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Geometry of face `face`
    pub fn triangle(&self, face: usize) -> Triangle {
        let [i0, i1, i2] = self.faces[face].indices;
        Triangle::new(self.vertices[i0], self.vertices[i1], self.vertices[i2])
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.faces.len()).map(move |face| self.triangle(face))
    }

    pub fn to_triangles(&self) -> Vec<Triangle> {
        self.triangles().collect()
    }

    /// Build an indexed mesh from a triangle soup, sharing vertices closer
    /// than `weld_epsilon`. Triangles that collapse after welding are dropped.
    pub fn from_triangles(triangles: &[Triangle], weld_epsilon: f64) -> Self {
        let mut vertex_map = VertexMap::new(weld_epsilon);
        let mut faces = Vec::with_capacity(triangles.len());

        for triangle in triangles {
            let face = Face::new(triangle.points().map(|p| vertex_map.get_or_add(&p)));
            if !face.is_collapsed() {
                faces.push(face);
            }
        }

        Self {
            vertices: vertex_map.into_vertices(),
            faces,
        }
    }

    /// Weld vertices that are within epsilon distance of each other.
    /// Faces left with a repeated index are removed.
    /// Returns the number of vertices removed.
    pub fn weld_vertices(&mut self, epsilon: f64) -> usize {
        if self.vertices.is_empty() {
            return 0;
        }

        let original_count = self.vertices.len();
        let mut vertex_map = VertexMap::new(epsilon);
        let remap: Vec<usize> = self
            .vertices
            .iter()
            .map(|vertex| vertex_map.get_or_add(vertex))
            .collect();

        for face in &mut self.faces {
            face.indices = face.indices.map(|index| remap[index]);
        }

        let face_count = self.faces.len();
        self.faces.retain(|face| !face.is_collapsed());
        if self.faces.len() < face_count {
            log::debug!(
                "welding collapsed {} faces",
                face_count - self.faces.len()
            );
        }

        self.vertices = vertex_map.into_vertices();
        original_count - self.vertices.len()
    }

    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|t| t.area()).sum()
    }

    /// Axis-aligned bounds of every vertex; inverted for an empty mesh
    pub fn bounding_box(&self) -> Aabb {
        bounds_of(self.vertices.iter().copied())
    }

    /// Partition the non-degenerate faces into groups whose normals agree
    /// within `epsilon` (`1 - n . n0 <= epsilon`, `n0` the group's first face).
    pub fn group_by_normal(&self, epsilon: f64) -> Vec<NormalGroup> {
        self.group_by_normal_with(epsilon, DEGENERATE_EPSILON)
    }

    /// [`Mesh::group_by_normal`] with an explicit sliver tolerance.
    ///
    /// Group normals are bucketed on a grid whose cell spans the largest
    /// normal difference within `epsilon`, so each face only checks the
    /// groups in neighbouring cells. The first created group that matches
    /// still wins.
    pub fn group_by_normal_with(&self, epsilon: f64, degenerate_epsilon: f64) -> Vec<NormalGroup> {
        let mut groups: Vec<NormalGroup> = Vec::new();
        let mut cells: AHashMap<GridKey, Vec<usize>> = AHashMap::new();
        // |n - n0|^2 = 2 (1 - n . n0) for unit normals
        let inv_cell = 1.0 / ((2.0 * epsilon.max(0.0)).sqrt() * 1.01).max(1e-7);

        for (face, triangle) in self.triangles().enumerate() {
            if triangle.is_degenerate(degenerate_epsilon) {
                continue;
            }

            let normal = triangle.normal();
            let key = GridKey::new(&normal, inv_cell);
            let matching = key
                .neighbours()
                .filter_map(|neighbour| cells.get(&neighbour))
                .flatten()
                .copied()
                .filter(|&group| 1.0 - normal.dot(&groups[group].normal) <= epsilon)
                .min();

            match matching {
                Some(group) => groups[group].faces.push(face),
                None => {
                    cells.entry(key).or_default().push(groups.len());
                    groups.push(NormalGroup {
                        normal,
                        faces: vec![face],
                    });
                }
            }
        }

        groups
    }
}

fn bounds_of(points: impl IntoIterator<Item = Point>) -> Aabb {
    points.into_iter().fold(Aabb::new_invalid(), |aabb, p| {
        Aabb::new(aabb.mins.inf(&p), aabb.maxs.sup(&p))
    })
}

/// Deduplicates points on a hashed grid.
/// A point matches an earlier one within `epsilon`, searched across the
/// neighbouring grid cells so matches straddling a cell boundary are found.
pub struct VertexMap {
    vertices: Vec<Point>,
    cells: AHashMap<GridKey, Vec<usize>>,
    epsilon: f64,
    inv_cell: f64,
}

#[derive(Hash, PartialEq, Eq, Clone, Copy)]
struct GridKey {
    x: i64,
    y: i64,
    z: i64,
}

impl GridKey {
    fn new(v: &Vector, inv_cell: f64) -> Self {
        Self {
            x: (v.x * inv_cell).floor() as i64,
            y: (v.y * inv_cell).floor() as i64,
            z: (v.z * inv_cell).floor() as i64,
        }
    }

    fn offset(self, dx: i64, dy: i64, dz: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    /// This cell and its 26 neighbours
    fn neighbours(self) -> impl Iterator<Item = GridKey> {
        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| (-1..=1).map(move |dz| self.offset(dx, dy, dz)))
        })
    }
}

impl VertexMap {
    pub fn new(epsilon: f64) -> Self {
        let epsilon = epsilon.max(f64::MIN_POSITIVE);
        Self {
            vertices: Vec::new(),
            cells: AHashMap::new(),
            epsilon,
            inv_cell: 1.0 / epsilon,
        }
    }

    /// Index of an existing vertex within epsilon of `point`, adding it if none
    pub fn get_or_add(&mut self, point: &Point) -> usize {
        let key = GridKey::new(&point.coords, self.inv_cell);

        let existing = key
            .neighbours()
            .filter_map(|neighbour| self.cells.get(&neighbour))
            .flatten()
            .copied()
            .find(|&index| nalgebra::distance(&self.vertices[index], point) < self.epsilon);
        if let Some(index) = existing {
            return index;
        }

        let index = self.vertices.len();
        self.vertices.push(*point);
        self.cells.entry(key).or_default().push(index);
        index
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }
}
