// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - triangle clipping primitives and mesh operations

mod clip;
mod extended_triangle;
mod interval;
mod mesh;
mod plane;
mod pool;
mod segment;
mod triangle;
mod triangle_splitting;

pub use clip::{clip_mesh, ClipOutput};
pub use extended_triangle::{compute_edge_against_plane, ExtendedTriangle};
pub use interval::SeparatingAxisBounds;
pub use mesh::{Face, Mesh, NormalGroup, VertexMap};
pub use plane::Plane;
pub use pool::{TriangleHandle, TrianglePool};
pub use segment::{closest_points_segment_to_segment, Segment};
pub use triangle::Triangle;
pub use triangle_splitting::{coplanar_edge_planes, SplitterState, TriangleSplitter};
