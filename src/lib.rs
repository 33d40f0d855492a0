// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Clip
//!
//! Triangle/plane clipping kernel for CSG mesh booleans.
//! Splits a set of coplanar triangles along planes or along the triangles of
//! an opposing mesh, so the fragments can later be classified inside/outside.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use config::ClipConfig;
pub use error::{ClipError, Result};
pub use geometry::{
    clip_mesh, ClipOutput, ExtendedTriangle, Mesh, Plane, Segment, Triangle, TriangleSplitter,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Point;

    #[test]
    fn test_basic_split() {
        let mut splitter = TriangleSplitter::new();
        splitter.initialize_single(&Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ));
        let cut = Plane::new(nalgebra::Vector3::new(1.0, 0.0, 0.0), -0.5);
        assert_eq!(splitter.split_by_plane(&cut, None), 1);
        assert_eq!(splitter.len(), 3);
    }
}
