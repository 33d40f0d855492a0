// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - STL and JSON triangle files

pub mod json;
pub mod stl;

use crate::error::Result;
use crate::geometry::{Mesh, Triangle};
use std::path::Path;

pub use json::{read_triangles, write_triangles};
pub use stl::{read_stl, read_stl_from, write_stl, write_stl_to};

/// Whether `path` names a JSON triangle list rather than an STL file
pub fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Read a mesh from `.json` triangles or STL, chosen by extension
pub fn read_mesh(path: impl AsRef<Path>, weld_epsilon: f64) -> Result<Mesh> {
    let path = path.as_ref();
    if is_json(path) {
        let triangles = read_triangles(path)?;
        Ok(Mesh::from_triangles(&triangles, weld_epsilon))
    } else {
        read_stl(path)
    }
}

/// Write triangles as `.json` or STL, chosen by extension
pub fn write_mesh(path: impl AsRef<Path>, triangles: &[Triangle]) -> Result<()> {
    let path = path.as_ref();
    if is_json(path) {
        write_triangles(path, triangles)
    } else {
        write_stl(path, triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json() {
        assert!(is_json(Path::new("cut.json")));
        assert!(is_json(Path::new("dir/CUT.JSON")));
        assert!(!is_json(Path::new("cut.stl")));
        assert!(!is_json(Path::new("json")));
    }
}
