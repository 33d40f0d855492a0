// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON triangle lists, `[{"a": [x, y, z], "b": [...], "c": [...]}, ...]`

use crate::error::Result;
use crate::geometry::Triangle;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub fn read_triangles(path: impl AsRef<Path>) -> Result<Vec<Triangle>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let triangles: Vec<Triangle> = serde_json::from_reader(reader)?;
    Ok(triangles)
}

pub fn write_triangles(path: impl AsRef<Path>, triangles: &[Triangle]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, triangles)?;
    writer.flush()?;
    Ok(())
}
