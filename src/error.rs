// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the clipping kernel

use thiserror::Error;

/// Errors raised by the clipping kernel and its I/O helpers.
///
/// Degenerate geometry is never reported here; it is filtered silently.
#[derive(Debug, Error)]
pub enum ClipError {
    /// A splitter was initialized with triangles that do not share a normal
    #[error("triangle {index} does not share the working set normal")]
    MixedNormals { index: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("STL error: {0}")]
    Stl(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ClipError>;
