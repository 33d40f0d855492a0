// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Clipping configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ClipError;
use crate::utils::math::{DEGENERATE_EPSILON, EPSILON, PARALLEL_EPSILON};

/// Default config file looked up by [`ClipConfig::load`]
pub const CONFIG_FILE: &str = "clip.toml";

/// Tolerances and driver settings for the clipping kernel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Snapping distance for plane/edge intersection points
    pub epsilon: f64,
    /// Distance below which a point counts as lying on a cutting plane
    pub coplanar_epsilon: f64,
    /// Tolerance on `1 - |n1 . n2|` for treating a cutter as coplanar
    pub parallel_epsilon: f64,
    /// Angle / squared edge length below which a triangle is a sliver
    pub degenerate_epsilon: f64,
    /// Tolerance on `1 - n . n0` when validating a working set's normals
    pub normal_epsilon: f64,
    /// Distance under which output vertices are merged
    pub weld_epsilon: f64,
    /// Clip normal groups on the rayon pool
    pub parallel: bool,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            coplanar_epsilon: EPSILON,
            parallel_epsilon: PARALLEL_EPSILON,
            degenerate_epsilon: DEGENERATE_EPSILON,
            normal_epsilon: EPSILON,
            weld_epsilon: 1e-9,
            parallel: true,
        }
    }
}

impl ClipConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ClipConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        if let Ok(eps) = std::env::var("POLYFRAME_CLIP_EPSILON") {
            if let Ok(value) = eps.parse() {
                config.epsilon = value;
                config.coplanar_epsilon = value;
            }
        }

        if let Ok(parallel) = std::env::var("POLYFRAME_CLIP_PARALLEL") {
            config.parallel = parallel.parse().unwrap_or(config.parallel);
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Reject negative or non-finite tolerances
    pub fn validate(&self) -> std::result::Result<(), ClipError> {
        let tolerances = [
            ("epsilon", self.epsilon),
            ("coplanar_epsilon", self.coplanar_epsilon),
            ("parallel_epsilon", self.parallel_epsilon),
            ("degenerate_epsilon", self.degenerate_epsilon),
            ("normal_epsilon", self.normal_epsilon),
            ("weld_epsilon", self.weld_epsilon),
        ];

        for (name, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(ClipError::Config(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
