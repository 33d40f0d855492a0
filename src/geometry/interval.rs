// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 1-D projection intervals for separating-axis tests

use crate::utils::math::{Point, Vector};
use parry3d_f64::bounding_volume::Aabb;

/// Interval covered by a shape projected onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatingAxisBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for SeparatingAxisBounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl SeparatingAxisBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// An inverted interval that any projected point will widen
    pub fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Project `points` onto `axis`
    pub fn from_points<'a>(axis: &Vector, points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut bounds = Self::empty();
        bounds.set_from_points(axis, points);
        bounds
    }

    /// Project the 8 corners of `aabb` onto `axis`
    pub fn from_box(axis: &Vector, aabb: &Aabb) -> Self {
        let mut bounds = Self::empty();
        bounds.set_from_box(axis, aabb);
        bounds
    }

    pub fn set_from_points<'a>(&mut self, axis: &Vector, points: impl IntoIterator<Item = &'a Point>) {
        *self = Self::empty();
        for p in points {
            self.expand(axis.dot(&p.coords));
        }
    }

    pub fn set_from_box(&mut self, axis: &Vector, aabb: &Aabb) {
        *self = Self::empty();
        for corner in 0..8u8 {
            let x = if corner & 1 == 0 { aabb.mins.x } else { aabb.maxs.x };
            let y = if corner & 2 == 0 { aabb.mins.y } else { aabb.maxs.y };
            let z = if corner & 4 == 0 { aabb.mins.z } else { aabb.maxs.z };
            self.expand(axis.x * x + axis.y * y + axis.z * z);
        }
    }

    #[inline]
    fn expand(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// True when the two intervals do not overlap.
    /// `false` is not proof of intersection; every candidate axis must be tested.
    #[inline]
    pub fn is_separated(&self, other: &SeparatingAxisBounds) -> bool {
        self.max < other.min || other.max < self.min
    }
}
