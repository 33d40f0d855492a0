// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bump-allocated pool of reusable triangles

use super::Triangle;

/// Index of a slot in a [`TrianglePool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleHandle(usize);

impl TriangleHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of triangles addressed by [`TriangleHandle`].
///
/// `clear` rewinds the cursor without freeing storage, so repeated splitting
/// passes reuse the same slots instead of allocating.
#[derive(Debug, Default, Clone)]
pub struct TrianglePool {
    slots: Vec<Triangle>,
    cursor: usize,
}

impl TrianglePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Hand out the next slot, growing the store when every slot is live.
    /// The slot keeps whatever vertices it held before.
    pub fn acquire(&mut self) -> TriangleHandle {
        if self.cursor >= self.slots.len() {
            self.slots.push(Triangle::default());
        }
        let handle = TriangleHandle(self.cursor);
        self.cursor += 1;
        handle
    }

    /// Acquire a slot and write `triangle` into it
    pub fn acquire_with(&mut self, triangle: Triangle) -> TriangleHandle {
        let handle = self.acquire();
        self.slots[handle.0] = triangle;
        handle
    }

    pub fn get(&self, handle: TriangleHandle) -> &Triangle {
        &self.slots[handle.0]
    }

    pub fn get_mut(&mut self, handle: TriangleHandle) -> &mut Triangle {
        &mut self.slots[handle.0]
    }

    /// Rewind the cursor; slots stay allocated for reuse
    pub fn clear(&mut self) {
        self.cursor = 0;
    }

    /// Rewind the cursor and release the backing store
    pub fn reset(&mut self) {
        self.slots = Vec::new();
        self.cursor = 0;
    }

    /// Number of slots handed out since the last clear
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Number of slots allocated, live or not
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::Point;

    #[test]
    fn test_clear_reuses_slots() {
        let mut pool = TrianglePool::new();
        let h1 = pool.acquire();
        let h2 = pool.acquire();
        pool.get_mut(h1).a = Point::new(1.0, 2.0, 3.0);
        let p1: *const Triangle = pool.get(h1);
        let p2: *const Triangle = pool.get(h2);

        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.allocated(), 2);

        let r1 = pool.acquire();
        let r2 = pool.acquire();
        assert_eq!((r1, r2), (h1, h2));
        assert!(std::ptr::eq(p1, pool.get(r1)));
        assert!(std::ptr::eq(p2, pool.get(r2)));
        assert_eq!(pool.allocated(), 2);
        // stale contents survive until overwritten
        assert_eq!(pool.get(r1).a, Point::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_reset_releases_storage() {
        let mut pool = TrianglePool::new();
        pool.acquire();
        pool.acquire();
        pool.reset();
        assert_eq!(pool.allocated(), 0);
        assert_eq!(pool.acquire().index(), 0);
    }
}
