//! Terrain doubles.

use std::cell::Cell;

use glam::Vec3;
use locomotor::TerrainQuery;

/// Wraps a terrain and counts the queries made against it.
#[derive(Debug, Default)]
pub struct CountingTerrain<T> {
    inner: T,
    heights: Cell<usize>,
    normals: Cell<usize>,
}

impl<T> CountingTerrain<T> {
    /// Wraps `inner` with both counters at zero.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            heights: Cell::new(0),
            normals: Cell::new(0),
        }
    }

    /// Height lookups since creation or the last [`Self::reset`].
    pub fn height_queries(&self) -> usize {
        self.heights.get()
    }

    /// Normal lookups since creation or the last [`Self::reset`].
    pub fn normal_queries(&self) -> usize {
        self.normals.get()
    }

    /// Zeroes both counters.
    pub fn reset(&self) {
        self.heights.set(0);
        self.normals.set(0);
    }
}

impl<T: TerrainQuery> TerrainQuery for CountingTerrain<T> {
    fn height(&self, x: f32, y: f32) -> f32 {
        self.heights.set(self.heights.get() + 1);
        self.inner.height(x, y)
    }

    fn normal(&self, x: f32, y: f32) -> Vec3 {
        self.normals.set(self.normals.get() + 1);
        self.inner.normal(x, y)
    }
}

/// Flat ground that rises to `high` for `x >= edge`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTerrain {
    /// X coordinate where the step begins.
    pub edge: f32,
    /// Height before the step.
    pub low: f32,
    /// Height from the step onwards.
    pub high: f32,
}

impl TerrainQuery for StepTerrain {
    fn height(&self, x: f32, _y: f32) -> f32 {
        if x >= self.edge {
            self.high
        } else {
            self.low
        }
    }

    fn normal(&self, _x: f32, _y: f32) -> Vec3 {
        Vec3::Z
    }
}
