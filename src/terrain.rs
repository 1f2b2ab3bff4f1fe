//! Terrain sampling used by the locomotion integrator.
//!
//! The engine only ever asks two questions of the ground: how high is it and
//! which way does it face. Height maps, water layers and bridges all live
//! behind [`TerrainQuery`].

use glam::Vec3;

/// Read-only ground queries at planar coordinates.
#[cfg_attr(test, mockall::automock)]
pub trait TerrainQuery {
    /// Ground height at `(x, y)`.
    fn height(&self, x: f32, y: f32) -> f32;

    /// Surface normal at `(x, y)`. Need not be normalised.
    fn normal(&self, x: f32, y: f32) -> Vec3;
}

/// Level ground at a constant height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatTerrain {
    /// Ground height everywhere.
    pub height: f32,
}

impl FlatTerrain {
    /// Level ground at `height`.
    #[must_use]
    pub const fn new(height: f32) -> Self {
        Self { height }
    }
}

impl TerrainQuery for FlatTerrain {
    fn height(&self, _x: f32, _y: f32) -> f32 {
        self.height
    }

    fn normal(&self, _x: f32, _y: f32) -> Vec3 {
        Vec3::Z
    }
}

/// An infinite inclined plane, `z = origin_height + grad_x * x + grad_y * y`.
///
/// # Examples
/// ```
/// use locomotor::terrain::{SlopedTerrain, TerrainQuery};
/// let ramp = SlopedTerrain::new(0.0, 0.5, 0.0);
/// assert!((ramp.height(4.0, 0.0) - 2.0).abs() < f32::EPSILON);
/// assert!(ramp.normal(0.0, 0.0).x < 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlopedTerrain {
    /// Height at the origin.
    pub origin_height: f32,
    /// Rise per unit of +X.
    pub grad_x: f32,
    /// Rise per unit of +Y.
    pub grad_y: f32,
}

impl SlopedTerrain {
    /// Plane through `(0, 0, origin_height)` with the given gradients.
    #[must_use]
    pub const fn new(origin_height: f32, grad_x: f32, grad_y: f32) -> Self {
        Self {
            origin_height,
            grad_x,
            grad_y,
        }
    }
}

impl TerrainQuery for SlopedTerrain {
    fn height(&self, x: f32, y: f32) -> f32 {
        self.origin_height + self.grad_x * x + self.grad_y * y
    }

    fn normal(&self, _x: f32, _y: f32) -> Vec3 {
        Vec3::new(-self.grad_x, -self.grad_y, 1.0).normalize_or(Vec3::Z)
    }
}
