//! Basic vector math helper functions.
//! Small helpers for projecting onto the ground plane and normalising safely.
use glam::{Vec2, Vec3};

/// Projects a world vector onto the XY ground plane.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use locomotor::vector_math::planar;
/// let flat = planar(Vec3::new(3.0, 4.0, 12.0));
/// assert!((flat.length() - 5.0).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn planar(vector: Vec3) -> Vec2 {
    vector.truncate()
}

/// Returns the unit vector in the direction of `vector`.
///
/// Non-finite input and the zero vector both produce the zero vector, so
/// callers can scale the result by a travel distance without guarding.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use locomotor::vec_normalize;
/// let unit = vec_normalize(Vec2::new(3.0, 4.0));
/// assert!((unit.x - 0.6).abs() < 1e-6);
/// assert!((unit.y - 0.8).abs() < 1e-6);
///
/// assert_eq!(vec_normalize(Vec2::ZERO), Vec2::ZERO);
/// ```
#[must_use]
pub fn vec_normalize(vector: Vec2) -> Vec2 {
    if !vector.is_finite() {
        return Vec2::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Normalises a terrain normal, falling back to straight up.
#[must_use]
pub fn surface_normal(normal: Vec3) -> Vec3 {
    if !normal.is_finite() {
        return Vec3::Z;
    }
    normal.try_normalize().unwrap_or(Vec3::Z)
}
