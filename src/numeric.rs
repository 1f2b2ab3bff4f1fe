//! Scalar and angle helpers used by the integrator.
//!
//! Every transcendental call made by the simulation goes through this module.
//! Lockstep play needs bit-identical results across machines, and the
//! platform `libm` is the only part of the tick that is not fully specified
//! by IEEE 754. Swapping these few functions for a soft-float implementation
//! makes the whole engine reproducible.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Wraps an angle in radians into `(-PI, PI]`.
///
/// # Examples
/// ```
/// use locomotor::numeric::wrap_angle;
/// let wrapped = wrap_angle(3.0 * std::f32::consts::PI / 2.0);
/// assert!((wrapped + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
/// ```
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

/// Signed shortest rotation taking `current` onto `target`.
///
/// Positive results turn counter-clockwise (increasing yaw).
#[must_use]
pub fn angle_delta(target: f32, current: f32) -> f32 {
    wrap_angle(target - current)
}

/// Yaw of a planar direction, measured counter-clockwise from +X.
///
/// The zero vector maps to a yaw of zero.
#[must_use]
pub fn yaw_from_direction(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}

/// Unit facing vector for a yaw.
#[must_use]
pub fn direction_from_yaw(yaw: f32) -> Vec2 {
    let (sin, cos) = yaw.sin_cos();
    Vec2::new(cos, sin)
}

/// Rotation applied this tick when closing `delta` at no more than `max_step`.
///
/// The result has the sign of `delta` and never overshoots it.
///
/// # Examples
/// ```
/// use locomotor::numeric::turn_step;
/// assert_eq!(turn_step(1.0, 0.25), 0.25);
/// assert_eq!(turn_step(-1.0, 0.25), -0.25);
/// assert_eq!(turn_step(0.1, 0.25), 0.1);
/// ```
#[must_use]
pub fn turn_step(delta: f32, max_step: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    delta.signum() * delta.abs().min(max_step.abs())
}

/// Clamps `value` into `[-limit, limit]`, treating the sign of `limit` as irrelevant.
#[must_use]
pub fn clamp_symmetric(value: f32, limit: f32) -> f32 {
    let bound = limit.abs();
    value.max(-bound).min(bound)
}

/// Clamps `value` between two bounds given in either order.
///
/// Unlike [`f32::clamp`] this never panics, which matters when a bound is
/// derived from a configured value of unexpected sign.
#[must_use]
pub fn clamp_between(value: f32, a: f32, b: f32) -> f32 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    value.max(low).min(high)
}

/// Arcsine with the argument clamped to the function's domain.
#[must_use]
pub fn asin_clamped(value: f32) -> f32 {
    value.clamp(-1.0, 1.0).asin()
}

/// Angle of elevation of a rise over a run.
#[must_use]
pub fn elevation(rise: f32, run: f32) -> f32 {
    rise.atan2(run)
}
