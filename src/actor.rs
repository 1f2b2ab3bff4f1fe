//! The slice of an entity that locomotion reads and writes.
//!
//! [`MovementActor`] is the only view the integrator has of its owner, so a
//! locomotor can be driven by an ECS entity, a test fixture or a replay
//! harness alike. [`MovementState`] is the plain-data implementation used by
//! the ECS integration and the command line driver.

use bevy_ecs::prelude::Component;
use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::numeric::direction_from_yaw;

/// Pitch and roll in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Attitude {
    /// Nose up is positive.
    pub pitch: f32,
    /// Right side down is positive.
    pub roll: f32,
}

impl Attitude {
    /// No pitch and no roll.
    pub const LEVEL: Self = Self {
        pitch: 0.0,
        roll: 0.0,
    };

    /// Attitude from pitch and roll in radians.
    #[must_use]
    pub const fn new(pitch: f32, roll: f32) -> Self {
        Self { pitch, roll }
    }
}

/// Mutable movement state owned by an entity.
///
/// Yaw is measured counter-clockwise from +X about the Z (up) axis.
pub trait MovementActor {
    /// World position.
    fn translation(&self) -> Vec3;
    /// Moves the entity to `translation`.
    fn set_translation(&mut self, translation: Vec3);

    /// Heading in radians.
    fn yaw(&self) -> f32;
    /// Sets the heading in radians.
    fn set_yaw(&mut self, yaw: f32);

    /// Orientation of the whole entity relative to the world, excluding yaw.
    fn set_world_attitude(&mut self, attitude: Attitude);

    /// Rotation of the visible body relative to the entity, e.g. banking.
    fn set_body_attitude(&mut self, attitude: Attitude);

    /// Scalar speed in units per frame.
    fn speed(&self) -> f32;
    /// Stores the scalar speed for the next tick.
    fn set_speed(&mut self, speed: f32);

    /// Vertical velocity accumulated by the lift controller.
    fn lift(&self) -> f32;
    /// Stores the lift accumulator for the next tick.
    fn set_lift(&mut self, lift: f32);

    /// Front wheel deflection for wheeled visuals, in radians.
    fn set_steering_angle(&mut self, angle: f32);

    /// Whether damaged template values apply.
    fn is_damaged(&self) -> bool;

    /// Planar unit vector the entity is facing.
    fn facing(&self) -> Vec2 {
        direction_from_yaw(self.yaw())
    }
}

/// Plain movement state for one entity.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementState {
    /// World position.
    pub translation: Vec3,
    /// Heading in radians, counter-clockwise from +X.
    pub yaw: f32,
    /// Entity pitch and roll against the world.
    pub world_attitude: Attitude,
    /// Visible body pitch and roll against the entity.
    pub body_attitude: Attitude,
    /// Units per frame.
    pub speed: f32,
    /// Lift controller accumulator.
    pub lift: f32,
    /// Front wheel deflection in radians.
    pub steering_angle: f32,
    /// Use damaged template values.
    pub damaged: bool,
}

impl MovementState {
    /// State at rest at `translation`, facing `yaw`.
    #[must_use]
    pub fn at(translation: Vec3, yaw: f32) -> Self {
        Self {
            translation,
            yaw,
            ..Self::default()
        }
    }

    /// World rotation combining yaw with world pitch and roll.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::ZYX,
            self.yaw,
            self.world_attitude.pitch,
            self.world_attitude.roll,
        )
    }
}

impl MovementActor for MovementState {
    fn translation(&self) -> Vec3 {
        self.translation
    }

    fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    fn set_world_attitude(&mut self, attitude: Attitude) {
        self.world_attitude = attitude;
    }

    fn set_body_attitude(&mut self, attitude: Attitude) {
        self.body_attitude = attitude;
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn lift(&self) -> f32 {
        self.lift
    }

    fn set_lift(&mut self, lift: f32) {
        self.lift = lift;
    }

    fn set_steering_angle(&mut self, angle: f32) {
        self.steering_angle = angle;
    }

    fn is_damaged(&self) -> bool {
        self.damaged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn facing_follows_yaw() {
        let state = MovementState::at(Vec3::ZERO, FRAC_PI_2);
        let facing = state.facing();
        assert_relative_eq!(facing.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(facing.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_turns_forward_axis_by_yaw() {
        let state = MovementState::at(Vec3::ZERO, FRAC_PI_2);
        let forward = state.rotation() * Vec3::X;
        assert_relative_eq!(forward.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(forward.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(forward.z, 0.0, epsilon = 1e-6);
    }
}
