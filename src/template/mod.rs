//! Locomotor templates: the tunable motion parameters for one movement style.
//!
//! A template is built once from unit data, validated with
//! [`LocomotorTemplate::validate`] and then shared read-only between every
//! entity that moves that way. All rates are per logic frame; use
//! [`TemplateDefinition`] to author them in per-second units.

mod definition;
mod kinds;

pub use definition::{DefinitionError, TemplateDefinition, TemplateRegistry};
pub use kinds::{Appearance, BehaviorZ, MovementPriority, Surface, Surfaces};

use std::sync::Arc;

use log::warn;
use thiserror::Error;

use crate::{BIG_NUMBER, HEAL_EPSILON, UNSET_DAMAGED_VALUE};

/// Fatal configuration problems detected by [`LocomotorTemplate::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    /// Thrust templates cannot also request a z-axis behaviour.
    #[error("THRUST locomotors may not use z-axis behaviour {behavior:?}")]
    ThrustWithZAxisBehavior {
        /// The rejected behaviour.
        behavior: BehaviorZ,
    },
    /// Thrust templates cannot carry lift.
    #[error("THRUST locomotors may not use lift (lift {lift}, damaged lift {lift_damaged})")]
    ThrustWithLift {
        /// Configured lift.
        lift: f32,
        /// Configured damaged lift.
        lift_damaged: f32,
    },
}

/// Tunable parameters for one movement style.
///
/// Fields named `*_damaged` hold [`UNSET_DAMAGED_VALUE`] until validation
/// copies the nominal value into them.
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotorTemplate {
    /// Surfaces the template may travel on.
    pub surfaces: Surfaces,
    /// Movement style; selects the appearance rules.
    pub appearance: Appearance,
    /// How the template treats the Z axis.
    pub behavior_z: BehaviorZ,
    /// Preferred slot when moving in a group.
    pub movement_priority: MovementPriority,

    /// `None` means the template carries no speed of its own and the
    /// entity's base speed is used directly.
    pub max_speed: Option<f32>,
    /// Top speed while damaged.
    pub max_speed_damaged: f32,
    /// Slowest sustainable speed; wings and thrust keep it positive.
    pub min_speed: f32,
    /// Radians per frame.
    pub max_turn_rate: f32,
    /// Turn rate while damaged.
    pub max_turn_rate_damaged: f32,
    /// Speed gained per frame, in units per frame.
    pub acceleration: f32,
    /// Acceleration while damaged.
    pub acceleration_damaged: f32,
    /// Max lifting acceleration, flying templates only.
    pub lift: f32,
    /// Lift while damaged.
    pub lift_damaged: f32,
    /// Speed shed per frame when stopping.
    pub braking: f32,
    /// Heading only changes while moving at least this fast.
    pub min_turn_speed: f32,

    /// Cruising height above the terrain.
    pub preferred_height: f32,
    /// 1.0 = adjust to preferred height very aggressively, 0.1 = gradually.
    pub preferred_height_damping: f32,
    /// Positive circles clockwise, negative counter-clockwise, zero is the
    /// tightest circle the turn rate allows.
    pub circling_radius: f32,
    /// Cap on vertical speed.
    pub speed_limit_z: f32,

    /// Body pitch per unit of forward speed.
    pub forward_velocity_pitch_factor: f32,
    /// Body roll per unit of speed times turn.
    pub lateral_velocity_roll_factor: f32,
    /// Body pitch per unit of forward acceleration.
    pub forward_acceleration_pitch_factor: f32,
    /// Body roll per radian of turn.
    pub lateral_acceleration_roll_factor: f32,
    /// Damping applied to every body axis.
    pub uniform_axial_damping: f32,
    /// Spring constant pulling body pitch back to level.
    pub pitch_stiffness: f32,
    /// Spring constant pulling body roll back to level.
    pub roll_stiffness: f32,
    /// Damping of body pitch oscillation.
    pub pitch_damping: f32,
    /// Damping of body roll oscillation.
    pub roll_damping: f32,

    /// Thrust only: how far the thrust may deflect, in radians.
    pub max_thrust_angle: f32,
    /// Thrust only: roll applied while turning.
    pub thrust_roll: f32,
    /// Thrust only: wobble frequency.
    pub thrust_wobble_rate: f32,
    /// Thrust only: smallest wobble amplitude.
    pub thrust_min_wobble: f32,
    /// Thrust only: largest wobble amplitude.
    pub thrust_max_wobble: f32,

    /// Radians either side of straight ahead.
    pub front_wheel_turn_angle: f32,
    /// Wheels react to the ground independently.
    pub has_suspension: bool,
    /// How far a wheel may drop below rest.
    pub maximum_wheel_extension: f32,
    /// How far a wheel may rise above rest.
    pub maximum_wheel_compression: f32,

    /// -1.0 pivots at the rear, 0.0 at the centre, 1.0 at the front.
    pub turn_pivot_offset: f32,
    /// Distance at which path following may stop.
    pub close_enough_distance: f32,
    /// Never leave the ground, even over bumps.
    pub stick_to_ground: bool,
    /// Keep accelerating while off the ground.
    pub allow_airborne_motive_force: bool,
    /// May reverse instead of turning round.
    pub can_move_backwards: bool,
}

impl Default for LocomotorTemplate {
    fn default() -> Self {
        Self {
            surfaces: Surfaces::NONE,
            appearance: Appearance::Other,
            behavior_z: BehaviorZ::NoZMotiveForce,
            movement_priority: MovementPriority::MovesMiddle,
            max_speed: None,
            max_speed_damaged: UNSET_DAMAGED_VALUE,
            min_speed: 0.0,
            max_turn_rate: 0.0,
            max_turn_rate_damaged: UNSET_DAMAGED_VALUE,
            acceleration: 0.0,
            acceleration_damaged: UNSET_DAMAGED_VALUE,
            lift: 0.0,
            lift_damaged: UNSET_DAMAGED_VALUE,
            braking: BIG_NUMBER,
            min_turn_speed: BIG_NUMBER,
            preferred_height: 0.0,
            preferred_height_damping: 1.0,
            circling_radius: 0.0,
            speed_limit_z: 999_999.0,
            forward_velocity_pitch_factor: 0.0,
            lateral_velocity_roll_factor: 0.0,
            forward_acceleration_pitch_factor: 0.0,
            lateral_acceleration_roll_factor: 0.0,
            uniform_axial_damping: 1.0,
            pitch_stiffness: 0.1,
            roll_stiffness: 0.1,
            pitch_damping: 0.9,
            roll_damping: 0.9,
            max_thrust_angle: 0.0,
            thrust_roll: 0.0,
            thrust_wobble_rate: 0.0,
            thrust_min_wobble: 0.0,
            thrust_max_wobble: 0.0,
            front_wheel_turn_angle: 0.0,
            has_suspension: false,
            maximum_wheel_extension: 0.0,
            maximum_wheel_compression: 0.0,
            turn_pivot_offset: 0.0,
            close_enough_distance: 1.0,
            stick_to_ground: false,
            allow_airborne_motive_force: false,
            can_move_backwards: false,
        }
    }
}

impl LocomotorTemplate {
    /// Creates a template with stock defaults for the given appearance.
    #[must_use]
    pub fn new(appearance: Appearance) -> Self {
        Self {
            appearance,
            ..Self::default()
        }
    }

    /// Fills in omitted damaged values and enforces appearance rules.
    ///
    /// Degenerate values that legacy content relied on are healed in place
    /// with a warning. Combinations a template cannot represent are fatal.
    ///
    /// # Errors
    /// Returns [`TemplateError`] when a THRUST template asks for a z-axis
    /// behaviour or lift.
    ///
    /// # Examples
    /// ```
    /// use locomotor::template::{Appearance, LocomotorTemplate};
    /// let mut template = LocomotorTemplate::new(Appearance::Treads);
    /// template.max_speed = Some(2.0);
    /// template.validate().unwrap();
    /// assert_eq!(template.max_speed_damaged, 2.0);
    /// ```
    pub fn validate(&mut self) -> Result<(), TemplateError> {
        self.default_damaged_values();
        match self.appearance {
            Appearance::Wings => self.heal_wings(),
            Appearance::Thrust => self.check_thrust()?,
            _ => {}
        }
        Ok(())
    }

    /// Validates the template and wraps it for sharing between entities.
    ///
    /// # Errors
    /// Propagates any [`TemplateError`] raised by [`Self::validate`].
    pub fn into_shared(mut self) -> Result<Arc<Self>, TemplateError> {
        self.validate()?;
        Ok(Arc::new(self))
    }

    /// Whether the template declares a speed of its own.
    #[must_use]
    pub const fn has_explicit_speed(&self) -> bool {
        self.max_speed.is_some()
    }

    fn default_damaged_values(&mut self) {
        if self.max_speed_damaged < 0.0 {
            self.max_speed_damaged = self.max_speed.unwrap_or(0.0);
        }
        if self.max_turn_rate_damaged < 0.0 {
            self.max_turn_rate_damaged = self.max_turn_rate;
        }
        if self.acceleration_damaged < 0.0 {
            self.acceleration_damaged = self.acceleration;
        }
        if self.lift_damaged < 0.0 {
            self.lift_damaged = self.lift;
        }
    }

    fn heal_wings(&mut self) {
        if self.min_speed <= 0.0 {
            warn!("WINGS locomotors should have a positive min speed, otherwise they hover; healing");
            self.min_speed = HEAL_EPSILON;
        }
        if self.min_turn_speed <= 0.0 {
            warn!("WINGS locomotors should have a positive min turn speed; healing");
            self.min_turn_speed = HEAL_EPSILON;
        }
    }

    fn check_thrust(&mut self) -> Result<(), TemplateError> {
        if self.behavior_z != BehaviorZ::NoZMotiveForce {
            return Err(TemplateError::ThrustWithZAxisBehavior {
                behavior: self.behavior_z,
            });
        }
        if self.lift != 0.0 || self.lift_damaged != 0.0 {
            return Err(TemplateError::ThrustWithLift {
                lift: self.lift,
                lift_damaged: self.lift_damaged,
            });
        }
        // Omitted speeds default to zero; legacy content depends on them
        // being quietly healed rather than rejected.
        if self.max_speed.map_or(true, |speed| speed <= 0.0) {
            warn!("THRUST locomotors may not have zero max speed; healing");
            self.max_speed = Some(HEAL_EPSILON);
        }
        if self.max_speed_damaged <= 0.0 {
            warn!("THRUST locomotors may not have zero damaged max speed; healing");
            self.max_speed_damaged = HEAL_EPSILON;
        }
        if self.min_speed <= 0.0 {
            warn!("THRUST locomotors may not have zero min speed; healing");
            self.min_speed = HEAL_EPSILON;
        }
        Ok(())
    }
}
