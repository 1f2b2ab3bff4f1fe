//! Runtime locomotion integrator.
//!
//! A [`Locomotor`] binds a shared [`LocomotorTemplate`] to one entity's base
//! speed and advances that entity's [`MovementActor`] state once per logic
//! tick. Appearance-specific rules come from [`AppearanceProfile`].

mod appearance;

pub use appearance::{
    AppearanceProfile, BodyModel, StationKeeping, Steering, VerticalPlacement,
    WorldAttitudeSource,
};

use std::sync::Arc;

use bevy_ecs::prelude::Component;
use glam::{Vec2, Vec3};
use log::{debug, trace};

use crate::actor::{Attitude, MovementActor};
use crate::numeric::{
    angle_delta, asin_clamped, clamp_between, clamp_symmetric, elevation, turn_step, wrap_angle,
    yaw_from_direction,
};
use crate::telemetry::{LegacyTelemetry, PersistError};
use crate::template::LocomotorTemplate;
use crate::terrain::TerrainQuery;
use crate::vector_math::{planar, surface_normal, vec_normalize};
use crate::{ALIGNED_ANGLE, ARRIVAL_DISTANCE, LOGIC_FRAMES_PER_SECOND, TREAD_MISALIGNMENT};

/// Locomotion state bound to one moving entity.
#[derive(Component, Debug, Clone)]
pub struct Locomotor {
    template: Arc<LocomotorTemplate>,
    base_speed: f32,
    lift_multiplier: f32,
    telemetry: LegacyTelemetry,
}

impl Locomotor {
    /// Binds `template` to an entity whose intrinsic speed is `base_speed`.
    ///
    /// Template values are authored for a base speed of 100; other values
    /// scale them proportionally.
    #[must_use]
    pub fn new(template: Arc<LocomotorTemplate>, base_speed: f32) -> Self {
        Self {
            template,
            base_speed,
            lift_multiplier: 1.0,
            telemetry: LegacyTelemetry::default(),
        }
    }

    /// Shared template this locomotor applies.
    #[must_use]
    pub const fn template(&self) -> &Arc<LocomotorTemplate> {
        &self.template
    }

    /// Entity speed the template values are scaled against.
    #[must_use]
    pub const fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Factor applied on top of the template's lift.
    #[must_use]
    pub const fn lift_multiplier(&self) -> f32 {
        self.lift_multiplier
    }

    /// Adjusts lift, e.g. when an upgrade completes.
    pub const fn set_lift_multiplier(&mut self, multiplier: f32) {
        self.lift_multiplier = multiplier;
    }

    /// Legacy values carried through saves.
    #[must_use]
    pub const fn telemetry(&self) -> &LegacyTelemetry {
        &self.telemetry
    }

    /// Mutable access to the legacy save values.
    pub const fn telemetry_mut(&mut self) -> &mut LegacyTelemetry {
        &mut self.telemetry
    }

    /// Movement rules for this locomotor's appearance.
    #[must_use]
    pub fn profile(&self) -> &'static AppearanceProfile {
        self.template.appearance.profile()
    }

    /// Scales a template value by the entity's base speed ratio.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use locomotor::locomotor::Locomotor;
    /// use locomotor::template::{Appearance, LocomotorTemplate};
    /// let template = Arc::new(LocomotorTemplate::new(Appearance::Treads));
    /// let locomotor = Locomotor::new(template, 150.0);
    /// assert!((locomotor.scaled_value(2.0) - 3.0).abs() < 1e-6);
    /// ```
    #[must_use]
    pub const fn scaled_value(&self, value: f32) -> f32 {
        self.base_speed / 100.0 * value
    }

    fn select_scaled<A: MovementActor>(&self, actor: &A, nominal: f32, damaged: f32) -> f32 {
        self.scaled_value(if actor.is_damaged() { damaged } else { nominal })
    }

    /// Top speed in units per frame for the actor's current damage state.
    #[must_use]
    pub fn speed<A: MovementActor>(&self, actor: &A) -> f32 {
        self.template.max_speed.map_or(self.base_speed, |max_speed| {
            self.select_scaled(actor, max_speed, self.template.max_speed_damaged)
        })
    }

    /// Undamaged top speed, used while circling.
    #[must_use]
    pub fn nominal_speed(&self) -> f32 {
        self.template
            .max_speed
            .map_or(self.base_speed, |max_speed| self.scaled_value(max_speed))
    }

    /// Speed gained per frame for the actor's current damage state.
    #[must_use]
    pub fn acceleration<A: MovementActor>(&self, actor: &A) -> f32 {
        self.select_scaled(
            actor,
            self.template.acceleration,
            self.template.acceleration_damaged,
        )
    }

    /// Radians per frame.
    #[must_use]
    pub fn turn_rate<A: MovementActor>(&self, actor: &A) -> f32 {
        self.select_scaled(
            actor,
            self.template.max_turn_rate,
            self.template.max_turn_rate_damaged,
        )
    }

    /// Lifting acceleration including the lift multiplier.
    #[must_use]
    pub fn lift<A: MovementActor>(&self, actor: &A) -> f32 {
        self.select_scaled(actor, self.template.lift, self.template.lift_damaged)
            * self.lift_multiplier
    }

    /// Speed shed per frame when stopping.
    #[must_use]
    pub fn braking(&self) -> f32 {
        self.scaled_value(self.template.braking)
    }

    /// Slowest speed the template can sustain, scaled.
    ///
    /// Validation keeps this positive for wings and thrust so they never
    /// settle into a hover. The integrator does not read it; landing and
    /// stall logic built on top of a locomotor does.
    #[must_use]
    pub fn min_speed(&self) -> f32 {
        self.scaled_value(self.template.min_speed)
    }

    /// Speed at or above which the heading may change while moving.
    #[must_use]
    pub fn min_turn_speed(&self) -> f32 {
        self.scaled_value(self.template.min_turn_speed)
    }

    /// Turns the actor towards `direction` by at most one turn-rate step.
    ///
    /// Returns `true`, leaving the heading untouched, once the heading is
    /// within [`ALIGNED_ANGLE`] of the target.
    pub fn rotate_to_target_direction<A: MovementActor>(
        &self,
        actor: &mut A,
        direction: Vec3,
    ) -> bool {
        let target_yaw = yaw_from_direction(planar(direction));
        let delta = angle_delta(target_yaw, actor.yaw());
        if delta.abs() < ALIGNED_ANGLE {
            return true;
        }
        let step = turn_step(delta, self.turn_rate(actor));
        actor.set_yaw(wrap_angle(actor.yaw() + step));
        false
    }

    /// Advances the actor one tick towards `target`.
    ///
    /// `next_waypoint` signals that more path follows, so the locomotor does
    /// not slow down for a final stop. Returns `true` when the actor has
    /// arrived, in which case nothing was mutated.
    pub fn move_towards_position<A, T>(
        &self,
        actor: &mut A,
        terrain: &T,
        target: Vec3,
        next_waypoint: Option<Vec3>,
    ) -> bool
    where
        A: MovementActor,
        T: TerrainQuery + ?Sized,
    {
        let profile = self.profile();
        let position = actor.translation();
        let offset = target - position;
        let planar_offset = planar(offset);
        let remaining = planar_offset.length();

        let braking = if profile.brakes_on_approach && next_waypoint.is_none() {
            self.braking()
        } else {
            0.0
        };
        let turn_rate = self.turn_rate(actor);
        let current_speed = actor.speed();
        if profile.turn_circle_lookahead
            && next_waypoint.is_some()
            && turn_rate > 0.0
            && current_speed / turn_rate > remaining
        {
            debug!("turn circle overshoots waypoint {remaining:.3} away, handing over");
            return true;
        }
        if remaining < ARRIVAL_DISTANCE {
            debug!("arrived within {remaining:.3} of {target}");
            return true;
        }

        let braking_distance = if braking > 0.0 {
            current_speed * current_speed / (2.0 * braking)
        } else {
            0.0
        };
        let acceleration = if remaining > braking_distance {
            self.acceleration(actor)
        } else {
            -braking
        };
        let speed = clamp_between(current_speed + acceleration, 0.0, self.speed(actor));
        actor.set_speed(speed);
        let reached_turn_speed = speed >= self.min_turn_speed();

        let heading_delta = angle_delta(yaw_from_direction(planar_offset), actor.yaw());
        let turn = if reached_turn_speed {
            turn_step(heading_delta, turn_rate)
        } else {
            0.0
        };
        actor.set_steering_angle(clamp_symmetric(
            heading_delta,
            self.template.front_wheel_turn_angle,
        ));

        let direction = match profile.steering {
            Steering::TowardsTarget => vec_normalize(planar_offset),
            Steering::AlongFacing => actor.facing(),
        };
        let travel = if profile.aligns_before_advancing && heading_delta.abs() > TREAD_MISALIGNMENT
        {
            0.0
        } else {
            speed.min(remaining)
        };
        let destination = planar(position) + direction * travel;

        let height = match profile.vertical {
            VerticalPlacement::Interpolate => position.z + offset.z * travel / remaining,
            VerticalPlacement::Lift => {
                let thrust = self.current_thrust(
                    actor,
                    terrain.height(position.x, position.y),
                    position.z,
                );
                if reached_turn_speed {
                    position.z + thrust
                } else {
                    position.z
                }
            }
            VerticalPlacement::Terrain => terrain.height(destination.x, destination.y),
        };

        let body = self.body_attitude(profile.body, offset.z, remaining, speed, acceleration, turn);
        actor.set_body_attitude(body);
        actor.set_world_attitude(world_attitude(
            profile.world_attitude,
            terrain,
            destination,
        ));
        actor.set_translation(destination.extend(height));
        actor.set_yaw(wrap_angle(actor.yaw() + turn));
        trace!(
            "speed {speed:.3} travel {travel:.3} turn {turn:.4} remaining {:.3}",
            remaining - travel
        );
        false
    }

    fn body_attitude(
        &self,
        body: BodyModel,
        rise: f32,
        run: f32,
        speed: f32,
        acceleration: f32,
        turn: f32,
    ) -> Attitude {
        let template = &self.template;
        match body {
            BodyModel::Rigid => Attitude::LEVEL,
            BodyModel::ThrustPitch => {
                let pitch = elevation(rise, run);
                if template.max_thrust_angle > 0.0 {
                    Attitude::new(clamp_symmetric(pitch, template.max_thrust_angle), 0.0)
                } else {
                    Attitude::new(pitch, 0.0)
                }
            }
            BodyModel::Banking { roll_limit } => {
                let pitch = template.forward_velocity_pitch_factor * speed
                    + template.forward_acceleration_pitch_factor * acceleration;
                let roll = template.lateral_velocity_roll_factor * speed * turn
                    + template.lateral_acceleration_roll_factor * turn;
                let limited = roll_limit.map_or(roll, |limit| clamp_symmetric(roll, limit));
                Attitude::new(pitch, limited)
            }
        }
    }

    /// Keeps an airborne actor on station when it has no destination.
    ///
    /// Wings orbit at nominal speed, hover-style appearances hold their
    /// preferred height, everything else stays still.
    pub fn maintain_position<A, T>(&self, actor: &mut A, terrain: &T)
    where
        A: MovementActor,
        T: TerrainQuery + ?Sized,
    {
        match self.profile().station_keeping {
            StationKeeping::Circle => self.circle(actor, terrain),
            StationKeeping::HoldAltitude => {
                let position = actor.translation();
                let thrust =
                    self.current_thrust(actor, terrain.height(position.x, position.y), position.z);
                actor.set_translation(position + Vec3::Z * thrust);
            }
            StationKeeping::Idle => {
                trace!("{:?} has nothing to do on station", self.template.appearance);
            }
        }
    }

    fn circle<A, T>(&self, actor: &mut A, terrain: &T)
    where
        A: MovementActor,
        T: TerrainQuery + ?Sized,
    {
        let speed = self.nominal_speed();
        actor.set_speed(speed);
        let yaw_step = self.circling_yaw_step(actor, speed);

        let position = actor.translation();
        let thrust = self.current_thrust(actor, terrain.height(position.x, position.y), position.z);
        let advance: Vec2 = actor.facing() * speed;
        actor.set_translation(position + advance.extend(thrust));
        actor.set_yaw(wrap_angle(actor.yaw() + yaw_step));
        actor.set_world_attitude(Attitude::LEVEL);
    }

    /// Per-tick heading change of a circling patrol.
    ///
    /// One circuit of `2 * PI * radius` takes `circumference / speed` ticks,
    /// so the heading advances by `speed / radius` each tick. Positive radii
    /// circle clockwise.
    #[must_use]
    pub fn circling_yaw_step<A: MovementActor>(&self, actor: &A, speed: f32) -> f32 {
        let configured = self.template.circling_radius;
        let radius = if configured == 0.0 {
            let turn_rate = self.turn_rate(actor);
            if turn_rate > 0.0 {
                speed / turn_rate
            } else {
                0.0
            }
        } else {
            configured.abs()
        };
        if speed <= 0.0 || radius <= 0.0 {
            return 0.0;
        }
        let step = speed / radius;
        if configured > 0.0 {
            -step
        } else {
            step
        }
    }

    /// Vertical velocity this tick from the lift controller.
    ///
    /// The actor's lift accumulator gains one lift step per tick towards
    /// the preferred height band and is clamped between zero and
    /// `lift * LOGIC_FRAMES_PER_SECOND` on the side of the error. The result
    /// never overshoots the remaining height error.
    pub fn current_thrust<A: MovementActor>(
        &self,
        actor: &mut A,
        terrain_height: f32,
        current_height: f32,
    ) -> f32 {
        let error = terrain_height + self.template.preferred_height - current_height;
        let lift = self.lift(actor);
        let step = if error < 0.0 { -lift } else { lift };
        let max_velocity = step * LOGIC_FRAMES_PER_SECOND;
        let accumulated = clamp_between(actor.lift() + step, 0.0, max_velocity);
        actor.set_lift(accumulated);
        if error < 0.0 {
            accumulated.max(error)
        } else {
            accumulated.min(error)
        }
    }

    /// Serialises the persisted locomotor state.
    ///
    /// # Errors
    /// Returns [`PersistError::Encode`] if the codec fails.
    pub fn save(&self) -> Result<Vec<u8>, PersistError> {
        self.telemetry.encode(self.lift_multiplier)
    }

    /// Restores persisted state, leaving `self` untouched on failure.
    ///
    /// # Errors
    /// Returns [`PersistError`] for a foreign version, a drifted sentinel or
    /// a malformed stream.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), PersistError> {
        let (telemetry, lift_multiplier) = LegacyTelemetry::decode(bytes)?;
        self.telemetry = telemetry;
        self.lift_multiplier = lift_multiplier;
        Ok(())
    }
}

fn world_attitude<T>(source: WorldAttitudeSource, terrain: &T, at: Vec2) -> Attitude
where
    T: TerrainQuery + ?Sized,
{
    match source {
        WorldAttitudeSource::Level => Attitude::LEVEL,
        WorldAttitudeSource::TerrainNormal => {
            let normal = surface_normal(terrain.normal(at.x, at.y));
            Attitude::new(asin_clamped(normal.x), asin_clamped(normal.y))
        }
    }
}
