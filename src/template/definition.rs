//! Designer-facing template definitions and the registry that loads them.
//!
//! Unit data is written in per-second units (speed in units/s, acceleration
//! in units/s², turn rates in degrees/s, angles in degrees). Conversion to the
//! per-frame values used by the integrator happens here, once, at load time.

use std::collections::BTreeMap;
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::HashMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Appearance, BehaviorZ, LocomotorTemplate, MovementPriority, Surfaces, TemplateError};
use crate::LOGIC_FRAMES_PER_SECOND;

/// Errors raised while loading template definitions.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The definitions file could not be read.
    #[error("failed to read template definitions from {path}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The input is not a JSON object of template definitions.
    #[error("malformed template definitions")]
    Json(#[from] serde_json::Error),
    /// A definition parsed but failed validation.
    #[error("template `{name}` is invalid")]
    Invalid {
        /// Name of the rejected template.
        name: String,
        /// Why validation failed.
        #[source]
        source: TemplateError,
    },
}

/// One template as authored in unit data.
///
/// Every field is optional; omitted values take the stock defaults of
/// [`LocomotorTemplate`]. Omitted damaged values stay unset so validation can
/// copy the nominal value into them.
///
/// # Examples
/// ```
/// use locomotor::template::{Appearance, TemplateDefinition};
/// let definition: TemplateDefinition = serde_json::from_str(
///     r#"{ "appearance": "TREADS", "speed": 30.0, "turn_rate": 90.0 }"#,
/// ).unwrap();
/// let template = definition.to_template();
/// assert_eq!(template.appearance, Appearance::Treads);
/// assert_eq!(template.max_speed, Some(1.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateDefinition {
    /// Surfaces the template may travel on.
    pub surfaces: Surfaces,
    /// Movement style.
    pub appearance: Appearance,
    /// How the template treats the Z axis.
    pub z_axis_behavior: BehaviorZ,
    /// Preferred slot when moving in a group.
    pub group_movement_priority: MovementPriority,

    /// Units per second.
    pub speed: Option<f32>,
    /// Units per second while damaged.
    pub speed_damaged: Option<f32>,
    /// Units per second.
    pub min_speed: Option<f32>,
    /// Degrees per second.
    pub turn_rate: Option<f32>,
    /// Degrees per second while damaged.
    pub turn_rate_damaged: Option<f32>,
    /// Milliseconds for a full turn; overrides `turn_rate` when present.
    pub turn_time_ms: Option<NonZeroU32>,
    /// Milliseconds for a full turn while damaged.
    pub turn_time_damaged_ms: Option<NonZeroU32>,
    /// Units per second squared.
    pub acceleration: Option<f32>,
    /// Units per second squared while damaged.
    pub acceleration_damaged: Option<f32>,
    /// Units per second squared.
    pub lift: Option<f32>,
    /// Units per second squared while damaged.
    pub lift_damaged: Option<f32>,
    /// Units per second squared.
    pub braking: Option<f32>,
    /// Units per second.
    pub min_turn_speed: Option<f32>,
    /// Units per second.
    pub speed_limit_z: Option<f32>,

    /// Height above the terrain.
    pub preferred_height: Option<f32>,
    /// Unitless, see [`LocomotorTemplate::preferred_height_damping`].
    pub preferred_height_damping: Option<f32>,
    /// Signed radius; see [`LocomotorTemplate::circling_radius`].
    pub circling_radius: Option<f32>,

    /// Copied into [`LocomotorTemplate::forward_velocity_pitch_factor`].
    pub forward_velocity_pitch_factor: Option<f32>,
    /// Copied into [`LocomotorTemplate::lateral_velocity_roll_factor`].
    pub lateral_velocity_roll_factor: Option<f32>,
    /// Copied into [`LocomotorTemplate::forward_acceleration_pitch_factor`].
    pub forward_acceleration_pitch_factor: Option<f32>,
    /// Copied into [`LocomotorTemplate::lateral_acceleration_roll_factor`].
    pub lateral_acceleration_roll_factor: Option<f32>,
    /// Copied into [`LocomotorTemplate::uniform_axial_damping`].
    pub uniform_axial_damping: Option<f32>,
    /// Copied into [`LocomotorTemplate::pitch_stiffness`].
    pub pitch_stiffness: Option<f32>,
    /// Copied into [`LocomotorTemplate::roll_stiffness`].
    pub roll_stiffness: Option<f32>,
    /// Copied into [`LocomotorTemplate::pitch_damping`].
    pub pitch_damping: Option<f32>,
    /// Copied into [`LocomotorTemplate::roll_damping`].
    pub roll_damping: Option<f32>,

    /// Degrees.
    pub max_thrust_angle: Option<f32>,
    /// Copied into [`LocomotorTemplate::thrust_roll`].
    pub thrust_roll: Option<f32>,
    /// Copied into [`LocomotorTemplate::thrust_wobble_rate`].
    pub thrust_wobble_rate: Option<f32>,
    /// Copied into [`LocomotorTemplate::thrust_min_wobble`].
    pub thrust_min_wobble: Option<f32>,
    /// Copied into [`LocomotorTemplate::thrust_max_wobble`].
    pub thrust_max_wobble: Option<f32>,

    /// Degrees.
    pub front_wheel_turn_angle: Option<f32>,
    /// Copied into [`LocomotorTemplate::has_suspension`].
    pub has_suspension: Option<bool>,
    /// Copied into [`LocomotorTemplate::maximum_wheel_extension`].
    pub maximum_wheel_extension: Option<f32>,
    /// Copied into [`LocomotorTemplate::maximum_wheel_compression`].
    pub maximum_wheel_compression: Option<f32>,

    /// -1.0 rear, 0.0 centre, 1.0 front.
    pub turn_pivot_offset: Option<f32>,
    /// Distance at which path following may stop.
    pub close_enough_dist: Option<f32>,
    /// Copied into [`LocomotorTemplate::stick_to_ground`].
    pub stick_to_ground: Option<bool>,
    /// Copied into [`LocomotorTemplate::allow_airborne_motive_force`].
    pub allow_airborne_motive_force: Option<bool>,
    /// Copied into [`LocomotorTemplate::can_move_backwards`].
    pub can_move_backwards: Option<bool>,
}

fn velocity_to_frames(per_second: f32) -> f32 {
    per_second / LOGIC_FRAMES_PER_SECOND
}

fn acceleration_to_frames(per_second_squared: f32) -> f32 {
    per_second_squared / (LOGIC_FRAMES_PER_SECOND * LOGIC_FRAMES_PER_SECOND)
}

fn angular_velocity_to_frames(degrees_per_second: f32) -> f32 {
    degrees_per_second.to_radians() / LOGIC_FRAMES_PER_SECOND
}

fn turn_time_to_frames(full_turn_ms: NonZeroU32) -> f32 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "Turn times are a few thousand milliseconds at most."
    )]
    let seconds = full_turn_ms.get() as f32 / 1000.0;
    angular_velocity_to_frames(360.0 / seconds)
}

impl TemplateDefinition {
    /// Converts the definition into an unvalidated per-frame template.
    #[must_use]
    pub fn to_template(&self) -> LocomotorTemplate {
        let base = LocomotorTemplate::new(self.appearance);
        let turn_rate = self
            .turn_time_ms
            .map(turn_time_to_frames)
            .or_else(|| self.turn_rate.map(angular_velocity_to_frames));
        let turn_rate_damaged = self
            .turn_time_damaged_ms
            .map(turn_time_to_frames)
            .or_else(|| self.turn_rate_damaged.map(angular_velocity_to_frames));

        LocomotorTemplate {
            surfaces: self.surfaces,
            behavior_z: self.z_axis_behavior,
            movement_priority: self.group_movement_priority,
            max_speed: self.speed.map(velocity_to_frames),
            max_speed_damaged: self
                .speed_damaged
                .map_or(base.max_speed_damaged, velocity_to_frames),
            min_speed: self.min_speed.map_or(base.min_speed, velocity_to_frames),
            max_turn_rate: turn_rate.unwrap_or(base.max_turn_rate),
            max_turn_rate_damaged: turn_rate_damaged.unwrap_or(base.max_turn_rate_damaged),
            acceleration: self
                .acceleration
                .map_or(base.acceleration, acceleration_to_frames),
            acceleration_damaged: self
                .acceleration_damaged
                .map_or(base.acceleration_damaged, acceleration_to_frames),
            lift: self.lift.map_or(base.lift, acceleration_to_frames),
            lift_damaged: self
                .lift_damaged
                .map_or(base.lift_damaged, acceleration_to_frames),
            braking: self.braking.map_or(base.braking, acceleration_to_frames),
            min_turn_speed: self
                .min_turn_speed
                .map_or(base.min_turn_speed, velocity_to_frames),
            speed_limit_z: self
                .speed_limit_z
                .map_or(base.speed_limit_z, velocity_to_frames),
            preferred_height: self.preferred_height.unwrap_or(base.preferred_height),
            preferred_height_damping: self
                .preferred_height_damping
                .unwrap_or(base.preferred_height_damping),
            circling_radius: self.circling_radius.unwrap_or(base.circling_radius),
            forward_velocity_pitch_factor: self
                .forward_velocity_pitch_factor
                .unwrap_or(base.forward_velocity_pitch_factor),
            lateral_velocity_roll_factor: self
                .lateral_velocity_roll_factor
                .unwrap_or(base.lateral_velocity_roll_factor),
            forward_acceleration_pitch_factor: self
                .forward_acceleration_pitch_factor
                .unwrap_or(base.forward_acceleration_pitch_factor),
            lateral_acceleration_roll_factor: self
                .lateral_acceleration_roll_factor
                .unwrap_or(base.lateral_acceleration_roll_factor),
            uniform_axial_damping: self
                .uniform_axial_damping
                .unwrap_or(base.uniform_axial_damping),
            pitch_stiffness: self.pitch_stiffness.unwrap_or(base.pitch_stiffness),
            roll_stiffness: self.roll_stiffness.unwrap_or(base.roll_stiffness),
            pitch_damping: self.pitch_damping.unwrap_or(base.pitch_damping),
            roll_damping: self.roll_damping.unwrap_or(base.roll_damping),
            max_thrust_angle: self
                .max_thrust_angle
                .map_or(base.max_thrust_angle, f32::to_radians),
            thrust_roll: self.thrust_roll.unwrap_or(base.thrust_roll),
            thrust_wobble_rate: self.thrust_wobble_rate.unwrap_or(base.thrust_wobble_rate),
            thrust_min_wobble: self.thrust_min_wobble.unwrap_or(base.thrust_min_wobble),
            thrust_max_wobble: self.thrust_max_wobble.unwrap_or(base.thrust_max_wobble),
            front_wheel_turn_angle: self
                .front_wheel_turn_angle
                .map_or(base.front_wheel_turn_angle, f32::to_radians),
            has_suspension: self.has_suspension.unwrap_or(base.has_suspension),
            maximum_wheel_extension: self
                .maximum_wheel_extension
                .unwrap_or(base.maximum_wheel_extension),
            maximum_wheel_compression: self
                .maximum_wheel_compression
                .unwrap_or(base.maximum_wheel_compression),
            turn_pivot_offset: self.turn_pivot_offset.unwrap_or(base.turn_pivot_offset),
            close_enough_distance: self.close_enough_dist.unwrap_or(base.close_enough_distance),
            stick_to_ground: self.stick_to_ground.unwrap_or(base.stick_to_ground),
            allow_airborne_motive_force: self
                .allow_airborne_motive_force
                .unwrap_or(base.allow_airborne_motive_force),
            can_move_backwards: self.can_move_backwards.unwrap_or(base.can_move_backwards),
            ..base
        }
    }
}

/// Validated templates keyed by name.
#[derive(Debug, Default, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<String, Arc<LocomotorTemplate>>,
}

impl TemplateRegistry {
    /// Parses a JSON object mapping template names to definitions.
    ///
    /// Loading stops at the first template that fails validation; healed
    /// values are logged and accepted.
    ///
    /// # Errors
    /// Returns [`DefinitionError::Json`] for malformed input and
    /// [`DefinitionError::Invalid`] naming the first fatal template.
    ///
    /// # Examples
    /// ```
    /// use locomotor::template::TemplateRegistry;
    /// let registry = TemplateRegistry::from_json_str(
    ///     r#"{ "TankLocomotor": { "appearance": "TREADS", "speed": 30.0 } }"#,
    /// ).unwrap();
    /// assert!(registry.get("TankLocomotor").is_some());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionError> {
        // BTreeMap keeps load order, and therefore diagnostics, stable.
        let definitions: BTreeMap<String, TemplateDefinition> = serde_json::from_str(json)?;
        let mut registry = Self::default();
        for (name, definition) in definitions {
            registry.insert(name, &definition)?;
        }
        info!("loaded {} locomotor templates", registry.len());
        Ok(registry)
    }

    /// Reads and parses a JSON definitions file.
    ///
    /// # Errors
    /// Returns [`DefinitionError::Io`] if the file cannot be read, otherwise
    /// as [`Self::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path_ref = path.as_ref();
        let json = fs::read_to_string(path_ref).map_err(|source| DefinitionError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validates `definition` and stores it under `name`, replacing any
    /// previous template of that name.
    ///
    /// # Errors
    /// Returns [`DefinitionError::Invalid`] when validation fails; the
    /// registry is left unchanged.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        definition: &TemplateDefinition,
    ) -> Result<Arc<LocomotorTemplate>, DefinitionError> {
        let key = name.into();
        let template = definition
            .to_template()
            .into_shared()
            .map_err(|source| DefinitionError::Invalid {
                name: key.clone(),
                source,
            })?;
        debug!("registered locomotor template `{key}`");
        self.templates.insert(key, Arc::clone(&template));
        Ok(template)
    }

    /// Returns a shared handle to the named template.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<LocomotorTemplate>> {
        self.templates.get(name).cloned()
    }

    /// Template names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no template is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
