//! Per-appearance movement rules.
//!
//! Each [`Appearance`] maps to one [`AppearanceProfile`], so the integrator
//! asks the profile what to do instead of branching on the appearance at
//! every step.

use crate::template::Appearance;
use crate::WING_ROLL_LIMIT;

/// How the entity's height is decided while moving towards a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalPlacement {
    /// Climb or descend in proportion to planar progress towards the target.
    Interpolate,
    /// Ride the lift controller towards the preferred height.
    Lift,
    /// Snap to the terrain surface.
    Terrain,
}

/// Which way translation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    /// Straight at the target, whatever the current heading.
    TowardsTarget,
    /// Along the current facing, so the heading has to come round first.
    AlongFacing,
}

/// Rotation applied to the visible body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyModel {
    /// Body stays level with the entity.
    Rigid,
    /// Nose follows the climb or dive angle.
    ThrustPitch,
    /// Pitch with forward motion and bank into turns, optionally limited.
    Banking {
        /// Largest roll either way, if any.
        roll_limit: Option<f32>,
    },
}

/// Orientation of the whole entity relative to the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldAttitudeSource {
    /// Always level.
    Level,
    /// Tilted to the terrain normal under the entity.
    TerrainNormal,
}

/// Behaviour when there is no destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationKeeping {
    /// Do nothing.
    Idle,
    /// Orbit at nominal speed.
    Circle,
    /// Stay put and hold preferred height.
    HoldAltitude,
}

/// Movement rules shared by every template of one appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppearanceProfile {
    /// Decelerate for the final stop. Wings never do; they only brake while landing.
    pub brakes_on_approach: bool,
    /// Report arrival early when the turn circle overshoots the waypoint.
    pub turn_circle_lookahead: bool,
    /// Hold position until facing the target.
    pub aligns_before_advancing: bool,
    /// How height is decided while moving.
    pub vertical: VerticalPlacement,
    /// Direction translation is applied in.
    pub steering: Steering,
    /// Visible body rotation.
    pub body: BodyModel,
    /// Entity orientation against the ground.
    pub world_attitude: WorldAttitudeSource,
    /// Behaviour with no destination.
    pub station_keeping: StationKeeping,
}

const GROUND: AppearanceProfile = AppearanceProfile {
    brakes_on_approach: true,
    turn_circle_lookahead: false,
    aligns_before_advancing: false,
    vertical: VerticalPlacement::Terrain,
    steering: Steering::AlongFacing,
    body: BodyModel::Rigid,
    world_attitude: WorldAttitudeSource::Level,
    station_keeping: StationKeeping::Idle,
};

const TREADS: AppearanceProfile = AppearanceProfile {
    turn_circle_lookahead: true,
    aligns_before_advancing: true,
    steering: Steering::TowardsTarget,
    world_attitude: WorldAttitudeSource::TerrainNormal,
    ..GROUND
};

const WHEELS: AppearanceProfile = AppearanceProfile {
    turn_circle_lookahead: true,
    world_attitude: WorldAttitudeSource::TerrainNormal,
    ..GROUND
};

const THRUST: AppearanceProfile = AppearanceProfile {
    vertical: VerticalPlacement::Interpolate,
    steering: Steering::TowardsTarget,
    body: BodyModel::ThrustPitch,
    ..GROUND
};

const WINGS: AppearanceProfile = AppearanceProfile {
    brakes_on_approach: false,
    vertical: VerticalPlacement::Lift,
    body: BodyModel::Banking {
        roll_limit: Some(WING_ROLL_LIMIT),
    },
    station_keeping: StationKeeping::Circle,
    ..GROUND
};

const HOVER: AppearanceProfile = AppearanceProfile {
    vertical: VerticalPlacement::Lift,
    body: BodyModel::Banking { roll_limit: None },
    station_keeping: StationKeeping::HoldAltitude,
    ..GROUND
};

const GIANT_BIRD: AppearanceProfile = AppearanceProfile {
    vertical: VerticalPlacement::Lift,
    station_keeping: StationKeeping::HoldAltitude,
    ..GROUND
};

impl Appearance {
    /// Movement rules for this appearance.
    ///
    /// # Examples
    /// ```
    /// use locomotor::locomotor::{StationKeeping, VerticalPlacement};
    /// use locomotor::template::Appearance;
    /// let wings = Appearance::Wings.profile();
    /// assert_eq!(wings.vertical, VerticalPlacement::Lift);
    /// assert_eq!(wings.station_keeping, StationKeeping::Circle);
    /// ```
    #[must_use]
    pub const fn profile(self) -> &'static AppearanceProfile {
        match self {
            Self::Treads => &TREADS,
            Self::FourWheels | Self::Motorcycle => &WHEELS,
            Self::Thrust => &THRUST,
            Self::Wings => &WINGS,
            Self::Hover => &HOVER,
            Self::GiantBird => &GIANT_BIRD,
            Self::TwoLegs
            | Self::Climber
            | Self::Other
            | Self::HugeTwoLegs
            | Self::Horde
            | Self::FourLegsHuge
            | Self::Ship => &GROUND,
        }
    }
}
