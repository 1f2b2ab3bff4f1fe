//! Enumerations describing what a locomotor template is.
//!
//! Names serialise in the upper snake case used by the unit data files, so a
//! definition reads `"appearance": "FOUR_WHEELS"`.

use serde::{Deserialize, Serialize};

/// Movement style of a template. Decides which vertical placement, attitude
/// and station-keeping rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Appearance {
    /// Infantry on foot.
    TwoLegs,
    /// Human climber, backs down cliffs.
    Climber,
    /// Rocket or missile flight.
    Thrust,
    /// Wheeled vehicles with steerable front wheels.
    FourWheels,
    /// Helicopters and other hovering craft.
    Hover,
    /// Flapping or circling flight.
    Wings,
    /// Tracked vehicles.
    Treads,
    /// Anything without a dedicated rule set.
    #[default]
    Other,
    /// Two-wheeled vehicles.
    Motorcycle,
    /// Large flying creatures.
    GiantBird,
    /// Oversized walkers.
    HugeTwoLegs,
    /// Crowds moving as one unit.
    Horde,
    /// Large quadrupeds.
    FourLegsHuge,
    /// Surface vessels.
    Ship,
}

/// How a template treats the Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BehaviorZ {
    /// Does whatever physics tells it, but has no z-force of its own.
    #[default]
    NoZMotiveForce,
    /// Keep at the surface of the water.
    SeaLevel,
    /// Follow a height relative to terrain or water.
    SurfaceRelativeHeight,
    /// Follow a height regardless of terrain or water.
    AbsoluteHeight,
    /// Hold a fixed height relative to terrain or water.
    FixedSurfaceRelativeHeight,
    /// Hold a fixed absolute height.
    FixedAbsoluteHeight,
    /// Hold a fixed height above ground and buildings.
    #[serde(rename = "FIXED_RELATIVE_TO_GROUND_AND_BUILDINGS")]
    RelativeToGroundAndBuildings,
    /// Follow the highest layer beneath the unit.
    RelativeToHighestLayer,
    /// Bob on whatever surface is below.
    FloatingZ,
    /// Climb vertical surfaces.
    ScalingWalls,
}

/// Where a unit prefers to sit when moving as part of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementPriority {
    /// Trail behind the group.
    MovesBack,
    /// Keep to the middle of the group.
    #[default]
    MovesMiddle,
    /// Lead the group.
    MovesFront,
}

/// A single kind of surface a locomotor may travel on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Surface {
    /// Open ground.
    Ground,
    /// Shallow water.
    Water,
    /// Steep slopes.
    Cliff,
    /// Open air.
    Air,
    /// Debris.
    Rubble,
    /// Structures and other blockers.
    Obstacle,
    /// Terrain marked impassable.
    Impassable,
    /// Water too deep to wade.
    DeepWater,
}

impl Surface {
    /// Every surface in bit order.
    pub const ALL: [Self; 8] = [
        Self::Ground,
        Self::Water,
        Self::Cliff,
        Self::Air,
        Self::Rubble,
        Self::Obstacle,
        Self::Impassable,
        Self::DeepWater,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Ground => 0x01,
            Self::Water => 0x02,
            Self::Cliff => 0x04,
            Self::Air => 0x08,
            Self::Rubble => 0x10,
            Self::Obstacle => 0x20,
            Self::Impassable => 0x40,
            Self::DeepWater => 0x80,
        }
    }
}

/// Set of surfaces a template may use.
///
/// # Examples
/// ```
/// use locomotor::template::{Surface, Surfaces};
/// let amphibious = Surfaces::from_iter([Surface::Ground, Surface::Water]);
/// assert!(amphibious.allows(Surface::Water));
/// assert!(!amphibious.allows(Surface::Air));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Surface>", into = "Vec<Surface>")]
pub struct Surfaces(u8);

impl Surfaces {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// Raw bit mask.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `surface` is in the set.
    #[must_use]
    pub const fn allows(self, surface: Surface) -> bool {
        self.0 & surface.bit() != 0
    }

    /// The set with `surface` added.
    #[must_use]
    pub const fn with(self, surface: Surface) -> Self {
        Self(self.0 | surface.bit())
    }

    /// Whether the set holds no surface.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Surface> for Surfaces {
    fn from_iter<I: IntoIterator<Item = Surface>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl From<Vec<Surface>> for Surfaces {
    fn from(surfaces: Vec<Surface>) -> Self {
        surfaces.into_iter().collect()
    }
}

impl From<Surfaces> for Vec<Surface> {
    fn from(surfaces: Surfaces) -> Self {
        Surface::ALL
            .into_iter()
            .filter(|surface| surfaces.allows(*surface))
            .collect()
    }
}
