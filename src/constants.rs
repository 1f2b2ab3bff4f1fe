//! Simulation constants shared by the locomotion engine.
//!
//! Template values are expressed per logic frame, so anything that converts
//! between designer units and simulation units goes through
//! [`LOGIC_FRAMES_PER_SECOND`].

/// Logic ticks per simulated second.
pub const LOGIC_FRAMES_PER_SECOND: f32 = 30.0;
/// Planar distance below which a unit counts as having reached its target.
pub const ARRIVAL_DISTANCE: f32 = 0.25;
/// Heading error, in radians, that `rotate_to_target_direction` accepts as aligned.
pub const ALIGNED_ANGLE: f32 = 0.1;
/// Treads refuse to advance while misaligned by more than two degrees.
pub const TREAD_MISALIGNMENT: f32 = 2.0 * std::f32::consts::PI / 180.0;
/// Wing banking never exceeds 45 degrees either way.
pub const WING_ROLL_LIMIT: f32 = std::f32::consts::FRAC_PI_4;
/// Replacement for degenerate speed thresholds found in legacy content.
pub const HEAL_EPSILON: f32 = 0.01;
/// Marker for a damaged value that was never configured.
pub const UNSET_DAMAGED_VALUE: f32 = -1.0;
/// "Effectively unlimited" default used by braking and min turn speed.
pub const BIG_NUMBER: f32 = 99_999.0;
/// Layout version written and accepted by locomotor persistence.
pub const PERSIST_VERSION: u8 = 2;
