//! Deterministic unit locomotion for a realtime strategy engine.
//!
//! Templates describe how a class of unit moves, a [`Locomotor`] applies a
//! template to one entity each logic tick, and [`LocomotionPlugin`] wires
//! that into a Bevy schedule.
pub mod actor;
pub mod constants;
pub mod locomotor;
pub mod logging;
pub mod numeric;
pub mod plugin;
pub mod telemetry;
pub mod template;
pub mod terrain;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use actor::{Attitude, MovementActor, MovementState};
pub use locomotor::{AppearanceProfile, Locomotor};
pub use logging::init as init_logging;
pub use plugin::{
    locomotion_tick_system, LocomotionPlugin, MovementOrder, OrderCompleted, OrderStatus,
    SharedTerrain,
};
pub use telemetry::{LegacyTelemetry, PersistError};
pub use template::{
    Appearance, DefinitionError, LocomotorTemplate, TemplateDefinition, TemplateError,
    TemplateRegistry,
};
pub use terrain::{FlatTerrain, SlopedTerrain, TerrainQuery};
pub use vector_math::{planar, vec_normalize};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use locomotor::prelude::*;
    //! ```

    pub use crate::Appearance;
    pub use crate::FlatTerrain;
    pub use crate::Locomotor;
    pub use crate::LocomotorTemplate;
    pub use crate::MovementActor;
    pub use crate::MovementState;
    pub use crate::TerrainQuery;
    pub use glam::Vec3;
}
