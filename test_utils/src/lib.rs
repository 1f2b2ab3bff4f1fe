//! Utility helpers for tests.
//!
//! Shared template builders, terrain doubles and a driving loop used by the
//! integration tests of the `locomotor` crate.
pub mod fixtures;
pub mod terrain;

pub use fixtures::{drive_until_arrived, template_with, tracked_scenario};
pub use terrain::{CountingTerrain, StepTerrain};
