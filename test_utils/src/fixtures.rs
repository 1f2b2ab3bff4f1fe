//! Template and locomotor builders.

use std::sync::Arc;

use glam::Vec3;
use locomotor::template::{Appearance, LocomotorTemplate};
use locomotor::{Locomotor, MovementActor, TerrainQuery};

/// Builds and validates a template for `appearance` after `configure` runs.
///
/// # Panics
/// Panics if the configured template fails validation.
///
/// # Examples
/// ```
/// use locomotor::template::Appearance;
/// use test_utils::template_with;
/// let template = template_with(Appearance::Treads, |t| t.max_speed = Some(2.0));
/// assert_eq!(template.max_speed_damaged, 2.0);
/// ```
pub fn template_with(
    appearance: Appearance,
    configure: impl FnOnce(&mut LocomotorTemplate),
) -> Arc<LocomotorTemplate> {
    let mut template = LocomotorTemplate::new(appearance);
    configure(&mut template);
    template
        .into_shared()
        .unwrap_or_else(|err| panic!("fixture template is invalid: {err}"))
}

/// Tracked locomotor used by the acceleration scenarios: top speed 5,
/// acceleration 1 and braking 2 per frame at base speed 100.
pub fn tracked_scenario() -> Locomotor {
    let template = template_with(Appearance::Treads, |t| {
        t.max_speed = Some(5.0);
        t.acceleration = 1.0;
        t.braking = 2.0;
        t.max_turn_rate = 0.1;
    });
    Locomotor::new(template, 100.0)
}

/// Calls `move_towards_position` until it reports arrival.
///
/// Returns the number of ticks that moved the actor, or `None` if the actor
/// had not arrived after `max_ticks` calls.
pub fn drive_until_arrived<A, T>(
    locomotor: &Locomotor,
    actor: &mut A,
    terrain: &T,
    target: Vec3,
    max_ticks: u32,
) -> Option<u32>
where
    A: MovementActor,
    T: TerrainQuery + ?Sized,
{
    (0..max_ticks).find(|_| locomotor.move_towards_position(&mut *actor, terrain, target, None))
}
