//! Bevy plugin driving locomotors from movement orders.
//!
//! Each tick, every entity carrying a [`Locomotor`], a [`MovementState`] and
//! a [`MovementOrder`] advances its order against the [`SharedTerrain`]
//! resource. Finished orders flip [`OrderStatus`] and raise an
//! [`OrderCompleted`] event.

use std::fmt;
use std::sync::Arc;

use bevy_app::{App, Plugin, Update};
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::debug;

use crate::actor::MovementState;
use crate::locomotor::Locomotor;
use crate::terrain::{FlatTerrain, TerrainQuery};

/// Ground shared by every locomotor in the world.
#[derive(Resource, Clone)]
pub struct SharedTerrain(pub Arc<dyn TerrainQuery + Send + Sync>);

impl SharedTerrain {
    /// Shares `terrain` with every locomotor.
    #[must_use]
    pub fn new(terrain: impl TerrainQuery + Send + Sync + 'static) -> Self {
        Self(Arc::new(terrain))
    }
}

impl Default for SharedTerrain {
    fn default() -> Self {
        Self::new(FlatTerrain::default())
    }
}

impl fmt::Debug for SharedTerrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedTerrain(..)")
    }
}

/// What the movement controller wants from an entity this tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
#[require(OrderStatus)]
pub enum MovementOrder {
    /// No order; completes immediately.
    #[default]
    Idle,
    /// Turn on the spot to face a direction.
    Face(Vec3),
    /// Drive to a destination.
    MoveTo {
        /// Destination.
        target: Vec3,
        /// Waypoint after `target`, so the unit does not slow for a stop.
        next: Option<Vec3>,
    },
    /// Keep station with no destination.
    Maintain,
}

/// Progress of the entity's current [`MovementOrder`].
///
/// Reset to [`OrderStatus::InProgress`] whenever the order changes.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderStatus {
    /// Still being carried out.
    #[default]
    InProgress,
    /// Finished; the entity is left alone until the order changes.
    Complete,
}

/// Raised once when an entity finishes facing or reaching its target.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct OrderCompleted {
    /// Entity that finished.
    pub entity: Entity,
    /// The order it finished.
    pub order: MovementOrder,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_order_completed(event: On<OrderCompleted>) {
    let OrderCompleted { entity, order } = event.event();
    debug!("{entity:?} completed {order:?}");
}

/// Advances every active movement order by one logic tick.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems receive resources by value."
)]
pub fn locomotion_tick_system(
    terrain: Res<SharedTerrain>,
    mut commands: Commands,
    mut movers: Query<(
        Entity,
        &Locomotor,
        &mut MovementState,
        Ref<MovementOrder>,
        &mut OrderStatus,
    )>,
) {
    let ground = terrain.0.as_ref();
    for (entity, locomotor, mut state, order, mut status) in &mut movers {
        if order.is_changed() {
            *status = OrderStatus::InProgress;
        }
        if *status == OrderStatus::Complete {
            continue;
        }
        let finished = match *order {
            MovementOrder::Idle => {
                *status = OrderStatus::Complete;
                continue;
            }
            MovementOrder::Face(direction) => {
                locomotor.rotate_to_target_direction(&mut *state, direction)
            }
            MovementOrder::MoveTo { target, next } => {
                locomotor.move_towards_position(&mut *state, ground, target, next)
            }
            MovementOrder::Maintain => {
                locomotor.maintain_position(&mut *state, ground);
                false
            }
        };
        if finished {
            *status = OrderStatus::Complete;
            commands.trigger(OrderCompleted {
                entity,
                order: *order,
            });
        }
    }
}

/// Installs the locomotion tick and its supporting resources.
#[derive(Default)]
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SharedTerrain>();
        app.add_observer(log_order_completed);
        app.add_systems(Update, locomotion_tick_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Appearance, LocomotorTemplate};
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[derive(Resource, Default)]
    struct Completions(Vec<Entity>);

    #[fixture]
    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(LocomotionPlugin);
        app.init_resource::<Completions>();
        app.add_observer(
            |event: On<OrderCompleted>, mut completions: ResMut<Completions>| {
                completions.0.push(event.event().entity);
            },
        );
        app
    }

    fn walker() -> Locomotor {
        let mut template = LocomotorTemplate::new(Appearance::TwoLegs);
        template.max_speed = Some(1.0);
        template.acceleration = 1.0;
        template.braking = 1.0;
        template.max_turn_rate = 0.5;
        let shared = template.into_shared().expect("valid template");
        Locomotor::new(shared, 100.0)
    }

    #[rstest]
    fn plugin_installs_default_terrain(app: App) {
        assert!(app.world().contains_resource::<SharedTerrain>());
    }

    #[rstest]
    fn move_order_runs_to_completion(mut app: App) {
        let entity = app
            .world_mut()
            .spawn((
                walker(),
                MovementState::at(Vec3::ZERO, 0.0),
                MovementOrder::MoveTo {
                    target: Vec3::new(3.0, 0.0, 0.0),
                    next: None,
                },
            ))
            .id();

        app.update();
        let state = app.world().get::<MovementState>(entity).expect("state");
        assert_relative_eq!(state.translation.x, 1.0);
        assert_eq!(
            app.world().get::<OrderStatus>(entity),
            Some(&OrderStatus::InProgress)
        );

        for _ in 0..10 {
            app.update();
        }
        assert_eq!(
            app.world().get::<OrderStatus>(entity),
            Some(&OrderStatus::Complete)
        );
        assert_eq!(app.world().resource::<Completions>().0, vec![entity]);
    }

    #[rstest]
    fn new_order_resets_status(mut app: App) {
        let entity = app
            .world_mut()
            .spawn((
                walker(),
                MovementState::at(Vec3::ZERO, 0.0),
                MovementOrder::Face(Vec3::X),
            ))
            .id();
        app.update();
        assert_eq!(
            app.world().get::<OrderStatus>(entity),
            Some(&OrderStatus::Complete)
        );

        app.world_mut()
            .entity_mut(entity)
            .insert(MovementOrder::Face(Vec3::Y));
        app.update();
        assert_eq!(
            app.world().get::<OrderStatus>(entity),
            Some(&OrderStatus::InProgress)
        );
        let state = app.world().get::<MovementState>(entity).expect("state");
        assert_relative_eq!(state.yaw, 0.5);
    }

    #[rstest]
    fn inserted_terrain_resource_is_used(mut app: App) {
        app.insert_resource(SharedTerrain::new(FlatTerrain::new(4.0)));
        let entity = app
            .world_mut()
            .spawn((
                walker(),
                MovementState::at(Vec3::ZERO, 0.0),
                MovementOrder::MoveTo {
                    target: Vec3::new(10.0, 0.0, 0.0),
                    next: None,
                },
            ))
            .id();
        app.update();
        let state = app.world().get::<MovementState>(entity).expect("state");
        assert_relative_eq!(state.translation.z, 4.0);
    }
}
