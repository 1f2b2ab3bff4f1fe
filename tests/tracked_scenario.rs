//! A tracked vehicle accelerating along a straight, pre-aligned course.

use approx::assert_relative_eq;
use glam::Vec3;
use locomotor::{FlatTerrain, MovementState};
use test_utils::{drive_until_arrived, tracked_scenario};

#[test]
fn first_tick_accelerates_by_one_step() {
    let loco = tracked_scenario();
    let mut actor = MovementState::at(Vec3::ZERO, 0.0);
    let target = Vec3::new(10.0, 0.0, 0.0);

    assert!(!loco.move_towards_position(&mut actor, &FlatTerrain::new(0.0), target, None));
    assert_relative_eq!(actor.speed, 1.0);
    assert_relative_eq!((target - actor.translation).length(), 9.0);
}

#[test]
fn cruises_at_top_speed_then_brakes_onto_the_target() {
    let loco = tracked_scenario();
    let terrain = FlatTerrain::new(0.0);
    let mut actor = MovementState::at(Vec3::ZERO, 0.0);
    let target = Vec3::new(100.0, 0.0, 0.0);

    let mut speeds = Vec::new();
    while !loco.move_towards_position(&mut actor, &terrain, target, None) {
        speeds.push(actor.speed);
        assert!(actor.translation.x <= target.x);
        assert!(speeds.len() < 100, "never arrived");
    }

    assert_eq!(speeds.get(..5), Some([1.0, 2.0, 3.0, 4.0, 5.0].as_slice()));
    assert!(speeds.get(4..21).is_some_and(|cruise| cruise.iter().all(|s| *s == 5.0)));
    assert!(speeds.get(21..).is_some_and(|tail| tail.iter().all(|s| *s < 5.0)));
    assert!((target - actor.translation).length() < 0.25);
}

#[test]
fn arrival_stops_all_motion() {
    let loco = tracked_scenario();
    let terrain = FlatTerrain::new(0.0);
    let mut actor = MovementState::at(Vec3::ZERO, 0.0);
    let target = Vec3::new(100.0, 0.0, 0.0);

    assert_eq!(drive_until_arrived(&loco, &mut actor, &terrain, target, 100), Some(24));
    let parked = actor;
    for _ in 0..3 {
        assert!(loco.move_towards_position(&mut actor, &terrain, target, None));
    }
    assert_eq!(actor, parked);
}

#[test]
fn damaged_vehicle_without_damaged_values_keeps_nominal_speed() {
    let loco = tracked_scenario();
    let mut actor = MovementState::at(Vec3::ZERO, 0.0);
    actor.damaged = true;
    for _ in 0..10 {
        loco.move_towards_position(&mut actor, &FlatTerrain::new(0.0), Vec3::new(500.0, 0.0, 0.0), None);
    }
    assert_relative_eq!(actor.speed, loco.speed(&actor));
    assert_relative_eq!(actor.speed, 5.0);
}
