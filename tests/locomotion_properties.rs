//! Properties of the per-tick integrator that hold across appearances.

use std::f32::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use glam::Vec3;
use locomotor::numeric::{angle_delta, direction_from_yaw};
use locomotor::template::Appearance;
use locomotor::{FlatTerrain, Locomotor, MovementState, TerrainQuery, ALIGNED_ANGLE};
use rstest::rstest;
use test_utils::{template_with, CountingTerrain, StepTerrain};

const ALL_APPEARANCES: [Appearance; 14] = [
    Appearance::TwoLegs,
    Appearance::Climber,
    Appearance::Thrust,
    Appearance::FourWheels,
    Appearance::Hover,
    Appearance::Wings,
    Appearance::Treads,
    Appearance::Other,
    Appearance::Motorcycle,
    Appearance::GiantBird,
    Appearance::HugeTwoLegs,
    Appearance::Horde,
    Appearance::FourLegsHuge,
    Appearance::Ship,
];

fn mover(appearance: Appearance) -> Locomotor {
    let template = template_with(appearance, |t| {
        t.max_speed = Some(2.0);
        t.acceleration = 0.5;
        t.braking = 1.0;
        t.max_turn_rate = 0.2;
    });
    Locomotor::new(template, 100.0)
}

#[rstest]
#[case(25.0)]
#[case(60.0)]
#[case(100.0)]
#[case(175.0)]
fn doubling_base_speed_doubles_scaled_values(#[case] base_speed: f32) {
    let template = template_with(Appearance::Hover, |t| {
        t.max_speed = Some(2.0);
        t.acceleration = 0.5;
        t.max_turn_rate = 0.2;
        t.lift = 0.3;
        t.braking = 0.7;
    });
    let single = Locomotor::new(template.clone(), base_speed);
    let double = Locomotor::new(template, base_speed * 2.0);
    let actor = MovementState::default();

    assert_relative_eq!(double.speed(&actor), 2.0 * single.speed(&actor), max_relative = 1e-6);
    assert_relative_eq!(
        double.acceleration(&actor),
        2.0 * single.acceleration(&actor),
        max_relative = 1e-6
    );
    assert_relative_eq!(double.turn_rate(&actor), 2.0 * single.turn_rate(&actor), max_relative = 1e-6);
    assert_relative_eq!(double.lift(&actor), 2.0 * single.lift(&actor), max_relative = 1e-6);
    assert_relative_eq!(double.braking(), 2.0 * single.braking(), max_relative = 1e-6);
}

#[test]
fn rotation_reports_done_only_inside_tolerance() {
    let loco = mover(Appearance::Treads);
    let turn_rate = loco.turn_rate(&MovementState::default());
    for start_step in -12..=12 {
        for target_step in -12..=12 {
            let start = start_step as f32 * PI / 12.0 + 0.013;
            let target = target_step as f32 * PI / 12.0;
            let mut actor = MovementState::at(Vec3::ZERO, start);
            let before = angle_delta(target, start);
            let direction = direction_from_yaw(target).extend(0.0);

            let done = loco.rotate_to_target_direction(&mut actor, direction);

            assert_eq!(done, before.abs() < ALIGNED_ANGLE, "start {start} target {target}");
            if done {
                assert_eq!(actor.yaw, start);
            } else {
                let moved = angle_delta(actor.yaw, start);
                assert!(moved.abs() <= turn_rate + 1e-5);
                assert_eq!(moved.signum(), before.signum());
                assert!(angle_delta(target, actor.yaw).abs() < before.abs());
            }
            assert_eq!(actor.translation, Vec3::ZERO);
        }
    }
}

#[rstest]
fn close_targets_count_as_arrived(
    #[values(
        Appearance::TwoLegs,
        Appearance::Thrust,
        Appearance::FourWheels,
        Appearance::Hover,
        Appearance::Wings,
        Appearance::Motorcycle,
        Appearance::GiantBird,
        Appearance::Ship
    )]
    appearance: Appearance,
    #[values(Vec3::new(0.2, 0.0, 0.0), Vec3::new(-0.1, 0.2, 5.0), Vec3::new(0.0, -0.24, 0.0))]
    target: Vec3,
) {
    let loco = mover(appearance);
    let mut actor = MovementState::at(Vec3::ZERO, 0.3);
    actor.speed = 1.0;
    let before = actor;
    assert!(loco.move_towards_position(&mut actor, &FlatTerrain::new(0.0), target, None));
    assert_eq!(actor, before);
}

#[test]
fn distant_targets_are_not_arrived() {
    for appearance in ALL_APPEARANCES {
        let loco = mover(appearance);
        let mut actor = MovementState::at(Vec3::ZERO, 0.0);
        assert!(
            !loco.move_towards_position(
                &mut actor,
                &FlatTerrain::new(0.0),
                Vec3::new(0.3, 0.0, 0.0),
                None
            ),
            "{appearance:?}"
        );
    }
}

#[rstest]
#[case(3.0)]
#[case(20.0)]
#[case(90.0)]
#[case(179.0)]
#[case(-45.0)]
fn misaligned_treads_do_not_advance(#[case] misalignment_degrees: f32) {
    let loco = mover(Appearance::Treads);
    let target = direction_from_yaw(misalignment_degrees.to_radians()).extend(0.0) * 50.0;
    let mut actor = MovementState::at(Vec3::ZERO, 0.0);
    for _ in 0..5 {
        loco.move_towards_position(&mut actor, &FlatTerrain::new(0.0), target, None);
        assert_eq!(actor.translation, Vec3::ZERO);
    }
}

#[test]
fn treads_advance_once_aligned() {
    let loco = mover(Appearance::Treads);
    let target = direction_from_yaw(1.5_f32.to_radians()).extend(0.0) * 50.0;
    let mut actor = MovementState::at(Vec3::ZERO, 0.0);
    loco.move_towards_position(&mut actor, &FlatTerrain::new(0.0), target, None);
    assert_relative_eq!(actor.translation.length(), 0.5, epsilon = 1e-6);
}

#[rstest]
#[case::well_below(0.0, 0.3)]
#[case::just_below(9.0, 0.5)]
#[case::rising_terrain(5.0, 0.4)]
fn lift_stays_in_band_while_below(#[case] start_height: f32, #[case] lift: f32) {
    let template = template_with(Appearance::Hover, |t| {
        t.lift = lift;
        t.preferred_height = 10.0;
    });
    let loco = Locomotor::new(template, 100.0);
    let max_velocity = lift * locomotor::LOGIC_FRAMES_PER_SECOND;
    let mut actor = MovementState::at(Vec3::new(0.0, 0.0, start_height), 0.0);
    for tick in 0..200_u16 {
        let ground = f32::from(tick) * 0.1;
        let height = actor.translation.z;
        if ground + 10.0 <= height {
            break;
        }
        let thrust = loco.current_thrust(&mut actor, ground, height);
        assert!(
            (0.0..=max_velocity).contains(&actor.lift),
            "lift {} left [0, {max_velocity}]",
            actor.lift
        );
        assert!(thrust <= ground + 10.0 - height + 1e-5);
        actor.translation.z += thrust;
    }
}

#[test]
fn lift_stays_in_band_while_above() {
    let template = template_with(Appearance::Hover, |t| {
        t.lift = 0.2;
        t.preferred_height = 10.0;
    });
    let loco = Locomotor::new(template, 100.0);
    let min_velocity = -0.2 * locomotor::LOGIC_FRAMES_PER_SECOND;
    let mut actor = MovementState::at(Vec3::new(0.0, 0.0, 60.0), 0.0);
    actor.lift = 2.0;
    while actor.translation.z > 10.0 {
        let height = actor.translation.z;
        let thrust = loco.current_thrust(&mut actor, 0.0, height);
        assert!((min_velocity..=0.0).contains(&actor.lift));
        assert!(thrust >= 10.0 - height - 1e-5);
        actor.translation.z += thrust;
    }
    assert_relative_eq!(actor.translation.z, 10.0, epsilon = 1e-4);
}

#[rstest]
#[case::ground(Appearance::TwoLegs, 1, 0)]
#[case::tracked(Appearance::Treads, 1, 1)]
#[case::flying(Appearance::Hover, 1, 0)]
#[case::thrust(Appearance::Thrust, 0, 0)]
fn terrain_is_sampled_sparingly(
    #[case] appearance: Appearance,
    #[case] heights: usize,
    #[case] normals: usize,
) {
    let loco = mover(appearance);
    let terrain = CountingTerrain::new(FlatTerrain::new(0.0));
    let mut actor = MovementState::at(Vec3::ZERO, 0.0);
    loco.move_towards_position(&mut actor, &terrain, Vec3::new(30.0, 0.0, 0.0), None);
    assert_eq!(terrain.height_queries(), heights);
    assert_eq!(terrain.normal_queries(), normals);
}

#[test]
fn flying_units_drift_along_their_facing() {
    let loco = mover(Appearance::Hover);
    let mut actor = MovementState::at(Vec3::ZERO, FRAC_PI_2);
    loco.move_towards_position(&mut actor, &FlatTerrain::new(0.0), Vec3::new(30.0, 0.0, 0.0), None);
    assert_relative_eq!(actor.translation.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(actor.translation.y, 0.5, epsilon = 1e-6);
}

#[test]
fn ground_units_climb_a_step_and_stop_sampling_on_arrival() {
    let loco = mover(Appearance::TwoLegs);
    let step = StepTerrain {
        edge: 2.5,
        low: 0.0,
        high: 2.0,
    };
    let terrain = CountingTerrain::new(step);
    let target = Vec3::new(10.0, 0.0, 0.0);
    let mut actor = MovementState::at(Vec3::ZERO, 0.0);

    let mut ticks = 0;
    while !loco.move_towards_position(&mut actor, &terrain, target, None) {
        ticks += 1;
        assert!(ticks < 40, "never arrived");
        let expected = step.height(actor.translation.x, actor.translation.y);
        assert_relative_eq!(actor.translation.z, expected);
    }
    assert_eq!(ticks, 7);
    assert_eq!(terrain.height_queries(), 7);
    assert_relative_eq!(actor.translation.x, 10.0, epsilon = 1e-5);
    assert_relative_eq!(actor.translation.z, 2.0);

    terrain.reset();
    assert!(loco.move_towards_position(&mut actor, &terrain, target, None));
    assert_eq!(terrain.height_queries(), 0);
    assert_eq!(terrain.normal_queries(), 0);
}
