//! Behaviour-driven tests using rust-rspec.
//!
//! A winged locomotor with no destination keeps station by flying a steady
//! circle whose size comes from its circling radius.

use std::f32::consts::TAU;

use glam::Vec3;
use locomotor::numeric::angle_delta;
use locomotor::template::Appearance;
use locomotor::{FlatTerrain, Locomotor, MovementState};
use test_utils::template_with;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

const TICKS_PER_CIRCUIT: u16 = 60;
const SPEED: f32 = 2.0;

#[derive(Debug, Clone)]
struct CirclingFlight {
    locomotor: Locomotor,
    state: MovementState,
    start: Vec3,
    speeds: Vec<f32>,
    yaw_steps: Vec<f32>,
}

impl CirclingFlight {
    fn with_radius(radius: f32) -> Self {
        let template = template_with(Appearance::Wings, |t| {
            t.max_speed = Some(SPEED);
            t.max_turn_rate = 0.3;
            t.circling_radius = radius;
        });
        let start = Vec3::new(5.0, -3.0, 0.0);
        Self {
            locomotor: Locomotor::new(template, 100.0),
            state: MovementState::at(start, 0.4),
            start,
            speeds: Vec::new(),
            yaw_steps: Vec::new(),
        }
    }

    fn fly(&mut self, ticks: u16) {
        let terrain = FlatTerrain::new(0.0);
        for _ in 0..ticks {
            // Whatever speed the unit had, station keeping resets it.
            self.state.speed = 0.5;
            let before = self.state.yaw;
            self.locomotor.maintain_position(&mut self.state, &terrain);
            self.speeds.push(self.state.speed);
            self.yaw_steps.push(angle_delta(self.state.yaw, before));
        }
    }

    fn assert_speed_forced_to_nominal(&self) {
        assert!(self.speeds.iter().all(|speed| *speed == SPEED));
    }

    fn assert_constant_yaw_step(&self, expected: f32) {
        for step in &self.yaw_steps {
            assert!(
                (step - expected).abs() < 1e-5,
                "yaw step {step}, expected {expected}"
            );
        }
    }

    fn assert_back_at_start(&self) {
        let gap = (self.state.translation - self.start).length();
        assert!(gap < 1e-2, "circuit did not close, {gap} from start");
        assert!(angle_delta(self.state.yaw, 0.4).abs() < 1e-4);
    }

    fn assert_left_start(&self) {
        assert!((self.state.translation - self.start).length() > 1.0);
    }
}

impl Default for CirclingFlight {
    fn default() -> Self {
        // Negative radii circle counter-clockwise.
        Self::with_radius(-SPEED * f32::from(TICKS_PER_CIRCUIT) / TAU)
    }
}

#[test]
fn wings_keep_station_by_circling() {
    let step = TAU / f32::from(TICKS_PER_CIRCUIT);
    rspec_runner::run_serial(&rspec::given(
        "a winged locomotor keeping station",
        CirclingFlight::default(),
        |ctx| {
            ctx.when("it flies half a circuit", |ctx| {
                ctx.before_each(|flight| flight.fly(TICKS_PER_CIRCUIT / 2));
                ctx.then("it has left its starting point", |flight| {
                    flight.assert_left_start();
                });
            });
            ctx.when("it flies a full circuit", |ctx| {
                ctx.before_each(|flight| flight.fly(TICKS_PER_CIRCUIT));
                ctx.then("speed is forced to the nominal speed every tick", |flight| {
                    flight.assert_speed_forced_to_nominal();
                });
                ctx.then("yaw advances by the same step every tick", move |flight| {
                    flight.assert_constant_yaw_step(step);
                });
                ctx.then("the path closes on itself", |flight| {
                    flight.assert_back_at_start();
                });
            });
        },
    ));
}

#[test]
fn positive_radius_circles_clockwise() {
    let step = TAU / f32::from(TICKS_PER_CIRCUIT);
    rspec_runner::run_serial(&rspec::given(
        "a winged locomotor with a positive circling radius",
        CirclingFlight::with_radius(SPEED * f32::from(TICKS_PER_CIRCUIT) / TAU),
        |ctx| {
            ctx.when("it flies a full circuit", |ctx| {
                ctx.before_each(|flight| flight.fly(TICKS_PER_CIRCUIT));
                ctx.then("yaw decreases by the same step every tick", move |flight| {
                    flight.assert_constant_yaw_step(-step);
                });
                ctx.then("the path closes on itself", |flight| {
                    flight.assert_back_at_start();
                });
            });
        },
    ));
}
