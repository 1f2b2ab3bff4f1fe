//! Load-time validation of locomotor templates through the public API.

use locomotor::template::{Appearance, LocomotorTemplate, Surface, TemplateRegistry};
use rstest::rstest;

const DEMO_TEMPLATES: &str = include_str!("../demos/templates.json");

#[rstest]
#[case(Appearance::TwoLegs)]
#[case(Appearance::Treads)]
#[case(Appearance::FourWheels)]
#[case(Appearance::Hover)]
#[case(Appearance::Wings)]
#[case(Appearance::GiantBird)]
#[case(Appearance::Ship)]
fn unset_damaged_values_follow_nominal(#[case] appearance: Appearance) {
    let mut template = LocomotorTemplate::new(appearance);
    template.max_speed = Some(3.0);
    template.max_turn_rate = 0.2;
    template.acceleration = 0.5;
    template.lift = 0.25;
    template.validate().expect("valid template");

    assert_eq!(template.max_speed_damaged, 3.0);
    assert_eq!(template.max_turn_rate_damaged, 0.2);
    assert_eq!(template.acceleration_damaged, 0.5);
    assert_eq!(template.lift_damaged, 0.25);
}

#[test]
fn demo_templates_load() {
    let registry = TemplateRegistry::from_json_str(DEMO_TEMPLATES).expect("demo templates");
    assert_eq!(
        registry.names(),
        vec![
            "ComancheLocomotor",
            "HumveeLocomotor",
            "RaptorLocomotor",
            "ScudLocomotor",
            "TankLocomotor"
        ]
    );
    let tank = registry.get("TankLocomotor").expect("tank template");
    assert_eq!(tank.appearance, Appearance::Treads);
    assert!(tank.surfaces.allows(Surface::Rubble));
    assert!(!tank.surfaces.allows(Surface::Air));
    assert_eq!(tank.max_speed, Some(1.0));
    assert_eq!(tank.max_speed_damaged, 0.6);
}
