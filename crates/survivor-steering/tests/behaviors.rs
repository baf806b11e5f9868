use survivor_core::{AgentInfo, NavProjection, OpenField, SteeringOutput, Vec2};
use survivor_steering::{
    Arrive, BlendedSteering, Evade, Flee, PrioritySteering, Pursuit, Seek, SteeringBehavior,
    SteeringKind, SteeringSet, TargetData, Wander,
};

fn agent_at(position: Vec2) -> AgentInfo {
    AgentInfo {
        position,
        max_linear_speed: 10.0,
        max_angular_speed: 3.0,
        ..AgentInfo::default()
    }
}

fn speed(out: &SteeringOutput) -> f32 {
    out.linear_velocity.length()
}

#[test]
fn arrive_speed_is_linear_between_radii() {
    let mut arrive = Arrive::default();
    let agent = agent_at(Vec2::ZERO);

    let at = |arrive: &mut Arrive, x: f32| {
        speed(&arrive.calculate(0.1, &agent, &TargetData::at(Vec2::new(x, 0.0)), &OpenField))
    };

    assert!(at(&mut arrive, 3.0).abs() < 1e-5);
    assert!((at(&mut arrive, 9.0) - 5.0).abs() < 1e-4);
    assert!((at(&mut arrive, 15.0) - 10.0).abs() < 1e-4);
    assert!((at(&mut arrive, 40.0) - 10.0).abs() < 1e-4);
    assert_eq!(at(&mut arrive, 1.0), 0.0);
}

#[test]
fn seek_goes_where_the_projection_says() {
    let mut seek = Seek;
    let agent = agent_at(Vec2::ZERO);
    let up_only = |_p: Vec2| Vec2::new(0.0, 10.0);

    let out = seek.calculate(0.1, &agent, &TargetData::at(Vec2::new(50.0, 0.0)), &up_only);
    assert!(out.linear_velocity.x.abs() < 1e-5);
    assert!((out.linear_velocity.y - 10.0).abs() < 1e-4);
    assert!(out.auto_orient);
    assert_eq!(out.angular_velocity, 0.0);
}

#[test]
fn flee_runs_away_and_faces_the_threat() {
    let mut flee = Flee::default();
    let agent = agent_at(Vec2::ZERO);

    let out = flee.calculate(0.1, &agent, &TargetData::at(Vec2::new(-5.0, 0.0)), &OpenField);
    assert!(out.linear_velocity.x > 9.9);
    assert!(!out.auto_orient);
    assert_eq!(out.angular_velocity.abs(), 3.0);
}

#[test]
fn pursuit_leads_and_evade_retreats_from_moving_targets() {
    let agent = agent_at(Vec2::ZERO);
    // Ten units away at max speed ten: a one second horizon puts it at (10, 5).
    let target = TargetData::moving(Vec2::new(10.0, 0.0), Vec2::new(0.0, 5.0));

    let chase = Pursuit.calculate(0.1, &agent, &target, &OpenField);
    let expected = Vec2::new(10.0, 5.0).normalized() * 10.0;
    assert!((chase.linear_velocity - expected).length() < 1e-3);

    let run = Evade.calculate(0.1, &agent, &target, &OpenField);
    assert!((run.linear_velocity + expected).length() < 1e-3);
    assert!(!run.auto_orient);
}

#[test]
fn wander_is_reproducible_and_bounded() {
    let agent = AgentInfo {
        orientation: core::f32::consts::FRAC_PI_2,
        ..agent_at(Vec2::ZERO)
    };
    let mut a = Wander::new(6.0, 4.0, 0.5, 99);
    let mut b = Wander::new(6.0, 4.0, 0.5, 99);

    for _ in 0..50 {
        let before = a.angle();
        let out_a = a.calculate(0.1, &agent, &TargetData::default(), &OpenField);
        let out_b = b.calculate(0.1, &agent, &TargetData::default(), &OpenField);
        assert_eq!(out_a, out_b);
        assert!((a.angle() - before).abs() <= 0.5);
        assert!((speed(&out_a) - 10.0).abs() < 1e-3);
    }
}

#[test]
fn wander_from_standstill_heads_where_the_agent_faces() {
    let agent = AgentInfo {
        orientation: core::f32::consts::FRAC_PI_2,
        ..agent_at(Vec2::ZERO)
    };
    let mut wander = Wander::default();
    let out = wander.calculate(0.1, &agent, &TargetData::default(), &OpenField);
    assert!(out.linear_velocity.y > 0.0);
}

#[test]
fn blend_averages_by_weight() {
    let agent = AgentInfo {
        max_linear_speed: 4.0,
        ..agent_at(Vec2::ZERO)
    };
    let target = TargetData::at(Vec2::new(10.0, 0.0));

    let seek: Box<dyn SteeringBehavior> = Box::new(Seek);
    let flee: Box<dyn SteeringBehavior> = Box::new(Flee::default());
    let mut blend = BlendedSteering::new(vec![(seek, 3.0), (flee, 1.0)]);
    let out = blend.calculate(0.1, &agent, &target, &OpenField);
    assert!((out.linear_velocity.x - 2.0).abs() < 1e-4);
    assert!(!out.auto_orient);

    for w in blend.weights_mut() {
        *w = 0.0;
    }
    assert_eq!(blend.calculate(0.1, &agent, &target, &OpenField), SteeringOutput::default());
}

#[test]
fn priority_uses_first_child_only() {
    let agent = agent_at(Vec2::ZERO);
    let target = TargetData::at(Vec2::new(10.0, 0.0));

    let mut empty = PrioritySteering::default();
    assert_eq!(empty.calculate(0.1, &agent, &target, &OpenField), SteeringOutput::default());

    let mut priority = PrioritySteering::default();
    priority.add(Box::new(Flee::default()));
    priority.add(Box::new(Seek));
    assert!(priority.calculate(0.1, &agent, &target, &OpenField).linear_velocity.x < 0.0);
}

#[test]
fn steering_set_dispatches_by_kind() {
    let mut set = SteeringSet::default();
    let agent = agent_at(Vec2::ZERO);
    let target = TargetData::at(Vec2::new(0.0, 20.0));
    let nav: &dyn NavProjection = &OpenField;

    let seek = set.calculate(SteeringKind::Seek, 0.1, &agent, &target, nav);
    let flee = set.calculate(SteeringKind::Flee, 0.1, &agent, &target, nav);
    assert!(seek.linear_velocity.y > 0.0);
    assert!(flee.linear_velocity.y < 0.0);
    assert_eq!(SteeringKind::ALL.len(), 6);
    assert_eq!(SteeringKind::Wander.name(), "Wander");
}
