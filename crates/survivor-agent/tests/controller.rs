mod support;

use std::io::Write;

use support::MockWorld;
use survivor_agent::trace::{TAG_TRANSITION, TAG_WAVE_RESET};
use survivor_agent::{
    keys, AgentConfig, AgentController, DebugShape, ExplorationState, TraceLog, TRACE_LOG,
};
use survivor_core::{BlackboardError, EnemyInfo, Vec2, INVENTORY_SLOTS};

#[test]
fn first_update_initializes_lazily() {
    let mut world = MockWorld::default();
    let mut agent = AgentController::new(AgentConfig::default());
    assert!(!agent.is_initialized());

    agent.update_steering(0.1, &mut world);
    assert!(agent.is_initialized());
    assert!(agent.fsm().is_started());
    assert_eq!(agent.frame(), 1);
}

#[test]
fn initialize_twice_is_harmless() {
    let mut world = MockWorld::default();
    let mut agent = AgentController::new(AgentConfig::default());
    agent.initialize(&mut world).unwrap();
    let slots = agent.blackboard().len();

    agent.initialize(&mut world).unwrap();
    assert_eq!(agent.blackboard().len(), slots);
}

#[test]
fn taken_slot_fails_initialization() {
    let mut world = MockWorld::default();
    let mut agent = AgentController::new(AgentConfig::default());
    agent
        .blackboard_mut()
        .add(keys::SAFE_POINT, Vec2::new(1.0, 1.0))
        .unwrap();

    assert_eq!(
        agent.initialize(&mut world),
        Err(BlackboardError::DuplicateKey { key: "SafePoint" })
    );
    assert!(!agent.is_initialized());
}

#[test]
fn inventory_always_has_every_slot() {
    let mut world = MockWorld::default();
    world.enemies.push(EnemyInfo {
        location: Vec2::new(3.0, 0.0),
        health: 2.0,
        hash: 9,
        ..EnemyInfo::default()
    });
    let mut agent = AgentController::new(AgentConfig::default());

    for _ in 0..20 {
        agent.update_steering(0.1, &mut world);
        let inventory = agent.blackboard().get_ref(keys::INVENTORY).unwrap();
        assert_eq!(inventory.slots().len(), INVENTORY_SLOTS);
    }
}

#[test]
fn installed_trace_log_records_transitions_and_waves() {
    let mut world = MockWorld::default();
    let mut agent = AgentController::new(AgentConfig::default());
    agent
        .blackboard_mut()
        .add(TRACE_LOG, TraceLog::default())
        .unwrap();
    agent.initialize(&mut world).unwrap();

    agent.update_steering(0.1, &mut world);
    world.enemies.push(EnemyInfo {
        location: Vec2::new(8.0, 0.0),
        health: 2.0,
        hash: 9,
        ..EnemyInfo::default()
    });
    agent.update_steering(0.1, &mut world);
    world.stats.difficulty = 2.0;
    agent.update_steering(0.1, &mut world);

    let log = agent.blackboard().get_ref(TRACE_LOG).unwrap();
    let transitions: Vec<_> = log.with_tag(TAG_TRANSITION).collect();
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].tick, 1);
    assert_eq!(transitions[0].a, ExplorationState::Roam.index());
    assert_eq!(transitions[0].b, ExplorationState::Escape.index());

    let waves: Vec<_> = log.with_tag(TAG_WAVE_RESET).collect();
    assert_eq!(waves.len(), 1);
    assert_eq!(waves[0].tick, 2);
}

#[test]
fn output_matches_the_blackboard_command() {
    let mut world = MockWorld::default();
    let mut agent = AgentController::new(AgentConfig::default());
    let out = agent.update_steering(0.1, &mut world);
    assert_eq!(agent.blackboard().get(keys::STEERING_OUTPUT).unwrap(), out);
}

#[test]
fn debug_shapes_follow_the_agent() {
    let mut world = MockWorld::at(Vec2::new(5.0, 5.0));
    let mut agent = AgentController::new(AgentConfig::default());
    agent.update_steering(0.1, &mut world);

    let shapes = agent.debug_shapes();
    assert!(shapes.iter().all(|s| match s {
        DebugShape::Direction { origin, .. } => *origin == Vec2::new(5.0, 5.0),
        _ => true,
    }));
    assert!(!shapes.is_empty());
}

#[test]
fn shutdown_hands_back_the_memory() {
    let mut world = MockWorld::default();
    let mut agent = AgentController::new(AgentConfig::default());
    agent.update_steering(0.1, &mut world);

    let bb = agent.shutdown();
    assert!(bb.contains(keys::FOUND_HOUSES));
    assert!(bb.contains(keys::INVENTORY));
}

#[test]
fn config_file_drives_the_controller() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "seed: 99\nexploration:\n  escape_duration: 1.5\ninventory:\n  pistol_range: 12.0"
    )
    .unwrap();

    let config = AgentConfig::load(file.path()).unwrap();
    assert_eq!(config.seed, 99);
    assert_eq!(config.inventory.pistol_range, 12.0);
    assert_eq!(config.inventory.shotgun_range, 5.0);

    let mut world = MockWorld::default();
    let mut agent = AgentController::new(config);
    agent.initialize(&mut world).unwrap();
    assert_eq!(
        agent.blackboard().get(keys::ESCAPE_TIMER).unwrap().threshold,
        1.5
    );
    assert_eq!(
        agent.blackboard().get(keys::INVENTORY_RULES).unwrap().pistol_range,
        12.0
    );
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AgentConfig::load_or_default(&dir.path().join("agent.yaml")).unwrap();
    assert_eq!(config, AgentConfig::default());
}

#[test]
fn broken_config_file_names_the_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed: [not a number").unwrap();

    let err = AgentConfig::load(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains(&file.path().display().to_string()));
}
