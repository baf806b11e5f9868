mod support;

use support::MockWorld;
use survivor_agent::{
    check_food, check_healing, check_shooting, inventory_tree, keys, InventoryConfig, Inventory,
};
use survivor_bt::{BehaviorTree, BtStatus};
use survivor_core::{
    AgentInfo, Blackboard, EnemyInfo, ItemInfo, ItemType, TickContext, Vec2, INVENTORY_SLOTS,
};

fn blackboard(agent: AgentInfo, enemies: Vec<EnemyInfo>, held: &[ItemInfo]) -> Blackboard {
    let mut inventory = Inventory::default();
    for (slot, item) in held.iter().enumerate() {
        inventory.set(slot, *item);
    }
    let mut bb = Blackboard::new();
    bb.add(keys::AGENT_INFO, agent).unwrap();
    bb.add(keys::ENEMIES, enemies).unwrap();
    bb.add(keys::INVENTORY, inventory).unwrap();
    bb.add(keys::INVENTORY_RULES, InventoryConfig::default()).unwrap();
    bb
}

fn agent(health: f32, energy: f32) -> AgentInfo {
    AgentInfo {
        health,
        energy,
        ..AgentInfo::default()
    }
}

fn enemy_at(location: Vec2) -> EnemyInfo {
    EnemyInfo {
        location,
        hash: 100,
        health: 3.0,
        ..EnemyInfo::default()
    }
}

fn tick() -> TickContext {
    TickContext::new(0, 0.1, 1)
}

#[test]
fn medkit_is_kept_when_energy_is_nearly_full() {
    let medkit = ItemInfo::new(ItemType::Medkit, Vec2::ZERO, 1, 3);
    let mut bb = blackboard(agent(5.0, 9.0), Vec::new(), &[medkit]);
    let mut world = MockWorld::default();

    assert_eq!(check_healing(&tick(), &mut world, &mut bb), BtStatus::Success);
    assert!(world.used.is_empty());
    assert_eq!(bb.get_ref(keys::INVENTORY).unwrap().slots()[0], medkit);
}

#[test]
fn medkit_is_used_and_discarded_when_worthwhile() {
    let medkit = ItemInfo::new(ItemType::Medkit, Vec2::ZERO, 1, 3);
    let mut bb = blackboard(agent(5.0, 5.0), Vec::new(), &[medkit]);
    let mut world = MockWorld::default();

    assert_eq!(check_healing(&tick(), &mut world, &mut bb), BtStatus::Success);
    assert_eq!(world.used, vec![0]);
    assert_eq!(world.removed, vec![0]);
    assert!(bb.get_ref(keys::INVENTORY).unwrap().slots()[0].is_garbage());
}

#[test]
fn healthy_agent_keeps_its_medkit() {
    let medkit = ItemInfo::new(ItemType::Medkit, Vec2::ZERO, 1, 3);
    let mut bb = blackboard(agent(9.0, 2.0), Vec::new(), &[medkit]);
    let mut world = MockWorld::default();

    check_healing(&tick(), &mut world, &mut bb);
    assert!(world.used.is_empty());
}

#[test]
fn food_is_eaten_only_when_hungry_enough() {
    let food = ItemInfo::new(ItemType::Food, Vec2::ZERO, 4, 2);
    let mut world = MockWorld::default();

    let mut bb = blackboard(agent(10.0, 8.5), Vec::new(), &[food]);
    check_food(&tick(), &mut world, &mut bb);
    assert!(world.used.is_empty());

    let mut bb = blackboard(agent(10.0, 3.0), Vec::new(), &[food]);
    check_food(&tick(), &mut world, &mut bb);
    assert_eq!(world.used, vec![0]);
    assert_eq!(bb.get_ref(keys::INVENTORY).unwrap().empty_count(), INVENTORY_SLOTS);
}

#[test]
fn no_enemy_in_sight_means_no_shot() {
    let pistol = ItemInfo::new(ItemType::Pistol, Vec2::ZERO, 2, 1);
    let mut bb = blackboard(agent(10.0, 10.0), Vec::new(), &[pistol]);
    let mut world = MockWorld::default();

    assert_eq!(check_shooting(&tick(), &mut world, &mut bb), BtStatus::Success);
    assert!(world.used.is_empty());
    assert_eq!(bb.get_ref(keys::INVENTORY).unwrap().slots()[0].value, 1);
}

#[test]
fn shotgun_is_preferred_at_close_range() {
    let pistol = ItemInfo::new(ItemType::Pistol, Vec2::ZERO, 2, 5);
    let shotgun = ItemInfo::new(ItemType::Shotgun, Vec2::ZERO, 3, 5);
    let mut bb = blackboard(
        agent(10.0, 10.0),
        vec![enemy_at(Vec2::new(3.0, 0.5))],
        &[pistol, shotgun],
    );
    let mut world = MockWorld::default();

    check_shooting(&tick(), &mut world, &mut bb);
    assert_eq!(world.used, vec![1]);
    let inventory = bb.get_ref(keys::INVENTORY).unwrap();
    assert_eq!(inventory.slots()[1].value, 4);
    assert_eq!(inventory.slots()[0].value, 5);
}

#[test]
fn pistol_covers_the_longer_narrower_cone() {
    let pistol = ItemInfo::new(ItemType::Pistol, Vec2::ZERO, 2, 5);
    let shotgun = ItemInfo::new(ItemType::Shotgun, Vec2::ZERO, 3, 5);
    let mut bb = blackboard(
        agent(10.0, 10.0),
        vec![enemy_at(Vec2::new(6.0, 0.0))],
        &[pistol, shotgun],
    );
    let mut world = MockWorld::default();

    check_shooting(&tick(), &mut world, &mut bb);
    assert_eq!(world.used, vec![0]);
}

#[test]
fn enemy_outside_every_cone_is_ignored() {
    let pistol = ItemInfo::new(ItemType::Pistol, Vec2::ZERO, 2, 5);
    let mut bb = blackboard(
        agent(10.0, 10.0),
        vec![enemy_at(Vec2::new(0.0, 4.0))],
        &[pistol],
    );
    let mut world = MockWorld::default();

    check_shooting(&tick(), &mut world, &mut bb);
    assert!(world.used.is_empty());
}

#[test]
fn last_round_throws_the_weapon_away() {
    let pistol = ItemInfo::new(ItemType::Pistol, Vec2::ZERO, 2, 1);
    let mut bb = blackboard(
        agent(10.0, 10.0),
        vec![enemy_at(Vec2::new(4.0, 0.0))],
        &[pistol],
    );
    let mut world = MockWorld::default();

    check_shooting(&tick(), &mut world, &mut bb);
    assert_eq!(world.used, vec![0]);
    assert_eq!(world.removed, vec![0]);
    assert!(bb.get_ref(keys::INVENTORY).unwrap().slots()[0].is_garbage());
}

#[test]
fn dead_enemies_are_not_shot() {
    let shotgun = ItemInfo::new(ItemType::Shotgun, Vec2::ZERO, 3, 5);
    let mut corpse = enemy_at(Vec2::new(2.0, 0.0));
    corpse.health = 0.0;
    let mut bb = blackboard(agent(10.0, 10.0), vec![corpse], &[shotgun]);
    let mut world = MockWorld::default();

    check_shooting(&tick(), &mut world, &mut bb);
    assert!(world.used.is_empty());
}

#[test]
fn tree_runs_every_leaf_and_succeeds() {
    let shotgun = ItemInfo::new(ItemType::Shotgun, Vec2::ZERO, 3, 5);
    let medkit = ItemInfo::new(ItemType::Medkit, Vec2::ZERO, 1, 3);
    let food = ItemInfo::new(ItemType::Food, Vec2::ZERO, 4, 2);
    let mut bb = blackboard(
        agent(4.0, 4.0),
        vec![enemy_at(Vec2::new(2.0, 0.0))],
        &[shotgun, medkit, food],
    );
    let mut world = MockWorld::default();
    let mut tree = BehaviorTree::new(Box::new(inventory_tree::<MockWorld>()));

    assert_eq!(tree.tick(&tick(), &mut world, &mut bb), BtStatus::Success);
    assert_eq!(world.used, vec![0, 1, 2]);
    assert_eq!(world.removed, vec![1, 2]);
}

#[test]
fn missing_slots_do_not_stop_the_tree() {
    let mut bb = Blackboard::new();
    let mut world = MockWorld::default();
    let mut tree = BehaviorTree::new(Box::new(inventory_tree::<MockWorld>()));

    assert_eq!(tree.tick(&tick(), &mut world, &mut bb), BtStatus::Success);
    assert!(world.used.is_empty());
}
