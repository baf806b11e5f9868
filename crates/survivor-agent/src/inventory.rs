//! Inventory triage tree: shoot, heal and eat as side effects, every frame.
//!
//! Each leaf acts when its rule holds and succeeds either way, so the root sequence always runs
//! all three. Order only decides which effect happens first.

use survivor_bt::{Action, BtNode, BtStatus, Sequence};
use survivor_core::{angle_between, AgentInfo, Blackboard, ItemType, TickContext, WorldMut};

use crate::config::InventoryConfig;
use crate::keys;
use crate::memory::Inventory;
use crate::states::closest_enemy;
use crate::trace::{self, TraceEvent, TAG_ITEM_USED};

/// `Sequence(check_shooting, check_healing, check_food)`.
pub fn inventory_tree<W>() -> Sequence<W>
where
    W: WorldMut + 'static,
{
    let leaves: Vec<Box<dyn BtNode<W>>> = vec![
        Box::new(Action::new(check_shooting::<W>)),
        Box::new(Action::new(check_healing::<W>)),
        Box::new(Action::new(check_food::<W>)),
    ];
    Sequence::new(leaves)
}

fn rules(blackboard: &Blackboard) -> InventoryConfig {
    blackboard.get(keys::INVENTORY_RULES).unwrap_or_default()
}

/// Fire at the closest visible enemy when it sits inside a held weapon's range and cone.
/// The shotgun is tried before the pistol.
pub fn check_shooting<W: WorldMut>(
    ctx: &TickContext,
    world: &mut W,
    blackboard: &mut Blackboard,
) -> BtStatus {
    let rules = rules(blackboard);
    let (Ok(agent), Ok(enemies)) = (
        blackboard.get(keys::AGENT_INFO),
        blackboard.get_ref(keys::ENEMIES),
    ) else {
        return BtStatus::Success;
    };
    let Some(enemy) = closest_enemy(agent.position, enemies).copied() else {
        return BtStatus::Success;
    };
    if enemy.health <= 0.0 {
        return BtStatus::Success;
    }

    let to_enemy = enemy.location - agent.position;
    let distance = to_enemy.length();
    let angle = angle_between(agent.facing(), to_enemy).abs().to_degrees();

    let Ok(inventory) = blackboard.get_mut(keys::INVENTORY) else {
        return BtStatus::Success;
    };
    let weapon = [
        (ItemType::Shotgun, rules.shotgun_range, rules.shotgun_angle),
        (ItemType::Pistol, rules.pistol_range, rules.pistol_angle),
    ]
    .into_iter()
    .filter(|&(_, range, cone)| distance < range && angle < cone)
    .find_map(|(kind, _, _)| inventory.find(kind));

    if let Some(slot) = weapon {
        fire(world, inventory, slot);
        tracing::debug!(slot, distance, angle, enemy = enemy.hash, "fired at enemy");
        trace::emit(
            blackboard,
            TraceEvent::new(ctx.tick, TAG_ITEM_USED).with_a(slot as u64),
        );
    }
    BtStatus::Success
}

/// Use one round from `slot`; an empty weapon is thrown away.
fn fire<W: WorldMut>(world: &mut W, inventory: &mut Inventory, slot: usize) {
    world.use_inventory_slot(slot);
    let Some(weapon) = inventory.slot_mut(slot) else {
        return;
    };
    weapon.value -= 1;
    if weapon.value <= 0 {
        world.remove_inventory_slot(slot);
        inventory.clear(slot);
    }
}

/// Use a medkit when hurt, unless it would mostly go to waste.
pub fn check_healing<W: WorldMut>(
    ctx: &TickContext,
    world: &mut W,
    blackboard: &mut Blackboard,
) -> BtStatus {
    let rules = rules(blackboard);
    consume_if(ctx, world, blackboard, ItemType::Medkit, |agent, value| {
        agent.health < rules.health_threshold && rules.stat_ceiling - agent.energy > value
    });
    BtStatus::Success
}

/// Eat when hungry, unless the food would overfill.
pub fn check_food<W: WorldMut>(
    ctx: &TickContext,
    world: &mut W,
    blackboard: &mut Blackboard,
) -> BtStatus {
    let rules = rules(blackboard);
    consume_if(ctx, world, blackboard, ItemType::Food, |agent, value| {
        agent.energy < rules.energy_threshold && rules.stat_ceiling - agent.energy > value
    });
    BtStatus::Success
}

/// Use and discard the first held item of `kind` when `should_use(agent, item.value)` holds.
fn consume_if<W, F>(
    ctx: &TickContext,
    world: &mut W,
    blackboard: &mut Blackboard,
    kind: ItemType,
    should_use: F,
) where
    W: WorldMut,
    F: FnOnce(&AgentInfo, f32) -> bool,
{
    let Ok(agent) = blackboard.get(keys::AGENT_INFO) else {
        return;
    };
    let Ok(inventory) = blackboard.get_mut(keys::INVENTORY) else {
        return;
    };
    let Some(slot) = inventory.find(kind) else {
        return;
    };
    let value = inventory.slots()[slot].value;
    if !should_use(&agent, value as f32) {
        return;
    }

    world.use_inventory_slot(slot);
    world.remove_inventory_slot(slot);
    inventory.clear(slot);
    tracing::debug!(slot, item = ?kind, value, "consumed item");
    trace::emit(
        blackboard,
        TraceEvent::new(ctx.tick, TAG_ITEM_USED).with_a(slot as u64),
    );
}
