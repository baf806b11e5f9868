//! Exploration states: what the agent does while in each mode, and what entering or leaving a
//! mode changes in its memory.

use core::f32::consts::PI;

use survivor_core::{wrap_angle, EnemyInfo, HouseInfo, ItemInfo, Vec2, WorldMut};
use survivor_fsm::FsmState;
use survivor_steering::{SteeringKind, TargetData};

use crate::context::FsmContext;
use crate::keys;
use crate::memory::InHousePath;
use crate::trace::{self, TraceEvent, TAG_ITEM_PICKED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExplorationState {
    Roam,
    Escape,
    SafeSeek,
    LookBehind,
    GetInsideUnexploredHouse,
    ExploreHouse,
    GetItem,
    LeaveHouse,
    RunAwayFromZone,
}

impl ExplorationState {
    pub const ALL: [ExplorationState; 9] = [
        ExplorationState::Roam,
        ExplorationState::Escape,
        ExplorationState::SafeSeek,
        ExplorationState::LookBehind,
        ExplorationState::GetInsideUnexploredHouse,
        ExplorationState::ExploreHouse,
        ExplorationState::GetItem,
        ExplorationState::LeaveHouse,
        ExplorationState::RunAwayFromZone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExplorationState::Roam => "Roam",
            ExplorationState::Escape => "Escape",
            ExplorationState::SafeSeek => "SafeSeek",
            ExplorationState::LookBehind => "LookBehind",
            ExplorationState::GetInsideUnexploredHouse => "GetInsideUnexploredHouse",
            ExplorationState::ExploreHouse => "ExploreHouse",
            ExplorationState::GetItem => "GetItem",
            ExplorationState::LeaveHouse => "LeaveHouse",
            ExplorationState::RunAwayFromZone => "RunAwayFromZone",
        }
    }

    /// Stable index, used as a trace payload.
    pub fn index(self) -> u64 {
        self as u64
    }
}

impl<'a, W> FsmState<FsmContext<'a, W>> for ExplorationState
where
    W: WorldMut,
{
    fn on_enter(self, ctx: &mut FsmContext<'a, W>) {
        tracing::info!(state = self.name(), tick = ctx.tick, "entering state");
        match self {
            ExplorationState::Roam => ctx.set_run_mode(false),
            ExplorationState::Escape => ctx.set_run_mode(true),
            ExplorationState::SafeSeek => enter_safe_seek(ctx),
            ExplorationState::LookBehind => enter_look_behind(ctx),
            ExplorationState::GetInsideUnexploredHouse => enter_get_inside(ctx),
            ExplorationState::ExploreHouse => enter_explore_house(ctx),
            ExplorationState::GetItem => enter_get_item(ctx),
            ExplorationState::LeaveHouse => ctx.set_run_mode(false),
            ExplorationState::RunAwayFromZone => enter_run_away_from_zone(ctx),
        }
    }

    fn update(self, ctx: &mut FsmContext<'a, W>) {
        match self {
            ExplorationState::Roam => ctx.steer(SteeringKind::Wander, TargetData::default()),
            ExplorationState::Escape => update_escape(ctx),
            ExplorationState::SafeSeek | ExplorationState::RunAwayFromZone => {
                let safe_point = ctx.blackboard.get(keys::SAFE_POINT).unwrap_or_default();
                ctx.steer(SteeringKind::Seek, TargetData::at(safe_point));
            }
            ExplorationState::LookBehind => {
                let max_turn = ctx.agent().max_angular_speed;
                if let Some(out) = ctx.output_mut() {
                    out.angular_velocity = -max_turn;
                }
            }
            ExplorationState::GetInsideUnexploredHouse => update_get_inside(ctx),
            ExplorationState::ExploreHouse => update_explore_house(ctx),
            ExplorationState::GetItem => update_get_item(ctx),
            ExplorationState::LeaveHouse => update_leave_house(ctx),
        }
    }

    fn on_exit(self, ctx: &mut FsmContext<'a, W>) {
        match self {
            ExplorationState::Escape => {
                if let Ok(timer) = ctx.blackboard.get_mut(keys::ESCAPE_TIMER) {
                    timer.reset();
                }
            }
            ExplorationState::GetItem => exit_get_item(ctx),
            ExplorationState::LeaveHouse => exit_leave_house(ctx),
            _ => {}
        }
    }
}

pub(crate) fn closest_enemy(position: Vec2, enemies: &[EnemyInfo]) -> Option<&EnemyInfo> {
    enemies.iter().min_by(|a, b| {
        position
            .distance_squared(a.location)
            .total_cmp(&position.distance_squared(b.location))
    })
}

fn current_house<W: WorldMut>(ctx: &FsmContext<'_, W>) -> Option<HouseInfo> {
    ctx.blackboard.get(keys::CURRENT_HOUSE).ok().flatten()
}

/// Remember every visible item as belonging to the house being worked on.
fn remember_visible_items<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    let items = ctx.blackboard.get(keys::ITEMS).unwrap_or_default();
    if items.is_empty() {
        return;
    }
    let Some(house) = current_house(ctx) else {
        return;
    };
    if let Ok(found) = ctx.blackboard.get_mut(keys::FOUND_HOUSES) {
        found.remember_items(&house, &items);
    }
}

fn update_escape<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    let dt = ctx.dt;
    let enemies = ctx.blackboard.get(keys::ENEMIES).unwrap_or_default();

    if ctx.fov().num_enemies == 0 {
        let just_lost_sight = match ctx.blackboard.get_mut(keys::ESCAPE_TIMER) {
            Ok(timer) => {
                let first = timer.elapsed == 0.0;
                timer.elapsed += dt;
                first
            }
            Err(_) => false,
        };
        // Keep running the way we were going, without turning.
        if just_lost_sight {
            if let Some(out) = ctx.output_mut() {
                out.angular_velocity = 0.0;
                out.auto_orient = false;
            }
        }
        return;
    }

    let agent = ctx.agent();
    if let Some(enemy) = closest_enemy(agent.position, &enemies) {
        ctx.steer(
            SteeringKind::Flee,
            TargetData::moving(enemy.location, enemy.linear_velocity),
        );
    }
    if let Ok(timer) = ctx.blackboard.get_mut(keys::ESCAPE_TIMER) {
        timer.reset();
    }
}

fn enter_safe_seek<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    ctx.set_run_mode(false);

    let agent = ctx.agent();
    let mut heading = agent.linear_velocity.normalized();
    if heading == Vec2::ZERO {
        heading = agent.facing();
    }
    let safe_point = ctx
        .world
        .nearest_point(agent.position + heading * ctx.config.safe_seek_distance);
    let _ = ctx.blackboard.change(keys::SAFE_POINT, safe_point);
}

fn enter_look_behind<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    let agent = ctx.agent();
    if let Some(out) = ctx.output_mut() {
        out.run_mode = false;
        out.auto_orient = false;
    }
    let behind = wrap_angle(agent.orientation + PI);
    let _ = ctx.blackboard.change(keys::CHECK_BEHIND_ORIENTATION, behind);
}

fn enter_get_inside<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    ctx.set_run_mode(false);

    let position = ctx.agent().position;
    let houses = ctx.blackboard.get(keys::HOUSES).unwrap_or_default();
    let Ok(found) = ctx.blackboard.get_mut(keys::FOUND_HOUSES) else {
        return;
    };

    // Every visible house is registered before one of them becomes current.
    let mut selected = None;
    for house in houses {
        if found.register(house, position) && selected.is_none() {
            selected = Some(house);
        }
    }

    if let Some(house) = selected {
        let _ = ctx.blackboard.change(keys::CURRENT_HOUSE, Some(house));
    }
}

fn update_get_inside<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    if let Some(house) = current_house(ctx) {
        ctx.steer(SteeringKind::Seek, TargetData::at(house.center));
    }
    remember_visible_items(ctx);
}

fn enter_explore_house<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    ctx.set_run_mode(false);

    let Some(house) = current_house(ctx) else {
        tracing::warn!("exploring without a current house");
        return;
    };
    let path = InHousePath::around(&house, ctx.config.tour_inset);
    let _ = ctx.blackboard.change(keys::IN_HOUSE_PATH, path);
}

fn update_explore_house<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    let agent = ctx.agent();
    let reach = ctx.config.tour_point_radius;

    let next = match ctx.blackboard.get_mut(keys::IN_HOUSE_PATH) {
        Ok(path) => path.next_unvisited_mut().map(|point| {
            if agent.position.distance(point.position) < reach {
                point.visited = true;
            }
            point.position
        }),
        Err(_) => None,
    };

    if let Some(point) = next {
        ctx.steer(SteeringKind::Seek, TargetData::at(point));
    }
}

fn enter_get_item<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    ctx.set_run_mode(false);

    let items = ctx.blackboard.get(keys::ITEMS).unwrap_or_default();
    if let Some(first) = items.first() {
        let _ = ctx.blackboard.change(keys::TARGET_ITEM, Some(*first));
    }
    remember_visible_items(ctx);
}

fn update_get_item<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    let target: Option<ItemInfo> = ctx.blackboard.get(keys::TARGET_ITEM).ok().flatten();
    if let Some(target) = target {
        ctx.steer(SteeringKind::Seek, TargetData::at(target.location));

        let agent = ctx.agent();
        if agent.position.distance(target.location) <= agent.grab_range {
            pick_up(ctx, target);
        }
    }
    remember_visible_items(ctx);
}

/// Grab a reachable target into the first free slot, or destroy it if it is garbage.
///
/// Garbage still leaves its record (same hash) in the free slot: the slot stays empty, but the
/// "got target item" guard can see the job is done.
fn pick_up<W: WorldMut>(ctx: &mut FsmContext<'_, W>, target: ItemInfo) {
    let Ok(inventory) = ctx.blackboard.get_mut(keys::INVENTORY) else {
        return;
    };
    let Some(slot) = inventory.first_empty() else {
        tracing::warn!(hash = target.hash, "no free inventory slot for target item");
        return;
    };

    if target.is_garbage() {
        ctx.world.destroy_item(&target);
        inventory.set(slot, target);
        return;
    }

    if ctx.world.grab_item(&target) {
        ctx.world.add_inventory_slot(slot, target);
        inventory.set(slot, target);
        tracing::debug!(slot, item = ?target.item_type, hash = target.hash, "picked up item");
        trace::emit(
            ctx.blackboard,
            TraceEvent::new(ctx.tick, TAG_ITEM_PICKED)
                .with_a(slot as u64)
                .with_b(target.hash as u32 as u64),
        );
    }
}

fn exit_get_item<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    let target = ctx.blackboard.get(keys::TARGET_ITEM).ok().flatten();
    if let (Some(target), Some(house)) = (target, current_house(ctx)) {
        if let Ok(found) = ctx.blackboard.get_mut(keys::FOUND_HOUSES) {
            if let Some(record) = found.get_mut(&house) {
                record.known_items.remove(&target);
            }
        }
    }
    let _ = ctx.blackboard.change(keys::TARGET_ITEM, None);
}

fn update_leave_house<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    let entrance = current_house(ctx).and_then(|house| {
        ctx.blackboard
            .get_ref(keys::FOUND_HOUSES)
            .ok()
            .and_then(|found| found.get(&house))
            .map(|record| record.entrance)
    });
    if let Some(entrance) = entrance {
        ctx.steer(SteeringKind::Seek, TargetData::at(entrance));
    }
}

fn exit_leave_house<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    let tour_done = ctx
        .blackboard
        .get_ref(keys::IN_HOUSE_PATH)
        .map(InHousePath::is_complete)
        .unwrap_or(false);

    if let Some(house) = current_house(ctx) {
        if let Ok(found) = ctx.blackboard.get_mut(keys::FOUND_HOUSES) {
            if let Some(record) = found.get_mut(&house) {
                if record.known_items.is_empty() && tour_done {
                    record.explored = true;
                    tracing::info!(x = house.center.x, y = house.center.y, "house explored");
                }
            }
        }
    }

    // The tour belonged to the house we just left.
    if let Ok(path) = ctx.blackboard.get_mut(keys::IN_HOUSE_PATH) {
        path.mark_all(false);
    }
    let _ = ctx.blackboard.change(keys::CURRENT_HOUSE, None);
}

fn enter_run_away_from_zone<W: WorldMut>(ctx: &mut FsmContext<'_, W>) {
    ctx.set_run_mode(true);

    let zones = ctx.blackboard.get(keys::PURGE_ZONES).unwrap_or_default();
    let Some(zone) = zones.first() else {
        tracing::warn!("purge zone vanished before a safe point could be chosen");
        return;
    };
    let safe_point = ctx
        .world
        .nearest_point(zone_escape_point(zone.center, zone.radius, ctx.config.zone_margin));
    let _ = ctx.blackboard.change(keys::SAFE_POINT, safe_point);
}

/// Point `radius + margin` past the zone edge along each axis, on the side of the world origin.
pub fn zone_escape_point(center: Vec2, radius: f32, margin: f32) -> Vec2 {
    let step = radius + margin;
    let toward_origin = |c: f32| if c > 0.0 { c - step } else { c + step };
    Vec2::new(toward_origin(center.x), toward_origin(center.y))
}
