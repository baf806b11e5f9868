//! Transition guards and the exploration transition table.

use survivor_core::{wrap_angle, WorldMut};
use survivor_fsm::{FsmCondition, StateMachine};

use crate::context::FsmContext;
use crate::keys;
use crate::memory::InHousePath;
use crate::states::ExplorationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Guard {
    InDanger,
    IsSafe,
    SafePointReached,
    FoundUnexploredHouse,
    InsideHouse,
    PickableItemInSight,
    GotTargetItem,
    ExploredHouse,
    OutsideHouse,
    CheckedBehind,
    NeedToCheckBehind,
    ZoneInSight,
}

impl Guard {
    pub const ALL: [Guard; 12] = [
        Guard::InDanger,
        Guard::IsSafe,
        Guard::SafePointReached,
        Guard::FoundUnexploredHouse,
        Guard::InsideHouse,
        Guard::PickableItemInSight,
        Guard::GotTargetItem,
        Guard::ExploredHouse,
        Guard::OutsideHouse,
        Guard::CheckedBehind,
        Guard::NeedToCheckBehind,
        Guard::ZoneInSight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Guard::InDanger => "InDanger",
            Guard::IsSafe => "IsSafe",
            Guard::SafePointReached => "SafePointReached",
            Guard::FoundUnexploredHouse => "FoundUnexploredHouse",
            Guard::InsideHouse => "InsideHouse",
            Guard::PickableItemInSight => "PickableItemInSight",
            Guard::GotTargetItem => "GotTargetItem",
            Guard::ExploredHouse => "ExploredHouse",
            Guard::OutsideHouse => "OutsideHouse",
            Guard::CheckedBehind => "CheckedBehind",
            Guard::NeedToCheckBehind => "NeedToCheckBehind",
            Guard::ZoneInSight => "ZoneInSight",
        }
    }
}

impl<'a, W> FsmCondition<FsmContext<'a, W>> for Guard
where
    W: WorldMut,
{
    fn evaluate(self, ctx: &FsmContext<'a, W>) -> bool {
        let bb = &*ctx.blackboard;
        match self {
            Guard::InDanger => ctx.fov().num_enemies > 0,
            Guard::IsSafe => bb
                .get_ref(keys::ESCAPE_TIMER)
                .map(|t| t.expired())
                .unwrap_or(false),
            Guard::SafePointReached => match bb.get(keys::SAFE_POINT) {
                Ok(point) => ctx.agent().position.distance(point) < ctx.config.safe_point_radius,
                Err(_) => false,
            },
            Guard::FoundUnexploredHouse => {
                if ctx.fov().num_houses == 0 {
                    return false;
                }
                let (Ok(houses), Ok(found)) =
                    (bb.get_ref(keys::HOUSES), bb.get_ref(keys::FOUND_HOUSES))
                else {
                    return false;
                };
                houses.iter().any(|h| found.is_unexplored(h))
            }
            Guard::InsideHouse => match bb.get(keys::CURRENT_HOUSE) {
                Ok(Some(house)) => house.contains(ctx.agent().position),
                _ => false,
            },
            Guard::PickableItemInSight => {
                ctx.fov().num_items > 0
                    && bb
                        .get_ref(keys::INVENTORY)
                        .map(|inv| inv.has_space())
                        .unwrap_or(false)
            }
            Guard::GotTargetItem => {
                let (Ok(Some(target)), Ok(inventory)) =
                    (bb.get(keys::TARGET_ITEM), bb.get_ref(keys::INVENTORY))
                else {
                    return false;
                };
                inventory.contains_hash(target.hash)
            }
            Guard::ExploredHouse => {
                let Ok(Some(house)) = bb.get(keys::CURRENT_HOUSE) else {
                    return false;
                };
                let items_cleared = bb
                    .get_ref(keys::FOUND_HOUSES)
                    .ok()
                    .and_then(|found| found.get(&house))
                    .map(|record| record.known_items.is_empty())
                    .unwrap_or(false);
                items_cleared
                    && bb
                        .get_ref(keys::IN_HOUSE_PATH)
                        .map(InHousePath::is_complete)
                        .unwrap_or(false)
            }
            Guard::OutsideHouse => {
                // Nothing to leave.
                let Ok(Some(house)) = bb.get(keys::CURRENT_HOUSE) else {
                    return true;
                };
                match bb.get_ref(keys::FOUND_HOUSES).ok().and_then(|f| f.get(&house)) {
                    Some(record) => {
                        ctx.agent().position.distance(record.entrance) < ctx.config.entrance_radius
                    }
                    None => true,
                }
            }
            Guard::CheckedBehind => match bb.get(keys::CHECK_BEHIND_ORIENTATION) {
                Ok(target) => {
                    // One frame turns by `max_angular_speed * dt`, so a window of half a
                    // step on either side cannot be skipped.
                    let agent = ctx.agent();
                    let window = ctx
                        .config
                        .look_behind_tolerance
                        .max(agent.max_angular_speed * ctx.dt * 0.5);
                    wrap_angle(agent.orientation - target).abs() <= window
                }
                Err(_) => false,
            },
            Guard::NeedToCheckBehind => ctx.agent().bitten,
            Guard::ZoneInSight => ctx.fov().num_purge_zones > 0,
        }
    }
}

/// The exploration transition table, starting in [`ExplorationState::Roam`].
///
/// Guards of one state are listed in priority order.
pub fn exploration_machine() -> StateMachine<ExplorationState, Guard> {
    use ExplorationState::*;

    let mut fsm = StateMachine::new(Roam);
    fsm.add_transition(Roam, Escape, Guard::InDanger)
        .add_transition(Roam, LookBehind, Guard::NeedToCheckBehind)
        .add_transition(Roam, GetInsideUnexploredHouse, Guard::FoundUnexploredHouse)
        .add_transition(Roam, RunAwayFromZone, Guard::ZoneInSight);

    fsm.add_transition(Escape, SafeSeek, Guard::IsSafe)
        .add_transition(Escape, RunAwayFromZone, Guard::ZoneInSight)
        .add_transition(Escape, LeaveHouse, Guard::InsideHouse);

    fsm.add_transition(SafeSeek, Escape, Guard::InDanger)
        .add_transition(SafeSeek, Roam, Guard::SafePointReached)
        .add_transition(SafeSeek, RunAwayFromZone, Guard::ZoneInSight);

    fsm.add_transition(LookBehind, Escape, Guard::InDanger)
        .add_transition(LookBehind, Roam, Guard::CheckedBehind)
        .add_transition(LookBehind, RunAwayFromZone, Guard::ZoneInSight);

    fsm.add_transition(GetInsideUnexploredHouse, ExploreHouse, Guard::InsideHouse)
        .add_transition(GetInsideUnexploredHouse, LookBehind, Guard::NeedToCheckBehind)
        .add_transition(GetInsideUnexploredHouse, Escape, Guard::InDanger);

    fsm.add_transition(ExploreHouse, GetItem, Guard::PickableItemInSight)
        .add_transition(ExploreHouse, LeaveHouse, Guard::ExploredHouse)
        .add_transition(ExploreHouse, LookBehind, Guard::NeedToCheckBehind)
        .add_transition(ExploreHouse, LeaveHouse, Guard::InDanger)
        .add_transition(ExploreHouse, RunAwayFromZone, Guard::ZoneInSight);

    fsm.add_transition(GetItem, ExploreHouse, Guard::GotTargetItem);

    fsm.add_transition(LeaveHouse, Roam, Guard::OutsideHouse)
        .add_transition(LeaveHouse, RunAwayFromZone, Guard::ZoneInSight);

    fsm.add_transition(RunAwayFromZone, Roam, Guard::SafePointReached);

    fsm
}
