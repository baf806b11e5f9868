//! The per-frame driver: refresh the blackboard from the host, tick the exploration FSM, tick
//! the inventory tree, hand back the steering command.

use survivor_bt::BehaviorTree;
use survivor_core::{
    Blackboard, BlackboardError, SteeringOutput, TickContext, Vec2, WorldMut,
};
use survivor_fsm::StateMachine;
use survivor_steering::SteeringSet;

use crate::conditions::{exploration_machine, Guard};
use crate::config::AgentConfig;
use crate::context::FsmContext;
use crate::debug::{self, DebugShape};
use crate::inventory::inventory_tree;
use crate::keys;
use crate::memory::{EscapeTimer, FoundHouses, InHousePath, Inventory};
use crate::states::ExplorationState;
use crate::trace::{self, TraceEvent, TAG_TRANSITION, TAG_WAVE_RESET};

pub struct AgentController<W>
where
    W: WorldMut + 'static,
{
    config: AgentConfig,
    blackboard: Blackboard,
    steering: SteeringSet,
    fsm: StateMachine<ExplorationState, Guard>,
    tree: BehaviorTree<W>,
    frame: u64,
    initialized: bool,
    last_difficulty: f32,
}

impl<W> AgentController<W>
where
    W: WorldMut + 'static,
{
    pub fn new(config: AgentConfig) -> Self {
        let steering = config.steering.build(config.seed);
        Self {
            config,
            blackboard: Blackboard::new(),
            steering,
            fsm: exploration_machine(),
            tree: BehaviorTree::new(Box::new(inventory_tree::<W>())),
            frame: 0,
            initialized: false,
            last_difficulty: 0.0,
        }
    }

    /// Seed the blackboard with this frame's snapshot and fresh memory, then enter the start state.
    ///
    /// Fails if a slot the controller owns is already taken; slots added beforehand through
    /// [`AgentController::blackboard_mut`] under other names (such as a trace log) are kept.
    pub fn initialize(&mut self, world: &mut W) -> Result<(), BlackboardError> {
        if self.initialized {
            tracing::warn!("agent already initialized");
            return Ok(());
        }

        let bb = &mut self.blackboard;
        bb.add(keys::AGENT_INFO, world.agent_info())?;
        bb.add(keys::HOUSES, world.houses_in_fov())?;
        bb.add(keys::ENEMIES, world.enemies_in_fov())?;
        bb.add(keys::ITEMS, world.items_in_fov())?;
        bb.add(keys::PURGE_ZONES, world.purge_zones_in_fov())?;
        bb.add(keys::FOV_STATS, world.fov_stats())?;
        bb.add(keys::WORLD_STATS, world.world_stats())?;
        bb.add(keys::WORLD_INFO, world.world_info())?;

        bb.add(keys::STEERING_OUTPUT, SteeringOutput::default())?;

        bb.add(
            keys::ESCAPE_TIMER,
            EscapeTimer::new(self.config.exploration.escape_duration),
        )?;
        bb.add(keys::SAFE_POINT, Vec2::ZERO)?;
        bb.add(keys::CHECK_BEHIND_ORIENTATION, 0.0)?;
        bb.add(keys::FOUND_HOUSES, FoundHouses::default())?;
        bb.add(keys::CURRENT_HOUSE, None)?;
        bb.add(keys::IN_HOUSE_PATH, InHousePath::default())?;
        bb.add(keys::TARGET_ITEM, None)?;

        bb.add(keys::INVENTORY, Inventory::default())?;
        bb.add(keys::INVENTORY_RULES, self.config.inventory)?;

        self.last_difficulty = world.world_stats().difficulty;
        self.initialized = true;

        let mut ctx = FsmContext {
            tick: self.frame,
            dt: 0.0,
            world,
            blackboard: &mut self.blackboard,
            steering: &mut self.steering,
            config: &self.config.exploration,
        };
        self.fsm.start(&mut ctx);

        tracing::info!(
            seed = self.config.seed,
            difficulty = self.last_difficulty,
            state = self.fsm.current().name(),
            "Agent initialized"
        );
        Ok(())
    }

    /// Run one frame and return the command for the host.
    pub fn update_steering(&mut self, dt: f32, world: &mut W) -> SteeringOutput {
        if !self.initialized {
            if let Err(err) = self.initialize(world) {
                tracing::error!(error = %err, "agent initialization failed");
            }
        }

        self.refresh(world);

        let taken = {
            let mut ctx = FsmContext {
                tick: self.frame,
                dt,
                world: &mut *world,
                blackboard: &mut self.blackboard,
                steering: &mut self.steering,
                config: &self.config.exploration,
            };
            self.fsm.tick(&mut ctx)
        };
        if let Some(t) = taken {
            tracing::info!(
                frame = self.frame,
                from = t.from.name(),
                to = t.to.name(),
                guard = t.guard.name(),
                "State transition"
            );
            trace::emit(
                &mut self.blackboard,
                TraceEvent::new(self.frame, TAG_TRANSITION)
                    .with_a(t.from.index())
                    .with_b(t.to.index()),
            );
        }

        let tick = TickContext::new(self.frame, dt, self.config.seed);
        self.tree.tick(&tick, world, &mut self.blackboard);

        self.frame += 1;
        self.blackboard
            .get(keys::STEERING_OUTPUT)
            .unwrap_or_default()
    }

    /// Overwrite every per-frame slot, and forget explored houses when a new wave starts.
    fn refresh(&mut self, world: &W) {
        let stats = world.world_stats();
        if stats.difficulty > self.last_difficulty {
            if let Ok(found) = self.blackboard.get_mut(keys::FOUND_HOUSES) {
                found.reset_explored();
            }
            tracing::info!(
                frame = self.frame,
                from = self.last_difficulty,
                to = stats.difficulty,
                "New wave, houses need exploring again"
            );
            trace::emit(
                &mut self.blackboard,
                TraceEvent::new(self.frame, TAG_WAVE_RESET),
            );
            self.last_difficulty = stats.difficulty;
        }

        let bb = &mut self.blackboard;
        let refreshed = [
            bb.change(keys::AGENT_INFO, world.agent_info()),
            bb.change(keys::HOUSES, world.houses_in_fov()),
            bb.change(keys::ENEMIES, world.enemies_in_fov()),
            bb.change(keys::ITEMS, world.items_in_fov()),
            bb.change(keys::PURGE_ZONES, world.purge_zones_in_fov()),
            bb.change(keys::FOV_STATS, world.fov_stats()),
            bb.change(keys::WORLD_STATS, stats),
            bb.change(keys::WORLD_INFO, world.world_info()),
        ];
        for err in refreshed.into_iter().filter_map(Result::err) {
            tracing::warn!(
                frame = self.frame,
                error = %err,
                "Per-frame refresh failed, keeping stale data"
            );
        }
    }

    pub fn current_state(&self) -> ExplorationState {
        self.fsm.current()
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Frames run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn fsm(&self) -> &StateMachine<ExplorationState, Guard> {
        &self.fsm
    }

    pub fn debug_shapes(&self) -> Vec<DebugShape> {
        debug::debug_shapes(self.fsm.current(), &self.blackboard)
    }

    /// Release the agent. Returns the blackboard for post-mortem inspection.
    pub fn shutdown(self) -> Blackboard {
        let houses = self
            .blackboard
            .get_ref(keys::FOUND_HOUSES)
            .map(FoundHouses::len)
            .unwrap_or(0);
        tracing::info!(
            frames = self.frame,
            houses,
            state = self.fsm.current().name(),
            "Agent shut down"
        );
        self.blackboard
    }
}
