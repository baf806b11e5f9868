use survivor_core::{AgentInfo, Blackboard, FovStats, SteeringOutput, WorldMut};
use survivor_steering::{SteeringKind, SteeringSet, TargetData};

use crate::config::ExplorationConfig;
use crate::keys;

/// Everything an exploration state or guard may touch during one frame.
pub struct FsmContext<'a, W> {
    pub tick: u64,
    pub dt: f32,
    pub world: &'a mut W,
    pub blackboard: &'a mut Blackboard,
    pub steering: &'a mut SteeringSet,
    pub config: &'a ExplorationConfig,
}

impl<W> FsmContext<'_, W>
where
    W: WorldMut,
{
    /// This frame's agent snapshot; a default snapshot if the slot is unusable.
    pub fn agent(&self) -> AgentInfo {
        self.blackboard.get(keys::AGENT_INFO).unwrap_or_default()
    }

    pub fn fov(&self) -> FovStats {
        self.blackboard.get(keys::FOV_STATS).unwrap_or_default()
    }

    pub fn output_mut(&mut self) -> Option<&mut SteeringOutput> {
        self.blackboard.get_mut(keys::STEERING_OUTPUT).ok()
    }

    pub fn set_run_mode(&mut self, run: bool) {
        if let Some(out) = self.output_mut() {
            out.run_mode = run;
        }
    }

    /// Run a steering behaviour and copy its movement into the frame's output. Run mode is
    /// owned by the states and left untouched.
    pub fn steer(&mut self, kind: SteeringKind, target: TargetData) {
        let agent = self.agent();
        let computed = self
            .steering
            .calculate(kind, self.dt, &agent, &target, &*self.world);
        if let Some(out) = self.output_mut() {
            out.linear_velocity = computed.linear_velocity;
            out.angular_velocity = computed.angular_velocity;
            out.auto_orient = computed.auto_orient;
        }
    }
}
