use survivor_core::{AgentInfo, NavProjection, SteeringOutput};

use crate::behavior::{SteeringBehavior, TargetData};
use crate::behaviors::{Arrive, Evade, Flee, Pursuit, Seek, Wander};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SteeringKind {
    Seek,
    Flee,
    Arrive,
    Pursuit,
    Evade,
    Wander,
}

impl SteeringKind {
    pub const ALL: [SteeringKind; 6] = [
        SteeringKind::Seek,
        SteeringKind::Flee,
        SteeringKind::Arrive,
        SteeringKind::Pursuit,
        SteeringKind::Evade,
        SteeringKind::Wander,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SteeringKind::Seek => "Seek",
            SteeringKind::Flee => "Flee",
            SteeringKind::Arrive => "Arrive",
            SteeringKind::Pursuit => "Pursuit",
            SteeringKind::Evade => "Evade",
            SteeringKind::Wander => "Wander",
        }
    }
}

/// One instance of every named behaviour, shared by all exploration states.
#[derive(Debug, Clone, Default)]
pub struct SteeringSet {
    pub seek: Seek,
    pub flee: Flee,
    pub arrive: Arrive,
    pub pursuit: Pursuit,
    pub evade: Evade,
    pub wander: Wander,
}

impl SteeringSet {
    pub fn new(flee: Flee, arrive: Arrive, wander: Wander) -> Self {
        Self {
            flee,
            arrive,
            wander,
            ..Self::default()
        }
    }

    pub fn behavior_mut(&mut self, kind: SteeringKind) -> &mut dyn SteeringBehavior {
        match kind {
            SteeringKind::Seek => &mut self.seek,
            SteeringKind::Flee => &mut self.flee,
            SteeringKind::Arrive => &mut self.arrive,
            SteeringKind::Pursuit => &mut self.pursuit,
            SteeringKind::Evade => &mut self.evade,
            SteeringKind::Wander => &mut self.wander,
        }
    }

    pub fn calculate(
        &mut self,
        kind: SteeringKind,
        dt: f32,
        agent: &AgentInfo,
        target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput {
        self.behavior_mut(kind).calculate(dt, agent, target, nav)
    }
}
