use survivor_core::{AgentInfo, NavProjection, SteeringOutput, Vec2};

use crate::behavior::{SteeringBehavior, TargetData};

/// Weighted average of child outputs.
///
/// The result auto-orients only when every weighted child does; a non-positive total weight
/// yields a zero command.
#[derive(Default)]
pub struct BlendedSteering {
    children: Vec<(Box<dyn SteeringBehavior>, f32)>,
}

impl BlendedSteering {
    pub fn new(children: Vec<(Box<dyn SteeringBehavior>, f32)>) -> Self {
        Self { children }
    }

    pub fn add(&mut self, behavior: Box<dyn SteeringBehavior>, weight: f32) {
        self.children.push((behavior, weight));
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn weights_mut(&mut self) -> impl Iterator<Item = &mut f32> + '_ {
        self.children.iter_mut().map(|(_, w)| w)
    }
}

impl SteeringBehavior for BlendedSteering {
    fn calculate(
        &mut self,
        dt: f32,
        agent: &AgentInfo,
        target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput {
        let mut linear = Vec2::ZERO;
        let mut angular = 0.0;
        let mut total_weight = 0.0;
        let mut auto_orient = true;

        for (behavior, weight) in self.children.iter_mut() {
            let out = behavior.calculate(dt, agent, target, nav);
            linear += out.linear_velocity * *weight;
            angular += out.angular_velocity * *weight;
            total_weight += *weight;
            if *weight > 0.0 {
                auto_orient &= out.auto_orient;
            }
        }

        if total_weight <= 0.0 {
            return SteeringOutput::default();
        }

        SteeringOutput {
            linear_velocity: linear / total_weight,
            angular_velocity: angular / total_weight,
            auto_orient,
            ..SteeringOutput::default()
        }
    }
}

/// Always defers to its first child; zero output when it has none.
#[derive(Default)]
pub struct PrioritySteering {
    children: Vec<Box<dyn SteeringBehavior>>,
}

impl PrioritySteering {
    pub fn new(children: Vec<Box<dyn SteeringBehavior>>) -> Self {
        Self { children }
    }

    pub fn add(&mut self, behavior: Box<dyn SteeringBehavior>) {
        self.children.push(behavior);
    }
}

impl SteeringBehavior for PrioritySteering {
    fn calculate(
        &mut self,
        dt: f32,
        agent: &AgentInfo,
        target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput {
        match self.children.first_mut() {
            Some(first) => first.calculate(dt, agent, target, nav),
            None => SteeringOutput::default(),
        }
    }
}
