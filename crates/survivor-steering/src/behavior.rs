use survivor_core::{angle_between, are_equal, AgentInfo, NavProjection, SteeringOutput, Vec2};

/// What a behaviour steers relative to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetData {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl TargetData {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    pub fn moving(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

pub trait SteeringBehavior {
    fn calculate(
        &mut self,
        dt: f32,
        agent: &AgentInfo,
        target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput;
}

impl<B: SteeringBehavior + ?Sized> SteeringBehavior for Box<B> {
    fn calculate(
        &mut self,
        dt: f32,
        agent: &AgentInfo,
        target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput {
        (**self).calculate(dt, agent, target, nav)
    }
}

/// Bang-bang angular command that turns the agent to face `point`.
///
/// Full angular speed toward the shorter side while the facing differs from the direction to
/// `point`, zero once they agree.
pub fn orient_to(agent: &AgentInfo, point: Vec2) -> f32 {
    let direction = point - agent.position;
    let difference = angle_between(agent.facing(), direction);
    if are_equal(difference, 0.0) {
        0.0
    } else if difference > 0.0 {
        agent.max_angular_speed
    } else {
        -agent.max_angular_speed
    }
}

/// Unit direction from the agent to the projected `destination`.
pub(crate) fn heading_to(agent: &AgentInfo, destination: Vec2, nav: &dyn NavProjection) -> Vec2 {
    (nav.nearest_point(destination) - agent.position).normalized()
}
