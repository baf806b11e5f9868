use survivor_core::{
    AgentInfo, DeterministicRng, NavProjection, SplitMix64, SteeringOutput, Vec2, EPSILON,
};

use crate::behavior::{heading_to, orient_to, SteeringBehavior, TargetData};

/// Straight line to the projected target at full speed; faces where it is going.
#[derive(Debug, Clone, Copy, Default)]
pub struct Seek;

impl SteeringBehavior for Seek {
    fn calculate(
        &mut self,
        _dt: f32,
        agent: &AgentInfo,
        target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput {
        SteeringOutput {
            linear_velocity: heading_to(agent, target.position, nav) * agent.max_linear_speed,
            ..SteeringOutput::default()
        }
    }
}

/// Run to a point `distance` units away from the target, turning to keep the threat in view.
#[derive(Debug, Clone, Copy)]
pub struct Flee {
    pub distance: f32,
}

impl Default for Flee {
    fn default() -> Self {
        Self { distance: 6.0 }
    }
}

impl SteeringBehavior for Flee {
    fn calculate(
        &mut self,
        _dt: f32,
        agent: &AgentInfo,
        target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput {
        let away = (agent.position - target.position).normalized();
        let destination = agent.position + away * self.distance;
        SteeringOutput {
            linear_velocity: heading_to(agent, destination, nav) * agent.max_linear_speed,
            angular_velocity: orient_to(agent, target.position),
            auto_orient: false,
            ..SteeringOutput::default()
        }
    }
}

/// Seek that slows down linearly between `slow_radius` and `target_radius`.
#[derive(Debug, Clone, Copy)]
pub struct Arrive {
    pub slow_radius: f32,
    pub target_radius: f32,
}

impl Default for Arrive {
    fn default() -> Self {
        Self {
            slow_radius: 15.0,
            target_radius: 3.0,
        }
    }
}

impl Arrive {
    pub fn new(slow_radius: f32, target_radius: f32) -> Self {
        Self {
            slow_radius,
            target_radius,
        }
    }

    /// Desired speed at `distance` from the target. Never negative.
    pub fn speed_at(&self, distance: f32, max_speed: f32) -> f32 {
        if distance >= self.slow_radius {
            return max_speed;
        }
        let band = self.slow_radius - self.target_radius;
        if band <= EPSILON {
            return if distance > self.target_radius { max_speed } else { 0.0 };
        }
        (max_speed * (distance - self.target_radius) / band).max(0.0)
    }
}

impl SteeringBehavior for Arrive {
    fn calculate(
        &mut self,
        _dt: f32,
        agent: &AgentInfo,
        target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput {
        // Only the next unit step is projected: the full target may sit off the walkable area.
        let toward = (target.position - agent.position).normalized();
        let direction = heading_to(agent, agent.position + toward, nav);
        let distance = agent.position.distance(target.position);
        SteeringOutput {
            linear_velocity: direction * self.speed_at(distance, agent.max_linear_speed),
            ..SteeringOutput::default()
        }
    }
}

/// Where a target moving in a straight line will be by the time the agent covers today's gap.
fn predicted_position(agent: &AgentInfo, target: &TargetData) -> Vec2 {
    let distance = target.position.distance(agent.position);
    let horizon = if agent.max_linear_speed > EPSILON {
        distance / agent.max_linear_speed
    } else {
        0.0
    };
    target.position + target.velocity * horizon
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pursuit;

impl SteeringBehavior for Pursuit {
    fn calculate(
        &mut self,
        _dt: f32,
        agent: &AgentInfo,
        target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput {
        let predicted = predicted_position(agent, target);
        SteeringOutput {
            linear_velocity: heading_to(agent, predicted, nav) * agent.max_linear_speed,
            ..SteeringOutput::default()
        }
    }
}

/// Move away from the target's predicted position while facing the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evade;

impl SteeringBehavior for Evade {
    fn calculate(
        &mut self,
        _dt: f32,
        agent: &AgentInfo,
        target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput {
        let predicted = nav.nearest_point(predicted_position(agent, target));
        let away = (agent.position - predicted).normalized();
        SteeringOutput {
            linear_velocity: away * agent.max_linear_speed,
            angular_velocity: orient_to(agent, target.position),
            auto_orient: false,
            ..SteeringOutput::default()
        }
    }
}

/// Steers toward a point on a circle `offset` units ahead of the agent; the point drifts by at
/// most `max_angle_change` radians per call.
#[derive(Debug, Clone)]
pub struct Wander {
    pub offset: f32,
    pub radius: f32,
    pub max_angle_change: f32,
    angle: f32,
    rng: SplitMix64,
}

impl Wander {
    /// Roughly 1.2 degrees of drift per frame.
    pub const DEFAULT_MAX_ANGLE_CHANGE: f32 = 0.021_323_2;

    pub fn new(offset: f32, radius: f32, max_angle_change: f32, seed: u64) -> Self {
        Self {
            offset,
            radius,
            max_angle_change,
            angle: 0.0,
            rng: SplitMix64::new(seed),
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, radians: f32) {
        self.angle = radians;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = SplitMix64::new(seed);
    }
}

impl Default for Wander {
    fn default() -> Self {
        Self::new(6.0, 4.0, Self::DEFAULT_MAX_ANGLE_CHANGE, 0)
    }
}

impl SteeringBehavior for Wander {
    fn calculate(
        &mut self,
        _dt: f32,
        agent: &AgentInfo,
        _target: &TargetData,
        nav: &dyn NavProjection,
    ) -> SteeringOutput {
        // A standing agent has no velocity heading; use where it faces instead.
        let mut ahead = agent.linear_velocity.normalized();
        if ahead == Vec2::ZERO {
            ahead = agent.facing();
        }
        let circle_center = agent.position + ahead * self.offset;

        self.angle += self
            .rng
            .next_f32_range(-self.max_angle_change, self.max_angle_change);
        let on_circle = circle_center + Vec2::from_angle(self.angle) * self.radius;

        SteeringOutput {
            linear_velocity: heading_to(agent, on_circle, nav) * agent.max_linear_speed,
            ..SteeringOutput::default()
        }
    }
}
