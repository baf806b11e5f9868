//! Render-only view of the agent's intent. Nothing here feeds back into decisions.

use serde::{Deserialize, Serialize};
use survivor_core::{Blackboard, Vec2};

use crate::config::InventoryConfig;
use crate::keys;
use crate::states::ExplorationState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DebugShape {
    Point {
        position: Vec2,
        size: f32,
        color: Color,
    },
    Direction {
        origin: Vec2,
        direction: Vec2,
        length: f32,
        color: Color,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
}

/// Shapes describing the agent this frame: facing and velocity arrows, weapon cones while
/// enemies are in sight, and whatever the current state is heading for.
pub fn debug_shapes(state: ExplorationState, blackboard: &Blackboard) -> Vec<DebugShape> {
    let mut shapes = Vec::new();
    let Ok(agent) = blackboard.get(keys::AGENT_INFO) else {
        return shapes;
    };

    shapes.push(DebugShape::Direction {
        origin: agent.position,
        direction: agent.facing(),
        length: 5.0,
        color: Color::WHITE,
    });
    shapes.push(DebugShape::Direction {
        origin: agent.position,
        direction: agent.linear_velocity.normalized(),
        length: agent.linear_velocity.length(),
        color: Color::GREEN,
    });

    let enemies_visible = blackboard
        .get_ref(keys::ENEMIES)
        .map(|e| !e.is_empty())
        .unwrap_or(false);
    if enemies_visible {
        let rules: InventoryConfig = blackboard.get(keys::INVENTORY_RULES).unwrap_or_default();
        for (range, half_angle, color) in [
            (rules.shotgun_range, rules.shotgun_angle, Color::RED),
            (rules.pistol_range, rules.pistol_angle, Color::YELLOW),
        ] {
            let half = half_angle.to_radians();
            for edge in [agent.orientation - half, agent.orientation + half] {
                shapes.push(DebugShape::Direction {
                    origin: agent.position,
                    direction: Vec2::from_angle(edge),
                    length: range,
                    color,
                });
            }
        }
    }

    let target_point = |position: Vec2| DebugShape::Point {
        position,
        size: 0.5,
        color: Color::MAGENTA,
    };
    let current_house = blackboard.get(keys::CURRENT_HOUSE).ok().flatten();

    match state {
        ExplorationState::SafeSeek | ExplorationState::RunAwayFromZone => {
            if let Ok(point) = blackboard.get(keys::SAFE_POINT) {
                shapes.push(target_point(point));
            }
        }
        ExplorationState::LookBehind => {
            if let Ok(behind) = blackboard.get(keys::CHECK_BEHIND_ORIENTATION) {
                shapes.push(DebugShape::Direction {
                    origin: agent.position,
                    direction: Vec2::from_angle(behind),
                    length: 5.0,
                    color: Color::MAGENTA,
                });
            }
        }
        ExplorationState::GetInsideUnexploredHouse => {
            if let Some(house) = current_house {
                shapes.push(target_point(house.center));
            }
        }
        ExplorationState::ExploreHouse => {
            if let Ok(path) = blackboard.get_ref(keys::IN_HOUSE_PATH) {
                shapes.push(DebugShape::Polygon {
                    points: path.polygon().to_vec(),
                    color: Color::BLUE,
                });
                if let Some(next) = path.next_unvisited() {
                    shapes.push(target_point(next.position));
                }
            }
        }
        ExplorationState::GetItem => {
            if let Ok(Some(item)) = blackboard.get(keys::TARGET_ITEM) {
                shapes.push(target_point(item.location));
            }
        }
        ExplorationState::LeaveHouse => {
            let entrance = current_house.and_then(|house| {
                blackboard
                    .get_ref(keys::FOUND_HOUSES)
                    .ok()
                    .and_then(|found| found.get(&house))
                    .map(|record| record.entrance)
            });
            if let Some(entrance) = entrance {
                shapes.push(target_point(entrance));
            }
        }
        ExplorationState::Roam | ExplorationState::Escape => {}
    }

    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivor_core::{AgentInfo, EnemyInfo};

    #[test]
    fn empty_blackboard_draws_nothing() {
        assert!(debug_shapes(ExplorationState::Roam, &Blackboard::new()).is_empty());
    }

    #[test]
    fn cones_only_with_enemies_in_sight() {
        let mut bb = Blackboard::new();
        bb.add(keys::AGENT_INFO, AgentInfo::default()).unwrap();
        bb.add(keys::ENEMIES, Vec::new()).unwrap();
        assert_eq!(debug_shapes(ExplorationState::Roam, &bb).len(), 2);

        bb.change(keys::ENEMIES, vec![EnemyInfo::default()]).unwrap();
        assert_eq!(debug_shapes(ExplorationState::Roam, &bb).len(), 6);
    }

    #[test]
    fn safe_seek_marks_the_safe_point() {
        let mut bb = Blackboard::new();
        bb.add(keys::AGENT_INFO, AgentInfo::default()).unwrap();
        bb.add(keys::SAFE_POINT, Vec2::new(3.0, 4.0)).unwrap();
        let shapes = debug_shapes(ExplorationState::SafeSeek, &bb);
        assert!(shapes.contains(&DebugShape::Point {
            position: Vec2::new(3.0, 4.0),
            size: 0.5,
            color: Color::MAGENTA,
        }));
    }
}
