//! Per-frame sensory snapshots handed in by the host, plus the steering command handed back.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentInfo {
    pub stamina: f32,
    pub health: f32,
    pub energy: f32,
    pub run_mode: bool,
    pub is_in_house: bool,
    /// Bitten by an enemy this frame.
    pub bitten: bool,
    /// Bitten by an enemy recently.
    pub was_bitten: bool,
    pub dead: bool,
    pub fov_angle: f32,
    pub fov_range: f32,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub current_linear_speed: f32,
    pub position: Vec2,
    /// Radians; `0` faces `+x`.
    pub orientation: f32,
    pub max_linear_speed: f32,
    pub max_angular_speed: f32,
    pub grab_range: f32,
    pub agent_size: f32,
}

impl AgentInfo {
    pub fn facing(&self) -> Vec2 {
        Vec2::from_angle(self.orientation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemType {
    Pistol,
    Shotgun,
    Medkit,
    Food,
    /// Junk in the world, and the marker for an empty inventory slot.
    #[default]
    Garbage,
}

/// An item seen in the world or held in an inventory slot.
///
/// Identity is the host-assigned `hash`: equality, ordering and hashing ignore every other field.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemInfo {
    pub item_type: ItemType,
    pub location: Vec2,
    pub hash: i32,
    /// Ammo for weapons, restorative amount for medkits and food.
    pub value: i32,
}

impl ItemInfo {
    pub const GARBAGE: ItemInfo = ItemInfo {
        item_type: ItemType::Garbage,
        location: Vec2::ZERO,
        hash: 0,
        value: 0,
    };

    pub fn new(item_type: ItemType, location: Vec2, hash: i32, value: i32) -> Self {
        Self {
            item_type,
            location,
            hash,
            value,
        }
    }

    pub fn is_garbage(&self) -> bool {
        self.item_type == ItemType::Garbage
    }
}

impl PartialEq for ItemInfo {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for ItemInfo {}

impl PartialOrd for ItemInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ItemInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hash.cmp(&other.hash)
    }
}

impl Hash for ItemInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EnemyType {
    #[default]
    Default,
    ZombieNormal,
    ZombieRunner,
    ZombieHeavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnemyInfo {
    pub enemy_type: EnemyType,
    pub location: Vec2,
    pub linear_velocity: Vec2,
    pub hash: i32,
    pub size: f32,
    pub health: f32,
}

/// A house seen in the field of view.
///
/// Identity is the centre only: two houses sharing a centre are the same house as far as the
/// agent's memory is concerned. Coordinates are compared with `f32::total_cmp`.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HouseInfo {
    pub center: Vec2,
    pub size: Vec2,
}

impl HouseInfo {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.size / 2.0
    }

    /// Inclusive point-in-rectangle test.
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

impl PartialEq for HouseInfo {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HouseInfo {}

impl PartialOrd for HouseInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HouseInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.center
            .x
            .total_cmp(&other.center.x)
            .then_with(|| self.center.y.total_cmp(&other.center.y))
    }
}

impl Hash for HouseInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.center.x.to_bits().hash(state);
        self.center.y.to_bits().hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PurgeZoneInfo {
    pub center: Vec2,
    pub radius: f32,
    pub hash: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FovStats {
    pub num_houses: usize,
    pub num_enemies: usize,
    pub num_items: usize,
    pub num_purge_zones: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldStats {
    pub score: i32,
    /// Grows with every wave.
    pub difficulty: f32,
    pub time_survived: f32,
    pub kill_countdown: f32,
    pub enemies_killed: u32,
    pub enemies_hit: u32,
    pub items_picked_up: u32,
    pub missed_shots: u32,
    pub checkpoints_reached: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldInfo {
    pub center: Vec2,
    pub dimensions: Vec2,
}

/// Movement command produced every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SteeringOutput {
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    /// When set, the host turns the agent to face its velocity and ignores `angular_velocity`.
    pub auto_orient: bool,
    pub run_mode: bool,
}

impl Default for SteeringOutput {
    fn default() -> Self {
        Self {
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            auto_orient: true,
            run_mode: false,
        }
    }
}
