//! Blackboard slots shared by the controller, the exploration states and the inventory tree.

use survivor_core::{
    AgentInfo, BbKey, EnemyInfo, FovStats, HouseInfo, ItemInfo, PurgeZoneInfo, SteeringOutput,
    Vec2, WorldInfo, WorldStats,
};

use crate::config::InventoryConfig;
use crate::memory::{EscapeTimer, FoundHouses, InHousePath, Inventory};

// Refreshed from the host every frame.
pub const AGENT_INFO: BbKey<AgentInfo> = BbKey::new("AgentInfo");
pub const HOUSES: BbKey<Vec<HouseInfo>> = BbKey::new("Houses");
pub const ENEMIES: BbKey<Vec<EnemyInfo>> = BbKey::new("Enemies");
pub const ITEMS: BbKey<Vec<ItemInfo>> = BbKey::new("Items");
pub const PURGE_ZONES: BbKey<Vec<PurgeZoneInfo>> = BbKey::new("PurgeZones");
pub const FOV_STATS: BbKey<FovStats> = BbKey::new("FOVStats");
pub const WORLD_STATS: BbKey<WorldStats> = BbKey::new("StatisticsInfo");
pub const WORLD_INFO: BbKey<WorldInfo> = BbKey::new("WorldInfo");

/// The command handed back to the host at the end of the frame.
pub const STEERING_OUTPUT: BbKey<SteeringOutput> = BbKey::new("SteeringOutput");

// Exploration memory.
pub const ESCAPE_TIMER: BbKey<EscapeTimer> = BbKey::new("EscapeTimer");
pub const SAFE_POINT: BbKey<Vec2> = BbKey::new("SafePoint");
pub const CHECK_BEHIND_ORIENTATION: BbKey<f32> = BbKey::new("CheckBehindOrientation");
pub const FOUND_HOUSES: BbKey<FoundHouses> = BbKey::new("FoundHouses");
pub const CURRENT_HOUSE: BbKey<Option<HouseInfo>> = BbKey::new("CurrentHouse");
pub const IN_HOUSE_PATH: BbKey<InHousePath> = BbKey::new("InHousePath");
pub const TARGET_ITEM: BbKey<Option<ItemInfo>> = BbKey::new("TargetItem");

// Inventory management.
pub const INVENTORY: BbKey<Inventory> = BbKey::new("Inventory");
pub const INVENTORY_RULES: BbKey<InventoryConfig> = BbKey::new("InventoryRules");
