#![allow(dead_code)]

use survivor_core::{
    AgentInfo, EnemyInfo, HouseInfo, ItemInfo, NavProjection, PurgeZoneInfo, RectBounds, Vec2,
    WorldInfo, WorldMut, WorldStats, WorldView,
};

/// Scriptable host: tests set the snapshot fields directly and inspect the recorded effects.
pub struct MockWorld {
    pub agent: AgentInfo,
    pub houses: Vec<HouseInfo>,
    pub enemies: Vec<EnemyInfo>,
    pub items: Vec<ItemInfo>,
    pub zones: Vec<PurgeZoneInfo>,
    pub stats: WorldStats,
    pub bounds: RectBounds,

    pub grab_succeeds: bool,
    pub used: Vec<usize>,
    pub removed: Vec<usize>,
    pub added: Vec<(usize, ItemInfo)>,
    pub destroyed: Vec<i32>,
}

impl Default for MockWorld {
    fn default() -> Self {
        Self {
            agent: AgentInfo {
                health: 10.0,
                energy: 10.0,
                stamina: 10.0,
                max_linear_speed: 5.0,
                max_angular_speed: 2.0,
                grab_range: 1.0,
                fov_range: 30.0,
                ..AgentInfo::default()
            },
            houses: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            zones: Vec::new(),
            stats: WorldStats {
                difficulty: 1.0,
                ..WorldStats::default()
            },
            bounds: RectBounds::centered(Vec2::ZERO, Vec2::new(400.0, 400.0)),
            grab_succeeds: true,
            used: Vec::new(),
            removed: Vec::new(),
            added: Vec::new(),
            destroyed: Vec::new(),
        }
    }
}

impl MockWorld {
    pub fn at(position: Vec2) -> Self {
        let mut world = Self::default();
        world.agent.position = position;
        world
    }
}

impl NavProjection for MockWorld {
    fn nearest_point(&self, point: Vec2) -> Vec2 {
        self.bounds.nearest_point(point)
    }
}

impl WorldView for MockWorld {
    fn agent_info(&self) -> AgentInfo {
        self.agent
    }

    fn houses_in_fov(&self) -> Vec<HouseInfo> {
        self.houses.clone()
    }

    fn enemies_in_fov(&self) -> Vec<EnemyInfo> {
        self.enemies.clone()
    }

    fn items_in_fov(&self) -> Vec<ItemInfo> {
        self.items.clone()
    }

    fn purge_zones_in_fov(&self) -> Vec<PurgeZoneInfo> {
        self.zones.clone()
    }

    fn world_stats(&self) -> WorldStats {
        self.stats
    }

    fn world_info(&self) -> WorldInfo {
        WorldInfo {
            center: (self.bounds.min + self.bounds.max) / 2.0,
            dimensions: self.bounds.max - self.bounds.min,
        }
    }
}

impl WorldMut for MockWorld {
    fn use_inventory_slot(&mut self, slot: usize) {
        self.used.push(slot);
    }

    fn remove_inventory_slot(&mut self, slot: usize) {
        self.removed.push(slot);
    }

    fn add_inventory_slot(&mut self, slot: usize, item: ItemInfo) {
        self.added.push((slot, item));
    }

    fn grab_item(&mut self, item: &ItemInfo) -> bool {
        if !self.grab_succeeds {
            return false;
        }
        self.items.retain(|i| i != item);
        true
    }

    fn destroy_item(&mut self, item: &ItemInfo) {
        self.destroyed.push(item.hash);
        self.items.retain(|i| i != item);
    }
}
