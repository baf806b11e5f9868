//! A small deterministic world to run the agent against without a game engine.
//!
//! Houses are scattered over a square map and stocked with items. Enemies arrive in waves and
//! chase the agent once they notice it. Purge zones appear now and then and hurt anything
//! inside them. The agent only ever learns about what sits inside its view cone.

use serde::Serialize;
use survivor_core::{
    wrap_angle, AgentInfo, DeterministicRng, EnemyInfo, EnemyType, HouseInfo, ItemInfo, ItemType,
    NavProjection, PurgeZoneInfo, RectBounds, SplitMix64, SteeringOutput, Vec2, WorldInfo,
    WorldMut, WorldStats, WorldView, INVENTORY_SLOTS,
};

const MAP_SIZE: f32 = 240.0;
const HOUSE_COUNT: usize = 6;
const ITEMS_PER_HOUSE: usize = 3;
const WAVE_INTERVAL: f32 = 60.0;
const ZONE_INTERVAL: f32 = 45.0;
const ZONE_LIFETIME: f32 = 12.0;
const ENEMY_SPEED: f32 = 2.5;
const ENEMY_NOTICE_RANGE: f32 = 20.0;
const BITE_RANGE: f32 = 1.5;
const BITE_COOLDOWN: f32 = 1.0;
const RUN_MULTIPLIER: f32 = 1.6;
const STAT_CEILING: f32 = 10.0;
/// Things this close are sensed even behind the agent.
const AWARENESS_RADIUS: f32 = 3.0;

#[derive(Debug, Clone, Copy)]
struct Zone {
    info: PurgeZoneInfo,
    remaining: f32,
}

#[derive(Debug, Clone, Copy)]
struct Enemy {
    info: EnemyInfo,
    bite_cooldown: f32,
}

/// End-of-run numbers, printed by `survivor run`.
#[derive(Debug, Clone, Serialize)]
pub struct SandboxSummary {
    pub frames: u64,
    pub alive: bool,
    pub position: Vec2,
    pub health: f32,
    pub energy: f32,
    pub stats: WorldStats,
    pub inventory: Vec<ItemInfo>,
}

pub struct SandboxWorld {
    rng: SplitMix64,
    bounds: RectBounds,
    agent: AgentInfo,
    houses: Vec<HouseInfo>,
    items: Vec<ItemInfo>,
    enemies: Vec<Enemy>,
    zones: Vec<Zone>,
    inventory: [Option<ItemInfo>; INVENTORY_SLOTS],
    stats: WorldStats,
    next_hash: i32,
    wave_timer: f32,
    zone_timer: f32,
    frames: u64,
}

impl SandboxWorld {
    pub fn new(seed: u64) -> Self {
        let mut world = Self {
            rng: SplitMix64::new(seed),
            bounds: RectBounds::centered(Vec2::ZERO, Vec2::new(MAP_SIZE, MAP_SIZE)),
            agent: AgentInfo {
                stamina: STAT_CEILING,
                health: STAT_CEILING,
                energy: STAT_CEILING,
                fov_angle: 100f32.to_radians(),
                fov_range: 35.0,
                max_linear_speed: 5.0,
                max_angular_speed: 3.0,
                grab_range: 1.5,
                agent_size: 1.0,
                ..AgentInfo::default()
            },
            houses: Vec::new(),
            items: Vec::new(),
            enemies: Vec::new(),
            zones: Vec::new(),
            inventory: [None; INVENTORY_SLOTS],
            stats: WorldStats {
                difficulty: 1.0,
                ..WorldStats::default()
            },
            next_hash: 1,
            wave_timer: 0.0,
            zone_timer: 0.0,
            frames: 0,
        };
        world.populate();
        world
    }

    fn populate(&mut self) {
        let half = MAP_SIZE / 2.0 - 20.0;
        for _ in 0..HOUSE_COUNT {
            let center = Vec2::new(
                self.rng.next_f32_range(-half, half).round(),
                self.rng.next_f32_range(-half, half).round(),
            );
            let size = Vec2::new(
                self.rng.next_f32_range(14.0, 24.0).round(),
                self.rng.next_f32_range(14.0, 24.0).round(),
            );
            let house = HouseInfo::new(center, size);
            self.houses.push(house);
            self.stock(&house);
        }
        self.spawn_wave();
    }

    fn stock(&mut self, house: &HouseInfo) {
        let inner_min = house.min() + Vec2::new(2.0, 2.0);
        let inner_max = house.max() - Vec2::new(2.0, 2.0);
        for _ in 0..ITEMS_PER_HOUSE {
            let item_type = match self.rng.next_u32() % 5 {
                0 => ItemType::Pistol,
                1 => ItemType::Shotgun,
                2 => ItemType::Medkit,
                3 => ItemType::Food,
                _ => ItemType::Garbage,
            };
            let value = match item_type {
                ItemType::Pistol => 8,
                ItemType::Shotgun => 4,
                ItemType::Medkit | ItemType::Food => 1 + (self.rng.next_u32() % 4) as i32,
                ItemType::Garbage => 0,
            };
            let location = Vec2::new(
                self.rng.next_f32_range(inner_min.x, inner_max.x),
                self.rng.next_f32_range(inner_min.y, inner_max.y),
            );
            let hash = self.fresh_hash();
            self.items.push(ItemInfo::new(item_type, location, hash, value));
        }
    }

    fn fresh_hash(&mut self) -> i32 {
        let hash = self.next_hash;
        self.next_hash += 1;
        hash
    }

    fn spawn_wave(&mut self) {
        let count = 2 + self.stats.difficulty as usize;
        let half = MAP_SIZE / 2.0;
        for _ in 0..count {
            // Spawn along the map edge, away from the middle of the action.
            let along = self.rng.next_f32_range(-half, half);
            let location = match self.rng.next_u32() % 4 {
                0 => Vec2::new(along, -half),
                1 => Vec2::new(along, half),
                2 => Vec2::new(-half, along),
                _ => Vec2::new(half, along),
            };
            let enemy_type = match self.rng.next_u32() % 3 {
                0 => EnemyType::ZombieNormal,
                1 => EnemyType::ZombieRunner,
                _ => EnemyType::ZombieHeavy,
            };
            let hash = self.fresh_hash();
            self.enemies.push(Enemy {
                info: EnemyInfo {
                    enemy_type,
                    location,
                    linear_velocity: Vec2::ZERO,
                    hash,
                    size: 1.0,
                    health: if enemy_type == EnemyType::ZombieHeavy { 4.0 } else { 2.0 },
                },
                bite_cooldown: 0.0,
            });
        }
        tracing::debug!(
            difficulty = self.stats.difficulty,
            enemies = self.enemies.len(),
            "wave spawned"
        );
    }

    fn spawn_zone(&mut self) {
        let half = MAP_SIZE / 2.0 - 15.0;
        let center = Vec2::new(
            self.rng.next_f32_range(-half, half),
            self.rng.next_f32_range(-half, half),
        );
        let radius = self.rng.next_f32_range(8.0, 15.0);
        let hash = self.fresh_hash();
        self.zones.push(Zone {
            info: PurgeZoneInfo {
                center,
                radius,
                hash,
            },
            remaining: ZONE_LIFETIME,
        });
        tracing::debug!(x = center.x, y = center.y, radius, "purge zone spawned");
    }

    pub fn agent(&self) -> &AgentInfo {
        &self.agent
    }

    pub fn is_agent_dead(&self) -> bool {
        self.agent.dead
    }

    pub fn houses(&self) -> &[HouseInfo] {
        &self.houses
    }

    pub fn items(&self) -> &[ItemInfo] {
        &self.items
    }

    pub fn held(&self, slot: usize) -> Option<ItemInfo> {
        self.inventory.get(slot).copied().flatten()
    }

    /// Put the agent somewhere, for tests and scripted starts.
    pub fn place_agent(&mut self, position: Vec2, orientation: f32) {
        self.agent.position = self.bounds.nearest_point(position);
        self.agent.orientation = wrap_angle(orientation);
    }

    pub fn spawn_enemy_at(&mut self, location: Vec2) -> i32 {
        let hash = self.fresh_hash();
        self.enemies.push(Enemy {
            info: EnemyInfo {
                enemy_type: EnemyType::ZombieNormal,
                location,
                hash,
                size: 1.0,
                health: 2.0,
                ..EnemyInfo::default()
            },
            bite_cooldown: 0.0,
        });
        hash
    }

    pub fn clear_enemies(&mut self) {
        self.enemies.clear();
    }

    pub fn summary(&self) -> SandboxSummary {
        SandboxSummary {
            frames: self.frames,
            alive: !self.agent.dead,
            position: self.agent.position,
            health: self.agent.health,
            energy: self.agent.energy,
            stats: self.stats,
            inventory: self.inventory.iter().flatten().copied().collect(),
        }
    }

    fn in_view(&self, point: Vec2, extra_range: f32) -> bool {
        let to = point - self.agent.position;
        let distance = to.length();
        if distance <= AWARENESS_RADIUS {
            return true;
        }
        if distance > self.agent.fov_range + extra_range {
            return false;
        }
        let off_axis = survivor_core::angle_between(self.agent.facing(), to).abs();
        off_axis <= self.agent.fov_angle / 2.0
    }

    /// Advance the simulation by `dt` seconds, applying the agent's command first.
    pub fn step(&mut self, dt: f32, command: &SteeringOutput) {
        if self.agent.dead {
            return;
        }
        self.frames += 1;
        self.move_agent(dt, command);
        self.move_enemies(dt);
        self.update_zones(dt);
        self.update_vitals(dt);

        self.stats.time_survived += dt;
        self.wave_timer += dt;
        if self.wave_timer >= WAVE_INTERVAL {
            self.wave_timer = 0.0;
            self.stats.difficulty += 1.0;
            self.spawn_wave();
        }
        self.zone_timer += dt;
        if self.zone_timer >= ZONE_INTERVAL {
            self.zone_timer = 0.0;
            self.spawn_zone();
        }
    }

    fn move_agent(&mut self, dt: f32, command: &SteeringOutput) {
        let agent = &mut self.agent;
        agent.run_mode = command.run_mode && agent.stamina > 0.0;

        let mut max_speed = agent.max_linear_speed;
        if agent.run_mode {
            max_speed *= RUN_MULTIPLIER;
            agent.stamina = (agent.stamina - dt).max(0.0);
        } else {
            agent.stamina = (agent.stamina + 0.5 * dt).min(STAT_CEILING);
        }

        let mut velocity = command.linear_velocity;
        if agent.run_mode {
            velocity *= RUN_MULTIPLIER;
        }
        if velocity.length() > max_speed {
            velocity = velocity.normalized() * max_speed;
        }
        agent.linear_velocity = velocity;
        agent.current_linear_speed = velocity.length();
        agent.position = self.bounds.nearest_point(agent.position + velocity * dt);

        if command.auto_orient {
            if velocity.length_squared() > 0.0 {
                agent.orientation = velocity.to_angle();
            }
            agent.angular_velocity = 0.0;
        } else {
            let turn = command
                .angular_velocity
                .clamp(-agent.max_angular_speed, agent.max_angular_speed);
            agent.angular_velocity = turn;
            agent.orientation = wrap_angle(agent.orientation + turn * dt);
        }
        agent.is_in_house = self.houses.iter().any(|h| h.contains(agent.position));
    }

    fn move_enemies(&mut self, dt: f32) {
        self.agent.was_bitten = self.agent.bitten || self.agent.was_bitten;
        self.agent.bitten = false;

        let target = self.agent.position;
        for enemy in self.enemies.iter_mut() {
            enemy.bite_cooldown = (enemy.bite_cooldown - dt).max(0.0);

            let to_agent = target - enemy.info.location;
            let speed = match enemy.info.enemy_type {
                EnemyType::ZombieRunner => ENEMY_SPEED * 1.5,
                EnemyType::ZombieHeavy => ENEMY_SPEED * 0.7,
                _ => ENEMY_SPEED,
            };
            enemy.info.linear_velocity = if to_agent.length() < ENEMY_NOTICE_RANGE {
                to_agent.normalized() * speed
            } else {
                // Shamble toward the centre of the map.
                (-enemy.info.location).normalized() * speed * 0.3
            };
            enemy.info.location = self
                .bounds
                .nearest_point(enemy.info.location + enemy.info.linear_velocity * dt);

            if enemy.info.location.distance(target) < BITE_RANGE && enemy.bite_cooldown == 0.0 {
                enemy.bite_cooldown = BITE_COOLDOWN;
                self.agent.health -= 1.0;
                self.agent.bitten = true;
            }
        }
    }

    fn update_zones(&mut self, dt: f32) {
        for zone in self.zones.iter_mut() {
            zone.remaining -= dt;
            if self.agent.position.distance(zone.info.center) <= zone.info.radius {
                self.agent.health -= 0.5 * dt;
            }
            let center = zone.info.center;
            let radius = zone.info.radius;
            for enemy in self.enemies.iter_mut() {
                if enemy.info.location.distance(center) <= radius {
                    enemy.info.health -= dt;
                }
            }
        }
        self.zones.retain(|z| z.remaining > 0.0);
        self.enemies.retain(|e| e.info.health > 0.0);
    }

    fn update_vitals(&mut self, dt: f32) {
        self.agent.energy = (self.agent.energy - 0.02 * dt).max(0.0);
        if self.agent.energy == 0.0 {
            self.agent.health -= 0.1 * dt;
        }
        if self.agent.health <= 0.0 {
            self.agent.health = 0.0;
            self.agent.dead = true;
            tracing::info!(
                frames = self.frames,
                time = self.stats.time_survived,
                "agent died"
            );
        }
    }

    fn fire(&mut self, range: f32, half_angle_deg: f32, damage: f32) {
        let facing = self.agent.facing();
        let origin = self.agent.position;
        let hit = self
            .enemies
            .iter_mut()
            .filter(|e| {
                let to = e.info.location - origin;
                to.length() <= range
                    && survivor_core::angle_between(facing, to).abs().to_degrees()
                        <= half_angle_deg
            })
            .min_by(|a, b| {
                origin
                    .distance_squared(a.info.location)
                    .total_cmp(&origin.distance_squared(b.info.location))
            });

        match hit {
            Some(enemy) => {
                enemy.info.health -= damage;
                self.stats.enemies_hit += 1;
                if enemy.info.health <= 0.0 {
                    self.stats.enemies_killed += 1;
                    self.stats.score += 10;
                }
            }
            None => self.stats.missed_shots += 1,
        }
        self.enemies.retain(|e| e.info.health > 0.0);
    }
}

impl NavProjection for SandboxWorld {
    fn nearest_point(&self, point: Vec2) -> Vec2 {
        self.bounds.nearest_point(point)
    }
}

impl WorldView for SandboxWorld {
    fn agent_info(&self) -> AgentInfo {
        self.agent
    }

    fn houses_in_fov(&self) -> Vec<HouseInfo> {
        self.houses
            .iter()
            .filter(|h| h.contains(self.agent.position) || self.in_view(h.center, h.size.length() / 2.0))
            .copied()
            .collect()
    }

    fn enemies_in_fov(&self) -> Vec<EnemyInfo> {
        self.enemies
            .iter()
            .filter(|e| self.in_view(e.info.location, 0.0))
            .map(|e| e.info)
            .collect()
    }

    fn items_in_fov(&self) -> Vec<ItemInfo> {
        self.items
            .iter()
            .filter(|i| self.in_view(i.location, 0.0))
            .copied()
            .collect()
    }

    fn purge_zones_in_fov(&self) -> Vec<PurgeZoneInfo> {
        self.zones
            .iter()
            .filter(|z| self.in_view(z.info.center, z.info.radius))
            .map(|z| z.info)
            .collect()
    }

    fn world_stats(&self) -> WorldStats {
        self.stats
    }

    fn world_info(&self) -> WorldInfo {
        WorldInfo {
            center: Vec2::ZERO,
            dimensions: Vec2::new(MAP_SIZE, MAP_SIZE),
        }
    }
}

impl WorldMut for SandboxWorld {
    fn use_inventory_slot(&mut self, slot: usize) {
        let Some(item) = self.held(slot) else {
            tracing::warn!(slot, "using an empty inventory slot");
            return;
        };
        match item.item_type {
            ItemType::Pistol => self.fire(7.0, 10.0, 1.0),
            ItemType::Shotgun => self.fire(5.0, 20.0, 2.0),
            ItemType::Medkit => {
                self.agent.health = (self.agent.health + item.value as f32).min(STAT_CEILING);
            }
            ItemType::Food => {
                self.agent.energy = (self.agent.energy + item.value as f32).min(STAT_CEILING);
            }
            ItemType::Garbage => {}
        }
        if let Some(Some(held)) = self.inventory.get_mut(slot) {
            held.value -= 1;
        }
    }

    fn remove_inventory_slot(&mut self, slot: usize) {
        if let Some(held) = self.inventory.get_mut(slot) {
            *held = None;
        }
    }

    fn add_inventory_slot(&mut self, slot: usize, item: ItemInfo) {
        match self.inventory.get_mut(slot) {
            Some(held) => *held = Some(item),
            None => tracing::warn!(slot, "inventory slot out of range"),
        }
    }

    fn grab_item(&mut self, item: &ItemInfo) -> bool {
        let Some(index) = self.items.iter().position(|i| i == item) else {
            return false;
        };
        if self.items[index].location.distance(self.agent.position) > self.agent.grab_range {
            return false;
        }
        self.items.swap_remove(index);
        self.stats.items_picked_up += 1;
        self.stats.score += 1;
        true
    }

    fn destroy_item(&mut self, item: &ItemInfo) {
        self.items.retain(|i| i != item);
    }
}
