use criterion::{black_box, criterion_group, criterion_main, Criterion};
use survivor_agent::{AgentConfig, AgentController};
use survivor_core::{
    AgentInfo, EnemyInfo, HouseInfo, ItemInfo, ItemType, NavProjection, PurgeZoneInfo, RectBounds,
    Vec2, WorldInfo, WorldMut, WorldStats, WorldView,
};

/// Static field with a house, an item and a distant enemy; the agent never actually moves.
struct Field {
    bounds: RectBounds,
    agent: AgentInfo,
    houses: Vec<HouseInfo>,
    items: Vec<ItemInfo>,
    enemies: Vec<EnemyInfo>,
}

impl Field {
    fn new() -> Self {
        Self {
            bounds: RectBounds::centered(Vec2::ZERO, Vec2::new(200.0, 200.0)),
            agent: AgentInfo {
                health: 10.0,
                energy: 10.0,
                max_linear_speed: 5.0,
                max_angular_speed: 2.0,
                grab_range: 1.0,
                ..AgentInfo::default()
            },
            houses: vec![HouseInfo::new(Vec2::new(30.0, 0.0), Vec2::new(20.0, 20.0))],
            items: vec![ItemInfo::new(ItemType::Food, Vec2::new(30.0, 0.0), 1, 2)],
            enemies: vec![EnemyInfo {
                location: Vec2::new(-40.0, 10.0),
                health: 5.0,
                hash: 2,
                ..EnemyInfo::default()
            }],
        }
    }
}

impl NavProjection for Field {
    fn nearest_point(&self, point: Vec2) -> Vec2 {
        self.bounds.nearest_point(point)
    }
}

impl WorldView for Field {
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
        Vec::new()
    }

    fn world_stats(&self) -> WorldStats {
        WorldStats::default()
    }

    fn world_info(&self) -> WorldInfo {
        WorldInfo {
            center: Vec2::ZERO,
            dimensions: Vec2::new(200.0, 200.0),
        }
    }
}

impl WorldMut for Field {
    fn use_inventory_slot(&mut self, _slot: usize) {}
    fn remove_inventory_slot(&mut self, _slot: usize) {}
    fn add_inventory_slot(&mut self, _slot: usize, _item: ItemInfo) {}

    fn grab_item(&mut self, _item: &ItemInfo) -> bool {
        false
    }

    fn destroy_item(&mut self, _item: &ItemInfo) {}
}

fn bench_frame(c: &mut Criterion) {
    let mut world = Field::new();
    let mut agent = AgentController::new(AgentConfig::default());
    if agent.initialize(&mut world).is_err() {
        return;
    }

    c.bench_function("survivor-agent/update_steering", |b| {
        b.iter(|| black_box(agent.update_steering(black_box(0.016), &mut world)))
    });
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
