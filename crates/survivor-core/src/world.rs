use crate::{
    AgentInfo, EnemyInfo, FovStats, HouseInfo, ItemInfo, NavProjection, PurgeZoneInfo, WorldInfo,
    WorldStats,
};

/// Number of inventory slots the host keeps for the agent.
pub const INVENTORY_SLOTS: usize = 5;

/// Read-only queries the host answers once per frame.
///
/// "In FOV" lists contain only what the host decided is inside the agent's sensing cone.
pub trait WorldView: NavProjection {
    fn agent_info(&self) -> AgentInfo;

    fn houses_in_fov(&self) -> Vec<HouseInfo>;
    fn enemies_in_fov(&self) -> Vec<EnemyInfo>;
    fn items_in_fov(&self) -> Vec<ItemInfo>;
    fn purge_zones_in_fov(&self) -> Vec<PurgeZoneInfo>;

    fn fov_stats(&self) -> FovStats {
        FovStats {
            num_houses: self.houses_in_fov().len(),
            num_enemies: self.enemies_in_fov().len(),
            num_items: self.items_in_fov().len(),
            num_purge_zones: self.purge_zones_in_fov().len(),
        }
    }

    fn world_stats(&self) -> WorldStats;
    fn world_info(&self) -> WorldInfo;
}

/// Inventory and item effects. Slot indices are the agent's own bookkeeping indices and must stay
/// below [`INVENTORY_SLOTS`].
pub trait WorldMut: WorldView {
    /// Apply the item in `slot` (fire a weapon, eat, heal).
    fn use_inventory_slot(&mut self, slot: usize);
    fn remove_inventory_slot(&mut self, slot: usize);
    fn add_inventory_slot(&mut self, slot: usize, item: ItemInfo);
    /// Pick an item up from the world. `false` if it is out of reach or already gone.
    fn grab_item(&mut self, item: &ItemInfo) -> bool;
    fn destroy_item(&mut self, item: &ItemInfo);
}
