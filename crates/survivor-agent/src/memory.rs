//! Persistent agent memory kept on the blackboard across frames.

use std::collections::{BTreeMap, BTreeSet};

use survivor_core::{HouseInfo, ItemInfo, ItemType, Vec2, INVENTORY_SLOTS};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HouseRecord {
    pub explored: bool,
    /// Where the agent stood when it decided to go in; also the way out.
    pub entrance: Vec2,
    /// Items seen inside and not yet picked up or destroyed.
    pub known_items: BTreeSet<ItemInfo>,
}

/// Every house ever seen, keyed by house identity (its centre).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FoundHouses {
    houses: BTreeMap<HouseInfo, HouseRecord>,
}

impl FoundHouses {
    pub fn len(&self) -> usize {
        self.houses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }

    pub fn contains(&self, house: &HouseInfo) -> bool {
        self.houses.contains_key(house)
    }

    pub fn get(&self, house: &HouseInfo) -> Option<&HouseRecord> {
        self.houses.get(house)
    }

    pub fn get_mut(&mut self, house: &HouseInfo) -> Option<&mut HouseRecord> {
        self.houses.get_mut(house)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HouseInfo, &HouseRecord)> + '_ {
        self.houses.iter()
    }

    /// New, or seen before but not explored yet.
    pub fn is_unexplored(&self, house: &HouseInfo) -> bool {
        self.houses.get(house).map_or(true, |r| !r.explored)
    }

    /// Record a sighting from `position`. Unexplored houses get their entrance moved to
    /// `position`; explored ones are left alone. Returns whether the house is still unexplored.
    pub fn register(&mut self, house: HouseInfo, position: Vec2) -> bool {
        let record = self.houses.entry(house).or_insert_with(|| HouseRecord {
            entrance: position,
            ..HouseRecord::default()
        });
        if !record.explored {
            record.entrance = position;
        }
        !record.explored
    }

    pub fn remember_items<'a>(&mut self, house: &HouseInfo, items: impl IntoIterator<Item = &'a ItemInfo>) {
        if let Some(record) = self.houses.get_mut(house) {
            record.known_items.extend(items.into_iter().copied());
        }
    }

    /// A new wave: every house needs exploring again.
    pub fn reset_explored(&mut self) {
        for record in self.houses.values_mut() {
            record.explored = false;
        }
    }
}

/// The agent's own bookkeeping of the host inventory: exactly [`INVENTORY_SLOTS`] slots, empty
/// slots hold garbage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inventory {
    slots: [ItemInfo; INVENTORY_SLOTS],
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: [ItemInfo::GARBAGE; INVENTORY_SLOTS],
        }
    }
}

impl Inventory {
    pub fn slots(&self) -> &[ItemInfo; INVENTORY_SLOTS] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&ItemInfo> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut ItemInfo> {
        self.slots.get_mut(index)
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(ItemInfo::is_garbage)
    }

    pub fn has_space(&self) -> bool {
        self.first_empty().is_some()
    }

    /// First slot holding an item of `item_type`.
    pub fn find(&self, item_type: ItemType) -> Option<usize> {
        self.slots.iter().position(|i| i.item_type == item_type)
    }

    pub fn contains_hash(&self, hash: i32) -> bool {
        self.slots.iter().any(|i| i.hash == hash)
    }

    /// Overwrite a slot. Out-of-range indices are ignored and reported as `false`.
    pub fn set(&mut self, index: usize, item: ItemInfo) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, index: usize) -> bool {
        self.set(index, ItemInfo::GARBAGE)
    }

    pub fn empty_count(&self) -> usize {
        self.slots.iter().filter(|i| i.is_garbage()).count()
    }
}

/// Time spent running without an enemy in sight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeTimer {
    pub elapsed: f32,
    pub threshold: f32,
}

impl EscapeTimer {
    pub fn new(threshold: f32) -> Self {
        Self {
            elapsed: 0.0,
            threshold,
        }
    }

    pub fn expired(&self) -> bool {
        self.elapsed > self.threshold
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TourPoint {
    pub visited: bool,
    pub position: Vec2,
}

/// Four-corner patrol of a house interior, walked in order: (-x,-y), (+x,-y), (+x,+y), (-x,+y).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InHousePath {
    points: [TourPoint; 4],
}

impl InHousePath {
    pub fn around(house: &HouseInfo, inset: f32) -> Self {
        let (min, max) = (house.min(), house.max());
        let (left, right) = (min.x + inset, max.x - inset);
        let (bottom, top) = (min.y + inset, max.y - inset);
        let corner = |x, y| TourPoint {
            visited: false,
            position: Vec2::new(x, y),
        };
        Self {
            points: [
                corner(left, bottom),
                corner(right, bottom),
                corner(right, top),
                corner(left, top),
            ],
        }
    }

    pub fn points(&self) -> &[TourPoint; 4] {
        &self.points
    }

    pub fn next_unvisited(&self) -> Option<&TourPoint> {
        self.points.iter().find(|p| !p.visited)
    }

    pub fn next_unvisited_mut(&mut self) -> Option<&mut TourPoint> {
        self.points.iter_mut().find(|p| !p.visited)
    }

    pub fn is_complete(&self) -> bool {
        self.points.iter().all(|p| p.visited)
    }

    pub fn polygon(&self) -> [Vec2; 4] {
        self.points.map(|p| p.position)
    }

    pub fn mark_all(&mut self, visited: bool) {
        for p in self.points.iter_mut() {
            p.visited = visited;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> HouseInfo {
        HouseInfo::new(Vec2::new(10.0, 20.0), Vec2::new(20.0, 30.0))
    }

    #[test]
    fn register_keeps_explored_entrances() {
        let mut found = FoundHouses::default();
        assert!(found.register(house(), Vec2::new(0.0, 0.0)));
        assert!(found.register(house(), Vec2::new(1.0, 1.0)));
        assert_eq!(found.get(&house()).unwrap().entrance, Vec2::new(1.0, 1.0));

        found.get_mut(&house()).unwrap().explored = true;
        assert!(!found.register(house(), Vec2::new(5.0, 5.0)));
        assert_eq!(found.get(&house()).unwrap().entrance, Vec2::new(1.0, 1.0));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn wave_reset_marks_everything_unexplored() {
        let mut found = FoundHouses::default();
        found.register(house(), Vec2::ZERO);
        found.get_mut(&house()).unwrap().explored = true;
        assert!(!found.is_unexplored(&house()));

        found.reset_explored();
        assert!(found.is_unexplored(&house()));
    }

    #[test]
    fn tour_corners_are_inset_counter_clockwise() {
        let path = InHousePath::around(&house(), 4.5);
        assert_eq!(
            path.polygon(),
            [
                Vec2::new(4.5, 9.5),
                Vec2::new(15.5, 9.5),
                Vec2::new(15.5, 30.5),
                Vec2::new(4.5, 30.5),
            ]
        );
        assert!(!path.is_complete());
    }

    #[test]
    fn inventory_slots_never_change_count() {
        let mut inv = Inventory::default();
        assert_eq!(inv.empty_count(), INVENTORY_SLOTS);

        let pistol = ItemInfo::new(ItemType::Pistol, Vec2::ZERO, 3, 4);
        assert!(inv.set(2, pistol));
        assert!(!inv.set(INVENTORY_SLOTS, pistol));
        assert_eq!(inv.find(ItemType::Pistol), Some(2));
        assert_eq!(inv.first_empty(), Some(0));
        assert_eq!(inv.empty_count() + 1, INVENTORY_SLOTS);

        assert!(inv.clear(2));
        assert_eq!(inv.slots().len(), INVENTORY_SLOTS);
        assert_eq!(inv.empty_count(), INVENTORY_SLOTS);
    }

    #[test]
    fn escape_timer_expires_strictly_after_threshold() {
        let mut timer = EscapeTimer::new(3.0);
        timer.elapsed = 3.0;
        assert!(!timer.expired());
        timer.elapsed = 3.1;
        assert!(timer.expired());
        timer.reset();
        assert_eq!(timer.elapsed, 0.0);
    }
}
