//! Deterministic, engine-agnostic primitives for the survival agent: math, the shared
//! blackboard, per-frame world snapshots and the host query traits.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod entities;
pub mod math;
pub mod nav;
pub mod rng;
pub mod tick;
pub mod world;

pub use blackboard::{BbKey, Blackboard, BlackboardError};
pub use entities::{
    AgentInfo, EnemyInfo, EnemyType, FovStats, HouseInfo, ItemInfo, ItemType, PurgeZoneInfo,
    SteeringOutput, WorldInfo, WorldStats,
};
pub use math::{angle_between, are_equal, wrap_angle, Vec2, EPSILON};
pub use nav::{NavProjection, OpenField, RectBounds};
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
pub use world::{WorldMut, WorldView, INVENTORY_SLOTS};
