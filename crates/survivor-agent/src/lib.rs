//! The survival agent built on the `survivor-*` primitives.
//!
//! One [`AgentController`] drives one agent. Every frame it:
//! 1. copies the host's snapshot (agent, field of view, world stats) onto the blackboard
//! 2. ticks the exploration [`StateMachine`](survivor_fsm::StateMachine), which writes the
//!    steering command
//! 3. ticks the inventory triage tree, which shoots, heals and eats as side effects
//! 4. returns the steering command
//!
//! Everything the agent remembers between frames lives on the blackboard under the slots in
//! [`keys`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod conditions;
pub mod config;
pub mod context;
pub mod controller;
pub mod debug;
pub mod inventory;
pub mod keys;
pub mod memory;
pub mod states;
pub mod trace;

pub use conditions::{exploration_machine, Guard};
pub use config::{AgentConfig, ExplorationConfig, InventoryConfig, SteeringConfig};
pub use context::FsmContext;
pub use controller::AgentController;
pub use debug::{Color, DebugShape};
pub use inventory::{check_food, check_healing, check_shooting, inventory_tree};
pub use memory::{EscapeTimer, FoundHouses, HouseRecord, InHousePath, Inventory, TourPoint};
pub use states::{zone_escape_point, ExplorationState};
pub use trace::{TraceEvent, TraceLog, TRACE_LOG};
