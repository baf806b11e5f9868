//! Steering behaviours for the survival agent.
//!
//! Every behaviour maps the agent's state plus a target into a [`SteeringOutput`]:
//! - Seek: straight at the target
//! - Flee: away from the target while facing it
//! - Arrive: toward the target, slowing down inside a radius
//! - Pursuit / Evade: toward / away from where a moving target will be
//! - Wander: toward a drifting point on a circle ahead of the agent
//!
//! Destinations always go through the caller's [`NavProjection`] first.
//!
//! [`SteeringOutput`]: survivor_core::SteeringOutput
//! [`NavProjection`]: survivor_core::NavProjection

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod behavior;
pub mod behaviors;
pub mod combine;
pub mod set;

pub use behavior::{orient_to, SteeringBehavior, TargetData};
pub use behaviors::{Arrive, Evade, Flee, Pursuit, Seek, Wander};
pub use combine::{BlendedSteering, PrioritySteering};
pub use set::{SteeringKind, SteeringSet};
