//! Table-driven finite-state machine.
//!
//! States and guards are small `Copy` enums that implement [`FsmState`] / [`FsmCondition`] for
//! some context type `C`. The machine itself only stores which state is current and, per source
//! state, the guarded transitions in the order they were registered. The context is lent to the
//! machine on every call, so it may borrow freely (world, blackboard, steering).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod machine;

pub use machine::{FsmCondition, FsmState, StateMachine, Transition};
