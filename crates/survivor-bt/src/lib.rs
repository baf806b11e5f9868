//! Behavior Tree runtime built on `survivor-core`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod nodes;
pub mod tree;

pub use bt::{BtNode, BtStatus};
pub use nodes::{Action, Condition, PartialSequence, Selector, Sequence};
pub use tree::BehaviorTree;
