use survivor_core::{Blackboard, TickContext};

use crate::bt::{BtNode, BtStatus};

/// Owns a root node and ticks it once per frame.
pub struct BehaviorTree<W>
where
    W: 'static,
{
    root: Box<dyn BtNode<W>>,
    last: BtStatus,
}

impl<W> BehaviorTree<W>
where
    W: 'static,
{
    pub fn new(root: Box<dyn BtNode<W>>) -> Self {
        Self {
            root,
            last: BtStatus::Failure,
        }
    }

    /// Status of the most recent tick; `Failure` before the first one.
    pub fn last_status(&self) -> BtStatus {
        self.last
    }

    pub fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        self.last = self.root.tick(ctx, world, blackboard);
        if self.last != BtStatus::Running {
            self.root.reset();
        }
        self.last
    }
}
