use survivor_core::{Blackboard, TickContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BtStatus {
    Running,
    Success,
    Failure,
}

/// A node ticked against a host `W` and the shared blackboard.
pub trait BtNode<W>: 'static
where
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus;

    /// Forget any in-progress bookkeeping (resume indices, running children).
    fn reset(&mut self);
}
