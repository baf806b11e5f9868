use survivor_core::{Blackboard, TickContext};

use crate::bt::{BtNode, BtStatus};

/// Ticks children from the first one every time and stops at the first non-`Success`.
///
/// An empty sequence succeeds.
pub struct Sequence<W>
where
    W: 'static,
{
    children: Vec<Box<dyn BtNode<W>>>,
    running: Option<usize>,
}

impl<W> Sequence<W>
where
    W: 'static,
{
    pub fn new(children: Vec<Box<dyn BtNode<W>>>) -> Self {
        Self {
            children,
            running: None,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<W> BtNode<W> for Sequence<W>
where
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        for (i, child) in self.children.iter_mut().enumerate() {
            match child.tick(ctx, world, blackboard) {
                BtStatus::Success => continue,
                BtStatus::Failure => {
                    self.reset();
                    return BtStatus::Failure;
                }
                BtStatus::Running => {
                    track_running(&mut self.children, &mut self.running, i);
                    return BtStatus::Running;
                }
            }
        }

        self.reset();
        BtStatus::Success
    }

    fn reset(&mut self) {
        self.running = None;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

/// Ticks children from the first one every time and stops at the first non-`Failure`.
///
/// An empty selector fails.
pub struct Selector<W>
where
    W: 'static,
{
    children: Vec<Box<dyn BtNode<W>>>,
    running: Option<usize>,
}

impl<W> Selector<W>
where
    W: 'static,
{
    pub fn new(children: Vec<Box<dyn BtNode<W>>>) -> Self {
        Self {
            children,
            running: None,
        }
    }
}

impl<W> BtNode<W> for Selector<W>
where
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        for (i, child) in self.children.iter_mut().enumerate() {
            match child.tick(ctx, world, blackboard) {
                BtStatus::Failure => continue,
                BtStatus::Success => {
                    self.reset();
                    return BtStatus::Success;
                }
                BtStatus::Running => {
                    track_running(&mut self.children, &mut self.running, i);
                    return BtStatus::Running;
                }
            }
        }

        self.reset();
        BtStatus::Failure
    }

    fn reset(&mut self) {
        self.running = None;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

/// A running child that differs from last tick's preempts it: the old one is reset.
fn track_running<W: 'static>(
    children: &mut [Box<dyn BtNode<W>>],
    running: &mut Option<usize>,
    now: usize,
) {
    if *running != Some(now) {
        if let Some(prev) = *running {
            children[prev].reset();
        }
        *running = Some(now);
    }
}

/// Sequence with memory: a child that returns `Running` is resumed directly on the next tick,
/// skipping the children before it. Any other outcome starts over from the first child.
pub struct PartialSequence<W>
where
    W: 'static,
{
    children: Vec<Box<dyn BtNode<W>>>,
    index: usize,
}

impl<W> PartialSequence<W>
where
    W: 'static,
{
    pub fn new(children: Vec<Box<dyn BtNode<W>>>) -> Self {
        Self { children, index: 0 }
    }

    /// Child that will be ticked first next time.
    pub fn resume_index(&self) -> usize {
        self.index
    }
}

impl<W> BtNode<W> for PartialSequence<W>
where
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx, world, blackboard) {
                BtStatus::Running => return BtStatus::Running,
                BtStatus::Failure => {
                    self.reset();
                    return BtStatus::Failure;
                }
                BtStatus::Success => self.index += 1,
            }
        }

        self.reset();
        BtStatus::Success
    }

    fn reset(&mut self) {
        self.index = 0;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

/// Predicate leaf: `true` is `Success`, `false` is `Failure`.
pub struct Condition<F> {
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<F, W> BtNode<W> for Condition<F>
where
    F: FnMut(&TickContext, &W, &Blackboard) -> bool + 'static,
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        if (self.cond)(ctx, &*world, &*blackboard) {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }

    fn reset(&mut self) {}
}

/// Leaf that runs an arbitrary effect against the host and blackboard.
pub struct Action<F> {
    run: F,
}

impl<F> Action<F> {
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<F, W> BtNode<W> for Action<F>
where
    F: FnMut(&TickContext, &mut W, &mut Blackboard) -> BtStatus + 'static,
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) -> BtStatus {
        (self.run)(ctx, world, blackboard)
    }

    fn reset(&mut self) {}
}
