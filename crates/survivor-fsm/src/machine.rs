use std::collections::BTreeMap;
use std::fmt::Debug;

pub trait FsmState<C: ?Sized>: Copy + Ord + Debug + 'static {
    fn on_enter(self, _ctx: &mut C) {}

    fn update(self, _ctx: &mut C) {}

    fn on_exit(self, _ctx: &mut C) {}
}

pub trait FsmCondition<C: ?Sized>: Copy + Debug + 'static {
    fn evaluate(self, ctx: &C) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S, G> {
    pub from: S,
    pub to: S,
    pub guard: G,
}

#[derive(Debug, Clone)]
pub struct StateMachine<S, G> {
    current: S,
    started: bool,
    table: BTreeMap<S, Vec<(G, S)>>,
}

impl<S, G> StateMachine<S, G>
where
    S: Copy + Ord + Debug,
    G: Copy + Debug,
{
    pub fn new(start: S) -> Self {
        Self {
            current: start,
            started: false,
            table: BTreeMap::new(),
        }
    }

    /// Register `from -> to` guarded by `guard`. Guards of one state are evaluated in
    /// registration order and the first one that holds wins.
    pub fn add_transition(&mut self, from: S, to: S, guard: G) -> &mut Self {
        self.table.entry(from).or_default().push((guard, to));
        self
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn at_state(&self, state: S) -> bool {
        self.current == state
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Outgoing transitions of `state` in evaluation order.
    pub fn transitions_from(&self, state: S) -> impl Iterator<Item = Transition<S, G>> + '_ {
        self.table
            .get(&state)
            .into_iter()
            .flatten()
            .map(move |&(guard, to)| Transition {
                from: state,
                to,
                guard,
            })
    }

    /// The whole table, grouped by source state.
    pub fn transitions(&self) -> impl Iterator<Item = Transition<S, G>> + '_ {
        self.table.iter().flat_map(|(&from, out)| {
            out.iter().map(move |&(guard, to)| Transition { from, to, guard })
        })
    }

    /// Enter the initial state. Does nothing once started.
    pub fn start<C: ?Sized>(&mut self, ctx: &mut C)
    where
        S: FsmState<C>,
    {
        if self.started {
            return;
        }
        self.started = true;
        self.current.on_enter(ctx);
    }

    /// One frame: take at most one transition, then update whichever state is now current.
    pub fn tick<C: ?Sized>(&mut self, ctx: &mut C) -> Option<Transition<S, G>>
    where
        S: FsmState<C>,
        G: FsmCondition<C>,
    {
        self.start(ctx);

        let from = self.current;
        let taken = self
            .table
            .get(&from)
            .and_then(|out| out.iter().find(|(guard, _)| guard.evaluate(ctx)))
            .map(|&(guard, to)| Transition { from, to, guard });

        if let Some(t) = taken {
            tracing::debug!(from = ?t.from, to = ?t.to, guard = ?t.guard, "fsm transition");
            from.on_exit(ctx);
            self.current = t.to;
            t.to.on_enter(ctx);
        }

        self.current.update(ctx);
        taken
    }
}
