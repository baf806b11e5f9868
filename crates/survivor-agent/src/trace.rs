use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use survivor_core::{BbKey, Blackboard};

/// A small decision-trace record: what happened, on which frame, with two numeric payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            a: 0,
            b: 0,
        }
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }
}

/// Install with `blackboard.add(TRACE_LOG, TraceLog::default())` to start recording.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::new("TraceLog");

pub const TAG_TRANSITION: &str = "fsm.transition";
pub const TAG_ITEM_USED: &str = "inventory.use";
pub const TAG_ITEM_PICKED: &str = "inventory.pickup";
pub const TAG_WAVE_RESET: &str = "world.wave";

/// Record `event` if a trace log is installed; silently drop it otherwise.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if !blackboard.contains(TRACE_LOG) {
        return;
    }
    if let Ok(log) = blackboard.get_mut(TRACE_LOG) {
        log.push(event);
    }
}
