//! Panel event catalog shared by the sequencers and host tooling.
//!
//! The original driver narrated every GPIO transition and DSI write through
//! the kernel log. Here the same observability is a typed event stream: the
//! power and init executors report into an [`EventSink`], and consumers
//! (emulator transcript, diagnostics channels, tests) decide how to render
//! or store the events.

use core::fmt;
use core::time::Duration;

use heapless::Vec;

use crate::lifecycle::LifecycleState;
use crate::lines::{LineId, LineLevel};

/// Discriminated events emitted while sequencing the panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PanelEvent {
    /// A control line was driven to a new level.
    LineSet { line: LineId, level: LineLevel },
    /// The sequencer blocked for a mandated hold.
    Held { requested: Duration },
    /// A command record was transmitted successfully.
    CommandSent { opcode: u8, len: usize },
    /// A command record transmission failed at the transport.
    CommandFailed { opcode: u8 },
    /// The lifecycle state machine advanced.
    StateChanged {
        from: LifecycleState,
        to: LifecycleState,
    },
}

impl fmt::Display for PanelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelEvent::LineSet { line, level } => {
                let level = match level {
                    LineLevel::Low => "low",
                    LineLevel::High => "high",
                };
                write!(f, "line-set {line} {level}")
            }
            PanelEvent::Held { requested } => write!(f, "held {}ms", requested.as_millis()),
            PanelEvent::CommandSent { opcode, len } => {
                write!(f, "command-sent {opcode:#04x} ({len} bytes)")
            }
            PanelEvent::CommandFailed { opcode } => write!(f, "command-failed {opcode:#04x}"),
            PanelEvent::StateChanged { from, to } => write!(f, "state {from} -> {to}"),
        }
    }
}

/// Consumer of sequencing events.
pub trait EventSink {
    /// Records one event. Implementations must not block the sequencer.
    fn record(&mut self, event: PanelEvent);
}

/// Sink that discards every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl NullSink {
    /// Creates a new discarding sink.
    pub const fn new() -> Self {
        Self
    }
}

impl EventSink for NullSink {
    fn record(&mut self, _: PanelEvent) {}
}

/// Bounded in-memory event recorder for `no_std` consumers and tests.
#[derive(Clone, Debug, Default)]
pub struct EventLog<const CAPACITY: usize> {
    events: Vec<PanelEvent, CAPACITY>,
    dropped: usize,
}

impl<const CAPACITY: usize> EventLog<CAPACITY> {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            dropped: 0,
        }
    }

    /// Returns the recorded events in arrival order.
    pub fn events(&self) -> &[PanelEvent] {
        &self.events
    }

    /// Number of events that did not fit in the buffer.
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Clears the log and the drop counter.
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    /// Counts recorded events matching a predicate.
    pub fn count_matching(&self, mut predicate: impl FnMut(&PanelEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}

impl<const CAPACITY: usize> EventSink for EventLog<CAPACITY> {
    fn record(&mut self, event: PanelEvent) {
        if self.events.push(event).is_err() {
            self.dropped += 1;
        }
    }
}

impl<L, R> EventSink for (&mut L, &mut R)
where
    L: EventSink,
    R: EventSink,
{
    fn record(&mut self, event: PanelEvent) {
        self.0.record(event);
        self.1.record(event);
    }
}
