//! Panel lifecycle state machine.
//!
//! One [`Panel`] value is the handle for one physical panel. It exclusively
//! owns the control lines, the command bus, and the delay source, and it is
//! the only mutator of the lifecycle state. Callers must serialize the four
//! lifecycle operations externally (a mutex around the handle is enough);
//! the handle itself performs no locking and every operation blocks until
//! its choreography finishes.

use core::fmt;

use crate::init::{
    self, CommandBus, DISPLAY_OFF, ENTER_SLEEP, TransportFailure, run_init_sequence, send_record,
};
use crate::lines::{ControlLines, Delay};
use crate::mode::{self, TimingSpec};
use crate::power::{POWER_DOWN_TEMPLATE, POWER_UP_TEMPLATE, run_power_sequence};
use crate::telemetry::{EventSink, NullSink, PanelEvent};

/// How far the panel has progressed through power and command init.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum LifecycleState {
    /// Rails down, reset asserted. Initial state.
    Unpowered,
    /// Power-up choreography complete; the bus may be used.
    Prepared,
    /// Init sequence fully transmitted.
    Enabled,
}

impl LifecycleState {
    /// Returns `true` once the power-up choreography has run.
    pub const fn is_powered(self) -> bool {
        !matches!(self, LifecycleState::Unpowered)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecycleState::Unpowered => "unpowered",
            LifecycleState::Prepared => "prepared",
            LifecycleState::Enabled => "enabled",
        })
    }
}

/// Failure surfaced by [`Panel::enable`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EnableError<E> {
    /// `prepare()` has not run; nothing was transmitted.
    NotPrepared,
    /// A record in the init table failed; the physical panel state is
    /// indeterminate and the lifecycle state remains `Prepared`.
    Transport(TransportFailure<E>),
}

impl<E: fmt::Display> fmt::Display for EnableError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnableError::NotPrepared => f.write_str("panel is not prepared"),
            EnableError::Transport(failure) => write!(f, "init sequence aborted: {failure}"),
        }
    }
}

/// Failure surfaced by [`Panel::disable`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DisableError<E> {
    /// The panel is unpowered; a display-off write would hit dead hardware.
    NotPrepared,
    /// The display-off write failed at the transport.
    Transport(E),
}

impl<E: fmt::Display> fmt::Display for DisableError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisableError::NotPrepared => f.write_str("panel is not prepared"),
            DisableError::Transport(err) => write!(f, "display-off write failed: {err}"),
        }
    }
}

/// Owned handle for one physical BV055HDE panel.
pub struct Panel<L, B, D, S = NullSink> {
    lines: L,
    bus: B,
    delay: D,
    sink: S,
    state: LifecycleState,
}

impl<L, B, D> Panel<L, B, D>
where
    L: ControlLines,
    B: CommandBus,
    D: Delay,
{
    /// Creates an unpowered handle that discards telemetry.
    pub fn new(lines: L, bus: B, delay: D) -> Self {
        Self::with_sink(lines, bus, delay, NullSink::new())
    }
}

impl<L, B, D, S> Panel<L, B, D, S>
where
    L: ControlLines,
    B: CommandBus,
    D: Delay,
    S: EventSink,
{
    /// Creates an unpowered handle reporting into the provided sink.
    pub fn with_sink(lines: L, bus: B, delay: D, sink: S) -> Self {
        Self {
            lines,
            bus,
            delay,
            sink,
            state: LifecycleState::Unpowered,
        }
    }

    /// The authoritative lifecycle state.
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// The fixed mode descriptor for the host framework.
    pub const fn preferred_mode(&self) -> TimingSpec {
        mode::preferred_mode()
    }

    /// Runs the power-up choreography once.
    ///
    /// Idempotent: a prepared or enabled panel is left untouched. Cannot
    /// fail; control-line operations are modeled as unconditional.
    pub fn prepare(&mut self) {
        if self.state.is_powered() {
            return;
        }

        run_power_sequence(
            &POWER_UP_TEMPLATE,
            &mut self.lines,
            &mut self.delay,
            &mut self.sink,
        );
        self.transition(LifecycleState::Prepared);
    }

    /// Replays the vendor init table, driving the panel to a displaying
    /// state.
    ///
    /// Requires `prepare()` first. Not idempotence-guarded: calling it on
    /// an enabled panel resends the full table, which the controller
    /// treats as a fresh reconfiguration. On failure the lifecycle state
    /// stays `Prepared` and the error names the failing record; a retry
    /// must resend from the start.
    pub fn enable(&mut self) -> Result<(), EnableError<B::Error>> {
        if !self.state.is_powered() {
            return Err(EnableError::NotPrepared);
        }

        run_init_sequence(&mut self.bus, &mut self.delay, &mut self.sink)
            .map_err(EnableError::Transport)?;

        if self.state != LifecycleState::Enabled {
            self.transition(LifecycleState::Enabled);
        }
        Ok(())
    }

    /// Sends the display-off directive.
    ///
    /// Gated on the panel being powered: the legacy driver allowed this
    /// write against a powered-down panel, which we treat as a caller bug.
    /// Never changes the lifecycle state, and every call resends.
    pub fn disable(&mut self) -> Result<(), DisableError<B::Error>> {
        if !self.state.is_powered() {
            return Err(DisableError::NotPrepared);
        }

        send_record(&DISPLAY_OFF, &mut self.bus, &mut self.delay, &mut self.sink)
            .map_err(DisableError::Transport)
    }

    /// Puts the controller to sleep and cuts power.
    ///
    /// Idempotent: an unpowered panel is left untouched. The sleep-in
    /// write is best effort; if the transport rejects it the teardown
    /// still observes the quiet time and powers off, mirroring the vendor
    /// bring-down which never checked that write.
    pub fn unprepare(&mut self) {
        if !self.state.is_powered() {
            return;
        }

        if send_record(&ENTER_SLEEP, &mut self.bus, &mut self.delay, &mut self.sink).is_err() {
            self.delay.hold_for(init::table::SLEEP_IN_SETTLE);
            self.sink.record(PanelEvent::Held {
                requested: init::table::SLEEP_IN_SETTLE,
            });
        }

        run_power_sequence(
            &POWER_DOWN_TEMPLATE,
            &mut self.lines,
            &mut self.delay,
            &mut self.sink,
        );
        self.transition(LifecycleState::Unpowered);
    }

    /// Consumes the handle and returns the owned resources.
    pub fn into_parts(self) -> (L, B, D, S) {
        (self.lines, self.bus, self.delay, self.sink)
    }

    fn transition(&mut self, to: LifecycleState) {
        self.sink.record(PanelEvent::StateChanged {
            from: self.state,
            to,
        });
        self.state = to;
    }
}
