//! External power toggle surface.
//!
//! The legacy driver exposed a process-wide 0/1 attribute backed by a
//! global shadow flag and a single static panel pointer. Here the surface
//! is a [`PowerSwitch`] borrowing one specific [`Panel`]: writes parse the
//! text the host hands us and drive the lifecycle operations, reads derive
//! the answer from the authoritative lifecycle state. A failed enable
//! therefore reads back as 0 instead of lying.

use core::fmt;

use winnow::ModalResult;
use winnow::ascii::Caseless;
use winnow::combinator::alt;
use winnow::prelude::*;

use crate::init::CommandBus;
use crate::lifecycle::{DisableError, EnableError, LifecycleState, Panel};
use crate::lines::{ControlLines, Delay};
use crate::telemetry::EventSink;

/// Parsed toggle request.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwitchRequest {
    On,
    Off,
}

impl SwitchRequest {
    /// The flag value the request writes: 1 for on, 0 for off.
    pub const fn as_flag(self) -> u8 {
        match self {
            SwitchRequest::On => 1,
            SwitchRequest::Off => 0,
        }
    }
}

/// The written value was not a recognized toggle token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct RequestParseError;

impl fmt::Display for RequestParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected 0, 1, off, or on")
    }
}

/// Failures surfaced through the toggle surface.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TriggerError<E> {
    Parse(RequestParseError),
    Enable(EnableError<E>),
    Disable(DisableError<E>),
}

impl<E: fmt::Display> fmt::Display for TriggerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerError::Parse(err) => err.fmt(f),
            TriggerError::Enable(err) => err.fmt(f),
            TriggerError::Disable(err) => err.fmt(f),
        }
    }
}

fn switch_value(input: &mut &str) -> ModalResult<SwitchRequest> {
    alt((
        "1".value(SwitchRequest::On),
        "0".value(SwitchRequest::Off),
        Caseless("on").value(SwitchRequest::On),
        Caseless("off").value(SwitchRequest::Off),
    ))
    .parse_next(input)
}

/// Parses one written toggle value.
///
/// Accepts the legacy numeric forms plus `on`/`off` aliases, with
/// surrounding whitespace ignored.
pub fn parse_request(line: &str) -> Result<SwitchRequest, RequestParseError> {
    switch_value
        .parse(line.trim())
        .map_err(|_| RequestParseError)
}

/// Toggle surface bound to one panel handle.
pub struct PowerSwitch<'a, L, B, D, S> {
    panel: &'a mut Panel<L, B, D, S>,
}

impl<'a, L, B, D, S> PowerSwitch<'a, L, B, D, S>
where
    L: ControlLines,
    B: CommandBus,
    D: Delay,
    S: EventSink,
{
    /// Binds the toggle to a panel. Many switches may exist over a panel's
    /// lifetime; only one may borrow it at a time.
    pub fn new(panel: &'a mut Panel<L, B, D, S>) -> Self {
        Self { panel }
    }

    /// Handles one written value, driving the panel accordingly.
    pub fn write(&mut self, line: &str) -> Result<SwitchRequest, TriggerError<B::Error>> {
        let request = parse_request(line).map_err(TriggerError::Parse)?;
        self.apply(request)?;
        Ok(request)
    }

    /// Applies an already-parsed request.
    ///
    /// `On` runs `prepare()` then `enable()`. `Off` runs `disable()` then
    /// the idempotent `unprepare()`; a NotPrepared rejection from
    /// `disable()` just means the panel was already off and is not an
    /// error here. A transport failure during display-off still tears the
    /// power down before being reported.
    pub fn apply(&mut self, request: SwitchRequest) -> Result<(), TriggerError<B::Error>> {
        match request {
            SwitchRequest::On => {
                self.panel.prepare();
                self.panel.enable().map_err(TriggerError::Enable)
            }
            SwitchRequest::Off => {
                let result = match self.panel.disable() {
                    Ok(()) | Err(DisableError::NotPrepared) => Ok(()),
                    Err(err) => Err(TriggerError::Disable(err)),
                };
                self.panel.unprepare();
                result
            }
        }
    }

    /// Reads the flag back from the authoritative lifecycle state.
    pub fn read(&self) -> u8 {
        u8::from(self.panel.state() == LifecycleState::Enabled)
    }
}
