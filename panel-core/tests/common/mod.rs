//! Host-side mocks shared by the integration tests.

use core::time::Duration;

use panel_core::init::CommandBus;
use panel_core::lines::{ControlLines, Delay, LineId, LineLevel};

/// Transport error reported by [`ScriptedBus`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BusError;

/// Command bus that records every write and can fail a scripted attempt.
#[derive(Default)]
pub struct ScriptedBus {
    pub writes: Vec<Vec<u8>>,
    /// Zero-based write attempt that should fail, if any.
    pub fail_at: Option<usize>,
    attempts: usize,
}

impl ScriptedBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Self::default()
        }
    }
}

impl CommandBus for ScriptedBus {
    type Error = BusError;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            return Err(BusError);
        }
        self.writes.push(bytes.to_vec());
        Ok(())
    }
}

/// Line driver that records every transition.
#[derive(Default)]
pub struct RecordingLines {
    pub transitions: Vec<(LineId, LineLevel)>,
}

impl RecordingLines {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ControlLines for RecordingLines {
    fn set(&mut self, line: LineId, level: LineLevel) {
        self.transitions.push((line, level));
    }
}

/// Delay source that records the requested holds instead of sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    pub holds: Vec<Duration>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Delay for RecordingDelay {
    fn hold_for(&mut self, duration: Duration) {
        self.holds.push(duration);
    }
}
