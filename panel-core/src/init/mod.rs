//! Command-bus abstraction and init-sequence executor.
//!
//! Controller configuration travels as opaque byte records over a
//! write-only DSI link. The vendor init table lives in [`table`] as static
//! data; this module owns the [`CommandBus`] seam and the executor that
//! replays a table in strict order, failing fast on the first transport
//! error. There is no retry and no rollback: after a failure the physical
//! panel state is indeterminate and only the caller can decide what to do.

use core::fmt;
use core::time::Duration;

use crate::lines::Delay;
use crate::telemetry::{EventSink, PanelEvent};

pub mod table;

pub use table::{DISPLAY_OFF, ENTER_SLEEP, INIT_SEQUENCE};

/// ST7703 command opcodes used by the BV055HDE vendor sequence.
pub mod opcode {
    pub const NOP: u8 = 0x00;
    pub const SLEEPIN: u8 = 0x10;
    pub const SLEEPOUT: u8 = 0x11;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const SETRSO: u8 = 0xB2;
    pub const SETRGB: u8 = 0xB3;
    pub const SETCYC: u8 = 0xB4;
    pub const SETBGP: u8 = 0xB5;
    pub const SETVCOM: u8 = 0xB6;
    pub const SETECP: u8 = 0xB8;
    pub const SETEXTC: u8 = 0xB9;
    pub const SETMIPI: u8 = 0xBA;
    pub const SETVDC: u8 = 0xBC;
    pub const SETPCR: u8 = 0xBF;
    pub const SETSCR: u8 = 0xC0;
    pub const SETPOWER: u8 = 0xC1;
    pub const SETPANEL: u8 = 0xCC;
    pub const SETGAMMA: u8 = 0xE0;
    pub const SETEQ: u8 = 0xE3;
    pub const SETGIP1: u8 = 0xE9;
    pub const SETGIP2: u8 = 0xEA;
}

/// One immutable controller command: opcode byte followed by parameters,
/// plus the hold mandated after a successful transmission.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CommandRecord {
    pub name: &'static str,
    /// Full wire payload; the first byte is the opcode.
    pub bytes: &'static [u8],
    /// Hold applied after the write completes. Zero means none.
    pub post_delay: Duration,
}

impl CommandRecord {
    pub const fn new(name: &'static str, bytes: &'static [u8], post_delay: Duration) -> Self {
        Self {
            name,
            bytes,
            post_delay,
        }
    }

    /// The controller opcode carried in the first byte.
    pub fn opcode(&self) -> u8 {
        self.bytes.first().copied().unwrap_or(opcode::NOP)
    }

    /// Total wire length including the opcode byte.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for a record with no payload at all.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Abstraction over the write-only command link to the controller.
///
/// One call transmits one opaque byte sequence. Implementations must not
/// retry internally; the lifecycle layer owns failure policy.
pub trait CommandBus {
    /// Transport-specific error type.
    type Error;

    /// Transmits the byte sequence, returning once it is on the wire.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Identifies the first record that failed during a table replay.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TransportFailure<E> {
    /// Zero-based index into the table being replayed.
    pub index: usize,
    pub opcode: u8,
    pub source: E,
}

impl<E: fmt::Display> fmt::Display for TransportFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record #{} (opcode {:#04x}) failed: {}",
            self.index, self.opcode, self.source
        )
    }
}

/// Transmits a single record, honoring its post-transmission hold.
///
/// The hold only applies after a successful write; a failed record
/// surfaces immediately.
pub fn send_record<B, D, S>(
    record: &CommandRecord,
    bus: &mut B,
    delay: &mut D,
    sink: &mut S,
) -> Result<(), B::Error>
where
    B: CommandBus,
    D: Delay,
    S: EventSink,
{
    match bus.write(record.bytes) {
        Ok(()) => {
            sink.record(PanelEvent::CommandSent {
                opcode: record.opcode(),
                len: record.len(),
            });
        }
        Err(err) => {
            sink.record(PanelEvent::CommandFailed {
                opcode: record.opcode(),
            });
            return Err(err);
        }
    }

    if !record.post_delay.is_zero() {
        delay.hold_for(record.post_delay);
        sink.record(PanelEvent::Held {
            requested: record.post_delay,
        });
    }

    Ok(())
}

/// Replays the vendor init table in strict order.
///
/// Aborts on the first transport error with the index and opcode of the
/// failing record. Success means every record went out; there is no
/// partial-success representation.
pub fn run_init_sequence<B, D, S>(
    bus: &mut B,
    delay: &mut D,
    sink: &mut S,
) -> Result<(), TransportFailure<B::Error>>
where
    B: CommandBus,
    D: Delay,
    S: EventSink,
{
    for (index, record) in INIT_SEQUENCE.iter().enumerate() {
        send_record(record, bus, delay, sink).map_err(|source| TransportFailure {
            index,
            opcode: record.opcode(),
            source,
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::NullSink;

    struct NullDelay;

    impl Delay for NullDelay {
        fn hold_for(&mut self, _: Duration) {}
    }

    struct FlakyBus {
        fail_at: Option<usize>,
        writes: usize,
    }

    impl CommandBus for FlakyBus {
        type Error = &'static str;

        fn write(&mut self, _: &[u8]) -> Result<(), Self::Error> {
            let current = self.writes;
            self.writes += 1;
            if self.fail_at == Some(current) {
                Err("nak")
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn full_replay_sends_every_record() {
        let mut bus = FlakyBus {
            fail_at: None,
            writes: 0,
        };
        let mut sink = NullSink::new();

        run_init_sequence(&mut bus, &mut NullDelay, &mut sink).expect("replay should succeed");
        assert_eq!(bus.writes, INIT_SEQUENCE.len());
    }

    #[test]
    fn replay_aborts_on_first_failure() {
        let mut bus = FlakyBus {
            fail_at: Some(3),
            writes: 0,
        };
        let mut sink = NullSink::new();

        let failure = run_init_sequence(&mut bus, &mut NullDelay, &mut sink)
            .expect_err("replay should fail");

        assert_eq!(failure.index, 3);
        assert_eq!(failure.opcode, INIT_SEQUENCE[3].opcode());
        assert_eq!(failure.source, "nak");
        // Nothing after the failing record was attempted.
        assert_eq!(bus.writes, 4);
    }
}
