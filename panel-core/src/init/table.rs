//! Vendor command sequence for the BV055HDE (ST7703 controller).
//!
//! The table is a fixed protocol transcript supplied by the panel vendor:
//! seventeen register-configuration writes, a long settle, then display-on
//! issued twice around sleep-out. The double DISPON bracketing SLEEPOUT is
//! required by the controller firmware, not a redundancy. Order must never
//! change and the records must never be batched or reordered.

use core::time::Duration;

use super::{CommandRecord, opcode};

/// Settle after the seventeenth register-configuration write.
pub const REGISTER_SETTLE: Duration = Duration::from_millis(250);
/// Hold after the first display-on.
pub const FIRST_DISPON_SETTLE: Duration = Duration::from_millis(50);
/// Hold after sleep-out.
pub const SLEEP_OUT_SETTLE: Duration = Duration::from_millis(100);
/// Hold after the second display-on.
pub const SECOND_DISPON_SETTLE: Duration = Duration::from_millis(200);
/// Quiet time between the sleep-in directive and cutting power.
pub const SLEEP_IN_SETTLE: Duration = Duration::from_millis(150);

/// Number of register-configuration records ahead of the first checkpoint.
pub const CONFIG_RECORD_COUNT: usize = 17;

const SETEXTC: [u8; 4] = [opcode::SETEXTC, 0xF1, 0x12, 0x83];

const SETMIPI: [u8; 28] = [
    opcode::SETMIPI,
    0x33, 0x81, 0x05, 0xF9, 0x0E, 0x0E, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x44, 0x25, 0x00, 0x91, 0x0A, 0x00, 0x00, 0x02, 0x4F, 0xD1,
    0x00, 0x00, 0x37,
];

// Byte 1 selects the power mode: 0x23 IC mode, 0x73 external 3-power.
const SETECP: [u8; 5] = [opcode::SETECP, 0x23, 0x22, 0x20, 0x03];

const SETPCR: [u8; 4] = [opcode::SETPCR, 0x02, 0x11, 0x00];

const SETRGB: [u8; 11] = [
    opcode::SETRGB,
    0x0C, 0x10, 0x0A, 0x50, 0x03, 0xFF, 0x00, 0x00, 0x00, 0x00,
];

const SETSCR: [u8; 10] = [
    opcode::SETSCR,
    0x73, 0x73, 0x50, 0x50, 0x00, 0x00, 0x08, 0x70, 0x00,
];

const SETVDC: [u8; 2] = [opcode::SETVDC, 0x46];

const SETPANEL: [u8; 2] = [opcode::SETPANEL, 0x0B];

const SETCYC: [u8; 2] = [opcode::SETCYC, 0x80];

const SETRSO: [u8; 4] = [opcode::SETRSO, 0xC8, 0x02, 0x30];

const SETEQ: [u8; 15] = [
    opcode::SETEQ,
    0x07, 0x07, 0x0B, 0x0B, 0x03, 0x0B, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x80,
    0xC0, 0x10,
];

const SETPOWER: [u8; 13] = [
    opcode::SETPOWER,
    0x25, 0x00, 0x1E, 0x1E, 0x77, 0xF1, 0xFF, 0xFF, 0xCC, 0xCC, 0x77, 0x77,
];

const SETBGP: [u8; 3] = [opcode::SETBGP, 0x0A, 0x0A];

const SETVCOM: [u8; 3] = [opcode::SETVCOM, 0x50, 0x50];

const SETGIP1: [u8; 64] = [
    opcode::SETGIP1,
    0xC4, 0x10, 0x0F, 0x00, 0x00, 0xB2, 0xB8, 0x12, 0x31, 0x23, 0x48, 0x8B,
    0xB2, 0xB8, 0x47, 0x20, 0x00, 0x00, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x30, 0x00, 0x00, 0x00, 0x02, 0x46, 0x02, 0x88, 0x88, 0x88, 0x88, 0x88,
    0x88, 0x88, 0xF8, 0x13, 0x57, 0x13, 0x88, 0x88, 0x88, 0x88, 0x88, 0x88,
    0x88, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00,
];

const SETGIP2: [u8; 62] = [
    opcode::SETGIP2,
    0x00, 0x1A, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x75, 0x31, 0x31, 0x88, 0x88, 0x88, 0x88, 0x88, 0x88, 0x88, 0x8F, 0x64,
    0x20, 0x20, 0x88, 0x88, 0x88, 0x88, 0x88, 0x88, 0x88, 0x8F, 0x23, 0x10,
    0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00,
];

const SETGAMMA: [u8; 35] = [
    opcode::SETGAMMA,
    0x00, 0x07, 0x0C, 0x2A, 0x38, 0x3F, 0x3B, 0x34, 0x05, 0x0C, 0x10, 0x13,
    0x14, 0x14, 0x15, 0x0D, 0x0B, 0x00, 0x07, 0x0C, 0x2A, 0x38, 0x3F, 0x3B,
    0x34, 0x05, 0x0C, 0x10, 0x13, 0x14, 0x14, 0x15, 0x0D, 0x0B,
];

const SLEEPOUT: [u8; 1] = [opcode::SLEEPOUT];

const DISPON: [u8; 1] = [opcode::DISPON];

/// The full vendor init table, in transmission order.
pub const INIT_SEQUENCE: [CommandRecord; 20] = [
    CommandRecord::new("SETEXTC", &SETEXTC, Duration::ZERO),
    CommandRecord::new("SETMIPI", &SETMIPI, Duration::ZERO),
    CommandRecord::new("SETECP", &SETECP, Duration::ZERO),
    CommandRecord::new("SETPCR", &SETPCR, Duration::ZERO),
    CommandRecord::new("SETRGB", &SETRGB, Duration::ZERO),
    CommandRecord::new("SETSCR", &SETSCR, Duration::ZERO),
    CommandRecord::new("SETVDC", &SETVDC, Duration::ZERO),
    CommandRecord::new("SETPANEL", &SETPANEL, Duration::ZERO),
    CommandRecord::new("SETCYC", &SETCYC, Duration::ZERO),
    CommandRecord::new("SETRSO", &SETRSO, Duration::ZERO),
    CommandRecord::new("SETEQ", &SETEQ, Duration::ZERO),
    CommandRecord::new("SETPOWER", &SETPOWER, Duration::ZERO),
    CommandRecord::new("SETBGP", &SETBGP, Duration::ZERO),
    CommandRecord::new("SETVCOM", &SETVCOM, Duration::ZERO),
    CommandRecord::new("SETGIP1", &SETGIP1, Duration::ZERO),
    CommandRecord::new("SETGIP2", &SETGIP2, Duration::ZERO),
    CommandRecord::new("SETGAMMA", &SETGAMMA, REGISTER_SETTLE),
    CommandRecord::new("DISPON", &DISPON, FIRST_DISPON_SETTLE),
    CommandRecord::new("SLEEPOUT", &SLEEPOUT, SLEEP_OUT_SETTLE),
    CommandRecord::new("DISPON", &DISPON, SECOND_DISPON_SETTLE),
];

const DISPOFF_BYTES: [u8; 1] = [opcode::DISPOFF];
const SLEEPIN_BYTES: [u8; 1] = [opcode::SLEEPIN];

/// Display-off directive sent by `disable()`.
pub const DISPLAY_OFF: CommandRecord = CommandRecord::new("DISPOFF", &DISPOFF_BYTES, Duration::ZERO);

/// Low-power sleep directive sent during teardown, followed by its
/// mandatory quiet time before the rails are cut.
pub const ENTER_SLEEP: CommandRecord = CommandRecord::new("SLEEPIN", &SLEEPIN_BYTES, SLEEP_IN_SETTLE);
