//! Power-up choreography for the BV055HDE.
//!
//! Datasheet order: pin reset low, drop the LDO rails, bring the rails back
//! up, then run the release/assert/release reset dance. The final 150 ms
//! hold must elapse before any DSI transfer is attempted. Every duration is
//! a floor; the sequencer never shortens them.

use core::time::Duration;

use super::{PowerSequence, PowerSequenceKind, PowerStep};
use crate::lines::{LineId, LineLevel};

/// Hold after forcing reset low at the start of bring-up.
pub const RESET_SETTLE: Duration = Duration::from_millis(5);
/// Hold with the LDO rails off to guarantee a clean power-on edge.
pub const RAILS_OFF_SETTLE: Duration = Duration::from_millis(10);
/// Hold after enabling the LDO rails.
pub const RAILS_ON_SETTLE: Duration = Duration::from_millis(50);
/// First reset release window.
pub const RESET_RELEASE: Duration = Duration::from_millis(10);
/// Re-asserted reset pulse width.
pub const RESET_PULSE: Duration = Duration::from_millis(50);
/// Quiet time after the final reset release before bus traffic may start.
pub const PRE_BUS_QUIET: Duration = Duration::from_millis(150);

/// Ordered control-line steps that implement the power-up choreography.
pub const POWER_UP_STEPS: [PowerStep; 6] = [
    // Make sure reset is pulled low before touching the rails.
    PowerStep::new(LineId::Reset, LineLevel::Low, RESET_SETTLE, RESET_SETTLE),
    // Drop the display LDO rails.
    PowerStep::new(
        LineId::PowerEnable,
        LineLevel::Low,
        RAILS_OFF_SETTLE,
        RAILS_OFF_SETTLE,
    ),
    // Rails on, wait for them to stabilize.
    PowerStep::new(
        LineId::PowerEnable,
        LineLevel::High,
        RAILS_ON_SETTLE,
        RAILS_ON_SETTLE,
    ),
    // Release reset briefly.
    PowerStep::new(LineId::Reset, LineLevel::High, RESET_RELEASE, RESET_RELEASE),
    // Re-assert reset for the datasheet pulse.
    PowerStep::new(LineId::Reset, LineLevel::Low, RESET_PULSE, RESET_PULSE),
    // Final release; the controller needs quiet time before DSI transfers.
    PowerStep::new(LineId::Reset, LineLevel::High, PRE_BUS_QUIET, PRE_BUS_QUIET),
];

/// Sequence template describing the power-up choreography.
pub const POWER_UP_TEMPLATE: PowerSequence =
    PowerSequence::new(PowerSequenceKind::PowerUp, &POWER_UP_STEPS);

/// Returns the shared power-up template.
#[must_use]
pub const fn power_up_template() -> PowerSequence {
    POWER_UP_TEMPLATE
}
