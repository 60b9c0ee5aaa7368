//! Power-down choreography for the BV055HDE.

use core::time::Duration;

use super::{PowerSequence, PowerSequenceKind, PowerStep};
use crate::lines::{LineId, LineLevel};

/// Reset must sit low this long before the rails may be cut.
pub const RESET_HOLD: Duration = Duration::from_millis(120);

/// Ordered control-line steps that implement the power-down choreography.
pub const POWER_DOWN_STEPS: [PowerStep; 2] = [
    // Assert reset and let the controller quiesce.
    PowerStep::new(LineId::Reset, LineLevel::Low, RESET_HOLD, RESET_HOLD),
    // Cut the LDO rails; no further hold is required.
    PowerStep::new(
        LineId::PowerEnable,
        LineLevel::Low,
        Duration::ZERO,
        Duration::ZERO,
    ),
];

/// Sequence template describing the power-down choreography.
pub const POWER_DOWN_TEMPLATE: PowerSequence =
    PowerSequence::new(PowerSequenceKind::PowerDown, &POWER_DOWN_STEPS);

/// Returns the shared power-down template.
#[must_use]
pub const fn power_down_template() -> PowerSequence {
    POWER_DOWN_TEMPLATE
}
