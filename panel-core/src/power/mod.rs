//! Power sequence data structures and executor.
//!
//! The panel's bring-up and tear-down are fixed control-line choreographies
//! with datasheet-mandated holds. Each choreography is a static table of
//! [`PowerStep`]s so the executor stays generic and the timing can be
//! validated without hardware. Step order is load-bearing: the controller
//! requires the exact reset/power ordering encoded here.

use core::time::Duration;

use crate::lines::{ControlLines, Delay, LineId, LineLevel};
use crate::telemetry::{EventSink, PanelEvent};

pub mod down;
pub mod up;

pub use down::{POWER_DOWN_TEMPLATE, power_down_template};
pub use up::{POWER_UP_TEMPLATE, power_up_template};

/// Ordered operation the sequencer applies to a control line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PowerStep {
    pub line: LineId,
    pub level: LineLevel,
    /// Hold applied after the level change. Zero means no hold.
    pub hold_for: Duration,
    /// Datasheet floor for the hold. `hold_for` must never undercut it.
    pub min_hold: Duration,
}

impl PowerStep {
    pub const fn new(
        line: LineId,
        level: LineLevel,
        hold_for: Duration,
        min_hold: Duration,
    ) -> Self {
        Self {
            line,
            level,
            hold_for,
            min_hold,
        }
    }

    /// Validates that a hold duration satisfies the datasheet floor.
    pub fn allows_hold(&self, hold_for: Duration) -> bool {
        hold_for >= self.min_hold
    }

    /// Returns the hold duration as a [`Duration`].
    pub const fn hold_duration(&self) -> Duration {
        self.hold_for
    }
}

/// The choreography described by a template.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PowerSequenceKind {
    PowerUp,
    PowerDown,
}

/// Immutable power sequence template shared across targets.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PowerSequence {
    pub kind: PowerSequenceKind,
    pub steps: &'static [PowerStep],
}

impl PowerSequence {
    pub const fn new(kind: PowerSequenceKind, steps: &'static [PowerStep]) -> Self {
        Self { kind, steps }
    }

    /// Returns the ordered steps that make up the sequence.
    pub const fn steps(&self) -> &'static [PowerStep] {
        self.steps
    }

    /// Returns the number of steps contained in the template.
    pub const fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Sum of every hold in the sequence.
    pub fn total_hold(&self) -> Duration {
        self.steps
            .iter()
            .fold(Duration::ZERO, |acc, step| acc + step.hold_for)
    }
}

/// Drives a power sequence to completion.
///
/// Line operations cannot fail and there is no cancellation: once started,
/// the choreography runs every step. The caller blocks for the cumulative
/// hold time.
pub fn run_power_sequence<L, D, S>(
    template: &PowerSequence,
    lines: &mut L,
    delay: &mut D,
    sink: &mut S,
) where
    L: ControlLines,
    D: Delay,
    S: EventSink,
{
    for step in template.steps() {
        lines.set(step.line, step.level);
        sink.record(PanelEvent::LineSet {
            line: step.line,
            level: step.level,
        });

        if !step.hold_for.is_zero() {
            delay.hold_for(step.hold_for);
            sink.record(PanelEvent::Held {
                requested: step.hold_for,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{EventLog, NullSink};

    struct CountingLines {
        transitions: usize,
    }

    impl ControlLines for CountingLines {
        fn set(&mut self, _: LineId, _: LineLevel) {
            self.transitions += 1;
        }
    }

    struct AccumulatingDelay {
        total: Duration,
    }

    impl Delay for AccumulatingDelay {
        fn hold_for(&mut self, duration: Duration) {
            self.total += duration;
        }
    }

    #[test]
    fn executor_visits_every_step_and_hold() {
        let mut lines = CountingLines { transitions: 0 };
        let mut delay = AccumulatingDelay {
            total: Duration::ZERO,
        };
        let mut sink = NullSink::new();

        run_power_sequence(&POWER_UP_TEMPLATE, &mut lines, &mut delay, &mut sink);

        assert_eq!(lines.transitions, POWER_UP_TEMPLATE.step_count());
        assert_eq!(delay.total, POWER_UP_TEMPLATE.total_hold());
    }

    #[test]
    fn zero_holds_emit_no_held_event() {
        let mut lines = CountingLines { transitions: 0 };
        let mut delay = AccumulatingDelay {
            total: Duration::ZERO,
        };
        let mut log = EventLog::<8>::new();

        run_power_sequence(&POWER_DOWN_TEMPLATE, &mut lines, &mut delay, &mut log);

        let holds = log.count_matching(|event| matches!(event, PanelEvent::Held { .. }));
        // Power-down ends with an unheld LDO transition.
        assert_eq!(holds, 1);
        assert_eq!(lines.transitions, 2);
    }

    #[test]
    fn step_floor_validation() {
        let step = PowerStep::new(
            LineId::Reset,
            LineLevel::Low,
            Duration::from_millis(50),
            Duration::from_millis(50),
        );
        assert!(step.allows_hold(Duration::from_millis(50)));
        assert!(step.allows_hold(Duration::from_millis(75)));
        assert!(!step.allows_hold(Duration::from_millis(49)));
    }
}
