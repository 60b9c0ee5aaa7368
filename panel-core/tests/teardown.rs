//! Tear-down choreography and timing floors.

mod common;

use core::time::Duration;

use common::{RecordingDelay, RecordingLines, ScriptedBus};
use panel_core::init::{INIT_SEQUENCE, opcode, table};
use panel_core::lifecycle::{LifecycleState, Panel};
use panel_core::lines::{LineId, LineLevel};
use panel_core::power::{POWER_DOWN_TEMPLATE, POWER_UP_TEMPLATE};

#[test]
fn unprepare_sleeps_the_controller_then_cuts_power() {
    let mut panel = Panel::new(RecordingLines::new(), ScriptedBus::new(), RecordingDelay::new());

    panel.prepare();
    panel.enable().unwrap();
    panel.unprepare();

    assert_eq!(panel.state(), LifecycleState::Unpowered);
    let (lines, bus, delay, _) = panel.into_parts();

    // One sleep-in write after the full table, with its settle observed.
    assert_eq!(bus.writes.len(), INIT_SEQUENCE.len() + 1);
    let last = bus.writes.last().unwrap();
    assert_eq!(last.as_slice(), [opcode::SLEEPIN]);
    assert!(delay.holds.contains(&table::SLEEP_IN_SETTLE));

    // Power-down transitions follow the bring-up ones.
    assert_eq!(
        &lines.transitions[6..],
        [
            (LineId::Reset, LineLevel::Low),
            (LineId::PowerEnable, LineLevel::Low),
        ]
    );
}

#[test]
fn unprepare_twice_is_a_no_op() {
    let mut panel = Panel::new(RecordingLines::new(), ScriptedBus::new(), RecordingDelay::new());

    panel.prepare();
    panel.unprepare();
    panel.unprepare();

    assert_eq!(panel.state(), LifecycleState::Unpowered);
    let (lines, bus, _, _) = panel.into_parts();
    assert_eq!(lines.transitions.len(), 8);
    assert_eq!(bus.writes.len(), 1);
}

#[test]
fn unprepare_on_a_fresh_handle_touches_nothing() {
    let mut panel = Panel::new(RecordingLines::new(), ScriptedBus::new(), RecordingDelay::new());

    panel.unprepare();

    assert_eq!(panel.state(), LifecycleState::Unpowered);
    let (lines, bus, delay, _) = panel.into_parts();
    assert!(lines.transitions.is_empty());
    assert!(bus.writes.is_empty());
    assert!(delay.holds.is_empty());
}

#[test]
fn sleep_in_settle_is_held_even_when_the_write_fails() {
    let mut panel = Panel::new(
        RecordingLines::new(),
        ScriptedBus::failing_at(0),
        RecordingDelay::new(),
    );

    panel.prepare();
    panel.unprepare();

    assert_eq!(panel.state(), LifecycleState::Unpowered);
    let (lines, bus, delay, _) = panel.into_parts();
    assert!(bus.writes.is_empty());
    assert!(delay.holds.contains(&table::SLEEP_IN_SETTLE));
    assert_eq!(lines.transitions.len(), 8);
}

#[test]
fn observed_holds_satisfy_the_datasheet_floors() {
    let mut panel = Panel::new(RecordingLines::new(), ScriptedBus::new(), RecordingDelay::new());

    panel.prepare();
    let (_, _, delay, _) = panel.into_parts();

    assert_eq!(delay.holds.len(), POWER_UP_TEMPLATE.step_count());
    for (held, step) in delay.holds.iter().zip(POWER_UP_TEMPLATE.steps()) {
        assert!(step.allows_hold(*held), "hold {held:?} undercuts the floor");
    }
    assert_eq!(
        delay.holds,
        [
            Duration::from_millis(5),
            Duration::from_millis(10),
            Duration::from_millis(50),
            Duration::from_millis(10),
            Duration::from_millis(50),
            Duration::from_millis(150),
        ]
    );
}

#[test]
fn power_down_holds_the_reset_before_dropping_the_rail() {
    let mut panel = Panel::new(RecordingLines::new(), ScriptedBus::new(), RecordingDelay::new());

    panel.prepare();
    panel.unprepare();

    let (_, _, delay, _) = panel.into_parts();
    let down = &delay.holds[delay.holds.len() - 1..];
    assert_eq!(down, [Duration::from_millis(120)]);

    for step in POWER_DOWN_TEMPLATE.steps() {
        assert!(step.allows_hold(step.hold_for));
    }
}
