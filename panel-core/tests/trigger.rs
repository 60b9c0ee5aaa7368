//! End-to-end behavior of the external power toggle.

mod common;

use common::{RecordingDelay, RecordingLines, ScriptedBus};
use panel_core::init::{INIT_SEQUENCE, opcode};
use panel_core::lifecycle::{LifecycleState, Panel};
use panel_core::trigger::{PowerSwitch, SwitchRequest, TriggerError};

#[test]
fn writing_one_brings_the_panel_up() {
    let mut panel = Panel::new(RecordingLines::new(), ScriptedBus::new(), RecordingDelay::new());
    let mut switch = PowerSwitch::new(&mut panel);

    assert_eq!(switch.read(), 0);
    assert_eq!(switch.write("1"), Ok(SwitchRequest::On));
    assert_eq!(switch.read(), 1);

    assert_eq!(panel.state(), LifecycleState::Enabled);
    let (_, bus, _, _) = panel.into_parts();
    assert_eq!(bus.writes.len(), INIT_SEQUENCE.len());
}

#[test]
fn writing_zero_tears_the_panel_down() {
    let mut panel = Panel::new(RecordingLines::new(), ScriptedBus::new(), RecordingDelay::new());
    let mut switch = PowerSwitch::new(&mut panel);

    switch.write("on").unwrap();
    assert_eq!(switch.write("off"), Ok(SwitchRequest::Off));
    assert_eq!(switch.read(), 0);

    assert_eq!(panel.state(), LifecycleState::Unpowered);
    let (_, bus, _, _) = panel.into_parts();
    // Full table, then display-off, then sleep-in.
    assert_eq!(bus.writes.len(), INIT_SEQUENCE.len() + 2);
    let tail: Vec<u8> = bus.writes[INIT_SEQUENCE.len()..].iter().map(|w| w[0]).collect();
    assert_eq!(tail, [opcode::DISPOFF, opcode::SLEEPIN]);
}

#[test]
fn writing_zero_to_an_off_panel_is_benign() {
    let mut panel = Panel::new(RecordingLines::new(), ScriptedBus::new(), RecordingDelay::new());
    let mut switch = PowerSwitch::new(&mut panel);

    assert_eq!(switch.write("0"), Ok(SwitchRequest::Off));
    assert_eq!(switch.read(), 0);

    let (lines, bus, _, _) = panel.into_parts();
    assert!(lines.transitions.is_empty());
    assert!(bus.writes.is_empty());
}

#[test]
fn a_failed_bring_up_reads_back_as_off() {
    let mut panel = Panel::new(
        RecordingLines::new(),
        ScriptedBus::failing_at(11),
        RecordingDelay::new(),
    );
    let mut switch = PowerSwitch::new(&mut panel);

    let err = switch.write("1").unwrap_err();
    assert!(matches!(err, TriggerError::Enable(_)));
    assert_eq!(switch.read(), 0);
    assert_eq!(panel.state(), LifecycleState::Prepared);
}

#[test]
fn junk_writes_leave_the_panel_untouched() {
    let mut panel = Panel::new(RecordingLines::new(), ScriptedBus::new(), RecordingDelay::new());
    let mut switch = PowerSwitch::new(&mut panel);

    assert!(matches!(switch.write("brightness"), Err(TriggerError::Parse(_))));

    assert_eq!(panel.state(), LifecycleState::Unpowered);
    let (lines, bus, _, _) = panel.into_parts();
    assert!(lines.transitions.is_empty());
    assert!(bus.writes.is_empty());
}

#[test]
fn a_failed_display_off_still_powers_down() {
    // Fail the write after the init table, which is the display-off.
    let mut panel = Panel::new(
        RecordingLines::new(),
        ScriptedBus::failing_at(INIT_SEQUENCE.len()),
        RecordingDelay::new(),
    );
    let mut switch = PowerSwitch::new(&mut panel);

    switch.write("1").unwrap();
    let err = switch.write("0").unwrap_err();
    assert!(matches!(err, TriggerError::Disable(_)));

    assert_eq!(switch.read(), 0);
    assert_eq!(panel.state(), LifecycleState::Unpowered);
}
