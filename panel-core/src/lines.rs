//! Control-line model shared by firmware and host targets.
//!
//! The panel exposes two binary outputs: the controller reset line (XRES,
//! active low) and the LDO power-enable line. Both are driven through the
//! [`ControlLines`] trait so the sequencing logic never touches a GPIO
//! peripheral directly. Line operations are infallible by contract: a
//! missing or misconfigured line is a construction-time failure in the
//! integrating layer, never a runtime condition here.

use core::fmt;
use core::time::Duration;

/// Identifier for the logical control lines owned by one panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LineId {
    /// Controller reset (XRES). Low asserts reset.
    Reset,
    /// Display LDO power enable. High powers the panel rails.
    PowerEnable,
}

impl LineId {
    /// Deterministic index for lookups into [`ALL_LINES`].
    pub const fn as_index(self) -> usize {
        match self {
            LineId::Reset => 0,
            LineId::PowerEnable => 1,
        }
    }

    /// Attempts to construct a [`LineId`] from a raw index.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(LineId::Reset),
            1 => Some(LineId::PowerEnable),
            _ => None,
        }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(line_by_id(*self).name)
    }
}

/// Electrical level applied to a control line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LineLevel {
    Low,
    High,
}

/// Total number of distinct [`LineId`] variants.
pub const LINE_COUNT: usize = 2;

/// Metadata describing how a control line is wired on the panel flex.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LineInfo {
    pub id: LineId,
    pub name: &'static str,
    /// Level that asserts the line's function (reset asserted, rails on).
    pub active_level: LineLevel,
}

impl LineInfo {
    pub const fn new(id: LineId, name: &'static str, active_level: LineLevel) -> Self {
        Self {
            id,
            name,
            active_level,
        }
    }
}

/// Compile-time catalog of every control line.
pub const ALL_LINES: [LineInfo; LINE_COUNT] = [
    LineInfo::new(LineId::Reset, "XRES", LineLevel::Low),
    LineInfo::new(LineId::PowerEnable, "LDO-EN", LineLevel::High),
];

/// Retrieve line metadata by identifier.
pub const fn line_by_id(id: LineId) -> LineInfo {
    ALL_LINES[id.as_index()]
}

/// Abstraction over the physical line drivers.
///
/// Implementations complete the level change before returning and never
/// fail; the core deliberately models GPIO writes as unconditional.
pub trait ControlLines {
    /// Drives the named line to the requested level.
    fn set(&mut self, line: LineId, level: LineLevel);
}

/// Control-line driver that performs no hardware interaction.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopControlLines;

impl NoopControlLines {
    /// Creates a new no-op line driver.
    pub const fn new() -> Self {
        Self
    }
}

impl ControlLines for NoopControlLines {
    fn set(&mut self, _: LineId, _: LineLevel) {}
}

/// Blocking hold used between line transitions and bus writes.
///
/// Requested durations are datasheet floors. Implementations must block for
/// at least roughly the request and should stay close to it; a ±10% window
/// (e.g. 45-55 ms for a 50 ms request) matches the timing policy the panel
/// was qualified against. Exceeding the floor is harmless.
pub trait Delay {
    /// Blocks the calling context for at least `duration` (within tolerance).
    fn hold_for(&mut self, duration: Duration);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_lookup_returns_expected_metadata() {
        let reset = line_by_id(LineId::Reset);
        assert_eq!(reset.name, "XRES");
        assert_eq!(reset.active_level, LineLevel::Low);

        let ldo = line_by_id(LineId::PowerEnable);
        assert_eq!(ldo.name, "LDO-EN");
        assert_eq!(ldo.active_level, LineLevel::High);
    }

    #[test]
    fn line_indices_round_trip() {
        for info in &ALL_LINES {
            assert_eq!(LineId::from_index(info.id.as_index()), Some(info.id));
        }
        assert_eq!(LineId::from_index(LINE_COUNT), None);
    }
}
