//! Fixed display mode descriptor for the BV055HDE.
//!
//! Pure configuration data: the host display pipeline reads it, nothing in
//! this crate mutates it. Blanking values come from the vendor timing
//! sheet, not from negotiation.

/// Active/blanking intervals along one axis, in pixels or lines.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AxisTiming {
    pub active: u16,
    pub front_porch: u16,
    pub back_porch: u16,
    pub sync_len: u16,
}

impl AxisTiming {
    pub const fn new(active: u16, front_porch: u16, back_porch: u16, sync_len: u16) -> Self {
        Self {
            active,
            front_porch,
            back_porch,
            sync_len,
        }
    }

    /// Total scan length including blanking.
    pub const fn total(&self) -> u32 {
        self.active as u32 + self.front_porch as u32 + self.back_porch as u32 + self.sync_len as u32
    }
}

/// Wire pixel format on the video link.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelFormat {
    Rgb888,
}

impl PixelFormat {
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            PixelFormat::Rgb888 => 24,
        }
    }
}

/// Video-mode behavior requested from the DSI host.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VideoModeFlags {
    /// Burst transmission; pulse modes tear on this panel.
    pub burst: bool,
    /// Signal the hsync-end event to the peripheral.
    pub hsync_end_event: bool,
    /// Send commands in low-power mode.
    pub low_power_commands: bool,
}

/// The complete mode descriptor exposed to the host framework.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TimingSpec {
    pub horizontal: AxisTiming,
    pub vertical: AxisTiming,
    pub pixel_clock_khz: u32,
    pub refresh_hz: u16,
    pub width_mm: u16,
    pub height_mm: u16,
    pub hsync_positive: bool,
    pub vsync_positive: bool,
    pub format: PixelFormat,
    pub lanes: u8,
    pub flags: VideoModeFlags,
}

impl TimingSpec {
    /// Horizontal total including blanking.
    pub const fn htotal(&self) -> u32 {
        self.horizontal.total()
    }

    /// Vertical total including blanking.
    pub const fn vtotal(&self) -> u32 {
        self.vertical.total()
    }
}

/// The panel's single supported mode: 720x1280 at 60 Hz.
pub const BV055HDE_MODE: TimingSpec = TimingSpec {
    horizontal: AxisTiming::new(720, 48, 32, 80),
    vertical: AxisTiming::new(1280, 3, 10, 24),
    pixel_clock_khz: 69_500,
    refresh_hz: 60,
    width_mm: 68,
    height_mm: 121,
    hsync_positive: true,
    vsync_positive: false,
    format: PixelFormat::Rgb888,
    lanes: 4,
    flags: VideoModeFlags {
        burst: true,
        hsync_end_event: true,
        low_power_commands: true,
    },
};

/// Returns the panel's preferred (and only) mode.
#[must_use]
pub const fn preferred_mode() -> TimingSpec {
    BV055HDE_MODE
}
