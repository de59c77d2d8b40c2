//! Renderer work-list counters and the capacity limits they are judged
//! against.
//!
//! The renderer fills a `FrameCounters` while drawing the player view. After
//! the view is done the widget compositor reads the same struct and colours
//! each value by how close it is to the engine's structural limits - the
//! point being that a vanilla-limit overflow (visplane crash territory) is
//! visible at a glance while analysing a demo.
//!
//! Everything here is pure data and pure functions. Counter writes always
//! happen before counter reads within a tic because both are plain
//! sequenced calls on the single game thread.

use render_traits::TextColor;

/// Simulation rate of the game clock in tics per second.
pub const TICRATE: i32 = 35;

/// Per-frame renderer work counts. Owned by `Game`, handed `&mut` to the
/// renderer and `&` to the compositor. Values are only meaningful for the
/// frame just rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameCounters {
    /// Vissprites queued for the frame.
    pub sprites: i32,
    /// Drawsegs consumed by wall rendering.
    pub segs: i32,
    /// Visplanes found through the check path.
    pub check_planes: i32,
    /// Visplanes created through the find path.
    pub find_planes: i32,
    /// Opening slots used by sprite/masked clipping.
    pub openings: i32,
    /// Active moving platforms this tic.
    pub plats: i32,
    /// Active animated line specials this tic.
    pub line_anims: i32,
}

impl FrameCounters {
    /// Reset all counts. Called at the top of each render pass, before the
    /// renderer begins writing.
    pub fn begin_frame(&mut self) {
        *self = Self::default();
    }

    /// The two visplane paths are reported as one combined total, matching
    /// how the limit is actually consumed.
    pub const fn total_planes(&self) -> i32 {
        self.check_planes + self.find_planes
    }
}

/// Which limit set counters are classified against.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CompatMode {
    /// Original engine capacities. Overflowing these would crash or
    /// visually corrupt the vanilla executable.
    #[default]
    Vanilla,
    /// Raised limits in the style of limit-removing ports.
    Extended,
}

/// Static per-counter capacities. Built once at init, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterLimits {
    pub sprites: i32,
    pub segs: i32,
    pub planes: i32,
    pub openings: i32,
    pub plats: i32,
    pub line_anims: i32,
}

impl CounterLimits {
    pub const fn vanilla() -> Self {
        Self {
            sprites: 128,
            segs: 256,
            planes: 128,
            openings: 320 * 64,
            plats: 30,
            line_anims: 64,
        }
    }

    pub const fn extended() -> Self {
        Self {
            sprites: 1024,
            segs: 2048,
            planes: 1024,
            openings: 65536,
            plats: 7680,
            line_anims: 16384,
        }
    }

    pub const fn new(mode: CompatMode) -> Self {
        match mode {
            CompatMode::Vanilla => Self::vanilla(),
            CompatMode::Extended => Self::extended(),
        }
    }
}

/// How a counter value relates to its capacity. Total over all inputs;
/// blink parity never changes the class, only the colour picked within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Headroom remains.
    Safe,
    /// Exactly at capacity.
    AtLimit,
    /// Past capacity.
    OverBudget,
}

pub const fn classify(value: i32, limit: i32) -> Classification {
    if value == limit {
        Classification::AtLimit
    } else if value > limit {
        Classification::OverBudget
    } else {
        Classification::Safe
    }
}

/// Stateless ~4Hz blink driven purely by frame cadence: sample bit 3 of
/// the monotonically increasing tic count.
pub const fn blink_phase(tic: u32) -> bool {
    tic & 8 != 0
}

/// Colour for a counter label. Three-way scale: at-limit is the bright
/// informational shade, over-budget flashes between the two grays, under
/// stays on the dim shade.
pub const fn label_color(value: i32, limit: i32, tic: u32) -> TextColor {
    match classify(value, limit) {
        Classification::AtLimit => TextColor::LightGray,
        Classification::OverBudget => {
            if blink_phase(tic) {
                TextColor::Gray
            } else {
                TextColor::LightGray
            }
        }
        Classification::Safe => TextColor::Gray,
    }
}

/// Colour for a counter value. Finer than the label scale: under-limit is
/// a distinct "good" green rather than the neutral shade.
pub const fn value_color(value: i32, limit: i32, tic: u32) -> TextColor {
    match classify(value, limit) {
        Classification::AtLimit => TextColor::Yellow,
        Classification::OverBudget => {
            if blink_phase(tic) {
                TextColor::Red
            } else {
                TextColor::Yellow
            }
        }
        Classification::Safe => TextColor::Green,
    }
}

/// Colour for a ticking-down powerup: green above half, yellow above a
/// quarter, red when nearly out.
pub const fn powerup_color(remaining: i32, max: i32) -> TextColor {
    if remaining > max / 2 {
        TextColor::Green
    } else if remaining > max / 4 {
        TextColor::Yellow
    } else {
        TextColor::Red
    }
}

/// Per-widget enable mode. Stored in the user config as a plain integer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WidgetMode {
    #[default]
    Off,
    /// Show whenever the subsystem is active.
    Always,
    /// Show only when a counter has gone past its limit. Keeps the HUD
    /// clear during normal play.
    OverLimit,
}

impl WidgetMode {
    /// Out-of-range config values clamp to the nearest valid mode rather
    /// than fail.
    pub const fn from_index(value: i32) -> Self {
        match value {
            i32::MIN..=0 => Self::Off,
            1 => Self::Always,
            _ => Self::OverLimit,
        }
    }

    pub const fn index(self) -> i32 {
        match self {
            Self::Off => 0,
            Self::Always => 1,
            Self::OverLimit => 2,
        }
    }
}

/// Demo timer display mode, also a plain config integer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DemoTimerMode {
    #[default]
    Off,
    Playback,
    Recording,
    Both,
}

impl DemoTimerMode {
    pub const fn from_index(value: i32) -> Self {
        match value {
            i32::MIN..=0 => Self::Off,
            1 => Self::Playback,
            2 => Self::Recording,
            _ => Self::Both,
        }
    }

    pub const fn index(self) -> i32 {
        match self {
            Self::Off => 0,
            Self::Playback => 1,
            Self::Recording => 2,
            Self::Both => 3,
        }
    }

    pub const fn shows_playback(self) -> bool {
        matches!(self, Self::Playback | Self::Both)
    }

    pub const fn shows_recording(self) -> bool {
        matches!(self, Self::Recording | Self::Both)
    }
}

/// Read every frame by the compositor; persisted externally by the user
/// config store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WidgetConfig {
    pub coords: WidgetMode,
    pub playstate: WidgetMode,
    pub render_stats: WidgetMode,
    pub kis_stats: WidgetMode,
    pub powerups: WidgetMode,
    pub show_fps: bool,
    pub demo_timer: DemoTimerMode,
    /// Count the playback timer down instead of up.
    pub demo_timer_countdown: bool,
    pub demo_bar: bool,
    pub target_health: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_total_and_exact() {
        assert_eq!(classify(127, 128), Classification::Safe);
        assert_eq!(classify(128, 128), Classification::AtLimit);
        assert_eq!(classify(129, 128), Classification::OverBudget);
        assert_eq!(classify(130, 128), Classification::OverBudget);
        assert_eq!(classify(0, 0), Classification::AtLimit);
        assert_eq!(classify(-1, 0), Classification::Safe);
    }

    #[test]
    fn parity_never_changes_classification() {
        for tic in 0..64u32 {
            // Over-budget stays in the over family on both phases.
            let c = value_color(130, 128, tic);
            assert!(c == TextColor::Red || c == TextColor::Yellow);
            let c = label_color(130, 128, tic);
            assert!(c == TextColor::Gray || c == TextColor::LightGray);
            // Under and at limit are parity-independent.
            assert_eq!(value_color(10, 128, tic), TextColor::Green);
            assert_eq!(value_color(128, 128, tic), TextColor::Yellow);
            assert_eq!(label_color(128, 128, tic), TextColor::LightGray);
        }
    }

    #[test]
    fn blink_phase_samples_bit_three() {
        assert!(!blink_phase(0));
        assert!(!blink_phase(7));
        assert!(blink_phase(8));
        assert!(blink_phase(15));
        assert!(!blink_phase(16));
        assert!(blink_phase(24));
    }

    #[test]
    fn over_budget_blinks_between_two_colours() {
        assert_eq!(value_color(130, 128, 0), TextColor::Yellow);
        assert_eq!(value_color(130, 128, 8), TextColor::Red);
        assert_eq!(label_color(130, 128, 0), TextColor::LightGray);
        assert_eq!(label_color(130, 128, 8), TextColor::Gray);
    }

    #[test]
    fn widget_mode_clamps_out_of_range() {
        assert_eq!(WidgetMode::from_index(-5), WidgetMode::Off);
        assert_eq!(WidgetMode::from_index(0), WidgetMode::Off);
        assert_eq!(WidgetMode::from_index(1), WidgetMode::Always);
        assert_eq!(WidgetMode::from_index(2), WidgetMode::OverLimit);
        assert_eq!(WidgetMode::from_index(99), WidgetMode::OverLimit);
        assert_eq!(DemoTimerMode::from_index(7), DemoTimerMode::Both);
        assert_eq!(DemoTimerMode::from_index(-1), DemoTimerMode::Off);
    }

    #[test]
    fn powerup_colour_thresholds() {
        assert_eq!(powerup_color(30, 30), TextColor::Green);
        assert_eq!(powerup_color(16, 30), TextColor::Green);
        assert_eq!(powerup_color(15, 30), TextColor::Yellow);
        assert_eq!(powerup_color(8, 30), TextColor::Yellow);
        assert_eq!(powerup_color(7, 30), TextColor::Red);
        assert_eq!(powerup_color(0, 30), TextColor::Red);
    }

    #[test]
    fn planes_report_combined_total() {
        let mut c = FrameCounters::default();
        c.check_planes = 60;
        c.find_planes = 70;
        assert_eq!(c.total_planes(), 130);
        c.begin_frame();
        assert_eq!(c.total_planes(), 0);
        assert_eq!(c, FrameCounters::default());
    }
}
