//! Compile-time timing and display layout.

use core::time::Duration;

/// Periods and windows shared by every task on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long a button must stay low before a press is confirmed.
    pub settle: Duration,
    /// Pause between two button polls of a toggle controller.
    pub button_poll: Duration,
    /// Re-read interval while waiting for a held button to be released.
    pub release_poll: Duration,
    /// Time each indicator color stays lit.
    pub indicator_period: Duration,
    /// Buzzer pulse width.
    pub buzzer_on: Duration,
    /// Buzzer silence between pulses.
    pub buzzer_off: Duration,
    /// Display refresh interval.
    pub status_period: Duration,
}

impl Timing {
    pub const DEFAULT: Self = Self {
        settle: Duration::from_millis(100),
        button_poll: Duration::from_millis(100),
        release_poll: Duration::from_millis(10),
        indicator_period: Duration::from_millis(500),
        buzzer_on: Duration::from_millis(50),
        buzzer_off: Duration::from_millis(950),
        status_period: Duration::from_millis(200),
    };

    /// Full buzzer cycle (pulse plus silence).
    pub const fn buzzer_period(&self) -> Duration {
        self.buzzer_on.saturating_add(self.buzzer_off)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where the status lines land on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Left edge of every line.
    pub x: i32,
    /// Vertical distance between the top of two consecutive lines.
    pub row_pitch: i32,
}

impl Layout {
    /// Two lines on a 128x64 panel, one per half.
    pub const DEFAULT: Self = Self { x: 0, row_pitch: 32 };

    pub const fn row_y(&self, row: usize) -> i32 {
        self.row_pitch * row as i32
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::DEFAULT
    }
}
