//! Status screen: one text line per activity, redrawn from scratch on
//! every refresh.

use core::fmt::Write;

use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::activity::{ActivityControl, RunState};
use crate::config::Layout;
use crate::delay::pause;
use crate::error::DisplayFault;
use crate::hardware::StatusDisplay;

/// Longest line is "BUZZER: SUSPENDED" plus room for a longer name.
pub const LINE_CAPACITY: usize = 24;

pub fn label(state: RunState) -> &'static str {
    match state {
        RunState::Running | RunState::Blocked => "ACTIVE",
        RunState::Suspended => "SUSPENDED",
        RunState::Unknown => "UNKNOWN",
    }
}

/// `"<NAME>: <LABEL>"`, truncated to [`LINE_CAPACITY`].
pub fn status_line(name: &str, state: RunState) -> String<LINE_CAPACITY> {
    let mut line = String::new();
    if write!(line, "{}: {}", name, label(state)).is_err() {
        // Overflow keeps what fit, which is still the most useful part.
        warn!("status line for {} truncated", name);
    }
    line
}

/// An activity shown on the screen.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    pub name: &'static str,
    pub control: &'a ActivityControl,
}

impl<'a> Row<'a> {
    pub const fn new(name: &'static str, control: &'a ActivityControl) -> Self {
        Self { name, control }
    }
}

pub struct StatusReporter<'a, S, const N: usize> {
    display: S,
    rows: [Row<'a>; N],
    layout: Layout,
    ready: bool,
}

impl<'a, S: StatusDisplay, const N: usize> StatusReporter<'a, S, N> {
    pub fn new(display: S, rows: [Row<'a>; N], layout: Layout) -> Self {
        Self {
            display,
            rows,
            layout,
            ready: false,
        }
    }

    pub fn display(&self) -> &S {
        &self.display
    }

    /// Bring the panel up with a blank screen. Retried on the next refresh
    /// until it succeeds.
    fn bring_up(&mut self) -> Result<(), DisplayFault<S::Error>> {
        self.display.init().map_err(DisplayFault::Init)?;
        self.display.clear().map_err(DisplayFault::Clear)?;
        self.display.present().map_err(DisplayFault::Present)?;
        self.ready = true;
        info!("status display ready");
        Ok(())
    }

    /// Snapshot every activity and redraw the whole screen.
    pub fn refresh(&mut self) -> Result<(), DisplayFault<S::Error>> {
        if !self.ready {
            self.bring_up()?;
        }

        let x = self.layout.x;
        self.display.clear().map_err(DisplayFault::Clear)?;
        for (row, entry) in self.rows.iter().enumerate() {
            let line = status_line(entry.name, entry.control.state());
            self.display
                .draw_text(x, self.layout.row_y(row), &line)
                .map_err(DisplayFault::Draw)?;
        }
        self.display.present().map_err(DisplayFault::Present)
    }

    /// Refresh every `period`. Display failures are logged and the next
    /// cycle tries again.
    pub async fn run<D: DelayNs>(&mut self, delay: &mut D, period: core::time::Duration) {
        loop {
            if let Err(fault) = self.refresh() {
                warn!("status display {} failed, retrying", fault.stage());
            }
            pause(delay, period).await;
        }
    }
}
