//! Fault types.
//!
//! A [`HardwareFault`] is fatal for the task that hit it: the task stops and
//! hands the fault back to its caller. A [`DisplayFault`] only costs one
//! refresh of the status screen. An activity in an invalid state is not an
//! error at all; it is shown as `UNKNOWN` on the display.

use core::fmt;

/// A GPIO read or write failed at the driver level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareFault<E> {
    /// Name of the line that failed.
    pub line: &'static str,
    /// Error reported by the pin driver.
    pub source: E,
}

impl<E> HardwareFault<E> {
    pub const fn new(line: &'static str, source: E) -> Self {
        Self { line, source }
    }
}

impl<E: fmt::Debug> fmt::Display for HardwareFault<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hardware fault on {}: {:?}", self.line, self.source)
    }
}

/// A display operation failed; the stage tells which one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFault<E> {
    Init(E),
    Clear(E),
    Draw(E),
    Present(E),
}

impl<E> DisplayFault<E> {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Clear(_) => "clear",
            Self::Draw(_) => "draw",
            Self::Present(_) => "present",
        }
    }
}

impl<E: fmt::Debug> fmt::Display for DisplayFault<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) | Self::Clear(e) | Self::Draw(e) | Self::Present(e) => {
                write!(f, "display {} failed: {:?}", self.stage(), e)
            }
        }
    }
}
