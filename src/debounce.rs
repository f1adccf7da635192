//! Debounced reading of an active-low push button.
//!
//! A press counts only if the line is still low after the settle window;
//! shorter pulses are contact noise. After a confirmed press the caller
//! waits for the release so that one physical press yields one event, no
//! matter how long it is held.

use core::time::Duration;

use embedded_hal_async::delay::DelayNs;

use crate::delay::pause;
use crate::error::HardwareFault;
use crate::hardware::Button;

pub struct DebouncedButton<B> {
    line: &'static str,
    button: B,
    settle: Duration,
    release_poll: Duration,
}

impl<B: Button> DebouncedButton<B> {
    pub fn new(line: &'static str, button: B, settle: Duration, release_poll: Duration) -> Self {
        Self {
            line,
            button,
            settle,
            release_poll,
        }
    }

    pub fn line(&self) -> &'static str {
        self.line
    }

    fn read(&mut self) -> Result<bool, HardwareFault<B::Error>> {
        self.button
            .is_pressed()
            .map_err(|e| HardwareFault::new(self.line, e))
    }

    /// One debounce session: returns `true` for a confirmed press.
    ///
    /// Returns immediately when the button is up; otherwise waits out the
    /// settle window and samples again.
    pub async fn poll<D: DelayNs>(&mut self, delay: &mut D) -> Result<bool, HardwareFault<B::Error>> {
        if !self.read()? {
            return Ok(false);
        }
        pause(delay, self.settle).await;
        let confirmed = self.read()?;
        if confirmed {
            debug!("{}: press confirmed", self.line);
        }
        Ok(confirmed)
    }

    /// Block this task until the button is released, yielding to the
    /// scheduler between samples.
    pub async fn wait_release<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), HardwareFault<B::Error>> {
        while self.read()? {
            pause(delay, self.release_poll).await;
        }
        debug!("{}: released", self.line);
        Ok(())
    }
}
