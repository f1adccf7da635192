//! Two-line buzzer beeping on a fixed duty cycle.

use core::time::Duration;

use embedded_hal_async::delay::DelayNs;

use crate::activity::{Activity, ActivityControl};
use crate::error::HardwareFault;
use crate::hardware::Switch;

pub const LINES: [&str; 2] = ["buzzer1", "buzzer2"];

pub struct Buzzer<S> {
    outputs: [S; 2],
    on_time: Duration,
    off_time: Duration,
}

impl<S: Switch> Buzzer<S> {
    pub fn new(outputs: [S; 2], on_time: Duration, off_time: Duration) -> Self {
        Self {
            outputs,
            on_time,
            off_time,
        }
    }

    fn drive(&mut self, active: bool) -> Result<(), HardwareFault<S::Error>> {
        for (output, line) in self.outputs.iter_mut().zip(LINES) {
            output.set(active).map_err(|e| HardwareFault::new(line, e))?;
        }
        Ok(())
    }
}

impl<S: Switch> Activity for Buzzer<S> {
    type Error = HardwareFault<S::Error>;

    fn name(&self) -> &'static str {
        "buzzer"
    }

    // The cycle always starts with the pulse; there is no phase to rewind.
    fn reset(&mut self) {}

    async fn tick<D: DelayNs>(
        &mut self,
        control: &ActivityControl,
        delay: &mut D,
    ) -> Result<(), Self::Error> {
        self.drive(true)?;
        control.sleep(delay, self.on_time).await;
        self.drive(false)?;
        control.sleep(delay, self.off_time).await;
        Ok(())
    }

    /// Silence both lines, even when suspended in the middle of a pulse.
    fn park(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }
}
