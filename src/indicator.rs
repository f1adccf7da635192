//! Tri-color indicator: lights red, green and blue in turn.

use core::time::Duration;

use embedded_hal_async::delay::DelayNs;

use crate::activity::{Activity, ActivityControl};
use crate::error::HardwareFault;
use crate::hardware::Switch;

/// Line names, in cycle order.
pub const COLORS: [&str; 3] = ["red", "green", "blue"];

pub struct Indicator<L> {
    lights: [L; 3],
    index: usize,
    period: Duration,
}

impl<L: Switch> Indicator<L> {
    /// `lights` in cycle order: red, green, blue.
    pub fn new(lights: [L; 3], period: Duration) -> Self {
        Self {
            lights,
            index: 0,
            period,
        }
    }

    /// Index of the color the next tick lights up.
    pub fn next_color(&self) -> usize {
        self.index
    }

    /// Turn every light off, then the current one on. No await in between,
    /// so a suspension never catches two colors lit.
    fn show_current(&mut self) -> Result<(), HardwareFault<L::Error>> {
        for (light, color) in self.lights.iter_mut().zip(COLORS) {
            light.off().map_err(|e| HardwareFault::new(color, e))?;
        }
        let index = self.index;
        self.lights[index]
            .on()
            .map_err(|e| HardwareFault::new(COLORS[index], e))
    }
}

impl<L: Switch> Activity for Indicator<L> {
    type Error = HardwareFault<L::Error>;

    fn name(&self) -> &'static str {
        "indicator"
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    async fn tick<D: DelayNs>(
        &mut self,
        control: &ActivityControl,
        delay: &mut D,
    ) -> Result<(), Self::Error> {
        self.show_current()?;
        trace!("indicator: {}", COLORS[self.index]);
        self.index = (self.index + 1) % self.lights.len();
        control.sleep(delay, self.period).await;
        Ok(())
    }
}
