use super::traits::Switch;
use embedded_hal::digital::OutputPin;

/// Which pin level turns the load on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

pub struct GpioSwitch<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: OutputPin> GpioSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self::with_polarity(pin, Polarity::ActiveHigh)
    }

    /// For loads wired between the pin and VCC, like the Blue Pill PC13 LED.
    pub fn active_low(pin: P) -> Self {
        Self::with_polarity(pin, Polarity::ActiveLow)
    }

    pub fn with_polarity(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }
}

impl<P: OutputPin> Switch for GpioSwitch<P> {
    type Error = P::Error;

    fn set(&mut self, active: bool) -> Result<(), Self::Error> {
        match (self.polarity, active) {
            (Polarity::ActiveHigh, true) | (Polarity::ActiveLow, false) => self.pin.set_high(),
            (Polarity::ActiveHigh, false) | (Polarity::ActiveLow, true) => self.pin.set_low(),
        }
    }
}
