use super::traits::Button;
use embedded_hal::digital::InputPin;

/// Button wired to ground with a pull-up: pressed reads low.
pub struct GpioButton<P> {
    pin: P,
}

impl<P: InputPin> GpioButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> Button for GpioButton<P> {
    type Error = P::Error;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_low()
    }
}
