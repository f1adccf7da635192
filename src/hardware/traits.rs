/// A digital output line that is either active or idle.
pub trait Switch {
    type Error;

    fn set(&mut self, active: bool) -> Result<(), Self::Error>;

    fn on(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }

    fn off(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }
}

/// A momentary push button.
pub trait Button {
    type Error;

    /// Raw, undebounced contact state.
    fn is_pressed(&mut self) -> Result<bool, Self::Error>;
}

/// Text-only view of a display, as used by the status reporter.
///
/// Drawing goes to a frame buffer; nothing reaches the panel before
/// [`present`](StatusDisplay::present).
pub trait StatusDisplay {
    type Error;

    fn init(&mut self) -> Result<(), Self::Error>;
    fn clear(&mut self) -> Result<(), Self::Error>;
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error>;
    fn present(&mut self) -> Result<(), Self::Error>;
}
