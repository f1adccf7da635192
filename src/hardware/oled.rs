//! SSD1306 OLED as a [`StatusDisplay`].
//!
//! Text is drawn with the 6x10 ASCII mono font into the driver's frame buffer
//! and sent to the panel on `present`.

use super::traits::StatusDisplay;
use embedded_graphics::{
    mono_font::{MonoTextStyle, MonoTextStyleBuilder, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use ssd1306::{Ssd1306, mode::BufferedGraphicsMode, prelude::*};

/// Error from the display interface (I2C or SPI transport).
pub type OledError = display_interface::DisplayError;

pub struct OledStatus<DI, SIZE>
where
    SIZE: DisplaySize,
{
    display: Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>,
    style: MonoTextStyle<'static, BinaryColor>,
}

impl<DI, SIZE> OledStatus<DI, SIZE>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    pub fn new(display: Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>) -> Self {
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(BinaryColor::On)
            .build();
        Self { display, style }
    }
}

impl<DI, SIZE> StatusDisplay for OledStatus<DI, SIZE>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    type Error = OledError;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.display.init()
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.display.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error> {
        Text::with_baseline(text, Point::new(x, y), self.style, Baseline::Top)
            .draw(&mut self.display)?;
        Ok(())
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.display.flush()
    }
}
