pub mod gpio_button;
pub mod gpio_switch;
pub mod oled;
pub mod traits;

pub use gpio_button::GpioButton;
pub use gpio_switch::{GpioSwitch, Polarity};
pub use oled::OledStatus;
pub use traits::{Button, StatusDisplay, Switch};
