//! Cooperative task panel for the STM32F103 "Blue Pill".
//!
//! A tri-color indicator and a beeping buzzer run as independent periodic
//! activities. Two buttons suspend and resume them, and an OLED shows
//! whether each one is active. Everything here is generic over
//! `embedded-hal` pins and an async delay; the firmware in
//! `src/bin/task_panel.rs` wires it to embassy.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod activity;
pub mod buzzer;
pub mod config;
pub mod debounce;
pub mod delay;
pub mod error;
pub mod hardware;
pub mod indicator;
pub mod status;
pub mod toggle;

pub use activity::{Activity, ActivityControl, RunState};
pub use config::{Layout, Timing};
pub use error::{DisplayFault, HardwareFault};
