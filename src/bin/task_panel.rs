//! STM32F103 Blue Pill Task Panel
//! =============================================================================================
//!
//! Five cooperating tasks share the CPU:
//! - Indicator: lights red, green, blue in turn, 500 ms each
//! - Buzzer: 50 ms beep on two lines once per second
//! - Button A / Button B: suspend and resume the indicator / buzzer
//! - Status: shows each activity's state on an SSD1306 OLED every 200 ms
//!
//! The indicator, buzzer and button tasks run on an interrupt executor so
//! they preempt the status task, whose display transfers are the least
//! time-critical work on the board.
//!
//! Hardware Connections:
//!   OLED Display -> Blue Pill
//!      GND  -> GND
//!      VCC  -> 5V
//!      SDA  -> PB7
//!      SCL  -> PB6
//!
//!   Indicator LEDs (active high): red PA0, green PA1, blue PA2
//!   Buzzer lines (active high): PB0, PB1
//!   Button A (indicator) -> PB12, Button B (buzzer) -> PB13
//!      Both switch to GND, internal pull-up enabled
//!
//! Build with `cargo run --release --features board --target thumbv7m-none-eabi`.

#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _; // Global logger
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::{
    bind_interrupts,
    gpio::{Input, Level, Output, Pull, Speed},
    i2c::{self, ErrorInterruptHandler, EventInterruptHandler},
    peripherals,
    time::Hertz,
};
use embassy_time::Delay;
use panic_probe as _; // Panic handler
use ssd1306::{I2CDisplayInterface, Ssd1306, prelude::*};

use task_panel::{
    activity::{self, ActivityControl},
    buzzer::Buzzer,
    config::{Layout, Timing},
    debounce::DebouncedButton,
    hardware::{GpioButton, GpioSwitch, OledStatus},
    indicator::Indicator,
    status::{Row, StatusReporter},
    toggle::ToggleController,
};

type Line = GpioSwitch<Output<'static>>;
type Key = GpioButton<Input<'static>>;

const TIMING: Timing = Timing::DEFAULT;

// Task handles, read by the status task and toggled by the button tasks
static INDICATOR: ActivityControl = ActivityControl::new();
static BUZZER: ActivityControl = ActivityControl::new();

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn USART3() {
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

bind_interrupts!(struct Irqs {
    I2C1_EV => EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => ErrorInterruptHandler<peripherals::I2C1>;
});

/// Main application entry point
///
/// Runs on the thread-mode executor, which also hosts the status task.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());
    info!("task panel starting");

    let indicator = Indicator::new(
        [
            GpioSwitch::new(Output::new(p.PA0, Level::Low, Speed::Low)),
            GpioSwitch::new(Output::new(p.PA1, Level::Low, Speed::Low)),
            GpioSwitch::new(Output::new(p.PA2, Level::Low, Speed::Low)),
        ],
        TIMING.indicator_period,
    );

    let buzzer = Buzzer::new(
        [
            GpioSwitch::new(Output::new(p.PB0, Level::Low, Speed::Low)),
            GpioSwitch::new(Output::new(p.PB1, Level::Low, Speed::Low)),
        ],
        TIMING.buzzer_on,
        TIMING.buzzer_off,
    );

    let button_a = DebouncedButton::new(
        "button A",
        GpioButton::new(Input::new(p.PB12, Pull::Up)),
        TIMING.settle,
        TIMING.release_poll,
    );
    let button_b = DebouncedButton::new(
        "button B",
        GpioButton::new(Input::new(p.PB13, Pull::Up)),
        TIMING.settle,
        TIMING.release_poll,
    );

    // OLED on I2C1 at 400kHz
    let i2c = i2c::I2c::new(
        p.I2C1,
        p.PB6,
        p.PB7,
        Irqs,
        p.DMA1_CH6,
        p.DMA1_CH7,
        Hertz::khz(400),
        Default::default(),
    );

    // Time-critical tasks preempt the thread-mode executor
    interrupt::USART3.set_priority(Priority::P6);
    let high = EXECUTOR_HIGH.start(interrupt::USART3);
    high.spawn(indicator_task(indicator)).unwrap();
    high.spawn(buzzer_task(buzzer)).unwrap();
    high.spawn(toggle_task(ToggleController::new(button_a, &INDICATOR, TIMING)))
        .unwrap();
    high.spawn(toggle_task(ToggleController::new(button_b, &BUZZER, TIMING)))
        .unwrap();

    spawner.spawn(status_task(i2c)).unwrap();
}

/// Indicator Task
///
/// Stops for good if one of the LED lines fails.
#[embassy_executor::task]
async fn indicator_task(mut indicator: Indicator<Line>) {
    let mut delay = Delay;
    match activity::run(&mut indicator, &INDICATOR, &mut delay).await {
        Ok(never) => match never {},
        Err(fault) => error!("indicator stopped: {} line failed", fault.line),
    }
}

/// Buzzer Task
#[embassy_executor::task]
async fn buzzer_task(mut buzzer: Buzzer<Line>) {
    let mut delay = Delay;
    match activity::run(&mut buzzer, &BUZZER, &mut delay).await {
        Ok(never) => match never {},
        Err(fault) => error!("buzzer stopped: {} line failed", fault.line),
    }
}

/// Button Task, one instance per button
#[embassy_executor::task(pool_size = 2)]
async fn toggle_task(mut controller: ToggleController<'static, Key>) {
    let mut delay = Delay;
    match controller.run(&mut delay).await {
        Ok(never) => match never {},
        Err(fault) => error!("button task stopped: {} failed", fault.line),
    }
}

/// OLED Status Task
///
/// Lowest priority: redraws both status lines every 200 ms.
#[embassy_executor::task]
async fn status_task(i2c: i2c::I2c<'static, embassy_stm32::mode::Async>) {
    let interface = I2CDisplayInterface::new(i2c);
    let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    let rows = [Row::new("LED", &INDICATOR), Row::new("BUZZER", &BUZZER)];
    let mut reporter = StatusReporter::new(OledStatus::new(display), rows, Layout::DEFAULT);
    let mut delay = Delay;
    reporter.run(&mut delay, TIMING.status_period).await
}
