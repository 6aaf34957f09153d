#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::{entry, exception};

use cortex_m_semihosting::hprintln;
use disco407::{clock, gpio, systick, Led};

// Blue user LED on PD15.
const LED_PIN: gpio::Gpio = gpio::PD15;

// Toggle period in milliseconds.
const PERIOD: u32 = 500;

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello! This is the SysTick example.");
    }

    // System setup.
    unsafe {
        clock::init();
        gpio::enable();
        systick::init();
    }

    let mut led = Led::new(LED_PIN, gpio::OutputMode::PushPull(gpio::Speed::Low));

    let mut last_toggle = systick::now();
    loop {
        if systick::elapsed(last_toggle, systick::now()) >= PERIOD {
            led.toggle();
            last_toggle = systick::now();
        }
    }
}

/// SysTick exception: advances the millisecond counter.
#[exception]
fn SysTick() {
    systick::tick();
}
