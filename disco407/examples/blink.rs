#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;

use cortex_m_semihosting::hprintln;
use disco407::{clock, delay::millis, gpio, Led};

// Green user LED on PD12.
const LED_PIN: gpio::Gpio = gpio::PD12;

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello! This is the Blink example.");
    }

    // System setup.
    unsafe {
        clock::init();
        gpio::enable();
    }

    let mut led = Led::new(LED_PIN, gpio::OutputMode::PushPull(gpio::Speed::Low));

    loop {
        // Blink led.
        millis(500);
        led.toggle();
    }
}
