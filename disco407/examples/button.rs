#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;

use cortex_m_semihosting::hprintln;
use disco407::{clock, gpio};

// Green user LED on PD12.
const LED_PIN: gpio::Gpio = gpio::PD12;

// User button on PA0, pulled low on the board, high while pressed.
const BUTTON_PIN: gpio::Gpio = gpio::PA0;

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello! This is the Button example.");
    }

    // System setup.
    unsafe {
        clock::init();
        gpio::enable();
    }

    // Configure GPIO modes.
    gpio::configure(LED_PIN, gpio::Mode::Output(gpio::OutputType::PushPull, gpio::Speed::Low));
    gpio::configure(BUTTON_PIN, gpio::Mode::Input(gpio::Pull::Floating));

    loop {
        // Read input pin.
        let value = gpio::read(BUTTON_PIN);

        // Control LED with the button.
        gpio::write(LED_PIN, value);
    }
}
