#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;

use cortex_m_semihosting::hprintln;
use disco407::{clock, delay::millis, gpio, uart, Led};

// USART2, TX on PA2.
const UART: uart::Usart = uart::Usart::Usart2;

// Orange user LED on PD13, toggled per transmitted line.
const LED_PIN: gpio::Gpio = gpio::PD13;

// 8 data bits, no parity, one stop bit.
const BAUDRATE: u32 = 115_200;

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello! This is the Serial example.");
    }

    // System setup.
    unsafe {
        clock::init();
        gpio::enable();
    }

    let mut led = Led::new(LED_PIN, gpio::OutputMode::PushPull(gpio::Speed::Low));

    let mut bus = uart::Config {
        baudrate: BAUDRATE,
        tx_pin: gpio::OutputMode::PushPull(gpio::Speed::Medium),
    }
    .make(UART);
    bus.tx_enable(true);

    // Greeting.
    bus.write_str("Hi\r\n");
    bus.flush();

    loop {
        millis(500);
        bus.write_str("tick\r\n");
        bus.flush();
        led.toggle();
    }
}
