#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m::peripheral::NVIC;
use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use disco407::{clock, gpio, timer};
use stm32f4xx_hal::pac::interrupt;
use stm32f4xx_hal::pac::Interrupt;

// PD0 drives an external transistor stage.
const DRIVE_PIN: gpio::Gpio = gpio::PD0;

// Red user LED on PD14 mirrors the drive pin.
const LED_PIN: gpio::Gpio = gpio::PD14;

// 16MHz system clock / (15_999 + 1) = 1kHz count clock.
const PRESCALER: u16 = 15_999;

// Update event every (99 + 1) counts = 100ms.
const RELOAD: u32 = 99;

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello! This is the Timer example.");
    }

    // System setup.
    unsafe {
        clock::init();
        gpio::enable();
    }

    // Configure GPIO modes.
    gpio::configure(DRIVE_PIN, gpio::Mode::Output(gpio::OutputType::PushPull, gpio::Speed::Low));
    gpio::configure(LED_PIN, gpio::Mode::Output(gpio::OutputType::PushPull, gpio::Speed::Low));

    // Timer setup: clock gate, reload values, then interrupt and start.
    let mut tim = timer::TIM2;
    tim.enable_rcc();
    tim.write_arr(RELOAD);
    tim.write_psc(PRESCALER);

    unsafe { NVIC::unmask(Interrupt::TIM2) };
    tim.update_interrupt_enable();
    tim.enable();

    loop {}
}

/// TIM2 interrupt: toggles both pins on every update event.
#[interrupt]
fn TIM2() {
    if timer::TIM2.read_update_interrupt_flag() {
        gpio::toggle(DRIVE_PIN);
        gpio::toggle(LED_PIN);
        timer::TIM2.clear_update_interrupt_flag();
    }
}
