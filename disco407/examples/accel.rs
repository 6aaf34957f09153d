#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;

use cortex_m_semihosting::hprintln;
use disco407::{clock, delay::millis, gpio, spi, Led};

// On-board LIS3DSH accelerometer on SPI1.
const SPI: spi::Spi = spi::Spi::Spi1(spi::Port::A);

// Chip select, software controlled, idle high.
const CSN: gpio::Gpio = gpio::PE3;

// The four user LEDs, grouped in opposing pairs around the accelerometer.
const LED_WEST: gpio::Gpio = gpio::PD12; // green
const LED_NORTH: gpio::Gpio = gpio::PD13; // orange
const LED_EAST: gpio::Gpio = gpio::PD14; // red
const LED_SOUTH: gpio::Gpio = gpio::PD15; // blue

const LED_MODE: gpio::OutputMode = gpio::OutputMode::PushPull(gpio::Speed::Low);

// WHO_AM_I response of the LIS3DSH.
const DEVICE_ID: u8 = 0x3F;

// CTRL_REG4: 100Hz output data rate, X/Y/Z axes enabled.
const CTRL_REG4_SETUP: u8 = 0x67;

// CTRL_REG6: address auto-increment for burst reads.
const CTRL_REG6_SETUP: u8 = 0x10;

// Tilt threshold in raw counts, about 0.25g at the +-2g default range.
const THRESHOLD: i16 = 4_000;

/// LIS3DSH register map subset.
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
enum Register {
    WhoAmI = 0x0F,
    CtrlReg4 = 0x20,
    CtrlReg6 = 0x25,
    OutXL = 0x28,
}

/// Read access to a [Register]: the address byte carries the read flag.
#[derive(Copy, Clone, Debug)]
struct Read(Register);

impl spi::Register for Register {
    #[inline]
    fn addr(self) -> u8 {
        self as u8
    }
}

impl spi::Register for Read {
    #[inline]
    fn addr(self) -> u8 {
        self.0 as u8 | 0x80
    }
}

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello! This is the Accelerometer example.");
    }

    // System setup.
    unsafe {
        clock::init();
        gpio::enable();
    }

    let mut west = Led::new(LED_WEST, LED_MODE);
    let mut north = Led::new(LED_NORTH, LED_MODE);
    let mut east = Led::new(LED_EAST, LED_MODE);
    let mut south = Led::new(LED_SOUTH, LED_MODE);

    let mut spi = spi::Config {
        speed: 1_000_000,
        mode: spi::Mode::Mode3,
        byteorder: spi::ByteOrder::MsbFirst,
    }
    .make(SPI);

    gpio::configure(CSN, gpio::Mode::Output(gpio::OutputType::PushPull, gpio::Speed::Medium));
    gpio::write(CSN, true);

    // Give the device time to finish its boot procedure.
    millis(10);

    // Identity check.
    gpio::write(CSN, false);
    let check = spi.read_check(Read(Register::WhoAmI), DEVICE_ID);
    gpio::write(CSN, true);

    if let Err(error) = check {
        if cfg!(debug_assertions) {
            hprintln!(
                "Accelerometer not found: WHO_AM_I = 0x{:02x}, expected 0x{:02x}.",
                error.found,
                error.expected
            );
        }
        loop {}
    }

    // Burst reads walk the output registers, so turn on address increment
    // before enabling the axes.
    gpio::write(CSN, false);
    spi.write_single(Register::CtrlReg6, CTRL_REG6_SETUP);
    gpio::write(CSN, true);

    gpio::write(CSN, false);
    spi.write_single(Register::CtrlReg4, CTRL_REG4_SETUP);
    gpio::write(CSN, true);

    if cfg!(debug_assertions) {
        hprintln!("Accelerometer online.");
    }

    loop {
        millis(100);

        // Burst-read the six output registers, X/Y/Z low and high bytes.
        let mut out = [0u8; 6];
        gpio::write(CSN, false);
        spi.read(Read(Register::OutXL), &mut out);
        gpio::write(CSN, true);

        let x = i16::from_le_bytes([out[0], out[1]]);
        let y = i16::from_le_bytes([out[2], out[3]]);

        // Light the LED pairs by tilt direction.
        east.write(x > THRESHOLD);
        west.write(x < -THRESHOLD);
        north.write(y > THRESHOLD);
        south.write(y < -THRESHOLD);
    }
}
