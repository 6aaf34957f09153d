//! SPI peripheral.
//!
//! Example use:
//!
//! ```ignore
//! // Enable system clock.
//! clock::init();
//!
//! // Create spi bus.
//! let mut spi = spi::Config {
//!     speed: 1_000_000,
//!     mode: spi::Mode::Mode3,
//!     byteorder: spi::ByteOrder::MsbFirst,
//! }.make(spi::Spi::Spi1(spi::Port::A));
//!
//! // Write data to a device register, any type implementing [Register].
//! let data = [3, 4];
//! spi.write(register, &data);
//! ```

mod pac;

pub use pac::{ByteOrder, Master, Mode, Port, Spi};

use cortex_m::interrupt;

/// Register controlled by the [spi bus][Bus].
pub trait Register {
    fn addr(self) -> u8;
}

/// Spi bus configuration.
///
/// Use [make][Self::make] for creating a new [spi bus][Bus].
#[derive(Copy, Clone, Debug)]
pub struct Config {
    /// Clock speed.
    ///
    /// The actual speed is obtained from the bus clock by division of factors of 2.
    /// For example:
    /// With the bus clock at 16MHz and the configured speed at 3MHz, the actual spi
    /// bus can operate at either 4MHz (div = 4) or 2MHz (div = 8). Of these two
    /// the lower is chosen. This means that despite configuring the speed to be
    /// 3MHz a 2MHz clock results.
    pub speed: u32,
    /// Spi mode.
    pub mode: Mode,
    /// Byte order: lsb or msb first.
    pub byteorder: ByteOrder,
}

impl Config {
    #[inline]
    pub fn make(self, spi: Spi) -> Bus {
        Bus::new(spi, self)
    }
}

/// Master SPI bus.
///
/// Does not support slave mode.
/// Does not control the chip select pin: the caller pulls CSN around every
/// transaction.
///
/// Transactions run with interrupts masked, so the flag polling sequence
/// cannot be torn apart by a handler touching the same bus.
pub struct Bus {
    spi: Spi,
}

impl Bus {
    #[inline]
    pub fn new(spi: Spi, config: Config) -> Self {
        spi.configure(config, Master::Master);
        spi.enable();
        Self { spi }
    }

    /// Clock one byte out and the simultaneous response byte in.
    ///
    /// TXE gates the data register write, RXNE the read. Every written byte
    /// is paired with exactly one read, so the receive buffer can never be
    /// left with a stale byte for the next transfer.
    fn transfer(&mut self, byte: u8) -> u8 {
        while !self.spi.tx_buffer_empty() {}
        self.spi.write_data_reg(byte);
        while !self.spi.rx_buffer_not_empty() {}
        self.spi.read_data_reg()
    }

    /// Let the last frame drain from the shift register.
    fn wait_idle(&mut self) {
        while !self.spi.tx_buffer_empty() {}
        while self.spi.busy() {}
    }

    /// Write multiple bytes to [Register].
    ///
    /// Assumes CSN is pulled; the address byte goes over the wire first.
    #[inline]
    pub fn write(&mut self, register: impl Register, data: &[u8]) {
        interrupt::free(|_cs| {
            self.transfer(register.addr());
            for &byte in data {
                self.transfer(byte);
            }
            self.wait_idle();
        });
    }

    /// Read multiple bytes from [Register].
    ///
    /// The address byte goes out first; dummy writes then clock the response
    /// into `buffer`. Returns the byte the device shifted out while the
    /// address went over the wire.
    #[inline]
    pub fn read(&mut self, register: impl Register, buffer: &mut [u8]) -> u8 {
        interrupt::free(|_cs| {
            let first = self.transfer(register.addr());
            for slot in buffer.iter_mut() {
                *slot = self.transfer(0);
            }
            self.wait_idle();
            first
        })
    }

    /// Write single byte to [register][Register].
    #[inline]
    pub fn write_single(&mut self, register: impl Register, byte: u8) {
        self.write(register, &[byte]);
    }

    /// Read single byte from [register][Register].
    #[inline]
    pub fn read_single(&mut self, register: impl Register) -> u8 {
        let mut byte = [0];
        self.read(register, &mut byte);
        byte[0]
    }

    /// Read from register, and compare against the expected value.
    ///
    /// Used for probing a device identity register.
    #[inline]
    pub fn read_check(&mut self, register: impl Register, expected: u8) -> Result<(), Error> {
        let found = self.read_single(register);
        if found == expected {
            Ok(())
        } else {
            Err(Error { expected, found })
        }
    }
}

/// Mismatch between an expected and an actual register value.
#[derive(Copy, Clone, Debug)]
pub struct Error {
    pub expected: u8,
    pub found: u8,
}
