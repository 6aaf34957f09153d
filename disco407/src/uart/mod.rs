//! USART peripheral.
//!
//! Example use:
//!
//! ```ignore
//! // Enable system clock.
//! clock::init();
//!
//! // Create usart bus.
//! let mut bus = uart::Config {
//!     baudrate: 115_200,
//!     tx_pin: OutputMode::PushPull(Speed::Medium),
//! }.make(uart::Usart::Usart2);
//!
//! // Write data to bus.
//! bus.tx_enable(true);
//! bus.write_bytes(b"Hi");
//! ```

mod pac;

pub use pac::{Port, Usart};
use gpio::{InputMode, OutputMode};

use crate::gpio;

/// Usart peripheral configuration.
///
/// Use [make][Config::make()] to create a new [Bus].
#[derive(Copy, Clone, Debug)]
pub struct Config {
    /// Baudrate.
    pub baudrate: u32,
    /// Output mode of the TX pin while the transmitter is enabled.
    pub tx_pin: OutputMode,
}

impl Config {
    #[inline]
    pub fn make(self, usart: Usart) -> Bus {
        Bus::new(usart, self)
    }
}

/// Uart bus.
///
/// Can be constructed using [Config][Config::make()]. The transmitter and
/// receiver start out disabled; the pins stay untouched until they are turned
/// on.
pub struct Bus {
    usart: Usart,
    tx_mode: OutputMode,
}

impl Bus {
    #[inline]
    pub fn new(usart: Usart, config: Config) -> Self {
        usart.configure(config.baudrate);
        Self {
            usart,
            tx_mode: config.tx_pin,
        }
    }

    /// Returns TX pin of current USART peripheral.
    #[inline]
    pub fn tx_pin(&self) -> gpio::Gpio {
        self.usart.tx_pin()
    }

    /// Returns RX pin of current USART peripheral.
    #[inline]
    pub fn rx_pin(&self) -> gpio::Gpio {
        self.usart.rx_pin()
    }

    /// Enable or disable receiver.
    ///
    /// When enabled, the RX pin is muxed to the peripheral.
    #[inline]
    pub fn rx_enable(&mut self, enable: bool) {
        self.usart.rx_enable(enable);
        if enable {
            self.usart.configure_rx_pin();
        }
    }

    /// Enable or disable transmitter.
    ///
    /// When disabled, the TX pin will be configured as floating input.
    #[inline]
    pub fn tx_enable(&mut self, enable: bool) {
        self.usart.tx_enable(enable);
        if enable {
            self.usart.configure_tx_pin(self.tx_mode);
        } else {
            gpio::configure(self.usart.tx_pin(), InputMode::Floating.into());
        }
    }

    /// Read received byte.
    ///
    /// Returns None if buffer is empty.
    #[inline]
    pub fn read_byte(&mut self) -> Option<u8> {
        if self.usart.rx_buffer_not_empty() {
            Some(self.usart.read_data_reg())
        } else {
            None
        }
    }

    /// Write byte.
    ///
    /// Returns Error if buffer is not empty.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) -> Result<(), ()> {
        if self.usart.tx_buffer_empty() {
            self.usart.write_data_reg(byte);
            Ok(())
        } else {
            Err(())
        }
    }

    /// Blocking read.
    ///
    /// If there is no byte, keep waiting.
    #[inline]
    pub fn wait_read_byte(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.read_byte() {
                return byte;
            }
        }
    }

    /// Blocking write byte.
    ///
    /// Blocks until the byte has been written to the transmit buffer.
    #[inline]
    pub fn wait_write_byte(&mut self, byte: u8) {
        while self.write_byte(byte).is_err() {}
    }

    /// Write multiple bytes.
    ///
    /// This method blocks until all bytes have been written to the transmit buffer.
    #[inline]
    pub fn write_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.wait_write_byte(byte);
        }
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, data: &str) {
        self.write_bytes(data.as_bytes());
    }

    /// Block until the last written byte has left the shift register.
    #[inline]
    pub fn flush(&mut self) {
        while !self.usart.is_transmission_complete() {}
    }
}
