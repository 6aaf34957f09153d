//! GPIO peripheral.
//!
//! Example usage:
//!
//! ```ignore
//! clock::init();
//! gpio::enable();
//!
//! gpio::configure(PA0, gpio::Mode::Input(gpio::Pull::Floating));
//! let value: bool = gpio::read(PA0);
//! ```

mod pac;
mod pinout;
mod mode;

pub use pac::{Pin, Port};
pub use pinout::*;
pub use mode::*;

/// Open the AHB1 clock gate of ports A through E.
///
/// Must run before any pin on those ports is configured or driven.
#[inline]
pub fn enable() {
    Port::A.enable();
    Port::B.enable();
    Port::C.enable();
    Port::D.enable();
    Port::E.enable();
}

/// GPIO pin tuple struct.
///
/// Can be used to [configure][configure()], [read][read()] from or
/// [write][write()] to a pin.
#[derive(Clone, Copy, Debug)]
pub struct Gpio(pub Port, pub Pin);

/// Configure the given GPIO pin mode.
#[inline]
pub fn configure(pin: Gpio, mode: Mode) {
    pac::configure(pin.0, pin.1, mode);
}

/// Set the GPIO pin value.
///
/// Assumes pin was [configured][configure] as [output][OutputMode] before calling this.
#[inline]
pub fn write(pin: Gpio, value: bool) {
    pac::write(pin.0, pin.1, value)
}

/// Read the GPIO pin value.
#[inline]
pub fn read(pin: Gpio) -> bool {
    pac::read(pin.0, pin.1)
}

/// Invert the GPIO pin value.
///
/// Assumes pin was [configured][configure] as [output][OutputMode] before calling this.
#[inline]
pub fn toggle(pin: Gpio) {
    pac::toggle(pin.0, pin.1)
}
