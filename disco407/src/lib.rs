//! Register-level support crate for the STM32F4-Discovery (STM32F407).
//!
//! Wraps the raw peripheral registers in flexible helpers without imposing a
//! driver model: there is no pin ownership and no typestate, and nothing
//! stops a pin from being configured before the system clock is set up. Each
//! example binary stays responsible for its own initialization order.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod delay;
pub mod gpio;
pub mod spi;
pub mod systick;
pub mod timer;
pub mod uart;

mod led;

pub use led::Led;
