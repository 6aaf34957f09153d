//! Millisecond timebase on the SysTick core timer.
//!
//! Example use:
//!
//! ```ignore
//! unsafe {
//!     clock::init();
//!     systick::init();
//! }
//!
//! let mut last = systick::now();
//! loop {
//!     if systick::elapsed(last, systick::now()) >= 500 {
//!         last = systick::now();
//!         // every 500ms ...
//!     }
//! }
//! ```
//!
//! The counter only advances if the SysTick exception is routed here:
//!
//! ```ignore
//! #[exception]
//! fn SysTick() {
//!     systick::tick();
//! }
//! ```

use crate::clock;
use cortex_m::interrupt;
use stm32f4xx_hal::pac::Peripherals as DevicePeripherals;

/// Reload value for a 1ms tick.
const RELOAD: u32 = clock::SPEED / 1_000 - 1;

/// Millisecond counter. Written by [tick] only.
static mut MS_TICKS: u32 = 0;

/// Setup of the SysTick counter with a 1ms period.
///
/// The counter is held off while the reload value is programmed, then started
/// with the processor clock as source and the exception enabled.
pub unsafe fn init() {
    let dp = DevicePeripherals::steal();

    // Disable during configuration.
    dp.STK.ctrl.write(|w| w.bits(0));

    dp.STK.load.write(|w| w.reload().bits(RELOAD));

    // Clear current value register.
    dp.STK.val.reset();

    dp.STK.ctrl.write(|w| {
        // Processor clock as source.
        w.clksource().set_bit();
        // Exception on count down to zero.
        w.tickint().set_bit();
        // Start counting.
        w.enable().set_bit()
    });
}

/// Advance the counter by one millisecond.
///
/// Must be called from the SysTick exception handler, and nowhere else.
#[inline]
pub fn tick() {
    unsafe { MS_TICKS = MS_TICKS.wrapping_add(1) };
}

/// Milliseconds since [init].
///
/// The counter is read with interrupts masked, so a tick cannot tear the read.
#[inline]
pub fn now() -> u32 {
    interrupt::free(|_cs| unsafe { MS_TICKS })
}

/// Milliseconds between two [now] stamps.
///
/// Wrapping, so comparisons keep working across the counter rollover.
#[inline]
pub fn elapsed(earlier: u32, later: u32) -> u32 {
    later.wrapping_sub(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_value_gives_one_millisecond() {
        // 16MHz core clock counts 16_000 cycles per millisecond.
        assert_eq!(RELOAD, 15_999);
    }

    #[test]
    fn elapsed_subtracts_stamps() {
        assert_eq!(elapsed(100, 600), 500);
        assert_eq!(elapsed(600, 600), 0);
    }

    #[test]
    fn elapsed_survives_counter_rollover() {
        assert_eq!(elapsed(u32::MAX - 99, 400), 500);
    }
}
