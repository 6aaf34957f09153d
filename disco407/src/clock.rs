//! System clock setup.

use stm32f4xx_hal::pac::Peripherals as DevicePeripherals;

/// System clock speed in Hertz.
pub const SPEED: u32 = 16_000_000;

/// Setup of the system clock.
///
/// Keeps the internal `16MHz` RC oscillator as system clock and forces the
/// AHB and APB prescalers back to their reset values. This is the state the
/// core boots in, so calling this right after reset is a no-op.
pub unsafe fn init() {
    let dp = DevicePeripherals::steal();

    // Make sure the internal oscillator is running.
    dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    while !dp.RCC.cr.read().hsirdy().bit_is_set() {}

    dp.RCC.cfgr.modify(|_, w| {
        // AHB prescaler: div 1.
        w.hpre().bits(0);
        // APB low-speed prescaler: div 1.
        w.ppre1().bits(0);
        // APB high-speed prescaler: div 1.
        w.ppre2().bits(0);
        // HSI as system clock.
        w.sw().hsi()
    });

    // Wait for switch to complete.
    while !dp.RCC.cfgr.read().sws().is_hsi() {}
}

/// Clock speed for Peripherals connected to APB1.
pub(crate) unsafe fn apb1_speed() -> u32 {
    let dp = DevicePeripherals::steal();
    prescaled(SPEED, dp.RCC.cfgr.read().ppre1().bits())
}

/// Clock speed for Peripherals connected to APB2.
pub(crate) unsafe fn apb2_speed() -> u32 {
    let dp = DevicePeripherals::steal();
    prescaled(SPEED, dp.RCC.cfgr.read().ppre2().bits())
}

/// Applies the 3-bit APB prescaler encoding to the given clock.
fn prescaled(clock: u32, reg: u8) -> u32 {
    if (reg & 4) > 0 {
        clock >> ((reg & 3) + 1)
    } else {
        clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prescaler_off_passes_clock_through() {
        assert_eq!(prescaled(16_000_000, 0b000), 16_000_000);
        assert_eq!(prescaled(16_000_000, 0b011), 16_000_000);
    }

    #[test]
    fn prescaler_divides_by_powers_of_two() {
        assert_eq!(prescaled(16_000_000, 0b100), 8_000_000);
        assert_eq!(prescaled(16_000_000, 0b101), 4_000_000);
        assert_eq!(prescaled(16_000_000, 0b110), 2_000_000);
        assert_eq!(prescaled(16_000_000, 0b111), 1_000_000);
    }
}
