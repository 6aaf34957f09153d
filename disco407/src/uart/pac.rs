use crate::{clock, gpio};
use stm32f4xx_hal::pac::{Peripherals as DevicePeripherals, USART1, USART2, USART6};

use gpio::{Mode, OutputMode, OutputType, Speed};

type UsartPtr = stm32f4xx_hal::pac::usart1::RegisterBlock;

/// Available USART peripherals.
#[derive(Copy, Clone, Debug)]
pub enum Usart {
    Usart1(Port),
    Usart2,
    Usart6,
}

/// Available GPIO ports for Usart1.
#[derive(Copy, Clone, Debug)]
pub enum Port {
    A,
    B,
}

impl Usart {
    /// Get the pointer. All three peripherals share the USART1 register layout.
    #[inline]
    fn ptr(&self) -> *const UsartPtr {
        match self {
            Self::Usart1(_) => USART1::ptr(),
            Self::Usart2 => USART2::ptr() as *const UsartPtr,
            Self::Usart6 => USART6::ptr() as *const UsartPtr,
        }
    }

    /// Transmit pin of this peripheral.
    pub fn tx_pin(&self) -> gpio::Gpio {
        match self {
            Self::Usart1(Port::A) => gpio::PA9,
            Self::Usart1(Port::B) => gpio::PB6,
            Self::Usart2 => gpio::PA2,
            Self::Usart6 => gpio::PC6,
        }
    }

    /// Receive pin of this peripheral.
    pub fn rx_pin(&self) -> gpio::Gpio {
        match self {
            Self::Usart1(Port::A) => gpio::PA10,
            Self::Usart1(Port::B) => gpio::PB7,
            Self::Usart2 => gpio::PA3,
            Self::Usart6 => gpio::PC7,
        }
    }

    /// Alternate function number that muxes this USART onto its pins.
    fn alternate_function(&self) -> u8 {
        match self {
            Self::Usart6 => 8,
            _ => 7,
        }
    }

    pub fn configure_tx_pin(&self, mode: OutputMode) {
        gpio::configure(self.tx_pin(), mode.as_af(self.alternate_function()));
    }

    pub fn configure_rx_pin(&self) {
        // The receiver also runs over the alternate function mux.
        let af = self.alternate_function();
        gpio::configure(
            self.rx_pin(),
            Mode::Alternate(af, OutputType::PushPull, Speed::Medium),
        );
    }

    /// Clock gate, baudrate and frame format, in that order.
    ///
    /// The frame is fixed at 8 data bits, no parity, one stop bit.
    #[inline]
    pub fn configure(&self, baudrate: u32) {
        unsafe {
            let dp = DevicePeripherals::steal();
            match self {
                Self::Usart1(_) => dp.RCC.apb2enr.modify(|_, w| w.usart1en().enabled()),
                Self::Usart2 => dp.RCC.apb1enr.modify(|_, w| w.usart2en().enabled()),
                Self::Usart6 => dp.RCC.apb2enr.modify(|_, w| w.usart6en().enabled()),
            }

            // USART2 hangs off the low-speed bus, the other two off APB2.
            let peripheral_clock = match self {
                Self::Usart2 => clock::apb1_speed(),
                _ => clock::apb2_speed(),
            };
            let divider = brr_divider(peripheral_clock, baudrate);
            (*self.ptr()).brr.modify(|_, w| {
                w.div_mantissa().bits((divider / 16) as u16);
                w.div_fraction().bits((divider % 16) as u8)
            });

            (*self.ptr()).cr1.modify(|_, w| {
                w.ue().set_bit(); // Enable the USART.
                w.m().clear_bit(); // 8 data bits.
                w.pce().clear_bit() // No parity check.
            });

            (*self.ptr()).cr2.modify(|_, w| {
                w.stop().bits(0) // One stop bit.
            });
        }
    }

    #[inline]
    pub fn rx_enable(&self, enable: bool) {
        unsafe {
            (*self.ptr()).cr1.modify(|_, w| w.re().bit(enable));
        }
    }

    #[inline]
    pub fn tx_enable(&self, enable: bool) {
        unsafe {
            (*self.ptr()).cr1.modify(|_, w| w.te().bit(enable));
        }
    }

    #[inline]
    pub fn write_data_reg(&self, byte: u8) {
        unsafe {
            (*self.ptr()).dr.write(|w| w.dr().bits(byte as u16));
        }
    }

    #[inline]
    pub fn read_data_reg(&self) -> u8 {
        unsafe { (*self.ptr()).dr.read().bits() as u8 }
    }

    #[inline]
    pub fn rx_buffer_not_empty(&self) -> bool {
        unsafe { (*self.ptr()).sr.read().rxne().bit_is_set() }
    }

    #[inline]
    pub fn tx_buffer_empty(&self) -> bool {
        unsafe { (*self.ptr()).sr.read().txe().bit_is_set() }
    }

    #[inline]
    pub fn is_transmission_complete(&self) -> bool {
        unsafe { (*self.ptr()).sr.read().tc().bit_is_set() }
    }
}

/// Baudrate register value, rounded to the nearest whole divider.
fn brr_divider(peripheral_clock: u32, baudrate: u32) -> u32 {
    (peripheral_clock + baudrate / 2) / baudrate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divider_rounds_to_nearest() {
        // 16MHz / 115200 baud = 138.9, so the divider must round up to 139.
        assert_eq!(brr_divider(16_000_000, 115_200), 139);
        assert_eq!(brr_divider(16_000_000, 9_600), 1_667);
        assert_eq!(brr_divider(16_000_000, 1_000_000), 16);
    }

    #[test]
    fn divider_splits_into_mantissa_and_fraction() {
        // 139 = 8 * 16 + 11, the reference BRR value 0x8B.
        let divider = brr_divider(16_000_000, 115_200);
        assert_eq!(divider / 16, 8);
        assert_eq!(divider % 16, 11);
    }
}
