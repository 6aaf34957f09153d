use super::Config;
use crate::clock;
use crate::gpio;
use stm32f4xx_hal::pac::{Peripherals as DevicePeripherals, SPI1, SPI2};

type SpiPtr = stm32f4xx_hal::pac::spi1::RegisterBlock;

/// SPI pins carry alternate function 5 on this part.
const ALTERNATE_FUNCTION: u8 = 5;

/// SPI master or slave mode.
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum Master {
    Master = 0,
    Slave = 1,
}

/// SPI mode.
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum Mode {
    Mode0 = 0,
    Mode1 = 1,
    Mode2 = 2,
    Mode3 = 3,
}

/// SPI transmission byte order.
#[derive(Copy, Clone, Debug)]
pub enum ByteOrder {
    MsbFirst,
    LsbFirst,
}

/// SPI peripheral.
#[derive(Copy, Clone, Debug)]
pub enum Spi {
    Spi1(Port),
    Spi2,
}

/// GPIO port for SPI1.
#[derive(Copy, Clone, Debug)]
pub enum Port {
    A,
    B,
}

impl Spi {
    /// Get the pointer. Both peripherals share the SPI1 register layout.
    #[inline]
    pub fn ptr(&self) -> *const SpiPtr {
        match self {
            Self::Spi1(_) => SPI1::ptr(),
            Self::Spi2 => SPI2::ptr() as *const SpiPtr,
        }
    }

    /// SCK, MISO and MOSI pins of this peripheral, in that order.
    fn pins(&self) -> (gpio::Gpio, gpio::Gpio, gpio::Gpio) {
        match self {
            Self::Spi1(Port::A) => (gpio::PA5, gpio::PA6, gpio::PA7),
            Self::Spi1(Port::B) => (gpio::PB3, gpio::PB4, gpio::PB5),
            Self::Spi2 => (gpio::PB13, gpio::PB14, gpio::PB15),
        }
    }

    /// Pin mux, clock gate, then the control register, in that order.
    #[inline]
    pub fn configure(&self, config: Config, mode: Master) {
        // All three pins go to the alternate function mux; the peripheral
        // controls the pin directions from there, also in slave mode.
        let (sck, miso, mosi) = self.pins();
        let pin_mode = gpio::Mode::Alternate(
            ALTERNATE_FUNCTION,
            gpio::OutputType::PushPull,
            gpio::Speed::Medium,
        );
        gpio::configure(sck, pin_mode);
        gpio::configure(miso, pin_mode);
        gpio::configure(mosi, pin_mode);

        unsafe {
            // Enable the SPI peripheral.
            let dp = DevicePeripherals::steal();
            match self {
                Self::Spi1(_) => dp.RCC.apb2enr.modify(|_, w| w.spi1en().enabled()),
                Self::Spi2 => dp.RCC.apb1enr.modify(|_, w| w.spi2en().enabled()),
            }

            // Control register configuration.
            (*self.ptr()).cr1.modify(|_, w| {
                // Baudrate.
                w.br().bits(self.baudrate_register(config.speed));
                // Clock polarity and phase.
                w.cpol().bit((config.mode as u8 >> 1) > 0);
                w.cpha().bit((config.mode as u8 & 1) > 0);
                // 8 bit data frame.
                w.dff().clear_bit();
                // ByteOrder.
                match config.byteorder {
                    ByteOrder::MsbFirst => w.lsbfirst().clear_bit(),
                    ByteOrder::LsbFirst => w.lsbfirst().set_bit(),
                };
                // Software slave management.
                w.ssm().set_bit();
                // Master/Slave configuration.
                match mode {
                    Master::Master => {
                        w.ssi().set_bit();
                        w.mstr().set_bit()
                    }
                    Master::Slave => {
                        w.ssi().clear_bit();
                        w.mstr().clear_bit()
                    }
                }
            });
        }
    }

    #[inline]
    pub fn enable(&self) {
        unsafe {
            (*self.ptr()).cr1.modify(|_, w| w.spe().set_bit());
        }
    }

    #[inline]
    pub fn disable(&self) {
        unsafe {
            (*self.ptr()).cr1.modify(|_, w| w.spe().clear_bit());
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
    pub fn busy(&self) -> bool {
        unsafe { (*self.ptr()).sr.read().bsy().bit_is_set() }
    }

    unsafe fn baudrate_register(&self, speed: u32) -> u8 {
        // SPI1 hangs off APB2, SPI2 off the low-speed bus.
        let clk_speed = match self {
            Self::Spi1(_) => clock::apb2_speed(),
            Self::Spi2 => clock::apb1_speed(),
        };
        baudrate_divider(clk_speed, speed)
    }
}

/// Largest power-of-two division of the bus clock that stays at or below the
/// requested speed, encoded for the BR field.
fn baudrate_divider(clk_speed: u32, speed: u32) -> u8 {
    let mut reg = 0u8;
    while speed < clk_speed >> (reg + 1) {
        reg += 1;
    }
    reg.min(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divider_picks_next_power_of_two_below_request() {
        // 16MHz bus, 1MHz request: div 16 hits it exactly.
        assert_eq!(baudrate_divider(16_000_000, 1_000_000), 3);
        // 16MHz bus, 3MHz request: div 8 gives 2MHz, div 4 would overshoot.
        assert_eq!(baudrate_divider(16_000_000, 3_000_000), 2);
        // Request at bus speed: smallest divider, div 2.
        assert_eq!(baudrate_divider(16_000_000, 16_000_000), 0);
    }

    #[test]
    fn divider_is_capped_at_div_256() {
        assert_eq!(baudrate_divider(16_000_000, 100), 7);
    }
}
