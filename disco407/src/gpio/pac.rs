use stm32f4xx_hal::pac::Peripherals as DevicePeripherals;
type GpioPtr = stm32f4xx_hal::pac::gpioa::RegisterBlock;
type GPIOA = stm32f4xx_hal::pac::GPIOA;
type GPIOB = stm32f4xx_hal::pac::GPIOB;
type GPIOC = stm32f4xx_hal::pac::GPIOC;
type GPIOD = stm32f4xx_hal::pac::GPIOD;
type GPIOE = stm32f4xx_hal::pac::GPIOE;

use super::{Mode, OutputType, Pull};

/// Available GPIO ports.
#[derive(Clone, Copy, Debug)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
}

/// Available GPIO pins.
#[repr(u8)]
#[rustfmt::skip]
#[derive(Clone, Copy, Debug)]
pub enum Pin {
    P0  = 0,
    P1  = 1,
    P2  = 2,
    P3  = 3,
    P4  = 4,
    P5  = 5,
    P6  = 6,
    P7  = 7,
    P8  = 8,
    P9  = 9,
    P10 = 10,
    P11 = 11,
    P12 = 12,
    P13 = 13,
    P14 = 14,
    P15 = 15,
}

impl Port {
    /// All ports share the GPIOA register layout.
    #[inline]
    fn ptr(self) -> *const GpioPtr {
        match self {
            Port::A => GPIOA::ptr(),
            Port::B => GPIOB::ptr() as *const GpioPtr,
            Port::C => GPIOC::ptr() as *const GpioPtr,
            Port::D => GPIOD::ptr() as *const GpioPtr,
            Port::E => GPIOE::ptr() as *const GpioPtr,
        }
    }

    #[inline]
    pub(crate) fn enable(self) {
        unsafe {
            let dp = DevicePeripherals::steal();
            match self {
                Port::A => dp.RCC.ahb1enr.modify(|_, w| w.gpioaen().enabled()),
                Port::B => dp.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled()),
                Port::C => dp.RCC.ahb1enr.modify(|_, w| w.gpiocen().enabled()),
                Port::D => dp.RCC.ahb1enr.modify(|_, w| w.gpioden().enabled()),
                Port::E => dp.RCC.ahb1enr.modify(|_, w| w.gpioeen().enabled()),
            }
        }
    }
}

/// One field value per configuration register of the port.
struct Fields {
    moder: u32,
    otyper: u32,
    ospeedr: u32,
    pupdr: u32,
    af: u32,
}

fn mode_fields(mode: Mode) -> Fields {
    let mut fields = Fields {
        moder: 0,
        otyper: 0,
        ospeedr: 0,
        pupdr: 0,
        af: 0,
    };
    match mode {
        Mode::Input(pull) => {
            fields.pupdr = match pull {
                Pull::Floating => 0,
                Pull::Up => 1,
                Pull::Down => 2,
            };
        }
        Mode::Output(typ, speed) => {
            fields.moder = 1;
            fields.otyper = typ as u32;
            fields.ospeedr = speed as u32;
        }
        Mode::Alternate(function, typ, speed) => {
            fields.moder = 2;
            fields.otyper = typ as u32;
            fields.ospeedr = speed as u32;
            fields.af = function as u32;
        }
        Mode::Analog => fields.moder = 3,
    }
    fields
}

/// Replace the `width`-bit field at the given position of a packed register word.
fn insert_field(word: u32, position: usize, width: usize, value: u32) -> u32 {
    let shift = position * width;
    let mask = ((1 << width) - 1) << shift;
    (word & !mask) | (value << shift)
}

/// Configure this gpio pin with the given mode.
#[inline]
pub(crate) fn configure(port: Port, pin: Pin, mode: Mode) {
    let pin_nr = pin as usize;
    let fields = mode_fields(mode);
    let port_ptr = port.ptr();
    unsafe {
        let value = (*port_ptr).moder.read().bits();
        (*port_ptr).moder.write(|w| w.bits(insert_field(value, pin_nr, 2, fields.moder)));

        let value = (*port_ptr).otyper.read().bits();
        (*port_ptr).otyper.write(|w| w.bits(insert_field(value, pin_nr, 1, fields.otyper)));

        let value = (*port_ptr).ospeedr.read().bits();
        (*port_ptr).ospeedr.write(|w| w.bits(insert_field(value, pin_nr, 2, fields.ospeedr)));

        let value = (*port_ptr).pupdr.read().bits();
        (*port_ptr).pupdr.write(|w| w.bits(insert_field(value, pin_nr, 2, fields.pupdr)));

        // Alternate function fields are nibbles, split over two registers.
        if pin_nr < 8 {
            let value = (*port_ptr).afrl.read().bits();
            (*port_ptr).afrl.write(|w| w.bits(insert_field(value, pin_nr, 4, fields.af)));
        } else {
            let value = (*port_ptr).afrh.read().bits();
            (*port_ptr).afrh.write(|w| w.bits(insert_field(value, pin_nr - 8, 4, fields.af)));
        }
    }
}

/// Sets the pin value.
///
/// Goes through BSRR, so the write is atomic with respect to interrupts.
/// Assumes the pin was configured as output mode.
#[inline]
pub(crate) fn write(port: Port, pin: Pin, value: bool) {
    let shift = if value { pin as u8 } else { pin as u8 + 16 };
    unsafe {
        (*port.ptr()).bsrr.write(|w| w.bits(1 << shift));
    }
}

/// Read the pin value.
#[inline]
pub(crate) fn read(port: Port, pin: Pin) -> bool {
    let value = unsafe { (*port.ptr()).idr.read().bits() };
    (value & (1 << pin as u8)) > 0
}

/// Invert the pin output level.
#[inline]
pub(crate) fn toggle(port: Port, pin: Pin) {
    unsafe {
        (*port.ptr()).odr.modify(|r, w| w.bits(r.bits() ^ (1 << pin as u8)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::Speed;

    #[test]
    fn field_insert_replaces_only_the_addressed_field() {
        // Two-bit field of pin 5.
        assert_eq!(insert_field(0xFFFF_FFFF, 5, 2, 0b01), 0xFFFF_F7FF);
        // Four-bit field of pin 3.
        assert_eq!(insert_field(0x0000_0000, 3, 4, 0x7), 0x0000_7000);
        // One-bit field of pin 15.
        assert_eq!(insert_field(0x0000_0000, 15, 1, 1), 0x0000_8000);
    }

    #[test]
    fn output_mode_only_touches_moder_and_speed() {
        let fields = mode_fields(Mode::Output(OutputType::PushPull, Speed::Medium));
        assert_eq!(fields.moder, 1);
        assert_eq!(fields.otyper, 0);
        assert_eq!(fields.ospeedr, 1);
        assert_eq!(fields.pupdr, 0);
        assert_eq!(fields.af, 0);
    }

    #[test]
    fn alternate_function_mode_carries_the_function_number() {
        let fields = mode_fields(Mode::Alternate(7, OutputType::OpenDrain, Speed::High));
        assert_eq!(fields.moder, 2);
        assert_eq!(fields.otyper, 1);
        assert_eq!(fields.af, 7);
    }

    #[test]
    fn pull_resistors_enter_pupdr() {
        assert_eq!(mode_fields(Mode::Input(Pull::Up)).pupdr, 1);
        assert_eq!(mode_fields(Mode::Input(Pull::Down)).pupdr, 2);
        assert_eq!(mode_fields(Mode::Input(Pull::Floating)).pupdr, 0);
    }

    #[test]
    fn analog_disconnects_the_digital_path() {
        let fields = mode_fields(Mode::Analog);
        assert_eq!(fields.moder, 3);
        assert_eq!(fields.pupdr, 0);
    }
}
