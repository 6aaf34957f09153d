use crate::gpio;

/// Led controller.
///
/// The Discovery user LEDs sit between the pin and ground, so a high pin
/// level turns the led on.
#[derive(Debug)]
pub struct Led {
    pin: gpio::Gpio,
    on: bool,
}

impl Led {
    /// Configure the pin as output and drive it to the off level.
    #[inline]
    pub fn new(pin: gpio::Gpio, mode: gpio::OutputMode) -> Self {
        let mut led = Self { pin, on: false };
        led.write(false);
        gpio::configure(pin, mode.into());
        led
    }

    /// Drive the led to the given state.
    #[inline]
    pub fn write(&mut self, on: bool) {
        self.on = on;
        gpio::write(self.pin, self.on);
    }

    #[inline]
    pub fn on(&mut self) {
        self.write(true);
    }

    #[inline]
    pub fn off(&mut self) {
        self.write(false);
    }

    #[inline]
    pub fn toggle(&mut self) {
        self.write(!self.on);
    }
}
