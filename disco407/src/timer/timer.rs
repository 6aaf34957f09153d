use stm32f4xx_hal::pac::{Peripherals as DevicePeripherals, TIM2, TIM5};

type TimerPtr = stm32f4xx_hal::pac::tim2::RegisterBlock;

/// The two general purpose timers with a full 32-bit counter.
///
/// The counter runs at the APB1 timer clock divided by `PSC + 1`, and raises
/// an update event every `ARR + 1` counts.
#[derive(Clone, Copy, Debug)]
pub enum Timer {
    Tim2,
    Tim5,
}

impl Timer {
    /// Both timers share the TIM2 register layout.
    #[inline]
    fn ptr(&self) -> *const TimerPtr {
        match self {
            Timer::Tim2 => TIM2::ptr(),
            Timer::Tim5 => TIM5::ptr() as *const TimerPtr,
        }
    }

    /// Open the APB1 clock gate of this timer.
    ///
    /// Must happen before any other register access.
    #[inline]
    pub fn enable_rcc(&mut self) {
        unsafe {
            let dp = DevicePeripherals::steal();
            match self {
                Timer::Tim2 => dp.RCC.apb1enr.modify(|_, w| w.tim2en().enabled()),
                Timer::Tim5 => dp.RCC.apb1enr.modify(|_, w| w.tim5en().enabled()),
            }
        }
    }

    /// Set the auto-reload value, the period in count-clock ticks minus one.
    #[inline]
    pub fn write_arr(&mut self, arr: u32) {
        unsafe {
            (*self.ptr()).arr.write(|w| w.bits(arr));
        }
    }

    #[inline]
    pub fn read_arr(&self) -> u32 {
        unsafe { (*self.ptr()).arr.read().bits() }
    }

    /// Set the prescaler; the counter advances every `psc + 1` bus clocks.
    #[inline]
    pub fn write_psc(&mut self, psc: u16) {
        unsafe {
            (*self.ptr()).psc.write(|w| w.bits(psc as u32));
        }
    }

    #[inline]
    pub fn read_psc(&self) -> u16 {
        unsafe { (*self.ptr()).psc.read().bits() as u16 }
    }

    /// Start the counter.
    #[inline]
    pub fn enable(&mut self) {
        unsafe {
            (*self.ptr()).cr1.modify(|_, w| w.cen().enabled());
        }
    }

    /// Stop the counter. The counter value stays put.
    #[inline]
    pub fn disable(&mut self) {
        unsafe {
            (*self.ptr()).cr1.modify(|_, w| w.cen().disabled());
        }
    }

    #[inline]
    pub fn read_counter_value(&self) -> u32 {
        unsafe { (*self.ptr()).cnt.read().bits() }
    }

    /// Route the update event to the NVIC.
    ///
    /// The interrupt line still has to be unmasked on the NVIC side.
    #[inline]
    pub fn update_interrupt_enable(&self) {
        unsafe {
            (*self.ptr()).dier.modify(|_, w| w.uie().enabled());
        }
    }

    #[inline]
    pub fn read_update_interrupt_flag(&self) -> bool {
        unsafe { (*self.ptr()).sr.read().uif().bit_is_set() }
    }

    /// Clear the update flag.
    ///
    /// The flag bits are rc_w0, so the read-modify-write cannot eat other flags.
    #[inline]
    pub fn clear_update_interrupt_flag(&self) {
        unsafe {
            (*self.ptr()).sr.modify(|_, w| w.uif().clear_bit());
        }
    }
}
