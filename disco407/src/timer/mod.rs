//! General purpose timers.
//!
//! Example use:
//!
//! ```ignore
//! let mut tim = timer::TIM2;
//! tim.enable_rcc();
//! tim.write_arr(99);
//! tim.write_psc(15_999);
//! tim.update_interrupt_enable();
//! tim.enable();
//! ```

mod timer;

pub use timer::Timer;

pub const TIM2: timer::Timer = timer::Timer::Tim2;
pub const TIM5: timer::Timer = timer::Timer::Tim5;
