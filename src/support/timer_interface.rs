use fugit_timer::{ExtU32, HertzU32};

/// Periodic tick source on top of a 1 MHz `fugit_timer::Timer`.
pub struct Timer<TIM> {
    timer: TIM,
    period: fugit_timer::Duration<u32, 1, 1_000_000>,
}

impl<TIM> Timer<TIM> {
    /// `rate` is rounded to a whole number of microseconds per tick.
    pub fn new(timer: TIM, rate: HertzU32) -> Self {
        let period_us = (1_000_000 / rate.raw().max(1)).max(1);
        Self {
            timer,
            period: period_us.micros(),
        }
    }

    pub fn period(&self) -> fugit_timer::Duration<u32, 1, 1_000_000> {
        self.period
    }
}

impl<TIM> crate::pwm::TickSource for Timer<TIM>
where
    TIM: fugit_timer::Timer<1_000_000>,
{
    fn tick_rate(&self) -> HertzU32 {
        HertzU32::from_raw(1_000_000 / self.period.ticks())
    }

    fn start(&mut self) {
        let _ = self.timer.start(self.period);
    }

    fn restart(&mut self) {
        // start() on a running timer reloads the counter
        let _ = self.timer.start(self.period);
    }

    fn stop(&mut self) {
        let _ = self.timer.cancel();
    }
}
