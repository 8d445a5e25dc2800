use heapless::Vec;

use super::channel::{PWMChannel, PinId, Polarity, Slot, Target};
use super::error::Error;
use super::fade::{fade_rate, FadeTime};
use super::io::{PinMode, PortIo, TickSource};
use super::pool::{ChannelPool, List};

/// Software PWM on up to `N` arbitrary pins, multiplexed through one periodic timer.
///
/// The object is the whole shared state between application code and the timer
/// interrupt. It has no locking of its own: keep it behind a critical section
/// (an RTIC `#[shared]` resource, for instance) and call [`SoftPWM::on_tick`]
/// from the timer interrupt with the same lock.
///
/// Failed operations leave the state unchanged, so ignoring the returned
/// [`Error`] gives the usual "silently do nothing" behaviour.
pub struct SoftPWM<IO: PortIo, T, const N: usize> {
    pub(crate) io: IO,
    pub(crate) ticker: T,
    pub(crate) pool: ChannelPool<IO::Port, N>,
    pub(crate) phase: u8,
    default_polarity: Polarity,
}

impl<IO: PortIo, T: TickSource, const N: usize> SoftPWM<IO, T, N> {
    pub fn new(io: IO, ticker: T) -> Self {
        Self {
            io,
            ticker,
            pool: ChannelPool::new(),
            phase: u8::MAX,
            default_polarity: Polarity::Normal,
        }
    }

    /// (Re)initializes the pool and starts the tick source.
    ///
    /// Channels left over from a previous run are released first.
    pub fn begin(&mut self, default_polarity: Polarity) {
        self.release_all();
        self.pool.reset();
        self.default_polarity = default_polarity;
        self.phase = u8::MAX;
        self.ticker.start();

        debug!(
            "softpwm: {} channels, tick {} Hz",
            N,
            self.ticker.tick_rate().raw()
        );
    }

    /// Stops the tick source and releases every channel.
    pub fn shutdown(&mut self) {
        self.ticker.stop();
        self.release_all();
    }

    /// Sets the duty of `target`, acquiring a channel for a new pin.
    ///
    /// With `immediate` the cycle restarts on the next tick and the channel
    /// skips any fade in progress.
    pub fn set(
        &mut self,
        target: impl Into<Target>,
        value: u8,
        immediate: bool,
    ) -> Result<(), Error> {
        match target.into() {
            Target::Pin(pin) => {
                let slot = match self.pool.find(pin) {
                    Some(slot) => {
                        self.pool.get_mut(slot).target = value;
                        slot
                    }
                    None => self.acquire(pin, value)?,
                };

                if immediate {
                    self.hard_reset();
                    self.pool.get_mut(slot).current = value;
                }
            }
            Target::All => {
                self.pool.for_each_mut(List::Active, |ch| {
                    ch.target = value;
                    if immediate {
                        ch.current = value;
                    }
                });

                if immediate {
                    self.hard_reset();
                }
            }
        }
        Ok(())
    }

    /// [`SoftPWM::set`] with the duty given in percent; values above 100 count as 100.
    pub fn set_percent(
        &mut self,
        target: impl Into<Target>,
        percent: u8,
        immediate: bool,
    ) -> Result<(), Error> {
        let value = (percent.min(100) as u16 * u8::MAX as u16 / 100) as u8;
        self.set(target, value, immediate)
    }

    /// Ramp time over the full range, separately for rising and falling duty.
    /// Zero means no ramp. Only channels active right now are affected.
    ///
    /// The step is at least 1 per cycle, so the longest ramp is 255 cycles
    /// (~4.25 s at 60 Hz). Longer durations finish in that time.
    pub fn set_fade(
        &mut self,
        target: impl Into<Target>,
        up: FadeTime,
        down: FadeTime,
    ) -> Result<(), Error> {
        let tick_rate = self.ticker.tick_rate();
        let fade_up = fade_rate(up, tick_rate);
        let fade_down = fade_rate(down, tick_rate);

        self.update(target.into(), |ch| {
            ch.fade_up = fade_up;
            ch.fade_down = fade_down;
        })
    }

    pub fn set_polarity(
        &mut self,
        target: impl Into<Target>,
        polarity: impl Into<Polarity>,
    ) -> Result<(), Error> {
        let polarity = polarity.into();
        self.update(target.into(), |ch| ch.polarity = polarity)
    }

    /// Releases the channel of `pin` and turns the pin back into an input.
    pub fn end(&mut self, pin: PinId) -> Result<(), Error> {
        let slot = self.pool.find(pin).ok_or(Error::UnknownPin)?;
        self.release(slot);
        Ok(())
    }

    pub fn lookup(&self, pin: PinId) -> Option<&PWMChannel<IO::Port>> {
        self.pool.find(pin).map(|slot| self.pool.get(slot))
    }

    pub fn active_pins(&self) -> Vec<PinId, N> {
        let mut pins = Vec::new();
        for slot in self.pool.iter(List::Active) {
            if let Some(pin) = self.pool.get(slot).pin {
                // capacity is the pool size
                let _ = pins.push(pin);
            }
        }
        pins
    }

    pub fn active_count(&self) -> usize {
        self.pool.len(List::Active)
    }

    pub fn free_count(&self) -> usize {
        self.pool.len(List::Free)
    }

    pub fn default_polarity(&self) -> Polarity {
        self.default_polarity
    }

    /// Tick counter inside the current cycle.
    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    //-------------------------------------------------------------------------

    fn acquire(&mut self, pin: PinId, value: u8) -> Result<Slot, Error> {
        let location = match self.io.locate(pin) {
            Some(location) => location,
            None => {
                warn!("softpwm: pin {} is not mapped", pin);
                return Err(Error::InvalidPin);
            }
        };

        let slot = match self.pool.pop(List::Free) {
            Some(slot) => slot,
            None => {
                warn!("softpwm: out of channels, pin {} ignored", pin);
                return Err(Error::PoolExhausted);
            }
        };

        let polarity = self.default_polarity;
        let ch = self.pool.get_mut(slot);
        ch.reset();
        ch.pin = Some(pin);
        ch.polarity = polarity;
        ch.port = Some(location.port);
        ch.mask = location.mask;
        ch.target = value;

        // idle level first, so switching to output does not glitch
        self.io.write_pin(pin, polarity.idle_level());
        self.io.set_mode(pin, PinMode::Output);

        self.pool.push(List::Active, slot);

        debug!("softpwm: pin {} acquired", pin);
        Ok(slot)
    }

    fn release(&mut self, slot: Slot) {
        self.pool.remove(List::Active, slot);

        let ch = self.pool.get_mut(slot);
        if let Some(pin) = ch.pin {
            self.io.write_pin(pin, ch.polarity.idle_level());
            self.io.set_mode(pin, PinMode::Input);
            debug!("softpwm: pin {} released", pin);
        }
        ch.reset();

        self.pool.push(List::Free, slot);
    }

    fn release_all(&mut self) {
        while let Some(slot) = self.pool.head(List::Active) {
            self.release(slot);
        }
    }

    /// Next tick opens a new cycle, counted from now.
    fn hard_reset(&mut self) {
        self.ticker.restart();
        self.phase = u8::MAX;
    }

    fn update(
        &mut self,
        target: Target,
        mut f: impl FnMut(&mut PWMChannel<IO::Port>),
    ) -> Result<(), Error> {
        match target {
            Target::Pin(pin) => {
                let slot = self.pool.find(pin).ok_or(Error::UnknownPin)?;
                f(self.pool.get_mut(slot));
            }
            Target::All => self.pool.for_each_mut(List::Active, f),
        }
        Ok(())
    }
}
