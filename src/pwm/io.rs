use embedded_hal::digital::v2::PinState;
use fugit_timer::HertzU32;

use super::PinId;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input,
    Output,
}

/// Where a pin lives: its output register and bit mask inside it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PinLocation<P> {
    pub port: P,
    pub mask: u16,
}

/// Board GPIO as seen by the PWM core.
pub trait PortIo {
    /// Handle of an output register. Resolved once when a channel is acquired.
    type Port: Copy;

    fn locate(&self, pin: PinId) -> Option<PinLocation<Self::Port>>;

    /// Called from the tick interrupt, must not block.
    fn write_port(&mut self, port: Self::Port, mask: u16, state: PinState);

    fn set_mode(&mut self, pin: PinId, mode: PinMode);

    fn write_pin(&mut self, pin: PinId, state: PinState);
}

/// Periodic interrupt source driving [`SoftPWM::on_tick`](super::SoftPWM::on_tick).
pub trait TickSource {
    /// Real tick frequency after the hardware rounded the requested one.
    fn tick_rate(&self) -> HertzU32;

    fn start(&mut self);

    /// Reset the hardware counter so the next tick comes one full period later.
    fn restart(&mut self);

    fn stop(&mut self);
}
