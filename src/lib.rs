#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod config;
pub mod pwm;
pub mod support;

#[cfg(feature = "stm32f103")]
pub mod hw;

pub use pwm::{
    Error, FadeTime, PWMChannel, PinId, PinLocation, PinMode, Polarity, PortIo, SoftPWM, Target,
    TickSource,
};
pub use support::Timer;
