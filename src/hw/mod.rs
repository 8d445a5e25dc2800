mod gpio;
pub use gpio::{Port, Stm32Gpio};
