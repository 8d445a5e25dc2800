use embedded_hal::digital::v2::PinState;
use stm32f1xx_hal::pac::{gpioa::RegisterBlock, GPIOA, GPIOB, GPIOC, GPIOD, GPIOE};

use crate::pwm::{PinId, PinLocation, PinMode, PortIo};

/// Pin numbering: `port * 16 + bit`, PA0 = 0, PB0 = 16, PC13 = 45
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
}

impl Port {
    fn from_pin(pin: PinId) -> Option<Self> {
        Some(match pin / 16 {
            0 => Port::A,
            1 => Port::B,
            2 => Port::C,
            3 => Port::D,
            4 => Port::E,
            _ => return None,
        })
    }

    fn regs(self) -> &'static RegisterBlock {
        unsafe {
            match self {
                Port::A => &*GPIOA::ptr(),
                Port::B => &*GPIOB::ptr(),
                Port::C => &*GPIOC::ptr(),
                Port::D => &*GPIOD::ptr(),
                Port::E => &*GPIOE::ptr(),
            }
        }
    }
}

// CNF|MODE
const CFG_OUTPUT_PP_2MHZ: u32 = 0b0010;
const CFG_INPUT_FLOATING: u32 = 0b0100;

/// Raw register access to GPIO ports. Port clocks must be enabled beforehand
/// (`split()` of the HAL does it).
#[derive(Default)]
pub struct Stm32Gpio;

impl Stm32Gpio {
    pub fn new() -> Self {
        Self
    }
}

impl PortIo for Stm32Gpio {
    type Port = Port;

    fn locate(&self, pin: PinId) -> Option<PinLocation<Port>> {
        Port::from_pin(pin).map(|port| PinLocation {
            port,
            mask: 1 << (pin % 16),
        })
    }

    fn write_port(&mut self, port: Port, mask: u16, state: PinState) {
        // BSRR: младшие 16 бит - установка, старшие - сброс
        let bits = match state {
            PinState::High => mask as u32,
            PinState::Low => (mask as u32) << 16,
        };
        port.regs().bsrr.write(|w| unsafe { w.bits(bits) });
    }

    fn set_mode(&mut self, pin: PinId, mode: PinMode) {
        let port = match Port::from_pin(pin) {
            Some(port) => port,
            None => return,
        };

        let cfg = match mode {
            PinMode::Output => CFG_OUTPUT_PP_2MHZ,
            PinMode::Input => CFG_INPUT_FLOATING,
        };
        let bit = (pin % 16) as u32;
        let shift = (bit % 8) * 4;

        let regs = port.regs();
        cortex_m::interrupt::free(|_| {
            if bit < 8 {
                regs.crl
                    .modify(|r, w| unsafe { w.bits((r.bits() & !(0xF << shift)) | (cfg << shift)) });
            } else {
                regs.crh
                    .modify(|r, w| unsafe { w.bits((r.bits() & !(0xF << shift)) | (cfg << shift)) });
            }
        });
    }

    fn write_pin(&mut self, pin: PinId, state: PinState) {
        if let Some(location) = self.locate(pin) {
            self.write_port(location.port, location.mask, state);
        }
    }
}
