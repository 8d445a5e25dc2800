//! Host-side stand-ins for the board GPIO and the tick timer.

#![allow(dead_code)]

use embedded_hal::digital::v2::PinState;
use fugit_timer::HertzU32;
use stm32f1_softpwm::{PinId, PinLocation, PinMode, PortIo, SoftPWM, TickSource};

/// Pins 0..64, 16 per port, like the STM32 numbering.
pub const PIN_COUNT: usize = 64;

/// 60 Hz cycle
pub const TICK_RATE_HZ: u32 = 60 * 256;

pub const POOL: usize = 4;

pub type TestPwm = SoftPWM<MockGpio, MockTicker, POOL>;

/// Foreground pin operations, in call order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Op {
    Write(PinState),
    Mode(PinMode),
}

pub struct MockGpio {
    pub levels: [Option<PinState>; PIN_COUNT],
    pub modes: [Option<PinMode>; PIN_COUNT],
    pub port_writes: usize,
    pub events: Vec<(PinId, Op)>,
}

impl Default for MockGpio {
    fn default() -> Self {
        Self {
            levels: [None; PIN_COUNT],
            modes: [None; PIN_COUNT],
            port_writes: 0,
            events: Vec::new(),
        }
    }
}

impl MockGpio {
    pub fn level(&self, pin: PinId) -> Option<PinState> {
        self.levels[pin as usize]
    }

    pub fn mode(&self, pin: PinId) -> Option<PinMode> {
        self.modes[pin as usize]
    }

    pub fn events_for(&self, pin: PinId) -> Vec<Op> {
        self.events
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, op)| *op)
            .collect()
    }

    pub fn is_high(&self, pin: PinId) -> bool {
        self.level(pin) == Some(PinState::High)
    }
}

impl PortIo for MockGpio {
    type Port = u8;

    fn locate(&self, pin: PinId) -> Option<PinLocation<u8>> {
        if (pin as usize) < PIN_COUNT {
            Some(PinLocation {
                port: pin / 16,
                mask: 1 << (pin % 16),
            })
        } else {
            None
        }
    }

    fn write_port(&mut self, port: u8, mask: u16, state: PinState) {
        self.port_writes += 1;
        for bit in 0..16u8 {
            if mask & (1 << bit) != 0 {
                self.levels[(port * 16 + bit) as usize] = Some(state);
            }
        }
    }

    fn set_mode(&mut self, pin: PinId, mode: PinMode) {
        self.modes[pin as usize] = Some(mode);
        self.events.push((pin, Op::Mode(mode)));
    }

    fn write_pin(&mut self, pin: PinId, state: PinState) {
        self.levels[pin as usize] = Some(state);
        self.events.push((pin, Op::Write(state)));
    }
}

#[derive(Default)]
pub struct MockTicker {
    pub running: bool,
    pub starts: usize,
    pub restarts: usize,
    pub stops: usize,
}

impl TickSource for MockTicker {
    fn tick_rate(&self) -> HertzU32 {
        HertzU32::from_raw(TICK_RATE_HZ)
    }

    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn restart(&mut self) {
        self.restarts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }
}

pub fn make_pwm() -> TestPwm {
    let mut pwm = TestPwm::new(MockGpio::default(), MockTicker::default());
    pwm.begin(stm32f1_softpwm::Polarity::Normal);
    pwm
}

pub fn ticks(pwm: &mut TestPwm, n: usize) {
    for _ in 0..n {
        pwm.on_tick();
    }
}

/// Runs ticks until the counter wraps, i.e. a new cycle has just started.
pub fn next_cycle(pwm: &mut TestPwm) {
    loop {
        pwm.on_tick();
        if pwm.phase() == 0 {
            break;
        }
    }
}
