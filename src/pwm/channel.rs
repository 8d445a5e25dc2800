use embedded_hal::digital::v2::PinState;

/// Logical pin number, as understood by the board pin map.
pub type PinId = u8;

/// Index of a channel record inside the pool.
pub(crate) type Slot = usize;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    #[default]
    Normal,
    Inverted,
}

impl Polarity {
    /// Pin level that means "on" (`true`) or "off" (`false`) for this polarity.
    pub fn level(self, on: bool) -> PinState {
        match (self, on) {
            (Polarity::Normal, true) | (Polarity::Inverted, false) => PinState::High,
            (Polarity::Normal, false) | (Polarity::Inverted, true) => PinState::Low,
        }
    }

    pub fn idle_level(self) -> PinState {
        self.level(false)
    }
}

// all non-zero values are treated as inverted
impl From<u8> for Polarity {
    fn from(v: u8) -> Self {
        if v == 0 {
            Polarity::Normal
        } else {
            Polarity::Inverted
        }
    }
}

impl From<bool> for Polarity {
    fn from(inverted: bool) -> Self {
        if inverted {
            Polarity::Inverted
        } else {
            Polarity::Normal
        }
    }
}

/// Either a single pin or every channel active at call time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    Pin(PinId),
    All,
}

impl From<PinId> for Target {
    fn from(pin: PinId) -> Self {
        Target::Pin(pin)
    }
}

/// One logical PWM output.
///
/// Records live in the pool for the whole program; acquiring a pin fills one in,
/// releasing it resets the fields and hands the record back.
pub struct PWMChannel<P> {
    pub(crate) pin: Option<PinId>,
    pub(crate) polarity: Polarity,
    pub(crate) port: Option<P>,
    pub(crate) mask: u16,
    pub(crate) target: u8,
    pub(crate) current: u8,
    pub(crate) fade_up: u8,
    pub(crate) fade_down: u8,
    pub(crate) next: Option<Slot>,
    pub(crate) prev: Option<Slot>,
}

impl<P: Copy> PWMChannel<P> {
    pub(crate) fn vacant() -> Self {
        Self {
            pin: None,
            polarity: Polarity::Normal,
            port: None,
            mask: 0,
            target: 0,
            current: 0,
            fade_up: 0,
            fade_down: 0,
            next: None,
            prev: None,
        }
    }

    /// Clears everything except list links.
    pub(crate) fn reset(&mut self) {
        self.pin = None;
        self.polarity = Polarity::Normal;
        self.port = None;
        self.mask = 0;
        self.target = 0;
        self.current = 0;
        self.fade_up = 0;
        self.fade_down = 0;
    }

    pub fn pin(&self) -> Option<PinId> {
        self.pin
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn mask(&self) -> u16 {
        self.mask
    }

    pub fn output_register(&self) -> Option<P> {
        self.port
    }

    pub fn target_value(&self) -> u8 {
        self.target
    }

    pub fn current_value(&self) -> u8 {
        self.current
    }

    pub fn fade_up_rate(&self) -> u8 {
        self.fade_up
    }

    pub fn fade_down_rate(&self) -> u8 {
        self.fade_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_swaps_levels() {
        assert_eq!(Polarity::Normal.level(true), PinState::High);
        assert_eq!(Polarity::Normal.level(false), PinState::Low);
        assert_eq!(Polarity::Inverted.level(true), PinState::Low);
        assert_eq!(Polarity::Inverted.level(false), PinState::High);
    }

    #[test]
    fn polarity_is_normalized() {
        assert_eq!(Polarity::from(0u8), Polarity::Normal);
        assert_eq!(Polarity::from(1u8), Polarity::Inverted);
        assert_eq!(Polarity::from(0x7Fu8), Polarity::Inverted);
        assert_eq!(Polarity::from(true), Polarity::Inverted);
        assert_eq!(Polarity::default(), Polarity::Normal);
    }
}
