use core::fmt;

/// Why an operation did nothing. State is never modified when one of these is returned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// All channel records are in use.
    PoolExhausted,
    /// The pin has no active channel.
    UnknownPin,
    /// The board pin map does not know this pin.
    InvalidPin,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PoolExhausted => f.write_str("no free PWM channels"),
            Error::UnknownPin => f.write_str("pin has no active PWM channel"),
            Error::InvalidPin => f.write_str("pin is not mapped to an output register"),
        }
    }
}
