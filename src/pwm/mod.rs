mod channel;
pub use channel::{PWMChannel, PinId, Polarity, Target};

mod error;
pub use error::Error;

mod fade;
pub use fade::{fade_rate, FadeTime};

mod io;
pub use io::{PinLocation, PinMode, PortIo, TickSource};

mod pool;

mod multiplexer;

mod registry;
pub use registry::SoftPWM;
