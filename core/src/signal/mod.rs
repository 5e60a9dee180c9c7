pub mod clock;
pub mod port;

pub use clock::ClockDriver;
pub use port::{InputPins, OutputSample, SignalPort};
