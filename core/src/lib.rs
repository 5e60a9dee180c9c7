//! Synchronisation engine for driving a cycle-stepped video logic model.
//!
//! The model is only ever stepped and read through [`SignalPort`]. The engine
//! measures the model's horizontal-sync period to find its pixel clock, turns
//! per-pixel samples into frames, and hands each finished frame to a [`Host`]
//! that also supplies the control keys.
//!
//! [`SignalPort`]: signal::SignalPort
//! [`Host`]: session::Host

pub mod control;
pub mod error;
pub mod session;
pub mod signal;
pub mod video;

pub mod prelude {
    pub use crate::control::{ControlSampler, Controls, EdgeDetector, ExecutionMode};
    pub use crate::error::RasterError;
    pub use crate::session::{Host, RunSummary, Session, SessionConfig};
    pub use crate::signal::{ClockDriver, InputPins, OutputSample, SignalPort};
    pub use crate::video::{Calibration, FrameBuffer, Pixel, Raster};
}
