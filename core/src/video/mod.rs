pub mod assembler;
pub mod calibration;
pub mod raster;

pub use assembler::{FrameAssembler, FrameReady};
pub use calibration::{Calibration, Calibrator};
pub use raster::{FrameBuffer, Pixel, Raster};
