//! Pixel-clock self-calibration.
//!
//! Before any frame is assembled the model is run for a fixed warm-up window
//! and the spacing between horizontal-sync pulses is measured. A line that is
//! noticeably longer than the nominal scan means the model consumes two
//! simulation cycles per output pixel.

use log::{info, trace};

use crate::control::edge::EdgeDetector;
use crate::signal::{ClockDriver, OutputSample, SignalPort};

/// Nominal cycles per scanline at one cycle per pixel (800-pixel scan).
pub const NOMINAL_LINE_CYCLES: u32 = 800;

/// Scanlines' worth of cycles observed during warm-up.
pub const CALIBRATION_SCANLINES: u32 = 16;

/// Raw cycles run by the calibrator.
pub const CALIBRATION_CYCLES: u32 = CALIBRATION_SCANLINES * NOMINAL_LINE_CYCLES;

/// Average run length above which two cycles are consumed per pixel.
pub const DOUBLE_CLOCK_THRESHOLD: u32 = 800;

/// Result of a calibration phase. Frozen until the next reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Calibration {
    /// Cycles since the last hsync pulse when the window closed.
    pub current_run_length: u32,
    /// Recency-weighted estimate of the hsync period.
    pub average_run_length: u32,
    /// Simulation cycles per output pixel, 1 or 2.
    pub pixel_clock_divisor: u32,
}

impl Calibration {
    /// Divisor implied by an average hsync period.
    pub fn divisor_for(average_run_length: u32) -> u32 {
        if average_run_length > DOUBLE_CLOCK_THRESHOLD {
            2
        } else {
            1
        }
    }
}

/// Accumulates hsync run lengths over the warm-up window.
#[derive(Debug, Default)]
pub struct Calibrator {
    current: u32,
    average: u32,
    armed: bool,
    pulses: u32,
    hsync: EdgeDetector,
}

impl Calibrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one cycle's sample into the measurement.
    ///
    /// On a rising hsync edge the run is folded into the average as
    /// `(average + current) / 2` and restarted; every other cycle extends it.
    /// The first pulse has no preceding run and only arms the measurement.
    pub fn observe(&mut self, sample: &OutputSample) {
        if !self.hsync.rising(sample.hsync) {
            self.current = self.current.saturating_add(1);
            return;
        }

        if self.armed {
            self.average = (self.average + self.current) / 2;
            self.pulses += 1;
            trace!("hsync run {} cycles, average now {}", self.current, self.average);
        }
        self.armed = true;
        self.current = 0;
    }

    /// Number of run lengths folded so far.
    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    /// Close the window and derive the divisor.
    pub fn finish(&self) -> Calibration {
        Calibration {
            current_run_length: self.current,
            average_run_length: self.average,
            pixel_clock_divisor: Calibration::divisor_for(self.average),
        }
    }

    /// Run the full warm-up window against `port`, one raw cycle at a time.
    pub fn run<P: SignalPort + ?Sized>(port: &mut P, clock: &mut ClockDriver) -> Calibration {
        let mut calibrator = Self::new();
        for _ in 0..CALIBRATION_CYCLES {
            clock.step_cycle(port);
            calibrator.observe(&port.read_outputs());
        }

        let calibration = calibrator.finish();
        info!(
            "calibrated: {} hsync pulses, average line {} cycles, divisor {}",
            calibrator.pulses(),
            calibration.average_run_length,
            calibration.pixel_clock_divisor
        );
        if calibrator.pulses() == 0 {
            log::warn!("no hsync period measured during warm-up; assuming one cycle per pixel");
        }
        calibration
    }
}
