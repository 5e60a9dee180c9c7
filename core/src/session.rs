//! The run loop: reset, calibrate, then assemble frames until told to stop.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::control::{ControlSampler, Controls, ExecutionMode};
use crate::error::RasterError;
use crate::signal::{ClockDriver, SignalPort};
use crate::video::{Calibration, Calibrator, FrameAssembler, FrameBuffer, FrameReady, Raster};

/// Frames between periodic progress lines at debug level.
const PROGRESS_INTERVAL: u64 = 600;

/// The presentation side of a session: displays frames and reports keys.
///
/// All calls are made from the session's thread between pixel steps, so a
/// presented frame is always complete.
pub trait Host {
    /// Display a completed frame.
    fn present(&mut self, frame: &FrameBuffer);

    /// Non-blocking snapshot of the control keys.
    fn poll_controls(&mut self) -> Controls;

    /// Non-blocking check for a pending application-close request.
    fn poll_quit_event(&mut self) -> bool;

    /// Called once per control sample while paused, before polling.
    fn idle(&mut self) {}

    /// Called after every calibration with the derived pixel clock.
    fn calibrated(&mut self, _calibration: &Calibration) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionConfig {
    pub raster: Raster,
    /// Recolour vblank / aux-vsync samples with fixed tints.
    pub debug_overlay: bool,
}

/// Frame count and wall time since the last (re)start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Frames per second, 0 when no time has elapsed.
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }
}

pub struct Session<P: SignalPort> {
    port: P,
    clock: ClockDriver,
    assembler: FrameAssembler,
    sampler: ControlSampler,
    calibration: Option<Calibration>,
    mode: ExecutionMode,
    frames: u64,
    started: Instant,
}

impl<P: SignalPort> Session<P> {
    pub fn new(port: P, config: SessionConfig) -> Self {
        Self {
            port,
            clock: ClockDriver::new(),
            assembler: FrameAssembler::new(config.raster, config.debug_overlay),
            sampler: ControlSampler::new(),
            calibration: None,
            mode: ExecutionMode::Calibrating,
            frames: 0,
            started: Instant::now(),
        }
    }

    /// Build a session for a `width` x `height` raster.
    pub fn with_raster(port: P, width: u32, height: u32, debug_overlay: bool) -> Result<Self, RasterError> {
        let raster = Raster::new(width, height)?;
        Ok(Self::new(
            port,
            SessionConfig {
                raster,
                debug_overlay,
            },
        ))
    }

    /// Run until the host asks to quit, then tear the model down.
    pub fn run<H: Host + ?Sized>(&mut self, host: &mut H) -> RunSummary {
        while self.step(host) != ExecutionMode::Terminating {}
        self.port.teardown();
        self.summary()
    }

    /// Advance the state machine by one unit of work and return the new mode:
    /// a full reset and calibration, one logical pixel, or one paused control
    /// sample.
    pub fn step<H: Host + ?Sized>(&mut self, host: &mut H) -> ExecutionMode {
        let next = match self.mode {
            ExecutionMode::Calibrating => {
                let calibration = self.restart();
                host.calibrated(&calibration);
                ExecutionMode::Running
            }
            ExecutionMode::Running => self.step_pixel(host),
            ExecutionMode::Paused => {
                host.idle();
                self.sampler.sample(ExecutionMode::Paused, host, &mut self.clock)
            }
            ExecutionMode::Terminating => ExecutionMode::Terminating,
        };
        if next == ExecutionMode::Calibrating {
            self.discard();
        }
        self.mode = next;
        next
    }

    /// Return cursor, frame counter and calibration to their cold-start values.
    fn discard(&mut self) {
        self.calibration = None;
        self.assembler.reset();
        self.frames = 0;
        self.started = Instant::now();
    }

    /// Reset the model and calibrate against it.
    fn restart(&mut self) -> Calibration {
        info!("resetting model");
        self.discard();
        self.clock.reset_sequence(&mut self.port);
        let calibration = Calibrator::run(&mut self.port, &mut self.clock);
        self.calibration = Some(calibration);
        calibration
    }

    fn step_pixel<H: Host + ?Sized>(&mut self, host: &mut H) -> ExecutionMode {
        let divisor = self.calibration.map_or(1, |c| c.pixel_clock_divisor);
        self.clock.step_pixel(&mut self.port, divisor);

        let sample = self.port.read_outputs();
        let Some(ready) = self.assembler.step(&sample) else {
            return ExecutionMode::Running;
        };

        host.present(self.assembler.frame());
        self.frames += 1;
        if let FrameReady::Overrun = ready {
            debug!("frame {} closed by overrun", self.frames);
        } else if self.frames % PROGRESS_INTERVAL == 0 {
            debug!("{} frames, {:.1} fps", self.frames, self.summary().fps());
        }

        let next = self.sampler.sample(ExecutionMode::Running, host, &mut self.clock);
        self.assembler.finish_frame();
        next
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Calibration of the current run, `None` before the first calibration.
    pub fn calibration(&self) -> Option<Calibration> {
        self.calibration
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cursor(&self) -> usize {
        self.assembler.cursor()
    }

    pub fn frame(&self) -> &FrameBuffer {
        self.assembler.frame()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frames,
            elapsed: self.started.elapsed(),
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }
}
