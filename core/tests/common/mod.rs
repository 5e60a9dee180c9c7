#![allow(dead_code)]

use rastersync_core::control::Controls;
use rastersync_core::session::Host;
use rastersync_core::signal::{InputPins, OutputSample, SignalPort};
use rastersync_core::video::{Calibration, FrameBuffer};

/// Synthetic raster source: a counter that emits hsync at the end of every
/// `line_cycles` cycles and vsync over the last `vsync_lines` lines of a
/// `lines`-line frame.
pub struct SyntheticPort {
    pub line_cycles: u32,
    pub hsync_width: u32,
    pub lines: u32,
    pub vsync_lines: u32,
    /// Hold vsync high on every cycle.
    pub always_vsync: bool,

    pub cycle: u64,
    pub resets: u32,
    pub torn_down: bool,
    pub latched: InputPins,
    clk: bool,
}

impl SyntheticPort {
    pub fn new(line_cycles: u32, lines: u32, vsync_lines: u32) -> Self {
        Self {
            line_cycles,
            hsync_width: (line_cycles / 8).max(1),
            lines,
            vsync_lines,
            always_vsync: false,
            cycle: 0,
            resets: 0,
            torn_down: false,
            latched: InputPins::default(),
            clk: false,
        }
    }

    /// Only hsync, with a fixed period; never asserts vsync.
    pub fn hsync_only(period: u32) -> Self {
        Self::new(period, u32::MAX / period, 0)
    }

    pub fn frame_cycles(&self) -> u64 {
        self.line_cycles as u64 * self.lines as u64
    }
}

impl SignalPort for SyntheticPort {
    fn write_inputs(&mut self, pins: &InputPins) {
        self.latched = *pins;
    }

    fn eval(&mut self) {
        let rising = self.latched.clk_pixel && !self.clk;
        self.clk = self.latched.clk_pixel;
        if self.latched.reset {
            if rising {
                self.resets += 1;
            }
            self.cycle = 0;
        } else if rising {
            self.cycle += 1;
        }
    }

    fn read_outputs(&self) -> OutputSample {
        let pos = self.cycle % self.frame_cycles().max(1);
        let line = (pos / self.line_cycles as u64) as u32;
        let col = (pos % self.line_cycles as u64) as u32;
        let vsync = self.always_vsync || line >= self.lines - self.vsync_lines;
        OutputSample {
            r: col as u8,
            g: line as u8,
            b: 0x55,
            hsync: col >= self.line_cycles - self.hsync_width,
            vsync,
            vblank: vsync,
            vsync_aux: false,
        }
    }

    fn teardown(&mut self) {
        self.torn_down = true;
    }
}

/// Host that replays a fixed list of control snapshots, one per poll.
#[derive(Default)]
pub struct ScriptedHost {
    /// Controls returned by successive polls; polls past the end see no keys.
    pub script: Vec<Controls>,
    /// Poll index at which a close event is reported.
    pub close_at: Option<usize>,

    pub polls: usize,
    pub quit_polls: usize,
    pub presented: u64,
    pub idles: u64,
    pub calibrations: Vec<Calibration>,
    pub last_frame: Option<Vec<u8>>,
}

impl ScriptedHost {
    pub fn new(script: Vec<Controls>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }
}

impl Host for ScriptedHost {
    fn present(&mut self, frame: &FrameBuffer) {
        self.presented += 1;
        self.last_frame = Some(frame.to_rgba());
    }

    fn poll_controls(&mut self) -> Controls {
        let controls = self.script.get(self.polls).copied().unwrap_or_default();
        self.polls += 1;
        controls
    }

    fn poll_quit_event(&mut self) -> bool {
        let close = self.close_at == Some(self.quit_polls);
        self.quit_polls += 1;
        close
    }

    fn idle(&mut self) {
        self.idles += 1;
    }

    fn calibrated(&mut self, calibration: &Calibration) {
        self.calibrations.push(*calibration);
    }
}

pub fn pressed(f: impl FnOnce(&mut Controls)) -> Controls {
    let mut controls = Controls::default();
    f(&mut controls);
    controls
}
