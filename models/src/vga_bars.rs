use log::debug;
use rastersync_core::signal::{InputPins, OutputSample, SignalPort};

use crate::args::{ModelArgs, ModelError};
use crate::registry::ModelEntry;
use crate::timing::{Beam, ScanCounter, Timing, VGA_640X480};

/// Side length of the movable box, in pixels.
pub const BOX_SIZE: u16 = 32;

/// Box movement per frame while a direction is held.
pub const BOX_STEP: u16 = 4;

const CHECKER_SIZE: u16 = 32;

/// White, yellow, cyan, green, magenta, red, blue, black.
const BAR_COLOURS: [(u8, u8, u8); 8] = [
    (0xFF, 0xFF, 0xFF),
    (0xFF, 0xFF, 0x00),
    (0x00, 0xFF, 0xFF),
    (0x00, 0xFF, 0x00),
    (0xFF, 0x00, 0xFF),
    (0xFF, 0x00, 0x00),
    (0x00, 0x00, 0xFF),
    (0x00, 0x00, 0x00),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Bars,
    Checker,
    Gradient,
}

impl Pattern {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "bars" => Some(Self::Bars),
            "checker" => Some(Self::Checker),
            "gradient" => Some(Self::Gradient),
            _ => None,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Bars => Self::Checker,
            Self::Checker => Self::Gradient,
            Self::Gradient => Self::Bars,
        }
    }
}

/// Colour-bar test pattern generator with VGA timing.
///
/// Behaves like a small synchronous design: state only changes on a rising
/// `clk_pixel` edge, the `reset` line clears it, and outputs are registered.
/// Inputs are read once per frame:
///
/// | input        | effect                                   |
/// |--------------|------------------------------------------|
/// | directions   | move the box by [`BOX_STEP`] pixels      |
/// | fire         | draw the box inverted instead of white   |
/// | select       | next background pattern (on press)       |
/// | model_reset  | recentre the box                         |
/// | switch 0     | force the checkerboard                   |
/// | switch 1     | freeze box motion                        |
/// | switch 2     | invert the whole picture                 |
/// | switch 3     | hide the box                             |
pub struct VgaBars {
    scan: ScanCounter,
    cycles_per_pixel: u32,
    sub_cycle: u32,
    clk: bool,
    pins: InputPins,
    outputs: OutputSample,

    initial_pattern: Pattern,
    pattern: Pattern,
    box_x: u16,
    box_y: u16,
    select_held: bool,
    frames: u64,
    torn_down: bool,
}

impl VgaBars {
    /// One simulation cycle per pixel.
    pub fn new(pattern: Pattern) -> Self {
        Self::with_timing(VGA_640X480, 1, pattern)
    }

    /// Two simulation cycles per pixel.
    pub fn double_clocked(pattern: Pattern) -> Self {
        Self::with_timing(VGA_640X480, 2, pattern)
    }

    pub fn with_timing(timing: Timing, cycles_per_pixel: u32, pattern: Pattern) -> Self {
        let mut model = Self {
            scan: ScanCounter::new(timing),
            cycles_per_pixel: cycles_per_pixel.max(1),
            sub_cycle: 0,
            clk: false,
            pins: InputPins::default(),
            outputs: OutputSample::default(),
            initial_pattern: pattern,
            pattern,
            box_x: 0,
            box_y: 0,
            select_held: false,
            frames: 0,
            torn_down: false,
        };
        model.power_on();
        model
    }

    fn power_on(&mut self) {
        self.scan.reset();
        self.sub_cycle = 0;
        self.pattern = self.initial_pattern;
        self.centre_box();
        self.select_held = false;
        self.frames = 0;
        self.outputs = self.render();
    }

    fn centre_box(&mut self) {
        self.box_x = (self.scan.t.h_active - BOX_SIZE) / 2;
        self.box_y = (self.scan.t.v_active - BOX_SIZE) / 2;
    }

    /// Once-per-frame input handling, at the frame wrap.
    fn end_of_frame(&mut self) {
        self.frames += 1;
        let pins = self.pins;

        if pins.select && !self.select_held {
            self.pattern = self.pattern.next();
            debug!("pattern -> {:?}", self.pattern);
        }
        self.select_held = pins.select;

        if pins.model_reset {
            self.centre_box();
            return;
        }
        if pins.switches[1] {
            return;
        }

        let max_x = self.scan.t.h_active - BOX_SIZE;
        let max_y = self.scan.t.v_active - BOX_SIZE;
        if pins.left {
            self.box_x = self.box_x.saturating_sub(BOX_STEP);
        }
        if pins.right {
            self.box_x = (self.box_x + BOX_STEP).min(max_x);
        }
        if pins.up {
            self.box_y = self.box_y.saturating_sub(BOX_STEP);
        }
        if pins.down {
            self.box_y = (self.box_y + BOX_STEP).min(max_y);
        }
    }

    fn render(&self) -> OutputSample {
        let beam = self.scan.beam();
        let (r, g, b) = if beam.visible() {
            self.colour(&beam)
        } else {
            (0, 0, 0)
        };
        OutputSample {
            r,
            g,
            b,
            hsync: beam.hsync,
            vsync: beam.vsync,
            vblank: beam.vblank,
            vsync_aux: beam.v_back_porch,
        }
    }

    fn colour(&self, beam: &Beam) -> (u8, u8, u8) {
        let pattern = if self.pins.switches[0] {
            Pattern::Checker
        } else {
            self.pattern
        };
        let t = &self.scan.t;
        let base = match pattern {
            Pattern::Bars => {
                let bar = (beam.x as usize * BAR_COLOURS.len()) / t.h_active as usize;
                BAR_COLOURS[bar.min(BAR_COLOURS.len() - 1)]
            }
            Pattern::Checker => {
                if ((beam.x / CHECKER_SIZE) + (beam.y / CHECKER_SIZE)) % 2 == 0 {
                    (0xC0, 0xC0, 0xC0)
                } else {
                    (0x20, 0x20, 0x20)
                }
            }
            Pattern::Gradient => (
                (beam.x as u32 * 255 / (t.h_active as u32 - 1).max(1)) as u8,
                (beam.y as u32 * 255 / (t.v_active as u32 - 1).max(1)) as u8,
                0x80,
            ),
        };

        let in_box = beam.x >= self.box_x
            && beam.x < self.box_x + BOX_SIZE
            && beam.y >= self.box_y
            && beam.y < self.box_y + BOX_SIZE;
        let (r, g, b) = if in_box && !self.pins.switches[3] {
            if self.pins.fire {
                (!base.0, !base.1, !base.2)
            } else {
                (0xFF, 0xFF, 0xFF)
            }
        } else {
            base
        };

        if self.pins.switches[2] {
            (!r, !g, !b)
        } else {
            (r, g, b)
        }
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn box_position(&self) -> (u16, u16) {
        (self.box_x, self.box_y)
    }

    /// Frames completed since the last reset.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl SignalPort for VgaBars {
    fn write_inputs(&mut self, pins: &InputPins) {
        self.pins = *pins;
    }

    fn eval(&mut self) {
        let rising = self.pins.clk_pixel && !self.clk;
        self.clk = self.pins.clk_pixel;

        if self.pins.reset {
            self.power_on();
            return;
        }
        if !rising {
            return;
        }

        self.sub_cycle += 1;
        if self.sub_cycle < self.cycles_per_pixel {
            return;
        }
        self.sub_cycle = 0;

        if self.scan.tick() {
            self.end_of_frame();
        }
        self.outputs = self.render();
    }

    fn read_outputs(&self) -> OutputSample {
        self.outputs
    }

    fn teardown(&mut self) {
        debug!("vga-bars: {} frames generated", self.frames);
        self.torn_down = true;
    }
}

fn pattern_arg(args: &ModelArgs) -> Result<Pattern, ModelError> {
    Ok(args.parsed("pattern", Pattern::parse)?.unwrap_or(Pattern::Bars))
}

fn create_vga_bars(args: &ModelArgs) -> Result<Box<dyn SignalPort>, ModelError> {
    Ok(Box::new(VgaBars::new(pattern_arg(args)?)))
}

fn create_vga_bars_2x(args: &ModelArgs) -> Result<Box<dyn SignalPort>, ModelError> {
    Ok(Box::new(VgaBars::double_clocked(pattern_arg(args)?)))
}

inventory::submit! {
    ModelEntry {
        name: "vga-bars",
        description: "640x480 colour bars, one cycle per pixel (+pattern=bars|checker|gradient)",
        factory: create_vga_bars,
    }
}

inventory::submit! {
    ModelEntry {
        name: "vga-bars-2x",
        description: "640x480 colour bars, two cycles per pixel (+pattern=bars|checker|gradient)",
        factory: create_vga_bars_2x,
    }
}
