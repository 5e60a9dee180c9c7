/// Levels driven onto the model's input ports.
///
/// The frontend never touches these directly: buttons are latched here by the
/// control sampler and the clock line is toggled by the [`ClockDriver`].
///
/// [`ClockDriver`]: super::clock::ClockDriver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputPins {
    pub reset: bool,
    pub clk_pixel: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub select: bool,
    /// The model's own reset button (distinct from the `reset` line).
    pub model_reset: bool,
    pub switches: [bool; 4],
}

/// One reading of the model's output ports, taken after a full clock cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub hsync: bool,
    pub vsync: bool,
    pub vblank: bool,
    /// Auxiliary vertical-sync indicator, only used by the debug overlay.
    pub vsync_aux: bool,
}

impl OutputSample {
    /// A visible sample carrying only colour, all sync flags deasserted.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            hsync: false,
            vsync: false,
            vblank: false,
            vsync_aux: false,
        }
    }
}

/// Capability interface for a stepped logic model.
///
/// The driver only ever writes the complete input latch, evaluates, and reads
/// the outputs back. Implementations are expected to be total: evaluation
/// never fails and has no side effects beyond port state.
pub trait SignalPort {
    /// Latch new levels onto the input ports. Takes effect on the next `eval`.
    fn write_inputs(&mut self, pins: &InputPins);

    /// Settle the model after an input change. Toggling `clk_pixel` and
    /// evaluating once advances the model by half a cycle.
    fn eval(&mut self);

    /// Current values of the output ports.
    fn read_outputs(&self) -> OutputSample;

    /// Final callback at shutdown.
    fn teardown(&mut self) {}
}

impl<T: SignalPort + ?Sized> SignalPort for Box<T> {
    fn write_inputs(&mut self, pins: &InputPins) {
        (**self).write_inputs(pins)
    }

    fn eval(&mut self) {
        (**self).eval()
    }

    fn read_outputs(&self) -> OutputSample {
        (**self).read_outputs()
    }

    fn teardown(&mut self) {
        (**self).teardown()
    }
}
