use super::port::{InputPins, SignalPort};

/// Drives the model's pixel clock and owns the input latch.
///
/// Every edge rewrites the full [`InputPins`] so button levels set between
/// cycle groups reach the model together with the next rising edge.
#[derive(Debug, Default)]
pub struct ClockDriver {
    pins: InputPins,
    cycles: u64,
}

impl ClockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// One full cycle: rising edge then falling edge, each followed by `eval`.
    pub fn step_cycle<P: SignalPort + ?Sized>(&mut self, port: &mut P) {
        self.pins.clk_pixel = true;
        port.write_inputs(&self.pins);
        port.eval();

        self.pins.clk_pixel = false;
        port.write_inputs(&self.pins);
        port.eval();

        self.cycles += 1;
    }

    /// Advance by one logical pixel: `divisor` full cycles.
    pub fn step_pixel<P: SignalPort + ?Sized>(&mut self, port: &mut P, divisor: u32) {
        for _ in 0..divisor {
            self.step_cycle(port);
        }
    }

    /// Power-on sequence: hold reset across one rising edge, then release it
    /// with the clock low.
    pub fn reset_sequence<P: SignalPort + ?Sized>(&mut self, port: &mut P) {
        self.pins.reset = true;
        self.pins.clk_pixel = false;
        port.write_inputs(&self.pins);
        port.eval();

        self.pins.clk_pixel = true;
        port.write_inputs(&self.pins);
        port.eval();

        self.pins.reset = false;
        self.pins.clk_pixel = false;
        port.write_inputs(&self.pins);
        port.eval();

        self.cycles = 0;
    }

    /// Latch button and switch levels. `reset` and `clk_pixel` stay under the
    /// driver's control.
    pub fn set_buttons(&mut self, buttons: InputPins) {
        self.pins = InputPins {
            reset: self.pins.reset,
            clk_pixel: self.pins.clk_pixel,
            ..buttons
        };
    }

    pub fn pins(&self) -> &InputPins {
        &self.pins
    }

    /// Full cycles issued since the last reset sequence.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
