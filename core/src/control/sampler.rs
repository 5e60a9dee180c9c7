use log::info;

use crate::control::edge::EdgeDetector;
use crate::session::Host;
use crate::signal::{ClockDriver, InputPins};

/// Lifecycle state of a session. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionMode {
    Calibrating,
    Running,
    Paused,
    Terminating,
}

/// Key levels polled from the host at a frame boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub select: bool,
    pub model_reset: bool,
    /// Switch levels, driven straight onto the model's switch inputs.
    pub switches: [bool; 4],
    pub quit: bool,
    pub reset: bool,
    pub pause: bool,
    /// Frame capture key, handled entirely by the host.
    pub capture: bool,
}

/// Mode transition for one control sample.
///
/// Priority is quit, then reset, then the pause edge. `Terminating` is
/// absorbing and `Calibrating` is only left by the session itself.
pub fn transition(mode: ExecutionMode, quit: bool, reset: bool, pause_edge: bool) -> ExecutionMode {
    use ExecutionMode::*;

    match mode {
        Terminating => Terminating,
        _ if quit => Terminating,
        _ if reset => Calibrating,
        Running if pause_edge => Paused,
        Paused if pause_edge => Running,
        other => other,
    }
}

/// Polls the host once per frame boundary and decides the next mode.
///
/// Only the pause key is debounced; every other control is passed on at the
/// level it was polled.
#[derive(Debug, Default)]
pub struct ControlSampler {
    pause: EdgeDetector,
}

impl ControlSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one control sample in `mode` and return the next mode.
    ///
    /// When the result is `Running` the polled button and switch levels are
    /// written to the clock driver's input latch for the next cycle group.
    pub fn sample<H: Host + ?Sized>(
        &mut self,
        mode: ExecutionMode,
        host: &mut H,
        clock: &mut ClockDriver,
    ) -> ExecutionMode {
        if host.poll_quit_event() {
            info!("close requested");
            return ExecutionMode::Terminating;
        }

        let controls = host.poll_controls();
        let pause_edge = self.pause.rising(controls.pause);

        let next = transition(mode, controls.quit, controls.reset, pause_edge);
        match (mode, next) {
            (_, ExecutionMode::Terminating) => info!("quit"),
            (_, ExecutionMode::Calibrating) => info!("reset requested"),
            (ExecutionMode::Running, ExecutionMode::Paused) => info!("paused"),
            (ExecutionMode::Paused, ExecutionMode::Running) => info!("resumed"),
            _ => {}
        }

        if next == ExecutionMode::Running {
            clock.set_buttons(buttons(&controls));
        }
        next
    }

}

fn buttons(controls: &Controls) -> InputPins {
    InputPins {
        up: controls.up,
        down: controls.down,
        left: controls.left,
        right: controls.right,
        fire: controls.fire,
        select: controls.select,
        model_reset: controls.model_reset,
        switches: controls.switches,
        ..InputPins::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ExecutionMode::*;
    use crate::video::FrameBuffer;

    #[derive(Default)]
    struct Keys {
        controls: Controls,
        close: bool,
    }

    impl Host for Keys {
        fn present(&mut self, _frame: &FrameBuffer) {}
        fn poll_controls(&mut self) -> Controls {
            self.controls
        }
        fn poll_quit_event(&mut self) -> bool {
            self.close
        }
    }

    // =================================================================
    // Transition table
    // =================================================================

    #[test]
    fn test_terminating_is_absorbing() {
        for quit in [false, true] {
            for reset in [false, true] {
                for edge in [false, true] {
                    assert_eq!(transition(Terminating, quit, reset, edge), Terminating);
                }
            }
        }
    }

    #[test]
    fn test_quit_beats_reset_and_pause() {
        assert_eq!(transition(Running, true, true, true), Terminating);
        assert_eq!(transition(Paused, true, false, false), Terminating);
        assert_eq!(transition(Calibrating, true, false, false), Terminating);
    }

    #[test]
    fn test_reset_from_running_or_paused() {
        assert_eq!(transition(Running, false, true, true), Calibrating);
        assert_eq!(transition(Paused, false, true, false), Calibrating);
    }

    #[test]
    fn test_pause_edge_toggles() {
        assert_eq!(transition(Running, false, false, true), Paused);
        assert_eq!(transition(Paused, false, false, true), Running);
        assert_eq!(transition(Running, false, false, false), Running);
        assert_eq!(transition(Paused, false, false, false), Paused);
    }

    // =================================================================
    // Sampler
    // =================================================================

    #[test]
    fn test_close_event_terminates() {
        let mut keys = Keys {
            close: true,
            ..Keys::default()
        };
        let mut sampler = ControlSampler::new();
        let mut clock = ClockDriver::new();
        assert_eq!(sampler.sample(Paused, &mut keys, &mut clock), Terminating);
    }

    #[test]
    fn test_held_pause_toggles_once() {
        let mut keys = Keys::default();
        let mut sampler = ControlSampler::new();
        let mut clock = ClockDriver::new();

        keys.controls.pause = true;
        let mut mode = Running;
        mode = sampler.sample(mode, &mut keys, &mut clock);
        assert_eq!(mode, Paused);
        for _ in 0..10 {
            mode = sampler.sample(mode, &mut keys, &mut clock);
            assert_eq!(mode, Paused);
        }

        keys.controls.pause = false;
        mode = sampler.sample(mode, &mut keys, &mut clock);
        assert_eq!(mode, Paused);
        keys.controls.pause = true;
        mode = sampler.sample(mode, &mut keys, &mut clock);
        assert_eq!(mode, Running);
    }

    #[test]
    fn test_buttons_written_only_when_running() {
        let mut keys = Keys::default();
        let mut sampler = ControlSampler::new();
        let mut clock = ClockDriver::new();

        keys.controls.fire = true;
        sampler.sample(Paused, &mut keys, &mut clock);
        assert!(!clock.pins().fire);

        sampler.sample(Running, &mut keys, &mut clock);
        assert!(clock.pins().fire);
    }

    #[test]
    fn test_switch_levels_pass_through() {
        let mut keys = Keys::default();
        let mut sampler = ControlSampler::new();
        let mut clock = ClockDriver::new();

        let mut seen = Vec::new();
        for level in [true, true, false, false] {
            keys.controls.switches[0] = level;
            sampler.sample(Running, &mut keys, &mut clock);
            seen.push(clock.pins().switches[0]);
        }
        assert_eq!(seen, [true, true, false, false]);

        keys.controls.switches = [false, true, false, true];
        sampler.sample(Running, &mut keys, &mut clock);
        assert_eq!(clock.pins().switches, [false, true, false, true]);
    }
}
