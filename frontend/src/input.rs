use std::collections::HashMap;

use rastersync_core::control::Controls;
use sdl2::keyboard::Scancode;

use crate::config::{ConfigError, KeyBindings};

/// A single control the keyboard can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Select,
    ModelReset,
    Switch(usize),
    Quit,
    Reset,
    Pause,
    Capture,
}

impl Control {
    fn apply(self, controls: &mut Controls) {
        match self {
            Control::Up => controls.up = true,
            Control::Down => controls.down = true,
            Control::Left => controls.left = true,
            Control::Right => controls.right = true,
            Control::Fire => controls.fire = true,
            Control::Select => controls.select = true,
            Control::ModelReset => controls.model_reset = true,
            Control::Switch(n) => {
                if let Some(switch) = controls.switches.get_mut(n) {
                    *switch = true;
                }
            }
            Control::Quit => controls.quit = true,
            Control::Reset => controls.reset = true,
            Control::Pause => controls.pause = true,
            Control::Capture => controls.capture = true,
        }
    }
}

/// Maps SDL scancodes to controls.
pub struct KeyMap {
    map: HashMap<Scancode, Control>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a scancode to a control. A later binding of the same key wins.
    pub fn bind(&mut self, scancode: Scancode, control: Control) {
        self.map.insert(scancode, control);
    }

    /// Look up the control for a scancode.
    pub fn get(&self, scancode: Scancode) -> Option<Control> {
        self.map.get(&scancode).copied()
    }

    /// Build a key map from configured SDL scancode names.
    pub fn from_bindings(bindings: &KeyBindings) -> Result<Self, ConfigError> {
        let table: [(&str, Control, &[String]); 15] = [
            ("up", Control::Up, &bindings.up),
            ("down", Control::Down, &bindings.down),
            ("left", Control::Left, &bindings.left),
            ("right", Control::Right, &bindings.right),
            ("fire", Control::Fire, &bindings.fire),
            ("select", Control::Select, &bindings.select),
            ("model_reset", Control::ModelReset, &bindings.model_reset),
            ("switch0", Control::Switch(0), &bindings.switch0),
            ("switch1", Control::Switch(1), &bindings.switch1),
            ("switch2", Control::Switch(2), &bindings.switch2),
            ("switch3", Control::Switch(3), &bindings.switch3),
            ("quit", Control::Quit, &bindings.quit),
            ("reset", Control::Reset, &bindings.reset),
            ("pause", Control::Pause, &bindings.pause),
            ("capture", Control::Capture, &bindings.capture),
        ];

        let mut km = KeyMap::new();
        for (label, control, names) in table {
            for name in names {
                let scancode = Scancode::from_name(name).ok_or_else(|| ConfigError::UnknownKey {
                    control: label.to_string(),
                    name: name.clone(),
                })?;
                km.bind(scancode, control);
            }
        }
        Ok(km)
    }

    /// Collect the controls whose keys `is_pressed` reports as held.
    pub fn controls(&self, is_pressed: impl Fn(Scancode) -> bool) -> Controls {
        let mut controls = Controls::default();
        for (&scancode, &control) in &self.map {
            if is_pressed(scancode) {
                control.apply(&mut controls);
            }
        }
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_resolve() {
        let km = KeyMap::from_bindings(&KeyBindings::default()).unwrap();
        assert_eq!(km.get(Scancode::Q), Some(Control::Quit));
        assert_eq!(km.get(Scancode::Escape), Some(Control::Quit));
        assert_eq!(km.get(Scancode::Space), Some(Control::Fire));
        assert_eq!(km.get(Scancode::Num3), Some(Control::Switch(2)));
        assert_eq!(km.get(Scancode::F12), Some(Control::Capture));
    }

    #[test]
    fn unknown_name_rejected() {
        let bindings = KeyBindings {
            fire: vec!["NotAKey".into()],
            ..KeyBindings::default()
        };
        assert!(matches!(
            KeyMap::from_bindings(&bindings),
            Err(ConfigError::UnknownKey { ref control, .. }) if control == "fire"
        ));
    }

    #[test]
    fn controls_from_held_keys() {
        let mut km = KeyMap::new();
        km.bind(Scancode::Left, Control::Left);
        km.bind(Scancode::P, Control::Pause);
        km.bind(Scancode::Num1, Control::Switch(0));

        let controls = km.controls(|sc| sc == Scancode::P || sc == Scancode::Num1);
        assert!(controls.pause);
        assert_eq!(controls.switches, [true, false, false, false]);
        assert!(!controls.left);
    }
}
