//! User configuration: `config.toml` under the platform config directory, or
//! an explicit `--config` path. Every field is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown key name `{name}` bound to {control}")]
    UnknownKey { control: String, name: String },
    #[error("scale must be at least 1")]
    InvalidScale,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Model to run when `--model` is not given.
    pub model: String,
    /// Integer window scale factor.
    pub scale: u32,
    /// Tint vblank / aux-vsync samples instead of showing their colour.
    pub debug_overlay: bool,
    pub width: u32,
    pub height: u32,
    /// Where captured frames are written.
    pub capture_dir: PathBuf,
    pub keys: KeyBindings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "vga-bars".to_string(),
            scale: 1,
            debug_overlay: false,
            width: rastersync_core::video::raster::DEFAULT_WIDTH,
            height: rastersync_core::video::raster::DEFAULT_HEIGHT,
            capture_dir: PathBuf::from("."),
            keys: KeyBindings::default(),
        }
    }
}

/// SDL scancode names per control. A control may have several keys.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub fire: Vec<String>,
    pub select: Vec<String>,
    pub model_reset: Vec<String>,
    pub switch0: Vec<String>,
    pub switch1: Vec<String>,
    pub switch2: Vec<String>,
    pub switch3: Vec<String>,
    pub quit: Vec<String>,
    pub reset: Vec<String>,
    pub pause: Vec<String>,
    pub capture: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: keys(&["Up"]),
            down: keys(&["Down"]),
            left: keys(&["Left"]),
            right: keys(&["Right"]),
            fire: keys(&["Space"]),
            select: keys(&["Return"]),
            model_reset: keys(&["Backspace"]),
            switch0: keys(&["1"]),
            switch1: keys(&["2"]),
            switch2: keys(&["3"]),
            switch3: keys(&["4"]),
            quit: keys(&["Q", "Escape"]),
            reset: keys(&["R"]),
            pause: keys(&["P"]),
            capture: keys(&["F12"]),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        if config.scale == 0 {
            return Err(ConfigError::InvalidScale);
        }
        Ok(config)
    }

    /// Load `path`, or the default location when `None`. A missing default
    /// file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                log::info!("loading configuration from {}", path.display());
                Self::from_toml_str(&text)
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }
}

/// `<config dir>/rastersync/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rastersync").join("config.toml"))
}
