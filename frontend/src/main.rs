use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rastersync_models::{ModelArgs, registry};

mod capture;
mod config;
mod emulator;
mod input;
mod video;

use config::Config;

/// Drive a cycle-stepped video model and show its output in a window.
#[derive(Debug, Parser)]
#[command(name = "rastersync", version)]
struct Cli {
    /// Model to run (see --list-models).
    #[arg(short, long)]
    model: Option<String>,

    /// Integer window scale factor.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    scale: Option<u32>,

    /// Configuration file (default: <config dir>/rastersync/config.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tint vblank and aux-vsync samples.
    #[arg(long)]
    debug_overlay: bool,

    /// Print the available models and exit.
    #[arg(long)]
    list_models: bool,

    /// Arguments passed through to the model, e.g. `+pattern=checker`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    model_args: Vec<String>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if self.debug_overlay {
            config.debug_overlay = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.list_models {
        for entry in registry::all() {
            println!("{:<14} {}", entry.name, entry.description);
        }
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);

    let args = ModelArgs::parse(&cli.model_args);
    let port = registry::create(&config.model, &args)
        .with_context(|| format!("failed to create model `{}`", config.model))?;

    println!("Simulation running. Press 'Q' in simulation window to quit.\n");
    let summary = emulator::run(port, &config, &config.model)?;
    println!("Frames per second: {:.1}", summary.fps());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_args_pass_through() {
        let cli = Cli::parse_from(["rastersync", "--model", "vga-bars-2x", "+pattern=checker", "-v"]);
        assert_eq!(cli.model.as_deref(), Some("vga-bars-2x"));
        assert_eq!(cli.model_args, vec!["+pattern=checker", "-v"]);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["rastersync", "--scale", "3", "--debug-overlay"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.scale, 3);
        assert!(config.debug_overlay);
        assert_eq!(config.model, "vga-bars");
    }

    #[test]
    fn zero_scale_rejected() {
        assert!(Cli::try_parse_from(["rastersync", "--scale", "0"]).is_err());
    }
}
