//! Built-in signal models.
//!
//! These stand in for a simulated hardware design: each implements
//! [`SignalPort`](rastersync_core::signal::SignalPort) and registers itself
//! with the [`registry`] so the front-end can select it by name.

pub mod args;
pub mod registry;
pub mod timing;
pub mod vga_bars;

pub use args::{ModelArgs, ModelError};
pub use vga_bars::{Pattern, VgaBars};
