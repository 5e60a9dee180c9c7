//! Self-registering model table.
//!
//! Built-in models add a [`ModelEntry`] with [`inventory::submit!`]; the
//! frontend lists them with [`all`] and builds one by name with [`create`].

use log::info;
use rastersync_core::signal::SignalPort;

use crate::args::{ModelArgs, ModelError};

/// Builds a model from its pass-through arguments.
pub type Factory = fn(&ModelArgs) -> Result<Box<dyn SignalPort>, ModelError>;

/// A model the frontend can select with `--model`.
pub struct ModelEntry {
    pub name: &'static str,
    /// One line for `--list-models`.
    pub description: &'static str,
    pub factory: Factory,
}

impl ModelEntry {
    pub fn build(&self, args: &ModelArgs) -> Result<Box<dyn SignalPort>, ModelError> {
        info!("creating model {} with {} argument(s)", self.name, args.raw().len());
        (self.factory)(args)
    }
}

inventory::collect!(ModelEntry);

/// Every registered model, sorted by name.
pub fn all() -> Vec<&'static ModelEntry> {
    let mut entries: Vec<_> = inventory::iter::<ModelEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.name);
    entries
}

/// Build the model registered as `name`.
pub fn create(name: &str, args: &ModelArgs) -> Result<Box<dyn SignalPort>, ModelError> {
    let entries = all();
    match entries.iter().find(|e| e.name == name) {
        Some(entry) => entry.build(args),
        None => Err(ModelError::UnknownModel {
            name: name.to_string(),
            available: entries.iter().map(|e| e.name).collect::<Vec<_>>().join(", "),
        }),
    }
}
