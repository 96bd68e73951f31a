//! Environment definitions and name resolution.
//!
//! This module provides:
//! - `Writability` and `Environment` for the globals an environment declares
//! - The built-in environment table
//! - `EnvironmentRegistry`, which layers plugin environments over a base lookup

mod binding;
mod builtins;
mod registry;

pub use binding::{Environment, Globals, Writability};
pub use builtins::{BuiltinEnvironments, BUILTIN_ENVIRONMENTS};
pub use registry::{parse_plugins, EnvironmentRegistry, PluginEnvironments};

/// A source of environment definitions keyed by name.
pub trait EnvironmentLookup {
    fn environment(&self, name: &str) -> Option<&Environment>;
}

impl EnvironmentLookup for std::collections::HashMap<String, Environment> {
    fn environment(&self, name: &str) -> Option<&Environment> {
        self.get(name)
    }
}
