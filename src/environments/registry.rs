//! Two-tier environment lookup: plugin environments first, then built-ins.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{type_name, ConfigError};

use super::binding::{Environment, Globals, Writability};
use super::builtins::BuiltinEnvironments;
use super::EnvironmentLookup;

/// Environments contributed by plugins, keyed by `pluginId/baseName`.
pub type PluginEnvironments = HashMap<String, Environment>;

/// Resolves environment names to globals.
///
/// Immutable after construction; safe to share across threads.
#[derive(Clone)]
pub struct EnvironmentRegistry {
    plugins: PluginEnvironments,
    builtins: Arc<dyn EnvironmentLookup + Send + Sync>,
}

impl std::fmt::Debug for EnvironmentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentRegistry")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Default for EnvironmentRegistry {
    fn default() -> Self {
        Self::new(PluginEnvironments::new())
    }
}

impl EnvironmentRegistry {
    /// Create a registry over the built-in environment table.
    pub fn new(plugins: PluginEnvironments) -> Self {
        Self::with_lookup(Arc::new(BuiltinEnvironments), plugins)
    }

    /// Create a registry over a custom base lookup.
    pub fn with_lookup(
        builtins: Arc<dyn EnvironmentLookup + Send + Sync>,
        plugins: PluginEnvironments,
    ) -> Self {
        Self { plugins, builtins }
    }

    /// Look up a single environment by name.
    pub fn lookup(&self, name: &str) -> Option<&Environment> {
        self.plugins
            .get(name)
            .or_else(|| self.builtins.environment(name))
    }

    /// Merge the globals of the named environments, in order.
    ///
    /// Later environments overwrite earlier ones for the same global. Unknown
    /// names contribute nothing.
    pub fn resolve<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Globals {
        let mut globals = Globals::new();
        for name in names {
            match self.lookup(name) {
                Some(env) => {
                    globals.extend(env.globals.iter().map(|(k, v)| (k.clone(), *v)));
                }
                None => log::debug!("unknown environment '{}' contributes no globals", name),
            }
        }
        globals
    }
}

/// Validate a `plugins` table and collect the environments it defines.
///
/// Shape: `pluginId -> { environments? -> { baseName -> { globals? -> { NAME -> binding } } } }`.
pub fn parse_plugins(value: &toml::Value) -> Result<PluginEnvironments, ConfigError> {
    let plugins = expect_table("plugins", value)?;
    let mut environments = PluginEnvironments::new();

    for (plugin_id, plugin) in plugins {
        let key = format!("plugins.{}", plugin_id);
        let plugin = expect_table(&key, plugin)?;

        let Some(envs) = plugin.get("environments") else {
            continue;
        };
        let key = format!("{}.environments", key);
        for (base_name, env) in expect_table(&key, envs)? {
            let env_key = format!("{}.{}", key, base_name);
            let env = parse_environment(&env_key, env)?;
            environments.insert(format!("{}/{}", plugin_id, base_name), env);
        }
    }

    Ok(environments)
}

fn parse_environment(key: &str, value: &toml::Value) -> Result<Environment, ConfigError> {
    let table = expect_table(key, value)?;
    let mut env = Environment::default();

    let Some(globals) = table.get("globals") else {
        return Ok(env);
    };
    let key = format!("{}.globals", key);
    for (name, binding) in expect_table(&key, globals)? {
        let writability = parse_binding(binding).ok_or_else(|| ConfigError::InvalidValue {
            key: format!("{}.{}", key, name),
            reason: format!("invalid binding {}", binding),
        })?;
        env.globals.insert(name.clone(), writability);
    }

    Ok(env)
}

fn parse_binding(value: &toml::Value) -> Option<Writability> {
    match value {
        toml::Value::Boolean(writable) => Some(Writability::from(*writable)),
        toml::Value::String(s) => Writability::parse(s),
        _ => None,
    }
}

fn expect_table<'a>(key: &str, value: &'a toml::Value) -> Result<&'a toml::Table, ConfigError> {
    value.as_table().ok_or_else(|| ConfigError::NotATable {
        key: key.to_string(),
        found: type_name(value),
    })
}
