//! Processor options.
//!
//! Options are supplied as a TOML table (or any value converted to one):
//!
//! ```toml
//! # the recommended policies apply unless `recommended = false`
//!
//! [disabledRules]
//! max-len = "overlap"
//! max-lines = "anywhere-multiline"
//! spaced-comment = "none"
//!
//! [plugins.cypress.environments.globals.globals]
//! cy = false
//! Cypress = false
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::environments::{parse_plugins, PluginEnvironments};
use crate::error::{type_name, ConfigError};

/// When diagnostics of a rule are suppressed near replaced directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuppressionPolicy {
    /// Suppress diagnostics that start or end strictly inside a replacement.
    Intersection,
    /// Suppress diagnostics that touch a replacement in any way, including
    /// those that span a whole replacement.
    Overlap,
    /// Suppress all diagnostics in a document with at least one directive.
    Anywhere,
    /// Suppress all diagnostics in a document with at least one multi-line
    /// directive.
    AnywhereMultiline,
}

/// Rules whose reports are distorted by rewritten comments.
const RECOMMENDED_POLICIES: &[(&str, SuppressionPolicy)] = &[
    ("capitalized-comments", SuppressionPolicy::Overlap),
    ("line-comment-position", SuppressionPolicy::Overlap),
    ("lines-around-comment", SuppressionPolicy::Overlap),
    ("max-len", SuppressionPolicy::Overlap),
    ("max-lines", SuppressionPolicy::AnywhereMultiline),
    ("max-lines-per-function", SuppressionPolicy::AnywhereMultiline),
    ("multiline-comment-style", SuppressionPolicy::Overlap),
    ("no-inline-comments", SuppressionPolicy::Overlap),
    ("spaced-comment", SuppressionPolicy::Overlap),
];

/// Constructor-time options for a [`Processor`](crate::Processor).
///
/// The default options carry the recommended policies.
#[derive(Debug, Clone)]
pub struct ProcessorOptions {
    /// Rule id -> policy. `None` records an explicit "no suppression".
    pub disabled_rules: HashMap<String, Option<SuppressionPolicy>>,
    /// Plugin environments, keyed by `pluginId/baseName`.
    pub plugins: PluginEnvironments,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self::recommended()
    }
}

impl ProcessorOptions {
    /// Options with the recommended policies preset.
    pub fn recommended() -> Self {
        let disabled_rules = RECOMMENDED_POLICIES
            .iter()
            .map(|(rule, policy)| (rule.to_string(), Some(*policy)))
            .collect();
        Self {
            disabled_rules,
            plugins: PluginEnvironments::new(),
        }
    }

    /// Options without any rule policies.
    pub fn empty() -> Self {
        Self {
            disabled_rules: HashMap::new(),
            plugins: PluginEnvironments::new(),
        }
    }

    /// Set the policy for a rule. `None` disables suppression for it.
    pub fn with_policy(mut self, rule: &str, policy: Option<SuppressionPolicy>) -> Self {
        self.disabled_rules.insert(rule.to_string(), policy);
        self
    }

    /// Add plugin environments.
    pub fn with_plugins(mut self, plugins: PluginEnvironments) -> Self {
        self.plugins.extend(plugins);
        self
    }

    /// Policy configured for a rule, if any.
    pub fn policy_for(&self, rule_id: &str) -> Option<SuppressionPolicy> {
        self.disabled_rules.get(rule_id).copied().flatten()
    }

    /// Validate and convert an options value.
    pub fn from_value(value: &toml::Value) -> Result<Self, ConfigError> {
        let table = value.as_table().ok_or_else(|| ConfigError::NotATable {
            key: "options".to_string(),
            found: type_name(value),
        })?;

        let mut options = match table.get("recommended") {
            None | Some(toml::Value::Boolean(true)) => Self::recommended(),
            Some(toml::Value::Boolean(false)) => Self::empty(),
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "recommended".to_string(),
                    reason: format!("expected a boolean, found {}", type_name(other)),
                })
            }
        };

        for (key, value) in table {
            match key.as_str() {
                "recommended" => {}
                "disabledRules" => options.disabled_rules.extend(parse_disabled_rules(value)?),
                "plugins" => options = options.with_plugins(parse_plugins(value)?),
                _ => return Err(ConfigError::UnknownOption { key: key.clone() }),
            }
        }

        Ok(options)
    }

    /// Parse options from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let value: toml::Value = toml::from_str(source)?;
        Self::from_value(&value)
    }
}

fn parse_disabled_rules(
    value: &toml::Value,
) -> Result<HashMap<String, Option<SuppressionPolicy>>, ConfigError> {
    let table = value.as_table().ok_or_else(|| ConfigError::NotATable {
        key: "disabledRules".to_string(),
        found: type_name(value),
    })?;

    table
        .iter()
        .map(|(rule, value)| {
            let policy = match value {
                toml::Value::String(s) if s == "none" => None,
                toml::Value::Boolean(false) => None,
                other => Some(SuppressionPolicy::deserialize(other.clone()).map_err(|_| {
                    ConfigError::UnknownPolicy {
                        rule: rule.clone(),
                        value: other.to_string(),
                    }
                })?),
            };
            Ok((rule.clone(), policy))
        })
        .collect()
}

/// Load options from a TOML file.
///
/// A missing or invalid file is an error.
pub fn load_options(path: &Path) -> Result<ProcessorOptions, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ProcessorOptions::from_toml_str(&content)
}
