//! Global bindings declared by an environment.
//!
//! An environment is a named bundle of global variables. Each global carries an
//! optional writability assertion, mirroring the `name:writable` / `name:readonly`
//! syntax of `global` comments.

use std::collections::BTreeMap;

/// Writability of a declared global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Writability {
    /// The global may be reassigned.
    Writable,
    /// The global must not be reassigned.
    Readonly,
    /// The global is declared without asserting writability.
    Declared,
}

impl Writability {
    /// Parse the value of a binding as written in configuration.
    ///
    /// Accepts the spellings the `global` comment syntax accepts, plus
    /// `declared` for a bare declaration.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "writable" | "writeable" | "true" => Some(Self::Writable),
            "readonly" | "readable" | "false" => Some(Self::Readonly),
            "declared" => Some(Self::Declared),
            _ => None,
        }
    }

    /// Suffix rendered after the global name, if any.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::Writable => Some("writable"),
            Self::Readonly => Some("readonly"),
            Self::Declared => None,
        }
    }
}

impl From<bool> for Writability {
    fn from(writable: bool) -> Self {
        if writable {
            Self::Writable
        } else {
            Self::Readonly
        }
    }
}

/// A set of globals, ordered by name.
pub type Globals = BTreeMap<String, Writability>;

/// Definition of an environment: the globals it declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub globals: Globals,
}

impl Environment {
    pub fn new(globals: Globals) -> Self {
        Self { globals }
    }

    /// Build an environment whose globals all share the same writability.
    pub fn uniform(names: &[&str], writability: Writability) -> Self {
        let globals = names
            .iter()
            .map(|name| (name.to_string(), writability))
            .collect();
        Self { globals }
    }
}
