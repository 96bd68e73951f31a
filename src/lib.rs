//! `eslint-env` comment processor.
//!
//! Lint engines that no longer understand `/* eslint-env ... */` comments still
//! understand `/* global ... */` comments. [`Processor::preprocess`] rewrites each
//! `eslint-env` comment into the equivalent `global` comment, and
//! [`Processor::postprocess`] maps the engine's diagnostics back onto the
//! original text.

pub mod diagnostics;
pub mod directive;
pub mod document;
pub mod environments;
mod error;
pub mod settings;

pub use diagnostics::{postprocess, Diagnostic, Fix, RulePolicies};
pub use document::{DirectiveRegion, LineIndex, Location, RegionTable};
pub use environments::{EnvironmentLookup, EnvironmentRegistry, Writability};
pub use error::ConfigError;
pub use settings::{load_options, ProcessorOptions, SuppressionPolicy};

use std::sync::Arc;

use directive::scan_directives;
use document::{rewrite, DocumentStore};

/// Package name, as published.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Package version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name given to the single processed file, relative to the original file.
pub const PROCESSED_FILENAME: &str = "/..";

/// A processed unit handed to the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub text: String,
    pub filename: &'static str,
}

/// Rewrites directive comments and maps diagnostics back.
///
/// Region tables are kept per document identifier between `preprocess` and
/// `postprocess`, so one processor can serve many documents concurrently.
#[derive(Debug)]
pub struct Processor {
    policies: RulePolicies,
    registry: EnvironmentRegistry,
    documents: DocumentStore,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(ProcessorOptions::default())
    }
}

impl Processor {
    pub fn new(options: ProcessorOptions) -> Self {
        let registry = EnvironmentRegistry::new(options.plugins);
        Self::with_registry(options.disabled_rules, registry)
    }

    /// Create a processor with a custom environment registry.
    pub fn with_registry(policies: RulePolicies, registry: EnvironmentRegistry) -> Self {
        Self {
            policies,
            registry,
            documents: DocumentStore::new(),
        }
    }

    /// Validate options given as a TOML value and create a processor.
    pub fn from_value(value: &toml::Value) -> Result<Self, ConfigError> {
        Ok(Self::new(ProcessorOptions::from_value(value)?))
    }

    /// Fix ranges are remapped, so autofix is supported.
    pub fn supports_autofix(&self) -> bool {
        true
    }

    /// Replace every directive comment in `text`.
    ///
    /// Always yields exactly one file. Documents without directives are passed
    /// through unchanged and leave no pending state.
    pub fn preprocess(&self, text: &str, id: &str) -> Vec<ProcessedFile> {
        let mut regions: Vec<DirectiveRegion> = scan_directives(text)
            .into_iter()
            .map(|directive| DirectiveRegion::new(directive, &self.registry))
            .collect();

        if regions.is_empty() {
            self.documents.clear(id);
            return vec![ProcessedFile {
                text: text.to_string(),
                filename: PROCESSED_FILENAME,
            }];
        }

        let processed = rewrite(text, &mut regions);
        log::debug!("{}: replaced {} directive comment(s)", id, regions.len());

        self.documents.insert(
            id,
            RegionTable::new(regions, text.to_string(), processed.clone()),
        );

        vec![ProcessedFile {
            text: processed,
            filename: PROCESSED_FILENAME,
        }]
    }

    /// Filter and remap the diagnostics reported for the file produced by
    /// [`preprocess`](Self::preprocess).
    pub fn postprocess(&self, batches: Vec<Vec<Diagnostic>>, id: &str) -> Vec<Diagnostic> {
        let diagnostics: Vec<Diagnostic> = batches.into_iter().flatten().collect();

        let Some(table) = self.documents.take(id) else {
            return diagnostics;
        };
        postprocess(diagnostics, &table, &self.policies)
    }

    /// Region table awaiting postprocess for a document.
    pub fn pending(&self, id: &str) -> Option<Arc<RegionTable>> {
        self.documents.get(id)
    }
}
