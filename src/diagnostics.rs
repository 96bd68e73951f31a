//! Mapping of lint diagnostics from processed text back to the original text.
//!
//! Diagnostics arrive in processed-text coordinates. Each one is first checked
//! against its rule's suppression policy, then its start, end and fix range are
//! translated. Positions that fall inside a replacement have no original
//! counterpart: such diagnostics are dropped, such fixes are removed.

use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::document::{Location, RegionTable};
use crate::settings::SuppressionPolicy;

/// Rule id -> suppression policy. `None` means no suppression.
pub type RulePolicies = HashMap<String, Option<SuppressionPolicy>>;

/// A proposed text edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// UTF-8 byte range of the text to replace, serialized as `[start, end]`.
    #[serde(with = "byte_range")]
    pub range: Range<usize>,
    pub text: String,
}

mod byte_range {
    use std::ops::Range;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(range: &Range<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        [range.start, range.end].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Range<usize>, D::Error> {
        let [start, end] = <[usize; 2]>::deserialize(deserializer)?;
        Ok(start..end)
    }
}

/// A problem reported by the analysis engine.
///
/// Lines and columns are 1-based. A diagnostic on line 0 applies to the whole
/// file and is never remapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub rule_id: Option<String>,
    pub message: String,
    pub line: usize,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn new(rule_id: Option<&str>, message: &str, line: usize, column: usize) -> Self {
        Self {
            rule_id: rule_id.map(str::to_string),
            message: message.to_string(),
            line,
            column,
            end_line: None,
            end_column: None,
            fix: None,
        }
    }

    pub fn with_end(mut self, end_line: usize, end_column: usize) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    pub fn with_fix(mut self, range: Range<usize>, text: &str) -> Self {
        self.fix = Some(Fix {
            range,
            text: text.to_string(),
        });
        self
    }
}

/// Filter and remap diagnostics produced against processed text.
///
/// Output order follows input order.
pub fn postprocess(
    diagnostics: Vec<Diagnostic>,
    table: &RegionTable,
    policies: &RulePolicies,
) -> Vec<Diagnostic> {
    diagnostics
        .into_iter()
        .filter_map(|diagnostic| remap_diagnostic(diagnostic, table, policies))
        .collect()
}

fn remap_diagnostic(
    mut diagnostic: Diagnostic,
    table: &RegionTable,
    policies: &RulePolicies,
) -> Option<Diagnostic> {
    let policy = diagnostic
        .rule_id
        .as_deref()
        .and_then(|rule_id| policies.get(rule_id).copied().flatten());

    if let Some(policy) = policy {
        if is_suppressed(&diagnostic, policy, table) {
            log::debug!(
                "suppressing {} at {}:{} ({:?})",
                diagnostic.rule_id.as_deref().unwrap_or("<none>"),
                diagnostic.line,
                diagnostic.column,
                policy
            );
            return None;
        }
    }

    let Some((line, column)) = remap_location(table, diagnostic.line, diagnostic.column) else {
        log::debug!(
            "dropping diagnostic at {}:{}: inside a replaced directive",
            diagnostic.line,
            diagnostic.column
        );
        return None;
    };
    diagnostic.line = line;
    diagnostic.column = column;

    if let Some(end_line) = diagnostic.end_line {
        let end_column = diagnostic.end_column.unwrap_or(1);
        let (end_line, end_column) = remap_location(table, end_line, end_column)?;
        diagnostic.end_line = Some(end_line);
        diagnostic.end_column = Some(end_column);
    }

    if let Some(fix) = diagnostic.fix.take() {
        match table.to_original_range(&fix.range) {
            Some(range) => {
                diagnostic.fix = Some(Fix {
                    range,
                    text: fix.text,
                })
            }
            None => log::debug!("removing fix {:?}: overlaps a replaced directive", fix.range),
        }
    }

    Some(diagnostic)
}

fn is_suppressed(diagnostic: &Diagnostic, policy: SuppressionPolicy, table: &RegionTable) -> bool {
    match policy {
        SuppressionPolicy::Anywhere => !table.is_empty(),
        SuppressionPolicy::AnywhereMultiline => table.has_multiline(),
        SuppressionPolicy::Intersection => processed_span(diagnostic, table).is_some_and(|span| {
            table.to_original_offset(span.start).is_none()
                || table.to_original_offset(span.end).is_none()
        }),
        SuppressionPolicy::Overlap => processed_span(diagnostic, table).is_some_and(|span| {
            table.to_original_range(&span).is_none() || table.touches_region(&span)
        }),
    }
}

/// Byte span of a diagnostic in the processed text.
///
/// None for file-level diagnostics and positions outside the text.
fn processed_span(diagnostic: &Diagnostic, table: &RegionTable) -> Option<Range<usize>> {
    if diagnostic.line == 0 {
        return None;
    }
    let start = table.processed_offset(Location::new(
        diagnostic.line,
        diagnostic.column.saturating_sub(1),
    ))?;
    let end = match diagnostic.end_line {
        Some(end_line) => table.processed_offset(Location::new(
            end_line,
            diagnostic.end_column.unwrap_or(1).saturating_sub(1),
        ))?,
        None => start,
    };
    Some(start.min(end)..start.max(end))
}

/// Map a 1-based line and column to the original text.
fn remap_location(table: &RegionTable, line: usize, column: usize) -> Option<(usize, usize)> {
    if line == 0 {
        return Some((line, column));
    }
    let processed = Location::new(line, column.saturating_sub(1));
    let original = table.to_original_location(processed)?;
    Some((original.line, original.column + 1))
}
