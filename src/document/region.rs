//! Directive regions and offset mapping between original and processed text.
//!
//! Each replaced directive occupies `original_range` in the original text and
//! `processed_range` in the processed text. Text outside regions is copied
//! verbatim, so an offset outside every region maps back by subtracting the
//! length change accumulated by the regions before it.

use std::ops::Range;

use crate::directive::{synthesize_comment, ExtractedDirective, Formatting, RequestedEnvironment};
use crate::environments::{EnvironmentRegistry, Globals};

use super::text::{LineIndex, Location};

/// A directive comment together with its replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveRegion {
    /// Byte range of the directive in the original text.
    pub original_range: Range<usize>,
    /// Byte range of the replacement in the processed text.
    /// Empty until the document is rewritten.
    pub processed_range: Range<usize>,
    pub requested: Vec<RequestedEnvironment>,
    /// Globals resolved from the enabled environments.
    pub globals: Globals,
    pub formatting: Formatting,
    /// The synthesized `global` comment.
    pub replacement: String,
}

impl DirectiveRegion {
    /// Resolve a scanned directive's environments and synthesize its replacement.
    pub fn new(directive: ExtractedDirective, registry: &EnvironmentRegistry) -> Self {
        let globals = registry.resolve(directive.enabled_environments());
        let replacement = synthesize_comment(&globals, &directive.formatting);

        Self {
            original_range: directive.range,
            processed_range: 0..0,
            requested: directive.requested,
            globals,
            formatting: directive.formatting,
            replacement,
        }
    }

    /// Length change introduced by this region.
    pub fn length_delta(&self) -> isize {
        self.replacement.len() as isize - self.original_range.len() as isize
    }

    pub fn is_multiline(&self) -> bool {
        self.formatting.is_multiline()
    }
}

/// Regions of one processed document, with line indexes for both texts.
#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: Vec<DirectiveRegion>,
    original: LineIndex,
    processed: LineIndex,
}

impl RegionTable {
    /// Build a table from rewritten regions.
    pub fn new(regions: Vec<DirectiveRegion>, original: String, processed: String) -> Self {
        Self {
            regions,
            original: LineIndex::new(original),
            processed: LineIndex::new(processed),
        }
    }

    pub fn regions(&self) -> &[DirectiveRegion] {
        &self.regions
    }

    pub fn original(&self) -> &LineIndex {
        &self.original
    }

    pub fn processed(&self) -> &LineIndex {
        &self.processed
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Whether any region was rendered as a multi-line comment.
    pub fn has_multiline(&self) -> bool {
        self.regions.iter().any(DirectiveRegion::is_multiline)
    }

    /// Map a processed-text offset to the original text.
    ///
    /// Returns None when the offset lies strictly inside a replacement. An
    /// offset on the start boundary of a replacement belongs to the text before it.
    pub fn to_original_offset(&self, processed_offset: usize) -> Option<usize> {
        for region in self.regions.iter().rev() {
            let processed = &region.processed_range;
            if processed_offset >= processed.end {
                // processed.end already includes the shifts of all earlier regions
                return Some(processed_offset - processed.end + region.original_range.end);
            }
            if processed_offset > processed.start {
                return None;
            }
        }
        Some(processed_offset)
    }

    /// Map a processed-text range to the original text.
    ///
    /// Both endpoints must map. A range that starts before a replacement and
    /// ends inside it is unmappable; a range enclosing whole replacements maps
    /// to the range enclosing the original directives.
    pub fn to_original_range(&self, range: &Range<usize>) -> Option<Range<usize>> {
        let start = self.to_original_offset(range.start)?;
        let end = self.to_original_offset(range.end)?;
        (start <= end).then_some(start..end)
    }

    /// Whether a processed-text span touches any replacement.
    ///
    /// Spans that merely abut a replacement do not touch it. An empty span
    /// touches a replacement only when it lies strictly inside it.
    pub fn touches_region(&self, range: &Range<usize>) -> bool {
        self.regions.iter().any(|region| {
            let processed = &region.processed_range;
            if range.is_empty() {
                range.start > processed.start && range.start < processed.end
            } else {
                range.start < processed.end && range.end > processed.start
            }
        })
    }

    /// Convert a processed-text location to a byte offset.
    pub fn processed_offset(&self, location: Location) -> Option<usize> {
        self.processed.location_to_offset(location)
    }

    /// Map a processed-text location to an original-text location.
    pub fn to_original_location(&self, location: Location) -> Option<Location> {
        let processed_offset = self.processed_offset(location)?;
        let original_offset = self.to_original_offset(processed_offset)?;
        Some(self.original.offset_to_location(original_offset))
    }
}
