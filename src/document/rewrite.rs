//! Substitution of directive regions into the original text.

use super::region::DirectiveRegion;

/// Build the processed text and fill in each region's `processed_range`.
///
/// Regions must be ordered and non-overlapping. Text between regions is copied
/// unchanged; the result is never re-scanned.
pub fn rewrite(original: &str, regions: &mut [DirectiveRegion]) -> String {
    if regions.is_empty() {
        return original.to_string();
    }

    let mut processed = String::with_capacity(original.len());
    let mut last_end = 0;
    let mut shift: isize = 0;

    for region in regions.iter_mut() {
        processed.push_str(&original[last_end..region.original_range.start]);

        let start = (region.original_range.start as isize + shift) as usize;
        debug_assert_eq!(start, processed.len());
        region.processed_range = start..start + region.replacement.len();
        processed.push_str(&region.replacement);

        shift += region.length_delta();
        last_end = region.original_range.end;
    }
    processed.push_str(&original[last_end..]);

    processed
}
