//! Text utilities for position conversion.
//!
//! Provides byte offset <-> line/column conversion with UTF-16 columns, which is
//! the unit lint engines report columns in.

/// A line/column pair. Lines are 1-based, columns are 0-based UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Pre-computed line index for efficient position lookups.
///
/// Recognizes `\r\n`, `\n`, `\r`, U+2028 and U+2029 as line terminators.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
    /// Byte offset where each line's content ends (terminator excluded).
    line_ends: Vec<usize>,
    /// Source text (needed for UTF-16 column calculation).
    source: String,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(source: String) -> Self {
        let mut line_starts = vec![0];
        let mut line_ends = Vec::new();

        let mut chars = source.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let terminator_len = match c {
                '\r' => {
                    if matches!(chars.peek(), Some((_, '\n'))) {
                        chars.next();
                        2
                    } else {
                        1
                    }
                }
                '\n' => 1,
                '\u{2028}' | '\u{2029}' => c.len_utf8(),
                _ => continue,
            };
            line_ends.push(i);
            line_starts.push(i + terminator_len);
        }
        line_ends.push(source.len());

        Self {
            line_starts,
            line_ends,
            source,
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Convert a byte offset to a location.
    ///
    /// Offsets past the end of the source are clamped to the end.
    pub fn offset_to_location(&self, offset: usize) -> Location {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let column = self.source[line_start..]
            .char_indices()
            .take_while(|(i, _)| line_start + i < offset)
            .map(|(_, c)| c.len_utf16())
            .sum();

        Location::new(line + 1, column)
    }

    /// Convert a location to a byte offset.
    ///
    /// Returns None if the line is out of bounds. Columns past the end of the
    /// line resolve to the end of the line.
    pub fn location_to_offset(&self, location: Location) -> Option<usize> {
        if location.line == 0 || location.line > self.line_starts.len() {
            return None;
        }
        let line = location.line - 1;
        let line_start = self.line_starts[line];
        let line_end = self.line_ends[line];

        let mut utf16_col = 0;
        for (i, c) in self.source[line_start..line_end].char_indices() {
            if utf16_col >= location.column {
                return Some(line_start + i);
            }
            utf16_col += c.len_utf16();
        }

        Some(line_end)
    }
}
