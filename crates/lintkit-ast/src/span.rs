//! Source positions: byte ranges and line/column locations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open byte range `[start, end)` into the source text.
///
/// Serialized as the ESTree `range` tuple `[start, end]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Span {
    /// Offset of the first byte.
    pub start: u32,
    /// Offset one past the last byte.
    pub end: u32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Returns true if `other` lies entirely inside this span.
    #[must_use]
    pub const fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl From<[u32; 2]> for Span {
    fn from([start, end]: [u32; 2]) -> Self {
        Self { start, end }
    }
}

impl From<Span> for [u32; 2] {
    fn from(span: Span) -> Self {
        [span.start, span.end]
    }
}

impl From<std::ops::Range<u32>> for Span {
    fn from(range: std::ops::Range<u32>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A line/column position.
///
/// `line` is 1-based and `column` is 0-based, counted in UTF-16 code units,
/// matching the ESTree `loc` convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (0-indexed).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Start and end positions of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Position of the first character.
    pub start: Position,
    /// Position just past the last character.
    pub end: Position,
}

impl SourceLocation {
    /// Creates a new location.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Maps byte offsets of one source text to [`Position`]s.
#[derive(Debug, Clone)]
pub struct LineIndex<'s> {
    source: &'s str,
    line_starts: Vec<u32>,
}

impl<'s> LineIndex<'s> {
    /// Indexes the line starts of `source`.
    ///
    /// `\n`, `\r\n` and lone `\r` all terminate a line.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push(offset(i + 1)),
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    line_starts.push(offset(i + 2));
                    i += 1;
                }
                b'\r' => line_starts.push(offset(i + 1)),
                _ => {}
            }
            i += 1;
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Returns the source text this index was built from.
    #[must_use]
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a position. Offsets past the end clamp to
    /// the end of the text.
    #[must_use]
    pub fn position(&self, byte_offset: u32) -> Position {
        let byte_offset = byte_offset.min(offset(self.source.len()));
        let line = self
            .line_starts
            .partition_point(|&start| start <= byte_offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start as usize..byte_offset as usize)
            .map_or(byte_offset - line_start, |prefix| {
                offset(prefix.encode_utf16().count())
            });
        Position::new(offset(line + 1), column)
    }

    /// Converts a span to a location.
    #[must_use]
    pub fn location(&self, span: Span) -> SourceLocation {
        SourceLocation::new(self.position(span.start), self.position(span.end))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn offset(value: usize) -> u32 {
    value.min(u32::MAX as usize) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_on_single_line() {
        let index = LineIndex::new("a?.b;");
        assert_eq!(index.position(0), Position::new(1, 0));
        assert_eq!(index.position(5), Position::new(1, 5));
    }

    #[test]
    fn positions_across_line_endings() {
        let index = LineIndex::new("\nfoo;\r\nbar;\rbaz;");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.position(1), Position::new(2, 0));
        assert_eq!(index.position(3), Position::new(2, 2));
        assert_eq!(index.position(7), Position::new(3, 0));
        assert_eq!(index.position(12), Position::new(4, 0));
    }

    #[test]
    fn columns_count_utf16_units() {
        let index = LineIndex::new("'é' + x;");
        // `é` is two bytes but one UTF-16 unit.
        assert_eq!(index.position(7), Position::new(1, 6));
    }

    #[test]
    fn offsets_past_end_clamp() {
        let index = LineIndex::new("ab");
        assert_eq!(index.position(10), Position::new(1, 2));
    }

    #[test]
    fn span_serializes_as_range_tuple() {
        let json = serde_json::to_string(&Span::new(3, 9)).expect("serialize");
        assert_eq!(json, "[3,9]");
        let span: Span = serde_json::from_str("[1,4]").expect("deserialize");
        assert_eq!(span, Span::new(1, 4));
        assert!(Span::new(0, 10).contains(span));
    }
}
