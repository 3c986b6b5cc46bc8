//! Source location tracking for diagnostics.
//!
//! Provides [`Span`] to track where declarations, call sites and checks
//! occur in the front end's source files.

use std::fmt;

/// A span of source code, represented by its starting position.
///
/// Diagnostics are reported against the line of a span; the column is kept
/// for tooling that wants to point at the exact declaration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    /// Create a new span from a line, column, and length.
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// Create a zero-length span at a position.
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    /// Create a zero-length span at the start of a line.
    #[inline]
    pub fn line(line: u32) -> Self {
        Self::point(line, 1)
    }

    /// Whether this span is empty (zero length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The length of this span in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let span = Span::new(1, 5, 10);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());

        let empty = Span::point(1, 5);
        assert!(empty.is_empty());
    }

    #[test]
    fn span_display() {
        let span = Span::new(3, 15, 5);
        assert_eq!(format!("{}", span), "3:15");
        assert_eq!(format!("{:?}", Span::line(7)), "7:1");
    }

    #[test]
    fn spans_order_by_line_first() {
        let mut spans = vec![Span::point(9, 1), Span::point(2, 40), Span::point(2, 3)];
        spans.sort();
        assert_eq!(spans, vec![Span::point(2, 3), Span::point(2, 40), Span::point(9, 1)]);
    }
}
