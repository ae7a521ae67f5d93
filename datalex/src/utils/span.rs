//! Source location tracking for datalex
//!
//! This module provides types for tracking positions and spans in source
//! text during scanning and parsing. Accurate location tracking is essential
//! for providing helpful error messages.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with byte offset, line, and column.
///
/// Lines and columns are 0-based: a newline increments the line and resets
/// the column to 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (0-based)
    pub line: u32,
    /// Column number (0-based)
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create the starting position (offset 0, line 0, column 0)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    /// Advance position by one byte
    pub fn advance(self, byte: u8) -> Self {
        if byte == b'\n' {
            Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 0,
            }
        } else {
            Self {
                offset: self.offset + 1,
                line: self.line,
                column: self.column + 1,
            }
        }
    }

    /// Advance position by n bytes on the current line
    pub fn advance_bytes(self, n: usize) -> Self {
        Self {
            offset: self.offset + n,
            line: self.line,
            column: self.column + n as u32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    /// Get the start position of this span
    pub fn start(&self) -> Position {
        self.start
    }

    /// Get the end position of this span
    pub fn end(&self) -> Position {
        self.end
    }

    /// Create a single-byte span
    pub fn single(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos.advance_bytes(1),
        }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset < other.start.offset {
            self.start
        } else {
            other.start
        };

        let end = if self.end.offset > other.end.offset {
            self.end
        } else {
            other.end
        };

        Self { start, end }
    }

    /// Get the byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Check if this span is empty
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Get the source bytes for this span from the input
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        &input[self.start.offset..self.end.offset]
    }

    /// Create an unknown/dummy span
    pub fn dummy() -> Self {
        Self {
            start: Position::start(),
            end: Position::start(),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let pos = Position::start();
        let pos = pos.advance(b'a');
        assert_eq!(pos, Position::new(1, 0, 1));

        let pos = pos.advance(b'\n');
        assert_eq!(pos, Position::new(2, 1, 0));

        let pos = pos.advance(b'x');
        assert_eq!(pos, Position::new(3, 1, 1));
    }

    #[test]
    fn test_position_advance_bytes() {
        let pos = Position::new(10, 2, 4).advance_bytes(3);
        assert_eq!(pos, Position::new(13, 2, 7));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(7, 2, 5).to_string(), "2:5");
    }

    #[test]
    fn test_span_merge() {
        let a = Span::new(Position::new(0, 0, 0), Position::new(3, 0, 3));
        let b = Span::new(Position::new(5, 0, 5), Position::new(9, 0, 9));

        let merged = a.merge(b);
        assert_eq!(merged.start.offset, 0);
        assert_eq!(merged.end.offset, 9);
        assert_eq!(merged.len(), 9);
    }

    #[test]
    fn test_span_slice() {
        let input = b"hello world";
        let span = Span::new(Position::new(6, 0, 6), Position::new(11, 0, 11));
        assert_eq!(span.slice(input), b"world");
    }

    #[test]
    fn test_span_single() {
        let span = Span::single(Position::new(4, 1, 2));
        assert_eq!(span.len(), 1);
        assert_eq!(span.end.column, 3);
    }

    #[test]
    fn test_dummy_span_is_empty() {
        assert!(Span::dummy().is_empty());
    }
}
