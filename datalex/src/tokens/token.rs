//! Token model for datalex
//!
//! Tokens are zero-copy views into the source buffer: each token carries its
//! kind, its start position, its byte length, and the decoded numeric value
//! when the kind is numeric. The raw lexeme is recovered on demand by
//! slicing the source.

use crate::utils::{Position, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A byte outside the token character set
    Invalid,
    /// A run of token characters that is not a valid number
    Word,
    /// A decimal integer, optionally signed
    Integer,
    /// A real number, optionally with a signed exponent
    Float,
    /// End of input
    EndOfFile,
}

impl TokenKind {
    /// Human-readable name used in diagnostics ("found X, but needed Y").
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Invalid => "an invalid token",
            TokenKind::Word => "a word",
            TokenKind::Integer => "an integer",
            TokenKind::Float => "a number",
            TokenKind::EndOfFile => "the end of file",
        }
    }

    /// Check whether this kind carries a numeric value.
    pub fn is_numeric(&self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::Float)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Decoded value attached to a token.
///
/// Kind and value cannot disagree: only `Integer` tokens hold `Int`, only
/// `Float` tokens hold `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    Int(i64),
    Float(f64),
}

/// A single token: kind, source view, and decoded value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Position of the first byte of the lexeme
    pub position: Position,
    /// Lexeme length in bytes (0 only for end of file)
    pub len: usize,
    pub value: TokenValue,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position, len: usize, value: TokenValue) -> Self {
        Self {
            kind,
            position,
            len,
            value,
        }
    }

    /// An end-of-file token at the given position.
    pub fn end_of_file(position: Position) -> Self {
        Self::new(TokenKind::EndOfFile, position, 0, TokenValue::None)
    }

    /// A single-byte invalid token at the given position.
    pub fn invalid(position: Position) -> Self {
        Self::new(TokenKind::Invalid, position, 1, TokenValue::None)
    }

    /// Byte offset of the lexeme start.
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// The span covered by this token. Lexemes never contain newlines, so
    /// the span stays on one line.
    pub fn span(&self) -> Span {
        Span::new(self.position, self.position.advance_bytes(self.len))
    }

    /// Slice the raw lexeme out of the source this token was scanned from.
    pub fn lexeme<'s>(&self, source: &'s [u8]) -> &'s [u8] {
        &source[self.position.offset..self.position.offset + self.len]
    }

    /// Decoded integer value, if this is an integer token.
    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            TokenValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Decoded numeric value, widening integers to f64.
    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            TokenValue::Int(v) => Some(v as f64),
            TokenValue::Float(v) => Some(v),
            TokenValue::None => None,
        }
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::invalid(Position::start())
    }
}
