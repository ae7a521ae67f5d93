//! Parser error types
//!
//! A parser latches the first error it encounters and holds it for the rest
//! of its life; these are the shapes that latch can take.

use crate::logging::{codes, Code};
use crate::tokens::TokenKind;
use crate::utils::Position;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The current token kind did not match what the grammar needed.
    #[error("found {}, but needed {}", found.describe(), needed.describe())]
    UnexpectedToken {
        found: TokenKind,
        needed: TokenKind,
        position: Position,
    },

    /// The parser was constructed from a path or stream that could not be
    /// read.
    #[error("can't open '{path}' ({reason})")]
    Resource { path: String, reason: String },

    /// The caller aborted parsing with its own message.
    #[error("{message}")]
    Aborted { message: String, position: Position },
}

impl ParseError {
    pub fn unexpected_token(found: TokenKind, needed: TokenKind, position: Position) -> Self {
        ParseError::UnexpectedToken {
            found,
            needed,
            position,
        }
    }

    pub fn resource(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseError::Resource {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn aborted(message: impl Into<String>, position: Position) -> Self {
        ParseError::Aborted {
            message: message.into(),
            position,
        }
    }

    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> Code {
        match self {
            ParseError::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            ParseError::Resource { .. } => codes::syntax::SOURCE_UNAVAILABLE,
            ParseError::Aborted { .. } => codes::syntax::PARSE_ABORTED,
        }
    }

    /// Position the error was latched at, when one exists.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::UnexpectedToken { position, .. } => Some(*position),
            ParseError::Aborted { position, .. } => Some(*position),
            ParseError::Resource { .. } => None,
        }
    }
}
