//! Classifying scanner
//!
//! A single-pass scanner over a byte slice. Runs of token characters are
//! classified while they are consumed by a five-state automaton that only
//! ever relaxes: Integer -> Float -> ExponentSign -> Exponent, with Text
//! absorbing everything else. No backtracking, no lookahead beyond one byte.
//!
//! The scanner holds cursor state only and takes the source slice on every
//! call, so the owner of the bytes can also own the scanner.

use crate::config::runtime::ScannerPreferences;
use crate::tokens::{Token, TokenKind, TokenValue};
use crate::utils::Position;

/// Bytes that may appear inside a token.
pub fn is_token_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'+' || byte == b'-'
}

/// Bytes treated as whitespace between tokens.
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Classification state. Transitions are monotonic: once a run stops
/// looking like a number it can never look like one again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Integer,
    Float,
    ExponentSign,
    Exponent,
    Text,
}

impl State {
    /// Start state picked from the first byte of a run. The first byte is
    /// the only place a sign is allowed, which keeps "-42" an integer.
    fn initial(byte: u8) -> Self {
        match byte {
            b'0'..=b'9' | b'+' | b'-' => State::Integer,
            b'.' => State::Float,
            _ => State::Text,
        }
    }

    fn step(self, byte: u8) -> Self {
        match self {
            State::Integer => {
                if byte == b'.' {
                    State::Float
                } else if byte.is_ascii_digit() {
                    State::Integer
                } else {
                    State::Text
                }
            }
            State::Float => {
                if byte == b'e' || byte == b'E' {
                    State::ExponentSign
                } else if byte.is_ascii_digit() {
                    State::Float
                } else {
                    State::Text
                }
            }
            State::ExponentSign => {
                if byte == b'+' || byte == b'-' {
                    State::Exponent
                } else {
                    State::Text
                }
            }
            State::Exponent => {
                if byte.is_ascii_digit() {
                    State::Exponent
                } else {
                    State::Text
                }
            }
            State::Text => State::Text,
        }
    }
}

/// Cursor state for one scan of a source slice.
#[derive(Debug, Clone)]
pub struct Scanner {
    position: Position,
    comment_byte: u8,
}

impl Scanner {
    /// Create a scanner with the default comment character ('#').
    pub fn new() -> Self {
        Self {
            position: Position::start(),
            comment_byte: b'#',
        }
    }

    /// Create a scanner configured from runtime preferences.
    pub fn from_preferences(prefs: &ScannerPreferences) -> Self {
        Self {
            position: Position::start(),
            comment_byte: prefs.comment_byte(),
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> Position {
        self.position
    }

    fn peek(&self, src: &[u8]) -> Option<u8> {
        src.get(self.position.offset).copied()
    }

    fn bump(&mut self, src: &[u8]) -> Option<u8> {
        let byte = self.peek(src)?;
        self.position = self.position.advance(byte);
        Some(byte)
    }

    /// Advance past one byte the scanner refused to consume (an invalid
    /// token). Used by callers that want to keep scanning after one.
    pub fn skip_byte(&mut self, src: &[u8]) {
        self.bump(src);
    }

    fn skip_trivia(&mut self, src: &[u8]) {
        while let Some(byte) = self.peek(src) {
            if is_whitespace(byte) {
                self.bump(src);
            } else if byte == self.comment_byte {
                // Comment runs to end of line; the newline itself is
                // consumed by the whitespace arm on the next pass
                while let Some(b) = self.peek(src) {
                    if b == b'\n' {
                        break;
                    }
                    self.bump(src);
                }
            } else {
                return;
            }
        }
    }

    /// Produce the next token. At end of input this returns `EndOfFile`
    /// tokens forever; on a byte outside the token character set it returns
    /// a single-byte `Invalid` token without consuming the byte.
    pub fn next_token(&mut self, src: &[u8]) -> Token {
        self.skip_trivia(src);

        let start = self.position;
        let first = match self.peek(src) {
            Some(byte) => byte,
            None => return Token::end_of_file(start),
        };

        if !is_token_char(first) {
            return Token::invalid(start);
        }

        self.bump(src);
        let mut state = State::initial(first);
        while let Some(byte) = self.peek(src) {
            if !is_token_char(byte) {
                break;
            }
            self.bump(src);
            state = state.step(byte);
        }

        let lexeme = &src[start.offset..self.position.offset];
        let (kind, value) = decode(state, lexeme);
        Token::new(kind, start, lexeme.len(), value)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a final automaton state to a token kind and decode the value.
/// A run that ends in `ExponentSign` has a dangling exponent marker and is
/// a word; a numeric-looking run that fails to decode is demoted to a word
/// rather than carrying a garbage value.
fn decode(state: State, lexeme: &[u8]) -> (TokenKind, TokenValue) {
    match state {
        State::Integer => decode_int(lexeme),
        State::Float | State::Exponent => decode_float(lexeme),
        State::ExponentSign | State::Text => (TokenKind::Word, TokenValue::None),
    }
}

fn decode_int(lexeme: &[u8]) -> (TokenKind, TokenValue) {
    let text = match std::str::from_utf8(lexeme) {
        Ok(text) => text,
        Err(_) => return (TokenKind::Word, TokenValue::None),
    };

    match text.parse::<i64>() {
        Ok(value) => (TokenKind::Integer, TokenValue::Int(value)),
        Err(err) => match err.kind() {
            // Out-of-range integers saturate instead of wrapping
            std::num::IntErrorKind::PosOverflow => {
                (TokenKind::Integer, TokenValue::Int(i64::MAX))
            }
            std::num::IntErrorKind::NegOverflow => {
                (TokenKind::Integer, TokenValue::Int(i64::MIN))
            }
            _ => (TokenKind::Word, TokenValue::None),
        },
    }
}

fn decode_float(lexeme: &[u8]) -> (TokenKind, TokenValue) {
    let text = match std::str::from_utf8(lexeme) {
        Ok(text) => text,
        Err(_) => return (TokenKind::Word, TokenValue::None),
    };

    match text.parse::<f64>() {
        Ok(value) => (TokenKind::Float, TokenValue::Float(value)),
        Err(_) => (TokenKind::Word, TokenValue::None),
    }
}
