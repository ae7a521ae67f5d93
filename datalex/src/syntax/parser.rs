//! Token consumption primitives
//!
//! `Parser` is the recursive-descent surface of the crate: a one-token
//! window over the scanner plus a latched error. Callers compose
//! `have`/`match_kind`/`expect` and the typed getters into format-specific
//! grammars and check the outcome once at the end.
//!
//! The error latch is sticky: the first error wins, every later primitive
//! is a no-op returning its documented default, and the scanner is never
//! invoked again, so a failed parse can never walk past the failure point.

use crate::config::runtime::ScannerPreferences;
use crate::lexical::Scanner;
use crate::logging::codes;
use crate::{log_error, log_success};
use crate::source::{self, SourceBuffer};
use crate::syntax::error::ParseError;
use crate::tokens::{Token, TokenKind};
use crate::utils::Position;
use std::io::Read;
use std::path::Path;

pub struct Parser<'src> {
    source: SourceBuffer<'src>,
    scanner: Scanner,
    token: Token,
    error: Option<ParseError>,
    preferences: ScannerPreferences,
}

impl<'src> Parser<'src> {
    /// Parse a borrowed byte slice. The first token is scanned immediately.
    pub fn new(src: &'src [u8]) -> Self {
        Self::build(SourceBuffer::Borrowed(src), ScannerPreferences::default())
    }

    /// Parse a borrowed string slice.
    pub fn from_str(src: &'src str) -> Self {
        Self::new(src.as_bytes())
    }

    /// Parse a borrowed byte slice with explicit preferences.
    pub fn with_preferences(src: &'src [u8], preferences: ScannerPreferences) -> Self {
        Self::build(SourceBuffer::Borrowed(src), preferences)
    }

    /// Read a stream to end and parse the owned bytes. A read failure
    /// latches a resource error; the parser is still valid, just failed.
    pub fn from_reader<R: Read>(reader: R) -> Parser<'static> {
        match source::read_stream(reader) {
            Ok(bytes) => Parser::build(
                SourceBuffer::Owned(bytes),
                ScannerPreferences::default(),
            ),
            Err(err) => Parser::failed(
                ParseError::resource("<stream>", err.to_string()),
                ScannerPreferences::default(),
            ),
        }
    }

    /// Open and read a file and parse the owned bytes. An unreadable path
    /// latches a resource error naming the path; the parser is still valid,
    /// just failed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Parser<'static> {
        Self::from_path_with_preferences(path, ScannerPreferences::default())
    }

    /// `from_path` with explicit preferences.
    pub fn from_path_with_preferences<P: AsRef<Path>>(
        path: P,
        preferences: ScannerPreferences,
    ) -> Parser<'static> {
        let path = path.as_ref();
        match source::read_path(path) {
            Ok(bytes) => Parser::build(SourceBuffer::Owned(bytes), preferences),
            Err(err) => Parser::failed(
                ParseError::resource(path.display().to_string(), err.to_string()),
                preferences,
            ),
        }
    }

    fn build(source: SourceBuffer<'src>, preferences: ScannerPreferences) -> Self {
        let mut parser = Self {
            scanner: Scanner::from_preferences(&preferences),
            source,
            token: Token::default(),
            error: None,
            preferences,
        };
        parser.advance_token();
        parser
    }

    fn failed(error: ParseError, preferences: ScannerPreferences) -> Parser<'static> {
        let mut parser = Parser {
            scanner: Scanner::from_preferences(&preferences),
            source: SourceBuffer::Owned(Vec::new()),
            token: Token::default(),
            error: None,
            preferences,
        };
        parser.latch(error);
        parser
    }

    fn advance_token(&mut self) {
        if self.error.is_none() {
            self.token = self.scanner.next_token(self.source.as_bytes());
        }
    }

    fn latch(&mut self, error: ParseError) {
        if self.error.is_some() {
            return;
        }

        if self.preferences.include_position_in_errors && error.position().is_some() {
            log_error!(error.error_code(), &error.to_string(), span = self.token.span());
        } else {
            log_error!(error.error_code(), &error.to_string());
        }

        self.error = Some(error);
    }

    fn unexpected(&mut self, needed: TokenKind) {
        let error = ParseError::unexpected_token(self.token.kind, needed, self.token.position);
        self.latch(error);
    }

    // ------------------------------------------------------------------
    // Consumption primitives
    // ------------------------------------------------------------------

    /// Check the current token kind without consuming anything.
    pub fn have(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    /// Consume the current token if it has the given kind.
    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.error.is_some() || !self.have(kind) {
            return false;
        }
        self.advance_token();
        true
    }

    /// Consume the current token if it has the given kind, otherwise latch
    /// a "found X, but needed Y" error. Returns whether it consumed.
    pub fn expect(&mut self, kind: TokenKind) -> bool {
        if self.error.is_some() {
            return false;
        }
        if !self.have(kind) {
            self.unexpected(kind);
            return false;
        }
        self.advance_token();
        true
    }

    /// Consume an integer token and return its value. Latches and returns
    /// `None` on any other kind.
    pub fn parse_int(&mut self) -> Option<i64> {
        if self.error.is_some() {
            return None;
        }
        if !self.have(TokenKind::Integer) {
            self.unexpected(TokenKind::Integer);
            return None;
        }
        let value = self.token.as_int();
        self.advance_token();
        value
    }

    /// Consume a numeric token and return it as f64, widening integers.
    /// Latches and returns `None` on any non-numeric kind.
    pub fn parse_float(&mut self) -> Option<f64> {
        if self.error.is_some() {
            return None;
        }
        if !self.token.kind.is_numeric() {
            self.unexpected(TokenKind::Float);
            return None;
        }
        let value = self.token.as_float();
        self.advance_token();
        value
    }

    /// Consume a word token, copying at most `out.len()` bytes of the raw
    /// lexeme and returning the true lexeme length, so truncation is
    /// detectable by comparing. An empty `out` asks for the length only.
    /// Latches and returns 0 on any other kind, leaving `out` untouched.
    pub fn parse_text(&mut self, out: &mut [u8]) -> usize {
        if self.error.is_some() {
            return 0;
        }
        if !self.have(TokenKind::Word) {
            self.unexpected(TokenKind::Word);
            return 0;
        }

        let offset = self.token.position.offset;
        let len = self.token.len;
        let copied = len.min(out.len());
        out[..copied].copy_from_slice(&self.source.as_bytes()[offset..offset + copied]);

        self.advance_token();
        len
    }

    /// Latch a caller-provided error at the current token's position. The
    /// first latch wins; later calls are no-ops.
    pub fn fail(&mut self, message: impl Into<String>) {
        let error = ParseError::aborted(message, self.token.position);
        self.latch(error);
    }

    // ------------------------------------------------------------------
    // State access
    // ------------------------------------------------------------------

    /// The current (unconsumed) token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Raw lexeme of the current token.
    pub fn lexeme(&self) -> &[u8] {
        self.token.lexeme(self.source.as_bytes())
    }

    /// Position of the current token.
    pub fn position(&self) -> Position {
        self.token.position
    }

    /// The latched error, if parsing has failed.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Whether an error has been latched.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Consume the parser and surface the latched error, if any.
    pub fn finish(self) -> Result<(), ParseError> {
        match self.error {
            Some(error) => Err(error),
            None => {
                if self.preferences.log_token_statistics {
                    log_success!(codes::success::PARSE_COMPLETE, "Parse complete",
                        "line" => self.token.position.line,
                        "bytes" => self.source.as_bytes().len()
                    );
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_first_token_ready_after_construction() {
        let parser = Parser::from_str("42 x");
        assert!(parser.have(TokenKind::Integer));
        assert_eq!(parser.lexeme(), b"42");
    }

    #[test]
    fn test_have_does_not_consume() {
        let parser = Parser::from_str("7");
        assert!(parser.have(TokenKind::Integer));
        assert!(parser.have(TokenKind::Integer));
        assert!(!parser.have(TokenKind::Word));
    }

    #[test]
    fn test_match_kind() {
        let mut parser = Parser::from_str("7 word");

        assert!(!parser.match_kind(TokenKind::Word));
        assert!(parser.match_kind(TokenKind::Integer));
        assert!(parser.match_kind(TokenKind::Word));
        assert!(parser.have(TokenKind::EndOfFile));
        assert!(!parser.is_failed());
    }

    #[test]
    fn test_expect_success() {
        let mut parser = Parser::from_str("a 1");
        assert!(parser.expect(TokenKind::Word));
        assert!(parser.expect(TokenKind::Integer));
        assert!(parser.expect(TokenKind::EndOfFile));
        assert!(parser.finish().is_ok());
    }

    #[test]
    fn test_expect_failure_latches() {
        let mut parser = Parser::from_str("word 1");

        assert!(!parser.expect(TokenKind::Integer));
        assert!(parser.is_failed());
        assert_eq!(
            parser.error().map(|e| e.to_string()),
            Some("found a word, but needed an integer".to_string())
        );
        // The failing token is not consumed
        assert!(parser.have(TokenKind::Word));
    }

    #[test]
    fn test_first_error_wins() {
        let mut parser = Parser::from_str("word");

        parser.expect(TokenKind::Integer);
        parser.expect(TokenKind::Float);
        parser.fail("should not replace the latch");

        assert_matches!(
            parser.error(),
            Some(ParseError::UnexpectedToken {
                needed: TokenKind::Integer,
                ..
            })
        );
    }

    #[test]
    fn test_latched_parser_is_frozen() {
        let mut parser = Parser::from_str("x 1 2.5 y");
        let position = parser.position();

        parser.expect(TokenKind::Integer); // latches: found a word

        assert_eq!(parser.parse_int(), None);
        assert_eq!(parser.parse_float(), None);
        assert!(!parser.match_kind(TokenKind::Word));
        assert!(!parser.expect(TokenKind::Word));

        let mut buffer = [0xAAu8; 8];
        assert_eq!(parser.parse_text(&mut buffer), 0);
        assert_eq!(buffer, [0xAAu8; 8]);

        // Cursor never moved after the latch
        assert_eq!(parser.position(), position);
    }

    #[test]
    fn test_parse_int() {
        let mut parser = Parser::from_str("-42 17");
        assert_eq!(parser.parse_int(), Some(-42));
        assert_eq!(parser.parse_int(), Some(17));
        assert!(parser.finish().is_ok());
    }

    #[test]
    fn test_parse_int_rejects_float() {
        let mut parser = Parser::from_str("2.5");
        assert_eq!(parser.parse_int(), None);
        assert_eq!(
            parser.error().map(|e| e.to_string()),
            Some("found a number, but needed an integer".to_string())
        );
    }

    #[test]
    fn test_parse_float_widens_integers() {
        let mut parser = Parser::from_str("7 2.5 1.5e-3");
        assert_eq!(parser.parse_float(), Some(7.0));
        assert_eq!(parser.parse_float(), Some(2.5));
        assert_eq!(parser.parse_float(), Some(1.5e-3));
        assert!(parser.finish().is_ok());
    }

    #[test]
    fn test_parse_float_rejects_word() {
        let mut parser = Parser::from_str("north");
        assert_eq!(parser.parse_float(), None);
        assert_eq!(
            parser.error().map(|e| e.to_string()),
            Some("found a word, but needed a number".to_string())
        );
    }

    #[test]
    fn test_parse_text() {
        let mut parser = Parser::from_str("almanac 3");
        let mut buffer = [0u8; 16];

        let len = parser.parse_text(&mut buffer);
        assert_eq!(len, 7);
        assert_eq!(&buffer[..len], b"almanac");
        assert_eq!(parser.parse_int(), Some(3));
    }

    #[test]
    fn test_parse_text_truncates_but_reports_full_length() {
        let mut parser = Parser::from_str("alphabet");
        let mut buffer = [0u8; 4];

        let len = parser.parse_text(&mut buffer);
        assert_eq!(len, 8);
        assert_eq!(&buffer, b"alph");
        assert!(len > buffer.len());
        assert!(parser.have(TokenKind::EndOfFile));
    }

    #[test]
    fn test_parse_text_empty_buffer_reports_length() {
        let mut parser = Parser::from_str("alphabet");
        let len = parser.parse_text(&mut []);
        assert_eq!(len, 8);
        // Length-only queries still consume the token
        assert!(parser.have(TokenKind::EndOfFile));
    }

    #[test]
    fn test_parse_text_rejects_number() {
        let mut parser = Parser::from_str("42");
        let mut buffer = [0u8; 8];
        assert_eq!(parser.parse_text(&mut buffer), 0);
        assert_eq!(buffer, [0u8; 8]);
        assert!(parser.is_failed());
    }

    #[test]
    fn test_fail_latches_custom_message() {
        let mut parser = Parser::from_str("GPS 99");
        parser.expect(TokenKind::Word);
        parser.fail(format!("unsupported satellite id {}", 99));

        assert_matches!(parser.error(), Some(ParseError::Aborted { .. }));
        assert_eq!(
            parser.finish().unwrap_err().to_string(),
            "unsupported satellite id 99"
        );
    }

    #[test]
    fn test_check_once_at_end_pattern() {
        let mut parser = Parser::from_str("GPS 21 3.5 # almanac record\n");
        let mut name = [0u8; 8];

        let len = parser.parse_text(&mut name);
        let id = parser.parse_int();
        let offset = parser.parse_float();
        parser.expect(TokenKind::EndOfFile);

        assert!(parser.finish().is_ok());
        assert_eq!(&name[..len], b"GPS");
        assert_eq!(id, Some(21));
        assert_eq!(offset, Some(3.5));
    }

    #[test]
    fn test_whitespace_only_input() {
        let mut parser = Parser::from_str("  \t\n # comment only\n");
        assert!(parser.have(TokenKind::EndOfFile));
        assert!(parser.expect(TokenKind::EndOfFile));
        assert!(parser.finish().is_ok());
    }

    #[test]
    fn test_invalid_token_reported() {
        let mut parser = Parser::from_str("%");
        assert!(parser.have(TokenKind::Invalid));

        assert!(!parser.expect(TokenKind::Integer));
        assert_eq!(
            parser.error().map(|e| e.to_string()),
            Some("found an invalid token, but needed an integer".to_string())
        );
    }

    #[test]
    fn test_error_position() {
        let mut parser = Parser::from_str("1\nword");
        assert_eq!(parser.parse_int(), Some(1));
        parser.expect(TokenKind::Integer);

        let position = parser.error().and_then(|e| e.position()).unwrap();
        assert_eq!((position.line, position.column), (1, 0));
    }

    #[test]
    fn test_from_reader() {
        let mut parser = Parser::from_reader(&b"12 13"[..]);
        assert_eq!(parser.parse_int(), Some(12));
        assert_eq!(parser.parse_int(), Some(13));
        assert!(parser.finish().is_ok());
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"GPS 7\n").unwrap();

        let mut parser = Parser::from_path(file.path());
        let mut name = [0u8; 8];
        let len = parser.parse_text(&mut name);

        assert_eq!(&name[..len], b"GPS");
        assert_eq!(parser.parse_int(), Some(7));
        assert!(parser.finish().is_ok());
    }

    #[test]
    fn test_from_path_failure_latches() {
        let mut parser = Parser::from_path("/nonexistent/almanac.txt");

        assert!(parser.is_failed());
        assert_matches!(parser.error(), Some(ParseError::Resource { .. }));
        assert!(parser
            .error()
            .map(|e| e.to_string())
            .unwrap()
            .starts_with("can't open '/nonexistent/almanac.txt'"));

        // A failed parser is inert but safe to use and drop
        assert_eq!(parser.parse_int(), None);
        assert!(!parser.match_kind(TokenKind::EndOfFile));
        drop(parser);
    }

    #[test]
    fn test_custom_comment_preferences() {
        let prefs = ScannerPreferences {
            comment_char: ';',
            ..Default::default()
        };
        let mut parser = Parser::with_preferences(b"; header\n5", prefs);
        assert_eq!(parser.parse_int(), Some(5));
        assert!(parser.finish().is_ok());
    }
}
