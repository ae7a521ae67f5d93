//! Lexical analysis: the classifying scanner and whole-buffer helpers.

pub mod scanner;

pub use scanner::{is_token_char, is_whitespace, Scanner};

use crate::config::constants::compile_time::lexical::MAX_TOKEN_COUNT;
use crate::config::runtime::ScannerPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind};
use crate::{log_debug, log_error, log_success};

/// Scan a whole buffer into tokens with default preferences.
///
/// Invalid bytes each yield one `Invalid` token and are skipped. The final
/// token is `EndOfFile` unless the token count limit cut the pass short.
pub fn tokenize(src: &[u8]) -> Vec<Token> {
    tokenize_with_preferences(src, &ScannerPreferences::default())
}

/// Scan a whole buffer into tokens with the given preferences.
pub fn tokenize_with_preferences(src: &[u8], prefs: &ScannerPreferences) -> Vec<Token> {
    let mut scanner = Scanner::from_preferences(prefs);
    let mut tokens = Vec::new();

    loop {
        if tokens.len() >= MAX_TOKEN_COUNT {
            log_error!(
                codes::lexical::TOO_MANY_TOKENS,
                "Token count limit exceeded",
                "limit" => MAX_TOKEN_COUNT
            );
            break;
        }

        let token = scanner.next_token(src);
        let kind = token.kind;
        tokens.push(token);

        match kind {
            TokenKind::EndOfFile => break,
            TokenKind::Invalid => {
                log_debug!("Skipping invalid byte",
                    "line" => token.position.line,
                    "column" => token.position.column
                );
                scanner.skip_byte(src);
            }
            _ => {}
        }
    }

    if prefs.log_token_statistics {
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization complete",
            "tokens" => tokens.len(),
            "bytes" => src.len()
        );
    }

    tokens
}
