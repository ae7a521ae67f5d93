// Internal modules
pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod source;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{tokenize, Scanner};
pub use source::{SourceBuffer, SourceError};
pub use syntax::{ParseError, Parser};
pub use tokens::{Token, TokenKind, TokenValue};
pub use utils::{Position, Span};
