//! Recursive-descent parsing surface: the `Parser` and its error type.

pub mod error;
pub mod parser;

pub use error::ParseError;
pub use parser::Parser;
