pub mod buffer;

pub use buffer::{read_path, read_stream, SourceBuffer, SourceError};
