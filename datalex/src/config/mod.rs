pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{ConfigError, LoggingPreferences, RuntimeConfig, ScannerPreferences};
