// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;

/// Environment variable names recognized by the default preference loaders.
pub mod env_vars {
    pub const COMMENT_CHAR: &str = "DATALEX_COMMENT_CHAR";
    pub const INCLUDE_POSITIONS: &str = "DATALEX_INCLUDE_POSITIONS";
    pub const LOG_TOKEN_STATS: &str = "DATALEX_LOG_TOKEN_STATS";
    pub const LOG_LEVEL: &str = "DATALEX_LOG_LEVEL";
    pub const STRUCTURED_LOGGING: &str = "DATALEX_STRUCTURED_LOGGING";
    pub const CONSOLE_LOGGING: &str = "DATALEX_CONSOLE_LOGGING";
}

/// Errors raised while loading or validating a runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid comment character {0:?}: must be a single ASCII byte outside the token character set")]
    InvalidCommentChar(char),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerPreferences {
    /// Character that starts a line comment
    pub comment_char: char,

    /// Whether to include line/column context when logging latched errors
    pub include_position_in_errors: bool,

    /// Whether to log token count statistics after a tokenize pass
    pub log_token_statistics: bool,
}

impl Default for ScannerPreferences {
    fn default() -> Self {
        Self {
            comment_char: env::var(env_vars::COMMENT_CHAR)
                .ok()
                .and_then(|v| v.chars().next())
                .unwrap_or('#'),
            include_position_in_errors: env::var(env_vars::INCLUDE_POSITIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_token_statistics: env::var(env_vars::LOG_TOKEN_STATS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl ScannerPreferences {
    /// The comment character as a byte. Falls back to '#' for any
    /// non-ASCII character so the scanner always has a valid byte.
    pub fn comment_byte(&self) -> u8 {
        if self.comment_char.is_ascii() {
            self.comment_char as u8
        } else {
            b'#'
        }
    }

    /// Validate against the scanner's character classes: the comment
    /// character must not collide with token characters or whitespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let byte = self.comment_byte();
        if !self.comment_char.is_ascii()
            || crate::lexical::is_token_char(byte)
            || crate::lexical::is_whitespace(byte)
        {
            return Err(ConfigError::InvalidCommentChar(self.comment_char));
        }
        Ok(())
    }
}

/// Log levels as stored in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_events_log_level(self) -> crate::logging::LogLevel {
        match self {
            LogLevel::Error => crate::logging::LogLevel::Error,
            LogLevel::Warning => crate::logging::LogLevel::Warning,
            LogLevel::Info => crate::logging::LogLevel::Info,
            LogLevel::Debug => crate::logging::LogLevel::Debug,
        }
    }

    fn from_env_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warning" | "warn" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Minimum level to emit
    pub min_log_level: LogLevel,

    /// Whether to emit JSON events instead of plain text
    pub use_structured_logging: bool,

    /// Whether console output is enabled at all
    pub enable_console_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var(env_vars::LOG_LEVEL)
                .ok()
                .and_then(|v| LogLevel::from_env_str(&v))
                .unwrap_or(LogLevel::Info),
            use_structured_logging: env::var(env_vars::STRUCTURED_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::CONSOLE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// Aggregate runtime configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub scanner: ScannerPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a configuration from TOML text. Missing sections and fields
    /// fall back to environment-derived defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(text)?;
        config.scanner.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_scanner_preferences() {
        let prefs = ScannerPreferences::default();
        assert_eq!(prefs.comment_byte(), b'#');
        assert!(prefs.validate().is_ok());
    }

    #[test]
    fn test_comment_char_validation() {
        let mut prefs = ScannerPreferences::default();

        prefs.comment_char = ';';
        assert!(prefs.validate().is_ok());

        // Token characters and whitespace cannot start comments
        prefs.comment_char = '+';
        assert_matches!(prefs.validate(), Err(ConfigError::InvalidCommentChar('+')));

        prefs.comment_char = ' ';
        assert!(prefs.validate().is_err());

        prefs.comment_char = 'a';
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn test_non_ascii_comment_char_falls_back() {
        let prefs = ScannerPreferences {
            comment_char: '€',
            ..Default::default()
        };
        assert_eq!(prefs.comment_byte(), b'#');
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [scanner]
            comment_char = ";"
            log_token_statistics = true

            [logging]
            min_log_level = "debug"
            use_structured_logging = true
            "#,
        )
        .unwrap();

        assert_eq!(config.scanner.comment_byte(), b';');
        assert!(config.scanner.log_token_statistics);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(config.logging.use_structured_logging);
    }

    #[test]
    fn test_toml_rejects_token_char_comment() {
        let result = RuntimeConfig::from_toml_str(
            r#"
            [scanner]
            comment_char = "5"
            "#,
        );
        assert_matches!(result, Err(ConfigError::InvalidCommentChar('5')));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(config.scanner.comment_byte(), b'#');
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_env_str("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::from_env_str("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_env_str("verbose"), None);
    }

    #[test]
    fn test_load_from_missing_path() {
        let result = RuntimeConfig::load_from_path(Path::new("/nonexistent/datalex.toml"));
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }
}
