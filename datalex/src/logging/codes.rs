//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and
//! classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Source acquisition error codes
pub mod source {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const SOURCE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const INVALID_NUMBER: Code = Code::new("E022");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const PARSE_ABORTED: Code = Code::new("E051");
    pub const SOURCE_UNAVAILABLE: Code = Code::new("E052");
}

/// Configuration error codes
pub mod configuration {
    use super::Code;

    pub const INVALID_CONFIG: Code = Code::new("E060");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const SOURCE_LOAD_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I010");
    pub const PARSE_COMPLETE: Code = Code::new("I011");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static METADATA_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn build_registry() -> HashMap<&'static str, ErrorMetadata> {
    let entries = [
        ErrorMetadata {
            code: "ERR001",
            category: "System",
            severity: Severity::Critical,
            recoverable: false,
            requires_halt: true,
            description: "Internal error in the parsing library",
            recommended_action: "Report this as a bug with the input that triggered it",
        },
        ErrorMetadata {
            code: "ERR002",
            category: "System",
            severity: Severity::Critical,
            recoverable: false,
            requires_halt: true,
            description: "Global subsystem initialization failed",
            recommended_action: "Check configuration and retry initialization",
        },
        ErrorMetadata {
            code: "E005",
            category: "Source",
            severity: Severity::High,
            recoverable: true,
            requires_halt: false,
            description: "Source file does not exist",
            recommended_action: "Verify the file path",
        },
        ErrorMetadata {
            code: "E007",
            category: "Source",
            severity: Severity::High,
            recoverable: true,
            requires_halt: false,
            description: "Source exceeds the maximum allowed size",
            recommended_action: "Split the input or raise the compile-time limit",
        },
        ErrorMetadata {
            code: "E009",
            category: "Source",
            severity: Severity::High,
            recoverable: true,
            requires_halt: false,
            description: "Insufficient permissions to read the source",
            recommended_action: "Check file permissions",
        },
        ErrorMetadata {
            code: "E011",
            category: "Source",
            severity: Severity::High,
            recoverable: true,
            requires_halt: false,
            description: "I/O failure while reading the source",
            recommended_action: "Check the storage device and retry",
        },
        ErrorMetadata {
            code: "E012",
            category: "Source",
            severity: Severity::Medium,
            recoverable: true,
            requires_halt: false,
            description: "Path is not a readable file",
            recommended_action: "Verify the path points to a regular file",
        },
        ErrorMetadata {
            code: "E020",
            category: "Lexical",
            severity: Severity::Medium,
            recoverable: true,
            requires_halt: false,
            description: "Byte outside the token character set",
            recommended_action: "Remove or replace the offending byte",
        },
        ErrorMetadata {
            code: "E022",
            category: "Lexical",
            severity: Severity::Low,
            recoverable: true,
            requires_halt: false,
            description: "Numeric-looking run failed to decode",
            recommended_action: "Check the number format",
        },
        ErrorMetadata {
            code: "E027",
            category: "Lexical",
            severity: Severity::High,
            recoverable: false,
            requires_halt: true,
            description: "Token count limit exceeded",
            recommended_action: "Split the input into smaller units",
        },
        ErrorMetadata {
            code: "E050",
            category: "Syntax",
            severity: Severity::Medium,
            recoverable: true,
            requires_halt: false,
            description: "Token kind does not match what the grammar needed",
            recommended_action: "Fix the input at the reported position",
        },
        ErrorMetadata {
            code: "E051",
            category: "Syntax",
            severity: Severity::Medium,
            recoverable: true,
            requires_halt: false,
            description: "Caller aborted parsing with a custom message",
            recommended_action: "See the attached message",
        },
        ErrorMetadata {
            code: "E052",
            category: "Syntax",
            severity: Severity::High,
            recoverable: true,
            requires_halt: false,
            description: "Parser constructed from an unreadable source",
            recommended_action: "Check the source path or stream",
        },
        ErrorMetadata {
            code: "E060",
            category: "Configuration",
            severity: Severity::Medium,
            recoverable: true,
            requires_halt: false,
            description: "Runtime configuration is invalid",
            recommended_action: "Fix the configuration file or environment variables",
        },
    ];

    entries.into_iter().map(|m| (m.code, m)).collect()
}

fn registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    METADATA_REGISTRY.get_or_init(build_registry)
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_metadata(code).map(|m| m.severity).unwrap_or(Severity::Low)
}

pub fn get_category(code: &str) -> &'static str {
    get_metadata(code).map(|m| m.category).unwrap_or("Unknown")
}

pub fn get_description(code: &str) -> &'static str {
    get_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_metadata(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn is_recoverable(code: &str) -> bool {
    get_metadata(code).map(|m| m.recoverable).unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_metadata(code).map(|m| m.requires_halt).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display() {
        assert_eq!(syntax::UNEXPECTED_TOKEN.to_string(), "E050");
        assert_eq!(syntax::UNEXPECTED_TOKEN.as_str(), "E050");
    }

    #[test]
    fn test_registry_lookup() {
        assert_eq!(get_category("E005"), "Source");
        assert_eq!(get_category("E020"), "Lexical");
        assert_eq!(get_category("E050"), "Syntax");
        assert_eq!(get_category("X999"), "Unknown");
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert!(requires_halt("ERR001"));
        assert!(!is_recoverable("ERR001"));

        assert!(is_recoverable("E050"));
        assert!(!requires_halt("E050"));

        assert!(requires_halt("E027"));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_action("X999"), "No specific action available");
        assert_eq!(get_severity("X999"), Severity::Low);
        assert!(is_recoverable("X999"));
    }

    #[test]
    fn test_all_declared_codes_have_metadata() {
        let declared = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            source::FILE_NOT_FOUND,
            source::SOURCE_TOO_LARGE,
            source::PERMISSION_DENIED,
            source::IO_ERROR,
            source::INVALID_PATH,
            lexical::INVALID_CHARACTER,
            lexical::INVALID_NUMBER,
            lexical::TOO_MANY_TOKENS,
            syntax::UNEXPECTED_TOKEN,
            syntax::PARSE_ABORTED,
            syntax::SOURCE_UNAVAILABLE,
            configuration::INVALID_CONFIG,
        ];

        for code in declared {
            assert!(
                get_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }
}
