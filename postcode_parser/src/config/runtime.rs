// RUNTIME PREFERENCES (User Experience)

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserPreferences {
    /// Whitespace policy name: strict, tolerant or lenient
    pub whitespace: String,

    /// Whether to uppercase input before matching
    pub force_case: bool,

    /// Whether to strip leading and trailing whitespace before matching
    pub trim_whitespace: bool,

    /// Whether every successful parse is also validated
    pub validate: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            whitespace: env::var("POSTCODE_WHITESPACE").unwrap_or_else(|_| "tolerant".to_string()),
            force_case: env::var("POSTCODE_FORCE_CASE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            trim_whitespace: env::var("POSTCODE_TRIM_WHITESPACE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            validate: env::var("POSTCODE_VALIDATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("POSTCODE_LOG_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("POSTCODE_LOG_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

/// Accepts level names (`warn` and `warning` alike) or their numbers 0-3
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }
}
