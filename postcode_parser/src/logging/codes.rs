//! Log codes and their metadata
//!
//! Every code the crate logs is declared here together with its category,
//! severity and recommended action.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Code attached to every log event, error or success
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
// CLASSIFICATION TYPES
// ============================================================================

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

/// Metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Parser construction errors
pub mod configuration {
    use super::Code;

    pub const INVALID_OPTION_VALUE: Code = Code::new("E010");
    pub const UNKNOWN_OPTION: Code = Code::new("E011");
    pub const GRAMMAR_COMPILATION: Code = Code::new("E012");
    pub const UNREGISTERED_IGNORED_FAULT: Code = Code::new("W010");
}

/// Per-call parse errors
pub mod parsing {
    use super::Code;

    pub const NO_GRAMMAR_MATCHED: Code = Code::new("E020");
    pub const NOT_A_STRING: Code = Code::new("E021");
    pub const INPUT_TOO_LONG: Code = Code::new("E022");
}

pub mod validation {
    use super::Code;

    pub const FAULTS_ESCALATED: Code = Code::new("E030");
    pub const RULE_TABLE_INVALID: Code = Code::new("E031");
}

/// Special-case catalog errors
pub mod catalog {
    use super::Code;

    pub const DUPLICATE_IDENTIFIER: Code = Code::new("E040");
    pub const INVALID_DEFINITION: Code = Code::new("E041");
    pub const DEFINITION_LOAD_FAILURE: Code = Code::new("E042");
    pub const CAPACITY_EXCEEDED: Code = Code::new("E043");
}

/// Fault registry errors
pub mod registry {
    use super::Code;

    pub const DUPLICATE_FAULT_ID: Code = Code::new("E050");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

pub mod success {
    use super::Code;

    pub const PARSER_READY: Code = Code::new("I001");
    pub const LOGGING_INITIALIZED: Code = Code::new("I002");

    pub const POSTCODE_PARSED: Code = Code::new("I010");
    pub const POSTCODE_VALIDATED: Code = Code::new("I011");

    pub const CATALOG_LOADED: Code = Code::new("I020");
    pub const RULE_TABLE_LOADED: Code = Code::new("I021");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

const METADATA: &[ErrorMetadata] = &[
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        "Internal parser error",
        "File a bug report with the failing input",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        "Initialization failure",
        "Check bundled data and logging configuration",
    ),
    ErrorMetadata::new(
        "E010",
        "Configuration",
        Severity::High,
        false,
        "Parser option has an unrecognized value",
        "Use one of the documented values for the option",
    ),
    ErrorMetadata::new(
        "E011",
        "Configuration",
        Severity::High,
        false,
        "Parser configuration contains an unknown key",
        "Remove or rename the unknown key",
    ),
    ErrorMetadata::new(
        "E012",
        "Configuration",
        Severity::Critical,
        false,
        "Composed postcode grammar failed to compile",
        "Check special-case pattern fragments",
    ),
    ErrorMetadata::new(
        "W010",
        "Configuration",
        Severity::Low,
        true,
        "Ignored fault id is not in the fault registry",
        "Check the id against the published fault list",
    ),
    ErrorMetadata::new(
        "E020",
        "Parsing",
        Severity::Low,
        true,
        "Input matched none of the configured postcode grammars",
        "Check the input or widen the whitespace policy",
    ),
    ErrorMetadata::new(
        "E021",
        "Parsing",
        Severity::Low,
        true,
        "Input value is not a string",
        "Pass postcode values as strings",
    ),
    ErrorMetadata::new(
        "E022",
        "Parsing",
        Severity::Medium,
        true,
        "Input exceeds the maximum accepted length",
        "Pass a single postcode per call",
    ),
    ErrorMetadata::new(
        "E030",
        "Validation",
        Severity::Low,
        true,
        "Parsed postcode carries faults that are not ignored",
        "Correct the postcode or add the fault to the ignored set",
    ),
    ErrorMetadata::new(
        "E031",
        "Validation",
        Severity::Critical,
        false,
        "Validation rule table could not be read",
        "Check the rule table JSON against the documented keys",
    ),
    ErrorMetadata::new(
        "E040",
        "Catalog",
        Severity::Critical,
        false,
        "Special case identifier registered twice",
        "Give every special case a unique identifier",
    ),
    ErrorMetadata::new(
        "E041",
        "Catalog",
        Severity::High,
        false,
        "Special case definition is malformed",
        "Check the identifier and pattern fragments",
    ),
    ErrorMetadata::new(
        "E042",
        "Catalog",
        Severity::High,
        false,
        "Special case definitions could not be loaded",
        "Check the definition directory and file permissions",
    ),
    ErrorMetadata::new(
        "E043",
        "Catalog",
        Severity::High,
        false,
        "Special case catalog is full",
        "Reduce the number of special case definitions",
    ),
    ErrorMetadata::new(
        "E050",
        "Registry",
        Severity::Critical,
        false,
        "Fault identifier registered twice",
        "Assign each fault a unique numeric identifier",
    ),
    ErrorMetadata::new(
        "I001",
        "Success",
        Severity::Low,
        true,
        "Parser constructed",
        "",
    ),
    ErrorMetadata::new(
        "I002",
        "Success",
        Severity::Low,
        true,
        "Logging initialized",
        "",
    ),
    ErrorMetadata::new("I010", "Success", Severity::Low, true, "Postcode parsed", ""),
    ErrorMetadata::new(
        "I011",
        "Success",
        Severity::Low,
        true,
        "Postcode validated without escalated faults",
        "",
    ),
    ErrorMetadata::new(
        "I020",
        "Success",
        Severity::Low,
        true,
        "Special case catalog loaded",
        "",
    ),
    ErrorMetadata::new(
        "I021",
        "Success",
        Severity::Low,
        true,
        "Validation rule table loaded",
        "",
    ),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| METADATA.iter().map(|m| (m.code, m)).collect())
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_code_has_metadata() {
        let declared = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            configuration::INVALID_OPTION_VALUE,
            configuration::UNKNOWN_OPTION,
            configuration::GRAMMAR_COMPILATION,
            configuration::UNREGISTERED_IGNORED_FAULT,
            parsing::NO_GRAMMAR_MATCHED,
            parsing::NOT_A_STRING,
            parsing::INPUT_TOO_LONG,
            validation::FAULTS_ESCALATED,
            validation::RULE_TABLE_INVALID,
            catalog::DUPLICATE_IDENTIFIER,
            catalog::INVALID_DEFINITION,
            catalog::DEFINITION_LOAD_FAILURE,
            catalog::CAPACITY_EXCEEDED,
            registry::DUPLICATE_FAULT_ID,
            success::PARSER_READY,
            success::LOGGING_INITIALIZED,
            success::POSTCODE_PARSED,
            success::POSTCODE_VALIDATED,
            success::CATALOG_LOADED,
            success::RULE_TABLE_LOADED,
        ];

        for code in declared {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
        assert_eq!(declared.len(), METADATA.len());
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(is_recoverable("E999"));
    }

    #[test]
    fn test_parse_errors_are_recoverable() {
        assert!(is_recoverable(parsing::NO_GRAMMAR_MATCHED.as_str()));
        assert!(!is_recoverable(registry::DUPLICATE_FAULT_ID.as_str()));
        assert_eq!(get_category(catalog::DUPLICATE_IDENTIFIER.as_str()), "Catalog");
    }
}
