use super::ParserConfig;
use crate::faults::{FaultId, FaultRegistryError};
use crate::logging::codes;
use crate::postcode::Postcode;
use crate::special_cases::SpecialCaseError;
use crate::validation::RuleTableError;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

/// Construction-time errors; fatal to the parser being built
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid whitespace policy '{value}': expected strict, tolerant or lenient")]
    InvalidWhitespace { value: String },

    #[error("At least one postcode type must be configured")]
    EmptyPostcodeTypes,

    #[error("Unknown postcode type '{value}': expected standard, forces or special-case")]
    UnknownPostcodeType { value: String },

    #[error("Unknown configuration option: {message}")]
    UnknownOption { message: String },

    #[error("Unknown fault '{name}' in ignored faults")]
    UnknownFault { name: String },

    #[error("Failed to compile {kind} grammar: {reason}")]
    GrammarCompilation { kind: String, reason: String },

    #[error("Invalid {format} configuration: {message}")]
    Source { format: &'static str, message: String },

    #[error(transparent)]
    Registry(#[from] FaultRegistryError),
}

impl ConfigurationError {
    pub fn invalid_whitespace(value: &str) -> Self {
        Self::InvalidWhitespace {
            value: value.to_string(),
        }
    }

    pub fn unknown_postcode_type(value: &str) -> Self {
        Self::UnknownPostcodeType {
            value: value.to_string(),
        }
    }

    pub fn unknown_fault(name: &str) -> Self {
        Self::UnknownFault {
            name: name.to_string(),
        }
    }

    pub fn grammar_compilation(kind: impl ToString, reason: impl ToString) -> Self {
        Self::GrammarCompilation {
            kind: kind.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Classify a deserializer message; serde reports extra keys as "unknown field"
    pub fn from_source(format: &'static str, message: impl ToString) -> Self {
        let message = message.to_string();
        if message.contains("unknown field") {
            Self::UnknownOption { message }
        } else {
            Self::Source { format, message }
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::UnknownOption { .. } => codes::configuration::UNKNOWN_OPTION,
            Self::GrammarCompilation { .. } => codes::configuration::GRAMMAR_COMPILATION,
            Self::Registry(e) => e.error_code(),
            _ => codes::configuration::INVALID_OPTION_VALUE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorReason {
    #[error("Unable to parse postcode")]
    NoMatch,

    #[error("Postcode value is not a string")]
    NotAString,

    #[error("Postcode input has {length} non-whitespace characters (max: {max})")]
    InputTooLong { length: usize, max: usize },
}

/// Input matched no configured grammar or was not usable as a postcode at all
#[derive(Debug, Clone, thiserror::Error)]
#[error("{reason}: '{source_input}'")]
pub struct ParseError {
    /// Raw input before trimming or case folding
    pub source_input: String,
    /// Configuration of the parser that raised the error
    pub config: Arc<ParserConfig>,
    pub reason: ParseErrorReason,
}

impl ParseError {
    pub fn new(source_input: &str, config: Arc<ParserConfig>, reason: ParseErrorReason) -> Self {
        Self {
            source_input: source_input.to_string(),
            config,
            reason,
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self.reason {
            ParseErrorReason::NoMatch => codes::parsing::NO_GRAMMAR_MATCHED,
            ParseErrorReason::NotAString => codes::parsing::NOT_A_STRING,
            ParseErrorReason::InputTooLong { .. } => codes::parsing::INPUT_TOO_LONG,
        }
    }
}

/// Postcode parsed but carries faults outside the ignored set
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", describe_faults(.postcode, .faults))]
pub struct ValidationError {
    /// The parsed postcode with its full fault list attached
    pub postcode: Postcode,
    /// Escalated faults and their descriptions
    pub faults: BTreeMap<FaultId, &'static str>,
}

fn describe_faults(postcode: &Postcode, faults: &BTreeMap<FaultId, &'static str>) -> String {
    let mut message = format!("'{}' failed validation with {} faults.", postcode, faults.len());
    for (id, description) in faults {
        let _ = write!(message, "\n  #{}: {}", id, description);
    }
    message
}

impl ValidationError {
    pub fn new(postcode: Postcode, faults: BTreeMap<FaultId, &'static str>) -> Self {
        Self { postcode, faults }
    }

    pub fn into_postcode(self) -> Postcode {
        self.postcode
    }

    pub fn error_code(&self) -> crate::logging::Code {
        codes::validation::FAULTS_ESCALATED
    }
}

/// Bundled data or configuration could not be turned into a parser
#[derive(Debug, Clone, thiserror::Error)]
pub enum InitializationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Catalog(#[from] SpecialCaseError),

    #[error(transparent)]
    RuleTable(#[from] RuleTableError),
}

impl InitializationError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::Configuration(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::RuleTable(e) => e.error_code(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PostcodeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The shared default parser could not be built
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

impl PostcodeError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::Parse(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Initialization(e) => e.error_code(),
        }
    }
}
