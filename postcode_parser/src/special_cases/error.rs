use crate::logging::codes;
use std::path::PathBuf;

pub type SpecialCaseResult<T> = Result<T, SpecialCaseError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SpecialCaseError {
    #[error("Special case ID '{identifier}' is already allocated")]
    DuplicateIdentifier { identifier: String },

    #[error("Special case ID '{identifier}' is not a valid group name: use letters, digits and underscores, not starting with a digit")]
    InvalidIdentifier { identifier: String },

    #[error("Pattern fragment '{fragment}' of special case '{identifier}' contains a capturing group; use (?:...) instead")]
    CapturingGroupInPattern { identifier: String, fragment: String },

    #[error("Pattern fragment '{fragment}' of special case '{identifier}' is not a valid regex: {reason}")]
    InvalidPattern {
        identifier: String,
        fragment: String,
        reason: String,
    },

    #[error("Pattern of special case '{identifier}' has {tokens} tokens (max: {max_tokens})")]
    TooManyTokens {
        identifier: String,
        tokens: usize,
        max_tokens: usize,
    },

    #[error("Special case '{identifier}' has no usable patterns")]
    NoPatterns { identifier: String },

    #[error("Special case catalog is full ({max_cases} entries)")]
    CatalogFull { max_cases: usize },

    #[error("Invalid special case definition{}: {message}", source_suffix(.path))]
    Definition {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Failed to read special case definitions from {path}: {message}")]
    Io { path: PathBuf, message: String },
}

fn source_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl SpecialCaseError {
    pub fn duplicate_identifier(identifier: &str) -> Self {
        Self::DuplicateIdentifier {
            identifier: identifier.to_string(),
        }
    }

    pub fn invalid_identifier(identifier: &str) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.to_string(),
        }
    }

    pub fn capturing_group(identifier: &str, fragment: &str) -> Self {
        Self::CapturingGroupInPattern {
            identifier: identifier.to_string(),
            fragment: fragment.to_string(),
        }
    }

    pub fn invalid_pattern(identifier: &str, fragment: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            identifier: identifier.to_string(),
            fragment: fragment.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn definition(path: Option<PathBuf>, message: impl ToString) -> Self {
        Self::Definition {
            path,
            message: message.to_string(),
        }
    }

    pub fn io(path: PathBuf, message: impl ToString) -> Self {
        Self::Io {
            path,
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::DuplicateIdentifier { .. } => codes::catalog::DUPLICATE_IDENTIFIER,
            Self::InvalidIdentifier { .. }
            | Self::CapturingGroupInPattern { .. }
            | Self::InvalidPattern { .. }
            | Self::TooManyTokens { .. }
            | Self::NoPatterns { .. }
            | Self::Definition { .. } => codes::catalog::INVALID_DEFINITION,
            Self::CatalogFull { .. } => codes::catalog::CAPACITY_EXCEEDED,
            Self::Io { .. } => codes::catalog::DEFINITION_LOAD_FAILURE,
        }
    }
}
