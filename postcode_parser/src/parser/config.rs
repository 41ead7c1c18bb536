//! Parser configuration
//!
//! [`ParserConfig`] holds raw option values exactly as a user supplied them. Values
//! are only checked when a [`Parser`](super::Parser) is built from the config, so
//! an invalid config can be loaded, inspected and reported before it is rejected.

use super::ConfigurationError;
use crate::config::ParserPreferences;
use crate::faults::{FaultId, FaultRegistry};
use crate::grammar::WhitespacePolicy;
use crate::log_warning;
use crate::logging::codes;
use crate::postcode::PostcodeKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An ignored fault given by number (`202`) or symbolic name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaultSelector {
    Id(u16),
    Name(String),
}

impl FaultSelector {
    /// Accepts `202`, `#202` or a fault name
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value.trim_start_matches('#').parse() {
            Ok(id) => FaultSelector::Id(id),
            Err(_) => FaultSelector::Name(value.to_string()),
        }
    }

    /// Numeric ids need not be registered; they are accepted with a warning
    fn resolve(&self, registry: &FaultRegistry) -> Result<FaultId, ConfigurationError> {
        match self {
            FaultSelector::Id(id) => {
                let id = FaultId::new(*id);
                if !registry.contains(id) {
                    log_warning!(codes::configuration::UNREGISTERED_IGNORED_FAULT,
                        "Ignored fault is not registered",
                        "fault" => id
                    );
                }
                Ok(id)
            }
            FaultSelector::Name(name) => registry
                .by_name(name)
                .ok_or_else(|| ConfigurationError::unknown_fault(name)),
        }
    }
}

impl From<u16> for FaultSelector {
    fn from(id: u16) -> Self {
        FaultSelector::Id(id)
    }
}

impl From<FaultId> for FaultSelector {
    fn from(id: FaultId) -> Self {
        FaultSelector::Id(id.value())
    }
}

impl From<&str> for FaultSelector {
    fn from(name: &str) -> Self {
        FaultSelector::Name(name.to_string())
    }
}

impl fmt::Display for FaultSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultSelector::Id(id) => write!(f, "{}", id),
            FaultSelector::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// strict, tolerant or lenient
    pub whitespace: String,
    /// Uppercase input before matching
    pub force_case: bool,
    /// Strip leading and trailing whitespace before matching
    pub trim_whitespace: bool,
    /// Variants to try, in priority order
    pub postcode_types: Vec<String>,
    /// Validate every successful parse and escalate faults
    pub validate: bool,
    /// Faults that never escalate
    pub ignored_faults: Vec<FaultSelector>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            whitespace: WhitespacePolicy::default().as_str().to_string(),
            force_case: true,
            trim_whitespace: true,
            postcode_types: PostcodeKind::ALL
                .iter()
                .map(|kind| kind.as_str().to_string())
                .collect(),
            validate: false,
            ignored_faults: Vec::new(),
        }
    }
}

/// Checked form of a [`ParserConfig`]
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    pub whitespace: WhitespacePolicy,
    pub kinds: Vec<PostcodeKind>,
    pub ignored_faults: BTreeSet<FaultId>,
}

impl ParserConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(text).map_err(|e| ConfigurationError::from_source("TOML", e))
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(text).map_err(|e| ConfigurationError::from_source("JSON", e))
    }

    /// Build from `POSTCODE_*` environment preferences
    pub fn from_env() -> Self {
        Self::from(ParserPreferences::default())
    }

    pub fn with_whitespace(mut self, whitespace: impl ToString) -> Self {
        self.whitespace = whitespace.to_string();
        self
    }

    pub fn with_force_case(mut self, force_case: bool) -> Self {
        self.force_case = force_case;
        self
    }

    pub fn with_trim_whitespace(mut self, trim_whitespace: bool) -> Self {
        self.trim_whitespace = trim_whitespace;
        self
    }

    pub fn with_postcode_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.postcode_types = types.into_iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_ignored_fault(mut self, fault: impl Into<FaultSelector>) -> Self {
        self.ignored_faults.push(fault.into());
        self
    }

    /// Check every option value; repeated postcode types keep their first position
    pub(crate) fn resolve(&self, registry: &FaultRegistry) -> Result<ResolvedConfig, ConfigurationError> {
        let whitespace = self.whitespace.parse::<WhitespacePolicy>()?;

        if self.postcode_types.is_empty() {
            return Err(ConfigurationError::EmptyPostcodeTypes);
        }
        let mut kinds = Vec::with_capacity(self.postcode_types.len());
        for name in &self.postcode_types {
            let kind = name.parse::<PostcodeKind>()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }

        let ignored_faults = self
            .ignored_faults
            .iter()
            .map(|selector| selector.resolve(registry))
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(ResolvedConfig {
            whitespace,
            kinds,
            ignored_faults,
        })
    }
}

impl From<ParserPreferences> for ParserConfig {
    fn from(preferences: ParserPreferences) -> Self {
        Self {
            whitespace: preferences.whitespace,
            force_case: preferences.force_case,
            trim_whitespace: preferences.trim_whitespace,
            validate: preferences.validate,
            ..Self::default()
        }
    }
}
