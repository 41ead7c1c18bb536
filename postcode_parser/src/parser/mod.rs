//! Postcode dispatcher
//!
//! A [`Parser`] owns one compiled grammar per configured postcode variant. Parsing
//! normalizes the input, tries the grammars in priority order and stops at the
//! first match; a later grammar is never tried once an earlier one matched, even
//! if validation then fails. The parser holds no mutable state and can be shared
//! across threads.

pub mod config;
pub mod error;

use crate::config::compile_time::input::MAX_INPUT_LENGTH;
use crate::faults::{default_registry, FaultId, FaultRegistry};
use crate::grammar::{VariantGrammar, WhitespacePolicy};
use crate::logging::codes;
use crate::postcode::{Postcode, PostcodeKind};
use crate::special_cases::SpecialCaseCatalog;
use crate::validation::{self, RuleTable};
use crate::{log_debug, log_error, log_info, log_success};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

pub use config::{FaultSelector, ParserConfig};
pub use error::{
    ConfigurationError, InitializationError, ParseError, ParseErrorReason, PostcodeError,
    ValidationError,
};

#[derive(Debug, Clone)]
pub struct Parser {
    config: Arc<ParserConfig>,
    whitespace: WhitespacePolicy,
    grammars: Vec<VariantGrammar>,
    ignored_faults: BTreeSet<FaultId>,
    rules: Arc<RuleTable>,
    registry: &'static FaultRegistry,
}

impl Parser {
    /// Check `config` and compile a grammar for each configured variant
    pub fn new(
        config: ParserConfig,
        catalog: &SpecialCaseCatalog,
        rules: Arc<RuleTable>,
    ) -> Result<Self, ConfigurationError> {
        Self::build(config, catalog, rules).map_err(|error| {
            log_error!(error.error_code(), "Parser configuration rejected", "reason" => &error);
            error
        })
    }

    fn build(
        config: ParserConfig,
        catalog: &SpecialCaseCatalog,
        rules: Arc<RuleTable>,
    ) -> Result<Self, ConfigurationError> {
        let registry = default_registry()?;
        let resolved = config.resolve(registry)?;

        let grammars = resolved
            .kinds
            .iter()
            .map(|kind| {
                VariantGrammar::build(*kind, resolved.whitespace, catalog)
                    .map_err(|e| ConfigurationError::grammar_compilation(kind, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let types: Vec<&str> = resolved.kinds.iter().map(PostcodeKind::as_str).collect();
        log_success!(codes::success::PARSER_READY, "Postcode parser ready",
            "whitespace" => resolved.whitespace,
            "types" => types.join(","),
            "validate" => config.validate,
            "special_cases" => catalog.len()
        );

        Ok(Self {
            config: Arc::new(config),
            whitespace: resolved.whitespace,
            grammars,
            ignored_faults: resolved.ignored_faults,
            rules,
            registry,
        })
    }

    /// Parser over the bundled special cases and rule table
    pub fn with_bundled_data(config: ParserConfig) -> Result<Self, InitializationError> {
        let catalog = SpecialCaseCatalog::bundled()?;
        let rules = Arc::new(RuleTable::bundled()?);
        Ok(Self::new(config, &catalog, rules)?)
    }

    pub fn with_defaults() -> Result<Self, InitializationError> {
        Self::with_bundled_data(ParserConfig::default())
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn whitespace(&self) -> WhitespacePolicy {
        self.whitespace
    }

    /// Configured variants in the order they are tried
    pub fn postcode_types(&self) -> impl Iterator<Item = PostcodeKind> + '_ {
        self.grammars.iter().map(VariantGrammar::kind)
    }

    pub fn ignored_faults(&self) -> &BTreeSet<FaultId> {
        &self.ignored_faults
    }

    /// Parse `input`, validating it too when the parser is configured to
    pub fn parse(&self, input: &str) -> Result<Postcode, PostcodeError> {
        let postcode = self.match_grammars(input)?;
        if self.config.validate {
            Ok(self.validate(postcode)?)
        } else {
            Ok(postcode)
        }
    }

    /// Like [`parse`](Self::parse), but never fails
    ///
    /// A postcode that only failed validation is returned, faults attached, when
    /// `ignore_validation_error` is set. Every other failure yields `default`.
    pub fn try_parse(
        &self,
        input: &str,
        default: Option<Postcode>,
        ignore_validation_error: bool,
    ) -> Option<Postcode> {
        match self.parse(input) {
            Ok(postcode) => Some(postcode),
            Err(PostcodeError::Validation(error)) if ignore_validation_error => {
                Some(error.into_postcode())
            }
            Err(_) => default,
        }
    }

    /// Parse a JSON value; anything but a string is rejected
    pub fn parse_value(&self, value: &serde_json::Value) -> Result<Postcode, PostcodeError> {
        match value {
            serde_json::Value::String(input) => self.parse(input),
            other => Err(self
                .parse_error(&other.to_string(), ParseErrorReason::NotAString)
                .into()),
        }
    }

    /// Run the variant's rules and attach every fault found
    ///
    /// Fails when a fault outside the ignored set remains. A postcode that was
    /// already validated keeps its first fault list.
    pub fn validate(&self, mut postcode: Postcode) -> Result<Postcode, ValidationError> {
        if !postcode.is_validated() {
            postcode.attach_faults(validation::validate(&postcode, &self.rules));
        }
        let escalated: BTreeMap<FaultId, &'static str> = postcode
            .faults()
            .iter()
            .filter(|id| !self.ignored_faults.contains(id))
            .map(|id| (*id, self.describe(*id)))
            .collect();

        if escalated.is_empty() {
            log_debug!("Postcode validated",
                "code" => codes::success::POSTCODE_VALIDATED,
                "postcode" => &postcode,
                "faults" => postcode.faults().len()
            );
            return Ok(postcode);
        }

        let error = ValidationError::new(postcode, escalated);
        log_info!("Postcode failed validation",
            "code" => error.error_code(),
            "postcode" => &error.postcode,
            "faults" => error.faults.keys().map(ToString::to_string).collect::<Vec<_>>().join(",")
        );
        Err(error)
    }

    fn normalize(&self, input: &str) -> String {
        let trimmed = if self.config.trim_whitespace {
            input.trim()
        } else {
            input
        };
        if self.config.force_case {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn match_grammars(&self, input: &str) -> Result<Postcode, ParseError> {
        let normalized = self.normalize(input);

        // separators may be arbitrarily long under the lenient policy
        let length = normalized.chars().filter(|c| !c.is_whitespace()).count();
        if length > MAX_INPUT_LENGTH {
            return Err(self.parse_error(
                input,
                ParseErrorReason::InputTooLong {
                    length,
                    max: MAX_INPUT_LENGTH,
                },
            ));
        }

        let grammar = self
            .grammars
            .iter()
            .find(|grammar| grammar.is_match(&normalized))
            .ok_or_else(|| self.parse_error(input, ParseErrorReason::NoMatch))?;
        let postcode = grammar.construct(&normalized).ok_or_else(|| {
            log_error!(codes::system::INTERNAL_ERROR, "Grammar matched but built no postcode",
                "kind" => grammar.kind(),
                "input" => input
            );
            self.parse_error(input, ParseErrorReason::NoMatch)
        })?;

        log_debug!("Postcode parsed",
            "code" => codes::success::POSTCODE_PARSED,
            "input" => input,
            "kind" => postcode.kind()
        );
        Ok(postcode)
    }

    fn parse_error(&self, input: &str, reason: ParseErrorReason) -> ParseError {
        let error = ParseError::new(input, self.config.clone(), reason);
        log_debug!("Postcode rejected",
            "code" => error.error_code(),
            "input" => input,
            "reason" => &error.reason
        );
        error
    }

    fn describe(&self, id: FaultId) -> &'static str {
        self.registry.describe(id).unwrap_or("Unknown fault.")
    }
}
