//! UK postcode parsing and validation
//!
//! [`Parser`] recognizes standard, forces (BFPO) and special-case postcodes,
//! decomposes them into outward and inward codes and optionally checks them
//! against the area/district rule tables.

pub mod config;
pub mod faults;
pub mod grammar;
#[macro_use]
pub mod logging;
pub mod parser;
pub mod postcode;
pub mod special_cases;
pub mod validation;

use std::sync::OnceLock;

// Re-export key types for library consumers
pub use faults::{Fault, FaultId, FaultRegistry};
pub use grammar::WhitespacePolicy;
pub use parser::{
    ConfigurationError, FaultSelector, InitializationError, ParseError, Parser, ParserConfig,
    PostcodeError, ValidationError,
};
pub use postcode::{ForcesPostcode, Postcode, PostcodeKind, SpecialCasePostcode, StandardPostcode};
pub use special_cases::{SpecialCase, SpecialCaseCatalog, SpecialCaseError};
pub use validation::{RuleTable, RuleTableError};

static DEFAULT_PARSER: OnceLock<Result<Parser, InitializationError>> = OnceLock::new();

/// Shared parser with default options over the bundled data, built on first use
pub fn default_parser() -> Result<&'static Parser, InitializationError> {
    DEFAULT_PARSER
        .get_or_init(|| {
            Parser::with_defaults().map_err(|error| {
                log_error!(logging::codes::system::INITIALIZATION_FAILURE, "Default parser unavailable",
                    "reason" => &error
                );
                error
            })
        })
        .as_ref()
        .map_err(|error| error.clone())
}

pub fn parse_postcode(input: &str) -> Result<Postcode, PostcodeError> {
    default_parser()?.parse(input)
}

pub fn try_parse_postcode(
    input: &str,
    default: Option<Postcode>,
    ignore_validation_error: bool,
) -> Option<Postcode> {
    match default_parser() {
        Ok(parser) => parser.try_parse(input, default, ignore_validation_error),
        Err(_) => default,
    }
}
