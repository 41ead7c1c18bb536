//! Configuration module for the postcode parser
//!
//! Fixed limits live in [`constants::compile_time`] and cannot change at runtime.
//! User preferences are read from `POSTCODE_*` environment variables by [`runtime`].

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{parse_log_level, LoggingPreferences, ParserPreferences};
