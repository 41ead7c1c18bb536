//! Validation rule tables
//!
//! Loaded once by the composition root and shared read-only by every parser.

use crate::logging::codes;
use crate::{log_error, log_success};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

const BUNDLED_RULE_TABLE: &str = include_str!("../../data/rule_table.json");

/// Allowed subdivision letters per district; `None` or empty means unrestricted
pub type DistrictSubdivisions = BTreeMap<u8, Option<BTreeSet<char>>>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RuleTableError {
    #[error("Invalid validation rule table: {message}")]
    InvalidJson { message: String },
}

impl RuleTableError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::validation::RULE_TABLE_INVALID
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTable {
    #[serde(default)]
    pub standard: StandardRules,
    #[serde(default)]
    pub forces: ForcesRules,
}

impl RuleTable {
    /// Pure deserializer; no rule is applied here
    pub fn from_json_str(json: &str) -> Result<Self, RuleTableError> {
        serde_json::from_str(json).map_err(|e| {
            let error = RuleTableError::InvalidJson {
                message: e.to_string(),
            };
            log_error!(error.error_code(), "Failed to read rule table", "reason" => e);
            error
        })
    }

    /// The rule table shipped with the crate
    pub fn bundled() -> Result<Self, RuleTableError> {
        let table = Self::from_json_str(BUNDLED_RULE_TABLE)?;
        log_success!(codes::success::RULE_TABLE_LOADED, "Bundled rule table loaded",
            "subdivided_areas" => table.standard.subdivided_districts.len()
        );
        Ok(table)
    }
}

/// Exception tables for standard postcodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct StandardRules {
    /// Areas whose districts are all single digit
    pub single_digit_districts: BTreeSet<String>,
    /// Areas whose districts are all double digit
    pub double_digit_districts: BTreeSet<String>,
    pub has_district_zero: BTreeSet<String>,
    pub no_district_ten: BTreeSet<String>,
    /// Area to subdivided districts; an area with an empty map allows any district
    pub subdivided_districts: BTreeMap<String, DistrictSubdivisions>,
    pub first_position_excludes: BTreeSet<char>,
    pub second_position_excludes: BTreeSet<char>,
    /// Letters allowed after the digit in `A9A` districts; empty allows any
    pub single_letter_area_subdivisions: BTreeSet<char>,
    /// Letters allowed after the digit in `AA9A` districts; empty allows any
    pub double_letter_area_subdivisions: BTreeSet<char>,
    /// Letters never used in either unit position
    pub unit_excludes: BTreeSet<char>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ForcesRules {
    /// Highest allocated `BF` district
    pub max_bf_district: u8,
}

impl Default for ForcesRules {
    fn default() -> Self {
        Self { max_bf_district: 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_bundled_table_loads() {
        let table = RuleTable::bundled().unwrap();
        assert!(table.standard.single_digit_districts.contains("HX"));
        assert!(table.standard.double_digit_districts.contains("LL"));
        assert!(table.standard.has_district_zero.contains("BL"));
        assert!(table.standard.no_district_ten.contains("BL"));
        assert_eq!(
            table.standard.subdivided_districts["N"][&1],
            Some(BTreeSet::from(['C', 'P']))
        );
        assert!(table.standard.unit_excludes.contains(&'C'));
        assert_eq!(table.forces.max_bf_district, 2);
    }

    #[test]
    fn test_partial_table_uses_defaults() {
        let table = RuleTable::from_json_str(
            r#"{ "standard": { "double-digit-districts": ["LL"], "subdivided-districts": { "Q": { "3": null } } } }"#,
        )
        .unwrap();
        assert!(table.standard.single_digit_districts.is_empty());
        assert_eq!(table.standard.subdivided_districts["Q"][&3], None);
        assert_eq!(table.forces, ForcesRules::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert_matches!(
            RuleTable::from_json_str(r#"{ "standard": { "single-digit": [] } }"#),
            Err(RuleTableError::InvalidJson { .. })
        );
        assert_matches!(
            RuleTable::from_json_str(r#"{ "military": {} }"#),
            Err(RuleTableError::InvalidJson { .. })
        );
    }
}
