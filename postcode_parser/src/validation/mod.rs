//! Semantic validation of parsed postcodes
//!
//! Each variant has a declared list of `(fault, check)` rules. Validation runs every
//! rule in order and collects the faults whose check fires, so the result is
//! deterministic and independent of which other rules fired.

pub mod forces;
pub mod rules;
pub mod standard;

use crate::faults::{Fault, FaultId};
use crate::postcode::{ForcesPostcode, Postcode, PostcodeBody, StandardPostcode};

pub use rules::{DistrictSubdivisions, ForcesRules, RuleTable, RuleTableError, StandardRules};

fn collect<P, R>(rules: &[(Fault, fn(&P, &R) -> bool)], postcode: &P, table: &R) -> Vec<FaultId> {
    rules
        .iter()
        .filter(|(_, check)| check(postcode, table))
        .map(|(fault, _)| fault.id)
        .collect()
}

pub fn validate_standard(postcode: &StandardPostcode, rules: &StandardRules) -> Vec<FaultId> {
    collect(standard::RULES, postcode, rules)
}

pub fn validate_forces(postcode: &ForcesPostcode, rules: &ForcesRules) -> Vec<FaultId> {
    collect(forces::RULES, postcode, rules)
}

/// Ordered faults for `postcode`; special cases are valid by construction
pub fn validate(postcode: &Postcode, table: &RuleTable) -> Vec<FaultId> {
    match postcode.body() {
        PostcodeBody::Standard(p) => validate_standard(p, &table.standard),
        PostcodeBody::Forces(p) => validate_forces(p, &table.forces),
        PostcodeBody::SpecialCase(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faults::{forces as forces_faults, standard as standard_faults};
    use crate::grammar::{ForcesGrammar, StandardGrammar, WhitespacePolicy};
    use crate::special_cases::SpecialCase;
    use crate::postcode::SpecialCasePostcode;
    use std::sync::Arc;

    fn table() -> RuleTable {
        RuleTable::bundled().unwrap()
    }

    fn parse_standard(input: &str) -> StandardPostcode {
        StandardGrammar::build(WhitespacePolicy::Strict)
            .unwrap()
            .construct(input)
            .unwrap()
    }

    fn parse_forces(input: &str) -> ForcesPostcode {
        ForcesGrammar::build(WhitespacePolicy::Strict)
            .unwrap()
            .construct(input)
            .unwrap()
    }

    fn ids(faults: &[FaultId]) -> Vec<u16> {
        faults.iter().map(|id| id.value()).collect()
    }

    fn standard_faults_for(input: &str) -> Vec<u16> {
        ids(&validate_standard(&parse_standard(input), &table().standard))
    }

    #[test]
    fn test_rules_are_declared_in_fault_order() {
        let declared: Vec<FaultId> = standard::RULES.iter().map(|(f, _)| f.id).collect();
        let catalogue: Vec<FaultId> = standard_faults::ALL.iter().map(|f| f.id).collect();
        assert_eq!(declared, catalogue);
    }

    #[test]
    fn test_clean_postcodes_have_no_faults() {
        for input in ["LL20 2XX", "SW1A 1AA", "W1A 0AX", "EC1A 1BB", "BL0 1AA", "M1 1AE", "HX1 2XX"] {
            assert_eq!(standard_faults_for(input), Vec::<u16>::new(), "{}", input);
        }
    }

    #[test]
    fn test_district_digit_rules() {
        assert_eq!(standard_faults_for("BR10 2XX"), vec![201]);
        assert_eq!(standard_faults_for("HX10 2XX"), vec![201]);
        assert_eq!(standard_faults_for("LL9 2XX"), vec![202]);
        assert_eq!(standard_faults_for("LL0 2XX"), vec![202, 203]);
    }

    #[test]
    fn test_district_zero_and_ten() {
        assert_eq!(standard_faults_for("M0 1AA"), vec![203]);
        assert_eq!(standard_faults_for("BS0 1AA"), Vec::<u16>::new());
        assert_eq!(standard_faults_for("BL10 1AA"), vec![204]);
        assert_eq!(standard_faults_for("M10 1AA"), Vec::<u16>::new());
    }

    #[test]
    fn test_subdivision_rules() {
        // N1 only subdivides into C and P
        assert_eq!(standard_faults_for("N1C 1AA"), Vec::<u16>::new());
        assert_eq!(standard_faults_for("N1S 1AA"), vec![206]);
        // M is not a subdivided area at all
        assert_eq!(standard_faults_for("M1A 1AA"), vec![205]);
        assert_eq!(standard_faults_for("XY7N 2XX"), vec![205, 207]);
    }

    #[test]
    fn test_position_exclusions() {
        assert_eq!(standard_faults_for("X1 1AA"), vec![207]);
        assert_eq!(standard_faults_for("XI1 1AA"), vec![207, 208]);
        assert_eq!(standard_faults_for("A1X 2AA"), vec![205, 209]);
        assert_eq!(standard_faults_for("AA1Z 2AA"), vec![205, 210]);
        assert_eq!(standard_faults_for("M1 2CX"), vec![211]);
        assert_eq!(standard_faults_for("M1 2XC"), vec![212]);
        assert_eq!(standard_faults_for("M1 2CO"), vec![211, 212]);
    }

    #[test]
    fn test_empty_tables_allow_everything() {
        let rules = StandardRules::default();
        for input in ["BR10 2XX", "XI1 1CC", "LL9 2XX"] {
            let faults = validate_standard(&parse_standard(input), &rules);
            assert!(faults.is_empty(), "{}: {:?}", input, faults);
        }
        // zero districts and subdivisions are whitelisted, so empty tables reject them
        assert_eq!(ids(&validate_standard(&parse_standard("M0 1AA"), &rules)), vec![203]);
        assert_eq!(ids(&validate_standard(&parse_standard("A1X 2AA"), &rules)), vec![205]);
    }

    #[test]
    fn test_empty_district_map_means_unrestricted() {
        let mut rules = StandardRules::default();
        rules.subdivided_districts.insert("Q".to_string(), DistrictSubdivisions::new());
        assert!(validate_standard(&parse_standard("Q7Z 1AA"), &rules).is_empty());

        rules
            .subdivided_districts
            .get_mut("Q")
            .unwrap()
            .insert(3, None);
        assert_eq!(ids(&validate_standard(&parse_standard("Q7Z 1AA"), &rules)), vec![205]);
        assert!(validate_standard(&parse_standard("Q3Z 1AA"), &rules).is_empty());
    }

    #[test]
    fn test_forces_district_limit() {
        let table = table();
        assert!(validate_forces(&parse_forces("BF1 2XX"), &table.forces).is_empty());
        assert!(validate_forces(&parse_forces("BF2 2XX"), &table.forces).is_empty());
        assert_eq!(
            validate_forces(&parse_forces("BF3 2XX"), &table.forces),
            vec![forces_faults::INVALID_DISTRICT.id]
        );
        assert!(validate_forces(&parse_forces("BFPO 1234"), &table.forces).is_empty());
    }

    #[test]
    fn test_special_cases_are_always_valid() {
        let mut case = SpecialCase::new("santa").unwrap();
        case.add_pattern("SAN TA1").unwrap();
        let parts = vec!["SAN".to_string(), "TA1".to_string()];
        let postcode = Postcode::from(SpecialCasePostcode::new(Arc::new(case), parts).unwrap());
        assert!(validate(&postcode, &table()).is_empty());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let table = table();
        let postcode = Postcode::from(parse_standard("XI1 2CO"));
        let first = validate(&postcode, &table);
        assert_eq!(first, validate(&postcode, &table));
        assert_eq!(ids(&first), vec![207, 208, 211, 212]);
    }
}
