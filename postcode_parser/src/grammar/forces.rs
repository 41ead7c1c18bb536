use super::{compile_anchored, WhitespacePolicy};
use crate::postcode::ForcesPostcode;
use regex::Regex;

/// 1 to 4 digits, not all zero
const BFPO_NUMBER: &str = r"(?P<bfpo>[1-9][0-9]{0,3}|0[1-9][0-9]{0,2}|00[1-9][0-9]?|000[1-9])";

/// Districts above the current allocation are accepted here and left to validation
const BF_DISTRICT: &str = r"BF(?P<bf_district>[0-9]{1,2})";
const BF_SECTOR: &str = r"(?P<bf_sector>[0-9])";
const BF_UNIT: &str = r"(?P<bf_unit>[A-Z]{2})";

#[derive(Debug, Clone)]
pub struct ForcesGrammar {
    regex: Regex,
}

impl ForcesGrammar {
    pub fn build(policy: WhitespacePolicy) -> Result<Self, regex::Error> {
        let separator = policy.separator();
        let bfpo_form = format!("BFPO{}{}", separator, BFPO_NUMBER);
        let district_form = format!("{}{}{}{}", BF_DISTRICT, separator, BF_SECTOR, BF_UNIT);

        Ok(Self {
            regex: compile_anchored(&format!("(?:{})|(?:{})", bfpo_form, district_form))?,
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn construct(&self, input: &str) -> Option<ForcesPostcode> {
        let captures = self.regex.captures(input)?;

        if let Some(number) = captures.name("bfpo") {
            return ForcesPostcode::bfpo(number.as_str().parse().ok()?);
        }

        ForcesPostcode::district(
            captures.name("bf_district")?.as_str().parse().ok()?,
            captures.name("bf_sector")?.as_str().parse().ok()?,
            captures.name("bf_unit")?.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfpo_numbers() {
        let grammar = ForcesGrammar::build(WhitespacePolicy::Strict).unwrap();

        for (input, number) in [("BFPO 1", 1), ("BFPO 801", 801), ("BFPO 9999", 9999), ("BFPO 0042", 42)] {
            let postcode = grammar.construct(input).unwrap();
            assert!(postcode.is_bfpo_format());
            assert_eq!(postcode.bfpo_number(), Some(number), "{}", input);
        }

        for input in ["BFPO 0", "BFPO 0000", "BFPO 10000", "BFPO", "BFPO X1"] {
            assert!(grammar.construct(input).is_none(), "{}", input);
        }
    }

    #[test]
    fn test_bf_district_form() {
        let grammar = ForcesGrammar::build(WhitespacePolicy::Strict).unwrap();

        let postcode = grammar.construct("BF1 2XX").unwrap();
        assert!(!postcode.is_bfpo_format());
        assert_eq!(postcode.outward_area(), Some("BF"));
        assert_eq!(postcode.outward_district(), Some(1));

        let wide = grammar.construct("BF17 3AB").unwrap();
        assert_eq!(wide.outward_district(), Some(17));

        assert!(grammar.construct("BF1A 2XX").is_none());
        assert!(grammar.construct("SW1 2XX").is_none());
    }

    #[test]
    fn test_lenient_separator() {
        let grammar = ForcesGrammar::build(WhitespacePolicy::Lenient).unwrap();
        assert_eq!(grammar.construct("BFPO\t \t801").unwrap().to_string(), "BFPO 801");
        assert_eq!(grammar.construct("BF12XX").unwrap().to_string(), "BF1 2XX");
    }
}
