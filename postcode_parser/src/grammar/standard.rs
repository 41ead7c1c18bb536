use super::{compile_anchored, WhitespacePolicy};
use crate::postcode::{District, StandardPostcode};
use regex::Regex;

/// One or two letters; `BF` is reserved for forces postcodes
const AREA: &str = r"(?P<area>[A-Z]|[AC-Z][A-Z]|B[A-EG-Z])";

/// Plain and subdivided districts share the `district` capture
const DISTRICT: &str = r"(?P<district>[0-9][0-9]?|[0-9][A-Z])";

const SECTOR: &str = r"(?P<sector>[0-9])";
const UNIT: &str = r"(?P<unit>[A-Z]{2})";

#[derive(Debug, Clone)]
pub struct StandardGrammar {
    regex: Regex,
}

impl StandardGrammar {
    pub fn build(policy: WhitespacePolicy) -> Result<Self, regex::Error> {
        let body = format!("{}{}{}{}{}", AREA, DISTRICT, policy.separator(), SECTOR, UNIT);
        Ok(Self {
            regex: compile_anchored(&body)?,
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn construct(&self, input: &str) -> Option<StandardPostcode> {
        let captures = self.regex.captures(input)?;

        let district_text = captures.name("district")?.as_str();
        let district = match district_text.as_bytes() {
            [digit, letter] if letter.is_ascii_uppercase() => {
                District::subdivided(*digit as char, *letter as char)?
            }
            _ => District::numeric(district_text)?,
        };

        let sector = captures.name("sector")?.as_str().parse().ok()?;

        StandardPostcode::new(
            captures.name("area")?.as_str(),
            district,
            sector,
            captures.name("unit")?.as_str(),
        )
    }
}
