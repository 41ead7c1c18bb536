use crate::special_cases::SpecialCase;
use std::fmt;
use std::sync::Arc;

/// A postcode recognised by one of the catalog's special cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialCasePostcode {
    special_case: Arc<SpecialCase>,
    parts: Vec<String>,
}

impl SpecialCasePostcode {
    /// `None` when `parts` is empty
    pub fn new(special_case: Arc<SpecialCase>, parts: Vec<String>) -> Option<Self> {
        (!parts.is_empty()).then_some(Self {
            special_case,
            parts,
        })
    }

    pub fn special_case(&self) -> &SpecialCase {
        &self.special_case
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// First token
    pub fn outward_code(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or_default()
    }

    /// Last token, or empty for single-token postcodes
    pub fn inward_code(&self) -> &str {
        match self.parts.as_slice() {
            [_, .., last] => last.as_str(),
            _ => "",
        }
    }
}

impl fmt::Display for SpecialCasePostcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case() -> Arc<SpecialCase> {
        Arc::new(SpecialCase::new("unittest").unwrap())
    }

    #[test]
    fn test_codes_by_token_count() {
        let single = SpecialCasePostcode::new(case(), vec!["SINGLE".into()]).unwrap();
        assert_eq!(single.outward_code(), "SINGLE");
        assert_eq!(single.inward_code(), "");
        assert_eq!(single.to_string(), "SINGLE");

        let three = SpecialCasePostcode::new(
            case(),
            vec!["THREE".into(), "PARTS".into(), "HERE".into()],
        )
        .unwrap();
        assert_eq!(three.outward_code(), "THREE");
        assert_eq!(three.inward_code(), "HERE");
        assert_eq!(three.to_string(), "THREE PARTS HERE");

        assert!(SpecialCasePostcode::new(case(), vec![]).is_none());
    }
}
