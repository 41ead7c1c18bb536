use super::{compile_anchored, WhitespacePolicy};
use crate::postcode::SpecialCasePostcode;
use crate::special_cases::{SpecialCase, SpecialCaseCatalog};
use regex::Regex;
use std::sync::Arc;

/// Per-case extractors: one anchored regex per pattern, tokens captured in order
#[derive(Debug, Clone)]
struct CaseExtractor {
    special_case: Arc<SpecialCase>,
    patterns: Vec<Regex>,
}

impl CaseExtractor {
    fn build(special_case: &Arc<SpecialCase>, policy: WhitespacePolicy) -> Result<Self, regex::Error> {
        let patterns = special_case
            .patterns()
            .iter()
            .map(|tokens| compile_anchored(&SpecialCase::pattern_body(tokens, policy, true)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            special_case: special_case.clone(),
            patterns,
        })
    }

    fn extract(&self, input: &str) -> Option<SpecialCasePostcode> {
        let captures = self.patterns.iter().find_map(|p| p.captures(input))?;
        let parts = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str().to_string())
            .collect();

        SpecialCasePostcode::new(self.special_case.clone(), parts)
    }
}

/// Detection grammar over the whole catalog
///
/// The detection regex tells which case matched through its named group; the
/// case's own extractors then recover the tokens.
#[derive(Debug, Clone)]
pub struct SpecialCaseGrammar {
    detection: Option<Regex>,
    cases: Vec<CaseExtractor>,
}

impl SpecialCaseGrammar {
    pub fn build(catalog: &SpecialCaseCatalog, policy: WhitespacePolicy) -> Result<Self, regex::Error> {
        // an empty alternation would match the empty string
        if catalog.is_empty() {
            return Ok(Self {
                detection: None,
                cases: Vec::new(),
            });
        }

        let detection = compile_anchored(&catalog.detection_fragment(policy))?;
        let cases = catalog
            .iter()
            .map(|case| CaseExtractor::build(case, policy))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            detection: Some(detection),
            cases,
        })
    }

    pub fn detection(&self) -> Option<&Regex> {
        self.detection.as_ref()
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.detection.as_ref().is_some_and(|re| re.is_match(input))
    }

    pub fn construct(&self, input: &str) -> Option<SpecialCasePostcode> {
        let captures = self.detection.as_ref()?.captures(input)?;
        let matched = self
            .cases
            .iter()
            .find(|case| captures.name(case.special_case.identifier()).is_some())?;

        matched.extract(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unittest_catalog() -> SpecialCaseCatalog {
        let mut catalog = SpecialCaseCatalog::new();
        catalog
            .insert_json(
                r#"{
                    "identifier": "unittest1",
                    "patterns": [
                        [ "PAT", "RN(?:[0-9])" ],
                        [ "UN1", "TST" ],
                        [ "SINGLE" ],
                        "STRING",
                        [ "THREE", "PARTS", "HERE" ]
                    ]
                }"#,
            )
            .unwrap();
        catalog.register("other", [["LHS", "RHS"]]).unwrap();
        catalog
    }

    #[test]
    fn test_tokens_are_extracted() {
        let grammar = SpecialCaseGrammar::build(&unittest_catalog(), WhitespacePolicy::Strict).unwrap();

        for (input, outward, inward) in [
            ("PAT RN0", "PAT", "RN0"),
            ("PAT RN5", "PAT", "RN5"),
            ("UN1 TST", "UN1", "TST"),
            ("SINGLE", "SINGLE", ""),
            ("STRING", "STRING", ""),
            ("THREE PARTS HERE", "THREE", "HERE"),
        ] {
            let postcode = grammar.construct(input).unwrap();
            assert_eq!(postcode.special_case().identifier(), "unittest1");
            assert_eq!(postcode.outward_code(), outward, "{}", input);
            assert_eq!(postcode.inward_code(), inward, "{}", input);
            assert_eq!(postcode.to_string(), input);
        }
    }

    #[test]
    fn test_matching_case_is_identified_by_name() {
        let grammar = SpecialCaseGrammar::build(&unittest_catalog(), WhitespacePolicy::Strict).unwrap();
        let postcode = grammar.construct("LHS RHS").unwrap();
        assert_eq!(postcode.special_case().identifier(), "other");
        assert!(grammar.construct("LHSRHS").is_none());
        assert!(grammar.construct("PAT RNX").is_none());
    }

    #[test]
    fn test_tolerant_input_renders_canonically() {
        let grammar = SpecialCaseGrammar::build(&unittest_catalog(), WhitespacePolicy::Tolerant).unwrap();
        assert_eq!(grammar.construct("PATRN7").unwrap().to_string(), "PAT RN7");
    }

    #[test]
    fn test_empty_catalog_matches_nothing() {
        let grammar = SpecialCaseGrammar::build(&SpecialCaseCatalog::new(), WhitespacePolicy::Lenient).unwrap();
        assert!(grammar.detection().is_none());
        assert!(!grammar.is_match(""));
        assert!(grammar.construct("").is_none());
    }

    #[test]
    fn test_detection_has_one_group_per_case() {
        let grammar = SpecialCaseGrammar::build(&unittest_catalog(), WhitespacePolicy::Strict).unwrap();
        // implicit group 0 plus one named group per case
        assert_eq!(grammar.detection().unwrap().captures_len(), 3);
    }
}
