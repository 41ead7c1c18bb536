//! Special-case postcodes
//!
//! Irregular postcodes (Santa's `SAN TA1`, Girobank's `GIR 0AA`, overseas
//! territories) that follow none of the standard rules. Each [`SpecialCase`] is a
//! named group of token patterns. Tokens are regex fragments; the whitespace
//! between them is supplied by the parser's whitespace policy when the detection
//! grammar is composed.

pub mod catalog;
pub mod error;

use crate::config::compile_time::catalog::MAX_PATTERN_TOKENS;
use crate::grammar::WhitespacePolicy;
use regex::Regex;
use serde::Deserialize;

pub use catalog::SpecialCaseCatalog;
pub use error::{SpecialCaseError, SpecialCaseResult};

/// Pattern as written in a definition: one delimited string or pre-split tokens
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PatternSource {
    Delimited(String),
    Tokens(Vec<String>),
}

impl From<&str> for PatternSource {
    fn from(pattern: &str) -> Self {
        PatternSource::Delimited(pattern.to_string())
    }
}

impl From<Vec<&str>> for PatternSource {
    fn from(tokens: Vec<&str>) -> Self {
        PatternSource::Tokens(tokens.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PatternSource {
    fn from(tokens: [&str; N]) -> Self {
        PatternSource::Tokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl PatternSource {
    /// Trimmed, non-empty tokens
    fn normalize(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            PatternSource::Delimited(text) => {
                text.split_whitespace().map(str::to_string).collect()
            }
            PatternSource::Tokens(tokens) => tokens,
        };

        raw.into_iter()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .collect()
    }
}

/// Declarative form of a special case, as stored in JSON definition files
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecialCaseDefinition {
    pub identifier: String,
    #[serde(alias = "regex-patterns")]
    pub patterns: Vec<PatternSource>,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// A named group of token patterns describing one irregular postcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialCase {
    identifier: String,
    patterns: Vec<Vec<String>>,
    examples: Vec<String>,
}

impl SpecialCase {
    /// Create an empty special case; the identifier becomes a regex group name
    pub fn new(identifier: &str) -> SpecialCaseResult<Self> {
        if !is_valid_identifier(identifier) {
            return Err(SpecialCaseError::invalid_identifier(identifier));
        }

        Ok(Self {
            identifier: identifier.to_string(),
            patterns: Vec::new(),
            examples: Vec::new(),
        })
    }

    /// Build a special case from its declarative definition
    pub fn from_definition(definition: SpecialCaseDefinition) -> SpecialCaseResult<Self> {
        let mut special_case = Self::new(&definition.identifier)?;
        for pattern in definition.patterns {
            special_case.add_pattern(pattern)?;
        }
        if special_case.patterns.is_empty() {
            return Err(SpecialCaseError::NoPatterns {
                identifier: definition.identifier,
            });
        }
        special_case.examples = definition.examples;
        Ok(special_case)
    }

    pub fn from_json_str(json: &str) -> SpecialCaseResult<Self> {
        let definition: SpecialCaseDefinition =
            serde_json::from_str(json).map_err(|e| SpecialCaseError::definition(None, e))?;
        Self::from_definition(definition)
    }

    /// Normalize and append a pattern
    ///
    /// Tokens are trimmed and empty tokens dropped. Returns `Ok(false)` when nothing
    /// survives, in which case the pattern is not added. A single surviving token is
    /// kept as a one-token pattern, which yields an empty inward code when matched.
    pub fn add_pattern(&mut self, pattern: impl Into<PatternSource>) -> SpecialCaseResult<bool> {
        let tokens = pattern.into().normalize();
        if tokens.is_empty() {
            return Ok(false);
        }

        if tokens.len() > MAX_PATTERN_TOKENS {
            return Err(SpecialCaseError::TooManyTokens {
                identifier: self.identifier.clone(),
                tokens: tokens.len(),
                max_tokens: MAX_PATTERN_TOKENS,
            });
        }

        for token in &tokens {
            self.check_fragment(token)?;
        }

        self.patterns.push(tokens);
        Ok(true)
    }

    /// Fragments must compile on their own and must not add capture groups
    fn check_fragment(&self, fragment: &str) -> SpecialCaseResult<()> {
        let compiled = Regex::new(fragment)
            .map_err(|e| SpecialCaseError::invalid_pattern(&self.identifier, fragment, e))?;

        // group 0 is the implicit whole-match group
        if compiled.captures_len() > 1 {
            return Err(SpecialCaseError::capturing_group(&self.identifier, fragment));
        }

        Ok(())
    }

    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn patterns(&self) -> &[Vec<String>] {
        &self.patterns
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// Regex body for one pattern: each token wrapped in a group and joined by the
    /// policy separator. With `named` set, token `i` is captured as `t{i}`.
    pub(crate) fn pattern_body(tokens: &[String], policy: WhitespacePolicy, named: bool) -> String {
        tokens
            .iter()
            .enumerate()
            .map(|(index, token)| {
                if named {
                    format!("(?P<t{}>{})", index, token)
                } else {
                    format!("(?:{})", token)
                }
            })
            .collect::<Vec<_>>()
            .join(policy.separator())
    }

    /// Detection fragment for this case
    ///
    /// Alternation of all patterns, each in a non-capturing group, wrapped in one
    /// named group keyed by the identifier. No other capturing groups are emitted.
    pub fn detection_fragment(&self, policy: WhitespacePolicy) -> String {
        let alternatives: Vec<String> = self
            .patterns
            .iter()
            .map(|tokens| format!("(?:{})", Self::pattern_body(tokens, policy, false)))
            .collect();

        format!("(?P<{}>{})", self.identifier, alternatives.join("|"))
    }
}

fn is_valid_identifier(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_add_pattern_from_delimited_string() {
        let mut case = SpecialCase::new("unittest2").unwrap();

        assert!(case.add_pattern("THIS").unwrap());
        assert_eq!(case.patterns()[0], vec!["THIS"]);

        assert!(case.add_pattern("THIS THAT").unwrap());
        assert_eq!(case.patterns()[1], vec!["THIS", "THAT"]);

        assert!(case.add_pattern("LARGE       SPACE").unwrap());
        assert_eq!(case.patterns()[2], vec!["LARGE", "SPACE"]);

        assert!(!case.add_pattern(" ").unwrap());
        assert_eq!(case.patterns().len(), 3);
    }

    #[test]
    fn test_add_pattern_from_token_list() {
        let mut case = SpecialCase::new("unittest3").unwrap();

        assert!(case.add_pattern(["THIS"]).unwrap());
        assert!(case.add_pattern(["THIS", "THAT"]).unwrap());
        assert!(case.add_pattern(["LARGE", "", " ", "SPACE"]).unwrap());
        assert_eq!(case.patterns()[2], vec!["LARGE", "SPACE"]);

        assert!(!case.add_pattern(Vec::<&str>::new()).unwrap());
        assert_eq!(case.patterns().len(), 3);
    }

    #[test]
    fn test_single_token_pattern_is_not_padded() {
        let mut case = SpecialCase::new("single").unwrap();
        case.add_pattern(["SINGLE"]).unwrap();
        assert_eq!(case.patterns()[0].len(), 1);
    }

    #[test]
    fn test_identifier_must_be_group_name() {
        assert!(SpecialCase::new("santa").is_ok());
        assert!(SpecialCase::new("_x9").is_ok());
        assert_matches!(
            SpecialCase::new("9lives"),
            Err(SpecialCaseError::InvalidIdentifier { .. })
        );
        assert_matches!(
            SpecialCase::new("has-dash"),
            Err(SpecialCaseError::InvalidIdentifier { .. })
        );
        assert_matches!(SpecialCase::new(""), Err(SpecialCaseError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_capturing_group_in_fragment_is_rejected() {
        let mut case = SpecialCase::new("caps").unwrap();
        assert_matches!(
            case.add_pattern(["PAT", "RN([0-9])"]),
            Err(SpecialCaseError::CapturingGroupInPattern { .. })
        );
        assert!(case.add_pattern(["PAT", "RN(?:[0-9])"]).unwrap());
    }

    #[test]
    fn test_invalid_fragment_is_rejected() {
        let mut case = SpecialCase::new("broken").unwrap();
        assert_matches!(
            case.add_pattern(["["]),
            Err(SpecialCaseError::InvalidPattern { .. })
        );
    }

    #[test]
    fn test_detection_fragment_shape() {
        let mut case = SpecialCase::new("unittest1").unwrap();
        case.add_pattern(["PAT", "RN(?:[0-9])"]).unwrap();
        case.add_pattern(["SINGLE"]).unwrap();

        assert_eq!(
            case.detection_fragment(WhitespacePolicy::Strict),
            "(?P<unittest1>(?:(?:PAT) (?:RN(?:[0-9])))|(?:(?:SINGLE)))"
        );

        let compiled = Regex::new(&case.detection_fragment(WhitespacePolicy::Lenient)).unwrap();
        assert_eq!(compiled.captures_len(), 2);
    }

    #[test]
    fn test_from_json_str_accepts_both_pattern_keys() {
        let case = SpecialCase::from_json_str(
            r#"{
                "identifier": "unittest1",
                "patterns": [ ["PAT", "RN(?:[0-9])"], ["UN1", "TST"], ["SINGLE"], "STRING", ["THREE", "PARTS", "HERE"] ],
                "examples": [ "PAT RN0", "SINGLE" ]
            }"#,
        )
        .unwrap();
        assert_eq!(case.patterns().len(), 5);
        assert_eq!(case.examples(), ["PAT RN0", "SINGLE"]);

        let legacy = SpecialCase::from_json_str(
            r#"{ "identifier": "legacy", "regex-patterns": ["LEG ACY"] }"#,
        )
        .unwrap();
        assert_eq!(legacy.patterns()[0], vec!["LEG", "ACY"]);
    }

    #[test]
    fn test_from_json_str_rejects_bad_definitions() {
        assert_matches!(
            SpecialCase::from_json_str(r#"{ "identifier": "x" }"#),
            Err(SpecialCaseError::Definition { .. })
        );
        assert_matches!(
            SpecialCase::from_json_str(r#"{ "identifier": "x", "patterns": [" "] }"#),
            Err(SpecialCaseError::NoPatterns { .. })
        );
        assert_matches!(
            SpecialCase::from_json_str(r#"{ "identifier": "x", "patterns": ["A"], "extra": 1 }"#),
            Err(SpecialCaseError::Definition { .. })
        );
    }
}
