//! Grammar builder
//!
//! Each postcode variant builds an anchored regex from token patterns joined by the
//! separator of the selected [`WhitespacePolicy`]. Matching runs against input that
//! the dispatcher has already trimmed and case-folded as configured.

pub mod forces;
pub mod special_case;
pub mod standard;

use crate::parser::ConfigurationError;
use crate::postcode::{Postcode, PostcodeKind};
use crate::special_cases::SpecialCaseCatalog;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub use forces::ForcesGrammar;
pub use special_case::SpecialCaseGrammar;
pub use standard::StandardGrammar;

/// How the whitespace between postcode tokens is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WhitespacePolicy {
    /// Exactly one space
    Strict,
    /// Zero or one space
    #[default]
    Tolerant,
    /// Any run of whitespace, including none
    Lenient,
}

impl WhitespacePolicy {
    pub const ALL: [WhitespacePolicy; 3] = [
        WhitespacePolicy::Strict,
        WhitespacePolicy::Tolerant,
        WhitespacePolicy::Lenient,
    ];

    /// Regex fragment placed between tokens
    pub fn separator(self) -> &'static str {
        match self {
            WhitespacePolicy::Strict => " ",
            WhitespacePolicy::Tolerant => " ?",
            WhitespacePolicy::Lenient => r"\s*",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WhitespacePolicy::Strict => "strict",
            WhitespacePolicy::Tolerant => "tolerant",
            WhitespacePolicy::Lenient => "lenient",
        }
    }
}

impl fmt::Display for WhitespacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WhitespacePolicy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WhitespacePolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| ConfigurationError::invalid_whitespace(s))
    }
}

/// Compile `body` as a full-string match
pub(crate) fn compile_anchored(body: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", body))
}

/// One row of the dispatch table: a compiled grammar for a single variant
#[derive(Debug, Clone)]
pub enum VariantGrammar {
    Standard(StandardGrammar),
    Forces(ForcesGrammar),
    SpecialCase(SpecialCaseGrammar),
}

impl VariantGrammar {
    pub fn build(
        kind: PostcodeKind,
        policy: WhitespacePolicy,
        catalog: &SpecialCaseCatalog,
    ) -> Result<Self, regex::Error> {
        Ok(match kind {
            PostcodeKind::Standard => VariantGrammar::Standard(StandardGrammar::build(policy)?),
            PostcodeKind::Forces => VariantGrammar::Forces(ForcesGrammar::build(policy)?),
            PostcodeKind::SpecialCase => {
                VariantGrammar::SpecialCase(SpecialCaseGrammar::build(catalog, policy)?)
            }
        })
    }

    pub fn kind(&self) -> PostcodeKind {
        match self {
            VariantGrammar::Standard(_) => PostcodeKind::Standard,
            VariantGrammar::Forces(_) => PostcodeKind::Forces,
            VariantGrammar::SpecialCase(_) => PostcodeKind::SpecialCase,
        }
    }

    pub fn is_match(&self, input: &str) -> bool {
        match self {
            VariantGrammar::Standard(g) => g.regex().is_match(input),
            VariantGrammar::Forces(g) => g.regex().is_match(input),
            VariantGrammar::SpecialCase(g) => g.is_match(input),
        }
    }

    /// Match `input` and build the variant's entity
    pub fn construct(&self, input: &str) -> Option<Postcode> {
        match self {
            VariantGrammar::Standard(g) => g.construct(input).map(Postcode::from),
            VariantGrammar::Forces(g) => g.construct(input).map(Postcode::from),
            VariantGrammar::SpecialCase(g) => g.construct(input).map(Postcode::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATES: &[&str] = &[
        "SW1A 1AA", "SW1A1AA", "SW1A  1AA", "SW1A\t1AA", "M1 1AE", "M11AE", "B33 8TH",
        "BF1 2XX", "BF12XX", "BFPO 801", "BFPO801", "BFPO \t 801", "SAN TA1", "SANTA1",
        "GIR\t0AA", "GIR 0AA", "CR2 6XH", "DN55 1PT", "EC1A 1BB", "W1A 0AX", "XX", "",
    ];

    fn accepted(policy: WhitespacePolicy, kind: PostcodeKind) -> Vec<&'static str> {
        let catalog = SpecialCaseCatalog::bundled().unwrap();
        let grammar = VariantGrammar::build(kind, policy, &catalog).unwrap();
        CANDIDATES
            .iter()
            .copied()
            .filter(|input| grammar.is_match(input))
            .collect()
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<WhitespacePolicy>().unwrap(), WhitespacePolicy::Strict);
        assert_eq!("tolerant".parse::<WhitespacePolicy>().unwrap(), WhitespacePolicy::Tolerant);
        assert_eq!("lenient".parse::<WhitespacePolicy>().unwrap(), WhitespacePolicy::Lenient);
        assert!("STRICT".parse::<WhitespacePolicy>().is_err());
        assert!("loose".parse::<WhitespacePolicy>().is_err());
        assert_eq!(WhitespacePolicy::default(), WhitespacePolicy::Tolerant);
    }

    #[test]
    fn test_separator_semantics() {
        let strict = compile_anchored(&format!("A{}B", WhitespacePolicy::Strict.separator())).unwrap();
        let tolerant = compile_anchored(&format!("A{}B", WhitespacePolicy::Tolerant.separator())).unwrap();
        let lenient = compile_anchored(&format!("A{}B", WhitespacePolicy::Lenient.separator())).unwrap();

        assert!(strict.is_match("A B"));
        assert!(!strict.is_match("AB"));
        assert!(!strict.is_match("A  B"));

        assert!(tolerant.is_match("AB"));
        assert!(tolerant.is_match("A B"));
        assert!(!tolerant.is_match("A\tB"));
        assert!(!tolerant.is_match("A  B"));

        assert!(lenient.is_match("AB"));
        assert!(lenient.is_match("A \t B"));
        assert!(!lenient.is_match("A-B"));
    }

    #[test]
    fn test_whitespace_policies_are_monotonic() {
        for kind in PostcodeKind::ALL {
            let strict = accepted(WhitespacePolicy::Strict, kind);
            let tolerant = accepted(WhitespacePolicy::Tolerant, kind);
            let lenient = accepted(WhitespacePolicy::Lenient, kind);

            assert!(strict.iter().all(|s| tolerant.contains(s)), "{:?}", kind);
            assert!(tolerant.iter().all(|s| lenient.contains(s)), "{:?}", kind);
            assert!(!strict.is_empty(), "{:?}", kind);
        }
    }

    #[test]
    fn test_variant_grammars_do_not_overlap() {
        let catalog = SpecialCaseCatalog::bundled().unwrap();
        let grammars: Vec<VariantGrammar> = PostcodeKind::ALL
            .into_iter()
            .map(|kind| VariantGrammar::build(kind, WhitespacePolicy::Lenient, &catalog).unwrap())
            .collect();

        for input in CANDIDATES {
            let matches = grammars.iter().filter(|g| g.is_match(input)).count();
            assert!(matches <= 1, "{} matched {} grammars", input, matches);
        }
    }
}
