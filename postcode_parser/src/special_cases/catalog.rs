//! Special-case catalog and its loaders

use super::{PatternSource, SpecialCase, SpecialCaseDefinition, SpecialCaseError, SpecialCaseResult};
use crate::config::compile_time::catalog::{
    DEFINITION_EXTENSION, MAX_DEFINITION_FILE_SIZE, MAX_SPECIAL_CASES,
};
use crate::grammar::special_case::SpecialCaseGrammar;
use crate::grammar::WhitespacePolicy;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

const BUNDLED_DEFINITIONS: &[(&str, &str)] = &[
    ("santa.json", include_str!("../../data/special_cases/santa.json")),
    ("giro.json", include_str!("../../data/special_cases/giro.json")),
    (
        "overseas_territories.json",
        include_str!("../../data/special_cases/overseas_territories.json"),
    ),
];

/// Ordered collection of special cases with unique identifiers
///
/// Iteration order is insertion order, which is also the order alternatives
/// appear in the composed detection grammar.
#[derive(Debug, Clone, Default)]
pub struct SpecialCaseCatalog {
    cases: Vec<Arc<SpecialCase>>,
}

/// An example string from a definition that the catalog grammar does not
/// reproduce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleMismatch {
    pub identifier: String,
    pub example: String,
    pub reason: String,
}

impl SpecialCaseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the definitions shipped with the crate
    pub fn bundled() -> SpecialCaseResult<Self> {
        let mut catalog = Self::new();
        for (name, json) in BUNDLED_DEFINITIONS {
            catalog
                .insert_json(json)
                .map_err(|e| with_path(e, PathBuf::from(name)))?;
        }
        log_success!(codes::success::CATALOG_LOADED, "Bundled special cases loaded",
            "cases" => catalog.len()
        );
        Ok(catalog)
    }

    /// Create and insert a special case from an identifier and its patterns
    pub fn register<I, P>(&mut self, identifier: &str, patterns: I) -> SpecialCaseResult<Arc<SpecialCase>>
    where
        I: IntoIterator<Item = P>,
        P: Into<PatternSource>,
    {
        let mut special_case = SpecialCase::new(identifier)?;
        for pattern in patterns {
            special_case.add_pattern(pattern)?;
        }
        if special_case.patterns().is_empty() {
            return Err(SpecialCaseError::NoPatterns {
                identifier: identifier.to_string(),
            });
        }
        self.insert(special_case)
    }

    /// Insert a prepared special case, enforcing identifier uniqueness
    pub fn insert(&mut self, special_case: SpecialCase) -> SpecialCaseResult<Arc<SpecialCase>> {
        if self.contains(special_case.identifier()) {
            let error = SpecialCaseError::duplicate_identifier(special_case.identifier());
            log_error!(error.error_code(), "Duplicate special case identifier",
                "identifier" => special_case.identifier()
            );
            return Err(error);
        }

        if self.cases.len() >= MAX_SPECIAL_CASES {
            return Err(SpecialCaseError::CatalogFull {
                max_cases: MAX_SPECIAL_CASES,
            });
        }

        log_debug!("Special case registered",
            "identifier" => special_case.identifier(),
            "patterns" => special_case.patterns().len()
        );

        let special_case = Arc::new(special_case);
        self.cases.push(special_case.clone());
        Ok(special_case)
    }

    pub fn insert_definition(&mut self, definition: SpecialCaseDefinition) -> SpecialCaseResult<Arc<SpecialCase>> {
        self.insert(SpecialCase::from_definition(definition)?)
    }

    pub fn insert_json(&mut self, json: &str) -> SpecialCaseResult<Arc<SpecialCase>> {
        self.insert(SpecialCase::from_json_str(json)?)
    }

    /// Load every `*.json` definition under `directory`, in file-name order
    ///
    /// Returns the number of definitions added. Loading stops at the first
    /// malformed or duplicate definition.
    pub fn load_from_directory(&mut self, directory: &Path, recursive: bool) -> SpecialCaseResult<usize> {
        if !directory.is_dir() {
            let error = SpecialCaseError::io(directory.to_path_buf(), "not a directory");
            log_error!(error.error_code(), "Special case directory not found",
                "directory" => directory.display()
            );
            return Err(error);
        }

        let walker = WalkDir::new(directory)
            .max_depth(if recursive { usize::MAX } else { 1 })
            .sort_by_file_name();

        let mut loaded = 0;
        for entry in walker {
            let entry = entry.map_err(|e| SpecialCaseError::io(directory.to_path_buf(), e))?;
            let path = entry.path();

            if !entry.file_type().is_file() || !is_definition_file(path) {
                continue;
            }

            self.load_file(path)?;
            loaded += 1;
        }

        log_success!(codes::success::CATALOG_LOADED, "Special case definitions loaded",
            "directory" => directory.display(),
            "recursive" => recursive,
            "loaded" => loaded
        );

        Ok(loaded)
    }

    /// Load a single definition file
    pub fn load_file(&mut self, path: &Path) -> SpecialCaseResult<Arc<SpecialCase>> {
        let metadata = fs::metadata(path).map_err(|e| SpecialCaseError::io(path.to_path_buf(), e))?;
        if metadata.len() > MAX_DEFINITION_FILE_SIZE {
            return Err(SpecialCaseError::definition(
                Some(path.to_path_buf()),
                format!(
                    "file is {} bytes (max: {})",
                    metadata.len(),
                    MAX_DEFINITION_FILE_SIZE
                ),
            ));
        }

        let json = fs::read_to_string(path).map_err(|e| SpecialCaseError::io(path.to_path_buf(), e))?;
        self.insert_json(&json)
            .map_err(|e| with_path(e, path.to_path_buf()))
    }

    pub fn get(&self, identifier: &str) -> Option<&Arc<SpecialCase>> {
        self.cases.iter().find(|case| case.identifier() == identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SpecialCase>> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Alternation of every entry's detection fragment, in insertion order
    pub fn detection_fragment(&self, policy: WhitespacePolicy) -> String {
        self.cases
            .iter()
            .map(|case| case.detection_fragment(policy))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Parse every definition's examples with the catalog grammar
    ///
    /// An example passes when it is recognised as its own special case and its
    /// canonical form equals the example text.
    pub fn self_test(&self, policy: WhitespacePolicy) -> Result<Vec<ExampleMismatch>, regex::Error> {
        let grammar = SpecialCaseGrammar::build(self, policy)?;
        let mut mismatches = Vec::new();

        for case in &self.cases {
            for example in case.examples() {
                let reason = match grammar.construct(example) {
                    None => Some("not recognised".to_string()),
                    Some(postcode) if postcode.special_case().identifier() != case.identifier() => {
                        Some(format!(
                            "recognised as '{}'",
                            postcode.special_case().identifier()
                        ))
                    }
                    Some(postcode) if postcode.to_string() != *example => {
                        Some(format!("renders as '{}'", postcode))
                    }
                    Some(_) => None,
                };

                if let Some(reason) = reason {
                    mismatches.push(ExampleMismatch {
                        identifier: case.identifier().to_string(),
                        example: example.clone(),
                        reason,
                    });
                }
            }
        }

        Ok(mismatches)
    }
}

fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DEFINITION_EXTENSION))
}

fn with_path(error: SpecialCaseError, path: PathBuf) -> SpecialCaseError {
    match error {
        SpecialCaseError::Definition { path: None, message } => SpecialCaseError::Definition {
            path: Some(path),
            message,
        },
        other => other,
    }
}
