//! Fault registry: id to description lookup with uniqueness enforcement

use super::{forces, standard, Fault, FaultId};
use crate::logging::codes;
use crate::{log_debug, log_error};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Handle returned by [`FaultRegistry::register`]
pub type FaultHandle = FaultId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FaultRegistryError {
    #[error("Validation fault #{id} is already allocated to '{existing}'")]
    DuplicateFaultId { id: FaultId, existing: String },

    #[error("Fault name '{name}' is already used by fault #{existing}")]
    DuplicateFaultName { name: String, existing: FaultId },
}

impl FaultRegistryError {
    pub fn duplicate_fault_id(id: FaultId, existing: &str) -> Self {
        Self::DuplicateFaultId {
            id,
            existing: existing.to_string(),
        }
    }

    pub fn duplicate_fault_name(name: &str, existing: FaultId) -> Self {
        Self::DuplicateFaultName {
            name: name.to_string(),
            existing,
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        codes::registry::DUPLICATE_FAULT_ID
    }
}

/// Catalog of known faults
///
/// Populated once and read-only afterwards. There is no removal operation.
#[derive(Debug, Clone, Default)]
pub struct FaultRegistry {
    faults: BTreeMap<FaultId, Fault>,
}

impl FaultRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every standard and forces fault
    pub fn with_defaults() -> Result<Self, FaultRegistryError> {
        let mut registry = Self::new();
        for fault in standard::ALL.iter().chain(forces::ALL) {
            registry.register(*fault)?;
        }
        log_debug!("Fault registry populated", "faults" => registry.len());
        Ok(registry)
    }

    pub fn register(&mut self, fault: Fault) -> Result<FaultHandle, FaultRegistryError> {
        if let Some(existing) = self.faults.get(&fault.id) {
            let error = FaultRegistryError::duplicate_fault_id(fault.id, existing.description);
            log_error!(error.error_code(), "Duplicate fault id",
                "id" => fault.id,
                "existing" => existing.name
            );
            return Err(error);
        }

        if let Some(existing) = self.by_name(fault.name) {
            return Err(FaultRegistryError::duplicate_fault_name(fault.name, existing));
        }

        self.faults.insert(fault.id, fault);
        Ok(fault.id)
    }

    pub fn describe(&self, handle: FaultHandle) -> Option<&'static str> {
        self.faults.get(&handle).map(|fault| fault.description)
    }

    pub fn numeric_id(&self, handle: FaultHandle) -> u16 {
        handle.value()
    }

    pub fn get(&self, id: FaultId) -> Option<&Fault> {
        self.faults.get(&id)
    }

    /// Look up a fault id by its symbolic name
    pub fn by_name(&self, name: &str) -> Option<FaultId> {
        self.faults
            .values()
            .find(|fault| fault.name == name)
            .map(|fault| fault.id)
    }

    pub fn contains(&self, id: FaultId) -> bool {
        self.faults.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.faults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fault> {
        self.faults.values()
    }
}

static DEFAULT_REGISTRY: OnceLock<Result<FaultRegistry, FaultRegistryError>> = OnceLock::new();

/// Process-wide registry of the built-in faults, built on first use
pub fn default_registry() -> Result<&'static FaultRegistry, FaultRegistryError> {
    DEFAULT_REGISTRY
        .get_or_init(FaultRegistry::with_defaults)
        .as_ref()
        .map_err(|error| error.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_register_and_describe() {
        let mut registry = FaultRegistry::new();
        let handle = registry
            .register(Fault::new(501, "made-up", "A made up fault."))
            .unwrap();

        assert_eq!(registry.numeric_id(handle), 501);
        assert_eq!(registry.describe(handle), Some("A made up fault."));
        assert_eq!(registry.by_name("made-up"), Some(FaultId::new(501)));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut registry = FaultRegistry::new();
        registry
            .register(Fault::new(501, "first", "First fault."))
            .unwrap();

        let result = registry.register(Fault::new(501, "second", "Second fault."));
        assert_matches!(
            result,
            Err(FaultRegistryError::DuplicateFaultId { id, ref existing })
                if id == FaultId::new(501) && existing == "First fault."
        );
        assert_eq!(registry.describe(FaultId::new(501)), Some("First fault."));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = FaultRegistry::new();
        registry.register(Fault::new(501, "same", "One.")).unwrap();
        assert_matches!(
            registry.register(Fault::new(502, "same", "Two.")),
            Err(FaultRegistryError::DuplicateFaultName { .. })
        );
    }

    #[test]
    fn test_fresh_registries_are_isolated() {
        let mut first = FaultRegistry::new();
        first.register(Fault::new(501, "x", "X.")).unwrap();

        let mut second = FaultRegistry::new();
        assert!(second.register(Fault::new(501, "x", "X.")).is_ok());
    }

    #[test]
    fn test_default_registry_holds_builtin_faults() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.len(), standard::ALL.len() + forces::ALL.len());
        assert_eq!(
            registry.describe(FaultId::new(401)),
            Some(forces::INVALID_DISTRICT.description)
        );
        assert_eq!(
            registry.by_name("expected-double-digit-district"),
            Some(FaultId::new(202))
        );
        assert!(!registry.contains(FaultId::new(301)));
    }
}
