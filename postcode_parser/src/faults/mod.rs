//! Validation faults
//!
//! A fault is a semantic problem with a postcode that parsed cleanly. Fault ids
//! are published: each postcode variant owns a 100-wide band and an id, once
//! assigned, is never reused for a different fault.

pub mod catalogue;
pub mod registry;

use serde::{Serialize, Serializer};
use std::fmt;

pub use catalogue::{forces, standard};
pub use registry::{default_registry, FaultHandle, FaultRegistry, FaultRegistryError};

/// Numeric fault identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaultId(u16);

impl FaultId {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Variant band this id falls in, if any
    pub fn band(self) -> Option<FaultBand> {
        FaultBand::ALL.into_iter().find(|band| band.contains(self))
    }
}

impl fmt::Display for FaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for FaultId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl Serialize for FaultId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

/// Fault id bands, one per postcode variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultBand {
    Standard,
    SpecialCase,
    Forces,
}

impl FaultBand {
    pub const ALL: [FaultBand; 3] = [FaultBand::Standard, FaultBand::SpecialCase, FaultBand::Forces];

    /// First id of the band; usable ids start one above this
    pub const fn base(self) -> u16 {
        match self {
            FaultBand::Standard => 200,
            FaultBand::SpecialCase => 300,
            FaultBand::Forces => 400,
        }
    }

    pub fn contains(self, id: FaultId) -> bool {
        id.0 > self.base() && id.0 < self.base() + 100
    }
}

/// A fault definition: id, stable symbolic name and description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    pub id: FaultId,
    pub name: &'static str,
    pub description: &'static str,
}

impl Fault {
    pub const fn new(id: u16, name: &'static str, description: &'static str) -> Self {
        Self {
            id: FaultId::new(id),
            name,
            description,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.description)
    }
}
