//! Parsed postcode entities
//!
//! A [`Postcode`] is produced only by a successful grammar match. It carries one of
//! three variant bodies plus the fault list attached by validation. The body never
//! changes after construction; faults are attached at most once.

pub mod forces;
pub mod special_case;
pub mod standard;

use crate::faults::FaultId;
use crate::parser::ConfigurationError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::str::FromStr;

pub use forces::ForcesPostcode;
pub use special_case::SpecialCasePostcode;
pub use standard::{District, StandardPostcode};

/// Postcode variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostcodeKind {
    Standard,
    Forces,
    SpecialCase,
}

impl PostcodeKind {
    /// Every variant in default dispatch priority
    pub const ALL: [PostcodeKind; 3] = [
        PostcodeKind::Standard,
        PostcodeKind::Forces,
        PostcodeKind::SpecialCase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostcodeKind::Standard => "standard",
            PostcodeKind::Forces => "forces",
            PostcodeKind::SpecialCase => "special-case",
        }
    }
}

impl fmt::Display for PostcodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostcodeKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostcodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigurationError::unknown_postcode_type(s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostcodeBody {
    Standard(StandardPostcode),
    Forces(ForcesPostcode),
    SpecialCase(SpecialCasePostcode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postcode {
    body: PostcodeBody,
    faults: Vec<FaultId>,
    is_validated: bool,
}

impl Postcode {
    fn new(body: PostcodeBody) -> Self {
        Self {
            body,
            faults: Vec::new(),
            is_validated: false,
        }
    }

    pub fn kind(&self) -> PostcodeKind {
        match &self.body {
            PostcodeBody::Standard(_) => PostcodeKind::Standard,
            PostcodeBody::Forces(_) => PostcodeKind::Forces,
            PostcodeBody::SpecialCase(_) => PostcodeKind::SpecialCase,
        }
    }

    pub fn body(&self) -> &PostcodeBody {
        &self.body
    }

    pub fn outward_code(&self) -> String {
        match &self.body {
            PostcodeBody::Standard(p) => p.outward_code(),
            PostcodeBody::Forces(p) => p.outward_code(),
            PostcodeBody::SpecialCase(p) => p.outward_code().to_string(),
        }
    }

    pub fn inward_code(&self) -> String {
        match &self.body {
            PostcodeBody::Standard(p) => p.inward_code(),
            PostcodeBody::Forces(p) => p.inward_code(),
            PostcodeBody::SpecialCase(p) => p.inward_code().to_string(),
        }
    }

    /// Faults found by validation, in rule order; empty until validated
    pub fn faults(&self) -> &[FaultId] {
        &self.faults
    }

    pub fn is_validated(&self) -> bool {
        self.is_validated
    }

    pub fn as_standard(&self) -> Option<&StandardPostcode> {
        match &self.body {
            PostcodeBody::Standard(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_forces(&self) -> Option<&ForcesPostcode> {
        match &self.body {
            PostcodeBody::Forces(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_special_case(&self) -> Option<&SpecialCasePostcode> {
        match &self.body {
            PostcodeBody::SpecialCase(p) => Some(p),
            _ => None,
        }
    }

    /// Record validation results; a validated postcode keeps its first fault list
    pub(crate) fn attach_faults(&mut self, faults: Vec<FaultId>) {
        if !self.is_validated {
            self.faults = faults;
            self.is_validated = true;
        }
    }
}

impl From<StandardPostcode> for Postcode {
    fn from(postcode: StandardPostcode) -> Self {
        Self::new(PostcodeBody::Standard(postcode))
    }
}

impl From<ForcesPostcode> for Postcode {
    fn from(postcode: ForcesPostcode) -> Self {
        Self::new(PostcodeBody::Forces(postcode))
    }
}

impl From<SpecialCasePostcode> for Postcode {
    fn from(postcode: SpecialCasePostcode) -> Self {
        Self::new(PostcodeBody::SpecialCase(postcode))
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            PostcodeBody::Standard(p) => fmt::Display::fmt(p, f),
            PostcodeBody::Forces(p) => fmt::Display::fmt(p, f),
            PostcodeBody::SpecialCase(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl Serialize for Postcode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Postcode", 6)?;
        state.serialize_field("postcode", &self.to_string())?;
        state.serialize_field("kind", self.kind().as_str())?;
        state.serialize_field("outward_code", &self.outward_code())?;
        state.serialize_field("inward_code", &self.inward_code())?;
        state.serialize_field("is_validated", &self.is_validated)?;
        state.serialize_field("faults", &self.faults)?;
        state.end()
    }
}
