//! British Forces Post Office postcodes
//!
//! Two mutually exclusive forms: the numeric `BFPO 1234` form and the UK-compatible
//! `BF1 2AB` district form.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ForcesPostcode {
    Bfpo {
        number: u16,
    },
    District {
        district: u8,
        sector: u8,
        unit: String,
    },
}

impl ForcesPostcode {
    pub const BFPO_OUTWARD: &'static str = "BFPO";
    pub const AREA: &'static str = "BF";

    /// `None` unless 1 <= number <= 9999
    pub fn bfpo(number: u16) -> Option<Self> {
        (1..=9999)
            .contains(&number)
            .then_some(ForcesPostcode::Bfpo { number })
    }

    pub fn district(district: u8, sector: u8, unit: &str) -> Option<Self> {
        let unit_ok = unit.len() == 2 && unit.bytes().all(|b| b.is_ascii_uppercase());
        (district <= 99 && sector <= 9 && unit_ok).then(|| ForcesPostcode::District {
            district,
            sector,
            unit: unit.to_string(),
        })
    }

    pub fn is_bfpo_format(&self) -> bool {
        matches!(self, ForcesPostcode::Bfpo { .. })
    }

    pub fn bfpo_number(&self) -> Option<u16> {
        match self {
            ForcesPostcode::Bfpo { number } => Some(*number),
            ForcesPostcode::District { .. } => None,
        }
    }

    pub fn outward_area(&self) -> Option<&'static str> {
        match self {
            ForcesPostcode::Bfpo { .. } => None,
            ForcesPostcode::District { .. } => Some(Self::AREA),
        }
    }

    pub fn outward_district(&self) -> Option<u8> {
        match self {
            ForcesPostcode::Bfpo { .. } => None,
            ForcesPostcode::District { district, .. } => Some(*district),
        }
    }

    pub fn inward_sector(&self) -> Option<u8> {
        match self {
            ForcesPostcode::Bfpo { .. } => None,
            ForcesPostcode::District { sector, .. } => Some(*sector),
        }
    }

    pub fn inward_unit(&self) -> Option<&str> {
        match self {
            ForcesPostcode::Bfpo { .. } => None,
            ForcesPostcode::District { unit, .. } => Some(unit),
        }
    }

    pub fn outward_code(&self) -> String {
        match self {
            ForcesPostcode::Bfpo { .. } => Self::BFPO_OUTWARD.to_string(),
            ForcesPostcode::District { district, .. } => format!("{}{}", Self::AREA, district),
        }
    }

    pub fn inward_code(&self) -> String {
        match self {
            ForcesPostcode::Bfpo { number } => number.to_string(),
            ForcesPostcode::District { sector, unit, .. } => format!("{}{}", sector, unit),
        }
    }
}

impl fmt::Display for ForcesPostcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.outward_code(), self.inward_code())
    }
}
