//! Standard UK postcodes: `AA9A 9AA`, `A9 9AA`, `A99 9AA` and friends

use std::fmt;

/// Outward district: plain digits, or one digit plus a subdivision letter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum District {
    /// One or two digits, kept as written so `01` renders as `01`
    Numeric(String),
    Subdivided { digit: char, letter: char },
}

impl District {
    pub fn numeric(digits: &str) -> Option<Self> {
        let valid = (1..=2).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit());
        valid.then(|| District::Numeric(digits.to_string()))
    }

    pub fn subdivided(digit: char, letter: char) -> Option<Self> {
        (digit.is_ascii_digit() && letter.is_ascii_uppercase())
            .then_some(District::Subdivided { digit, letter })
    }

    /// Numeric value of the district, ignoring any subdivision letter
    pub fn number(&self) -> u8 {
        match self {
            District::Numeric(digits) => digits
                .bytes()
                .fold(0, |value, b| value * 10 + (b - b'0')),
            District::Subdivided { digit, .. } => *digit as u8 - b'0',
        }
    }

    pub fn subdivision(&self) -> Option<char> {
        match self {
            District::Numeric(_) => None,
            District::Subdivided { letter, .. } => Some(*letter),
        }
    }

    /// Count of digits as written
    pub fn digit_count(&self) -> usize {
        match self {
            District::Numeric(digits) => digits.len(),
            District::Subdivided { .. } => 1,
        }
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            District::Numeric(digits) => f.write_str(digits),
            District::Subdivided { digit, letter } => write!(f, "{}{}", digit, letter),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StandardPostcode {
    area: String,
    district: District,
    sector: u8,
    unit: String,
}

impl StandardPostcode {
    /// Returns `None` unless area is 1-2 uppercase letters, sector a single
    /// digit and unit exactly 2 uppercase letters
    pub fn new(area: &str, district: District, sector: u8, unit: &str) -> Option<Self> {
        let letters = |s: &str, range: std::ops::RangeInclusive<usize>| {
            range.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_uppercase())
        };

        if !letters(area, 1..=2) || sector > 9 || !letters(unit, 2..=2) {
            return None;
        }

        Some(Self {
            area: area.to_string(),
            district,
            sector,
            unit: unit.to_string(),
        })
    }

    pub fn outward_area(&self) -> &str {
        &self.area
    }

    pub fn district(&self) -> &District {
        &self.district
    }

    pub fn outward_district(&self) -> u8 {
        self.district.number()
    }

    pub fn outward_subdistrict(&self) -> Option<char> {
        self.district.subdivision()
    }

    pub fn inward_sector(&self) -> u8 {
        self.sector
    }

    pub fn inward_unit(&self) -> &str {
        &self.unit
    }

    pub fn outward_code(&self) -> String {
        format!("{}{}", self.area, self.district)
    }

    pub fn inward_code(&self) -> String {
        format!("{}{}", self.sector, self.unit)
    }
}

impl fmt::Display for StandardPostcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}{}", self.area, self.district, self.sector, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_district_forms() {
        let plain = District::numeric("10").unwrap();
        assert_eq!(plain.number(), 10);
        assert_eq!(plain.subdivision(), None);
        assert_eq!(plain.digit_count(), 2);

        let padded = District::numeric("01").unwrap();
        assert_eq!(padded.number(), 1);
        assert_eq!(padded.to_string(), "01");

        let subdivided = District::subdivided('1', 'A').unwrap();
        assert_eq!(subdivided.number(), 1);
        assert_eq!(subdivided.subdivision(), Some('A'));
        assert_eq!(subdivided.to_string(), "1A");

        assert!(District::numeric("123").is_none());
        assert!(District::numeric("").is_none());
        assert!(District::numeric("1A").is_none());
        assert!(District::subdivided('A', '1').is_none());
    }

    #[test]
    fn test_accessors_and_codes() {
        let postcode =
            StandardPostcode::new("LL", District::numeric("20").unwrap(), 2, "XX").unwrap();
        assert_eq!(postcode.outward_area(), "LL");
        assert_eq!(postcode.outward_district(), 20);
        assert_eq!(postcode.outward_subdistrict(), None);
        assert_eq!(postcode.inward_sector(), 2);
        assert_eq!(postcode.inward_unit(), "XX");
        assert_eq!(postcode.outward_code(), "LL20");
        assert_eq!(postcode.inward_code(), "2XX");
        assert_eq!(postcode.to_string(), "LL20 2XX");
    }

    #[test]
    fn test_rejects_malformed_components() {
        let district = || District::numeric("1").unwrap();
        assert!(StandardPostcode::new("ABC", district(), 1, "AA").is_none());
        assert!(StandardPostcode::new("ab", district(), 1, "AA").is_none());
        assert!(StandardPostcode::new("AB", district(), 10, "AA").is_none());
        assert!(StandardPostcode::new("AB", district(), 1, "A").is_none());
    }
}
