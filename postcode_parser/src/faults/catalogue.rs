//! Fault definitions for each postcode variant

/// Standard postcode faults, in rule evaluation order
pub mod standard {
    use crate::faults::Fault;

    pub const EXPECTED_SINGLE_DIGIT_DISTRICT: Fault = Fault::new(
        201,
        "expected-single-digit-district",
        "Postcode area only has single digit districts.",
    );
    pub const EXPECTED_DOUBLE_DIGIT_DISTRICT: Fault = Fault::new(
        202,
        "expected-double-digit-district",
        "Postcode area only has double digit districts.",
    );
    pub const NO_ZERO_DISTRICT: Fault = Fault::new(
        203,
        "no-zero-district",
        "Postcode area does not have a district zero.",
    );
    pub const NO_TEN_DISTRICT: Fault = Fault::new(
        204,
        "no-ten-district",
        "Postcode area does not have a district ten.",
    );
    pub const SUBDISTRICTS_UNSUPPORTED: Fault = Fault::new(
        205,
        "subdistricts-unsupported",
        "Postcode district is not subdivided.",
    );
    pub const UNEXPECTED_DISTRICT_SUBDIVISION: Fault = Fault::new(
        206,
        "unexpected-district-subdivision",
        "Postcode district does not use this subdivision letter.",
    );
    pub const UNUSED_CHARACTER_IN_FIRST_POSITION: Fault = Fault::new(
        207,
        "unused-character-in-first-position",
        "Letter is never used in the first position of a postcode.",
    );
    pub const UNUSED_CHARACTER_IN_SECOND_POSITION: Fault = Fault::new(
        208,
        "unused-character-in-second-position",
        "Letter is never used in the second position of a postcode.",
    );
    pub const UNUSED_SINGLE_DIGIT_AREA_SUBDISTRICT: Fault = Fault::new(
        209,
        "unused-single-digit-area-subdistrict",
        "Letter is never used to subdivide a district in a single letter area.",
    );
    pub const UNUSED_DOUBLE_DIGIT_AREA_SUBDISTRICT: Fault = Fault::new(
        210,
        "unused-double-digit-area-subdistrict",
        "Letter is never used to subdivide a district in a double letter area.",
    );
    pub const UNUSED_FIRST_CHARACTER_IN_UNIT: Fault = Fault::new(
        211,
        "unused-first-character-in-unit",
        "Letter is never used in the first position of the unit.",
    );
    pub const UNUSED_SECOND_CHARACTER_IN_UNIT: Fault = Fault::new(
        212,
        "unused-second-character-in-unit",
        "Letter is never used in the second position of the unit.",
    );

    pub const ALL: &[Fault] = &[
        EXPECTED_SINGLE_DIGIT_DISTRICT,
        EXPECTED_DOUBLE_DIGIT_DISTRICT,
        NO_ZERO_DISTRICT,
        NO_TEN_DISTRICT,
        SUBDISTRICTS_UNSUPPORTED,
        UNEXPECTED_DISTRICT_SUBDIVISION,
        UNUSED_CHARACTER_IN_FIRST_POSITION,
        UNUSED_CHARACTER_IN_SECOND_POSITION,
        UNUSED_SINGLE_DIGIT_AREA_SUBDISTRICT,
        UNUSED_DOUBLE_DIGIT_AREA_SUBDISTRICT,
        UNUSED_FIRST_CHARACTER_IN_UNIT,
        UNUSED_SECOND_CHARACTER_IN_UNIT,
    ];
}

/// Forces (BFPO) postcode faults
pub mod forces {
    use crate::faults::Fault;

    pub const INVALID_DISTRICT: Fault = Fault::new(
        401,
        "invalid-district",
        "District is not a valid district for BF postcodes.",
    );

    pub const ALL: &[Fault] = &[INVALID_DISTRICT];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faults::FaultBand;

    #[test]
    fn test_published_ids_never_move() {
        assert_eq!(standard::EXPECTED_SINGLE_DIGIT_DISTRICT.id.value(), 201);
        assert_eq!(standard::EXPECTED_DOUBLE_DIGIT_DISTRICT.id.value(), 202);
        assert_eq!(standard::NO_ZERO_DISTRICT.id.value(), 203);
        assert_eq!(standard::NO_TEN_DISTRICT.id.value(), 204);
        assert_eq!(standard::SUBDISTRICTS_UNSUPPORTED.id.value(), 205);
        assert_eq!(standard::UNEXPECTED_DISTRICT_SUBDIVISION.id.value(), 206);
        assert_eq!(standard::UNUSED_CHARACTER_IN_FIRST_POSITION.id.value(), 207);
        assert_eq!(standard::UNUSED_CHARACTER_IN_SECOND_POSITION.id.value(), 208);
        assert_eq!(standard::UNUSED_SINGLE_DIGIT_AREA_SUBDISTRICT.id.value(), 209);
        assert_eq!(standard::UNUSED_DOUBLE_DIGIT_AREA_SUBDISTRICT.id.value(), 210);
        assert_eq!(standard::UNUSED_FIRST_CHARACTER_IN_UNIT.id.value(), 211);
        assert_eq!(standard::UNUSED_SECOND_CHARACTER_IN_UNIT.id.value(), 212);
        assert_eq!(forces::INVALID_DISTRICT.id.value(), 401);
    }

    #[test]
    fn test_faults_sit_in_their_variant_band() {
        assert!(standard::ALL.iter().all(|f| FaultBand::Standard.contains(f.id)));
        assert!(forces::ALL.iter().all(|f| FaultBand::Forces.contains(f.id)));
    }

    #[test]
    fn test_standard_faults_are_listed_in_id_order() {
        let ids: Vec<u16> = standard::ALL.iter().map(|f| f.id.value()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
