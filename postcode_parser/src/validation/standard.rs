//! Standard postcode rules
//!
//! Rules are plain predicates over the parsed entity and the exception tables,
//! checked in declared order. Every rule is evaluated; there is no short circuit.

use super::rules::StandardRules;
use crate::faults::{standard, Fault};
use crate::postcode::StandardPostcode;

type Check = fn(&StandardPostcode, &StandardRules) -> bool;

pub(crate) const RULES: &[(Fault, Check)] = &[
    (standard::EXPECTED_SINGLE_DIGIT_DISTRICT, expected_single_digit),
    (standard::EXPECTED_DOUBLE_DIGIT_DISTRICT, expected_double_digit),
    (standard::NO_ZERO_DISTRICT, no_zero_district),
    (standard::NO_TEN_DISTRICT, no_ten_district),
    (standard::SUBDISTRICTS_UNSUPPORTED, subdistricts_unsupported),
    (standard::UNEXPECTED_DISTRICT_SUBDIVISION, unexpected_subdivision),
    (standard::UNUSED_CHARACTER_IN_FIRST_POSITION, unused_first_area_letter),
    (standard::UNUSED_CHARACTER_IN_SECOND_POSITION, unused_second_area_letter),
    (standard::UNUSED_SINGLE_DIGIT_AREA_SUBDISTRICT, unused_single_letter_area_subdivision),
    (standard::UNUSED_DOUBLE_DIGIT_AREA_SUBDISTRICT, unused_double_letter_area_subdivision),
    (standard::UNUSED_FIRST_CHARACTER_IN_UNIT, unused_first_unit_letter),
    (standard::UNUSED_SECOND_CHARACTER_IN_UNIT, unused_second_unit_letter),
];

fn area_letter(postcode: &StandardPostcode, index: usize) -> Option<char> {
    postcode.outward_area().chars().nth(index)
}

fn unit_letter(postcode: &StandardPostcode, index: usize) -> Option<char> {
    postcode.inward_unit().chars().nth(index)
}

fn expected_single_digit(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    rules.single_digit_districts.contains(postcode.outward_area()) && postcode.outward_district() >= 10
}

fn expected_double_digit(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    rules.double_digit_districts.contains(postcode.outward_area()) && postcode.outward_district() <= 9
}

fn no_zero_district(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    postcode.outward_district() == 0 && !rules.has_district_zero.contains(postcode.outward_area())
}

fn no_ten_district(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    postcode.outward_district() == 10 && rules.no_district_ten.contains(postcode.outward_area())
}

fn subdistricts_unsupported(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    if postcode.outward_subdistrict().is_none() {
        return false;
    }
    match rules.subdivided_districts.get(postcode.outward_area()) {
        None => true,
        Some(districts) => {
            !districts.is_empty() && !districts.contains_key(&postcode.outward_district())
        }
    }
}

fn unexpected_subdivision(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    let Some(letter) = postcode.outward_subdistrict() else {
        return false;
    };
    rules
        .subdivided_districts
        .get(postcode.outward_area())
        .and_then(|districts| districts.get(&postcode.outward_district()))
        .and_then(Option::as_ref)
        .is_some_and(|allowed| !allowed.is_empty() && !allowed.contains(&letter))
}

fn unused_first_area_letter(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    area_letter(postcode, 0).is_some_and(|c| rules.first_position_excludes.contains(&c))
}

fn unused_second_area_letter(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    area_letter(postcode, 1).is_some_and(|c| rules.second_position_excludes.contains(&c))
}

fn unused_single_letter_area_subdivision(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    postcode.outward_area().len() == 1
        && postcode.outward_subdistrict().is_some_and(|letter| {
            let allowed = &rules.single_letter_area_subdivisions;
            !allowed.is_empty() && !allowed.contains(&letter)
        })
}

fn unused_double_letter_area_subdivision(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    postcode.outward_area().len() == 2
        && postcode.outward_subdistrict().is_some_and(|letter| {
            let allowed = &rules.double_letter_area_subdivisions;
            !allowed.is_empty() && !allowed.contains(&letter)
        })
}

fn unused_first_unit_letter(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    unit_letter(postcode, 0).is_some_and(|c| rules.unit_excludes.contains(&c))
}

fn unused_second_unit_letter(postcode: &StandardPostcode, rules: &StandardRules) -> bool {
    unit_letter(postcode, 1).is_some_and(|c| rules.unit_excludes.contains(&c))
}
