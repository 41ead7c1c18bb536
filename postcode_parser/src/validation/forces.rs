//! Forces postcode rules; `BFPO` numbers are never checked

use super::rules::ForcesRules;
use crate::faults::{forces, Fault};
use crate::postcode::ForcesPostcode;

type Check = fn(&ForcesPostcode, &ForcesRules) -> bool;

pub(crate) const RULES: &[(Fault, Check)] = &[(forces::INVALID_DISTRICT, invalid_district)];

fn invalid_district(postcode: &ForcesPostcode, rules: &ForcesRules) -> bool {
    postcode
        .outward_district()
        .is_some_and(|district| district > rules.max_bf_district)
}
