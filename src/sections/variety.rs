//! Character variety section - checks for lowercase, uppercase and digits.

use super::{Candidate, SectionResult};
use crate::evaluator::Violation;

/// Reports every missing character class.
pub fn character_variety_section(candidate: &Candidate<'_>) -> SectionResult {
    let scan = &candidate.scan;

    [
        (scan.has_lower, Violation::MissingLowercase),
        (scan.has_upper, Violation::MissingUppercase),
        (scan.has_digit, Violation::MissingDigit),
    ]
    .into_iter()
    .filter(|(present, _)| !present)
    .map(|(_, violation)| violation)
    .collect()
}
