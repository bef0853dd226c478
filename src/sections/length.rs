//! Length section - checks password minimum length.

use super::{Candidate, SectionResult};
use crate::evaluator::Violation;

/// Minimum number of characters in a strong password.
pub const MIN_LENGTH: usize = 8;

/// Checks if the password meets minimum length requirements.
///
/// Length is counted in characters, so multi-byte input is not favoured.
pub fn length_section(candidate: &Candidate<'_>) -> SectionResult {
    let actual = candidate.scan.length;
    if actual < MIN_LENGTH {
        return vec![Violation::TooShort {
            min: MIN_LENGTH,
            actual,
        }];
    }
    Vec::new()
}
