//! Pattern section - detects runs of identical characters.

use super::{Candidate, SectionResult};
use crate::evaluator::Violation;

/// Longest allowed run of one repeated character.
pub const MAX_RUN: usize = 2;

/// Rejects any run of more than `MAX_RUN` identical consecutive characters.
pub fn pattern_section(candidate: &Candidate<'_>) -> SectionResult {
    if candidate.scan.repeat_violation {
        return vec![Violation::RepeatedCharacters {
            run: candidate.scan.longest_run,
        }];
    }
    Vec::new()
}
