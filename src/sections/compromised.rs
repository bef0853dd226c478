//! Compromised section - checks if password is in the compromised list.

use secrecy::ExposeSecret;

use super::{Candidate, SectionResult};
use crate::evaluator::Violation;

/// Checks the password against the candidate's compromised list source.
///
/// An unavailable list behaves as an empty one.
pub fn compromised_section(candidate: &Candidate<'_>) -> SectionResult {
    if candidate.source.contains(candidate.password.expose_secret()) {
        return vec![Violation::Compromised];
    }
    Vec::new()
}
