//! Username section - rejects a password equal to the account name.

use secrecy::ExposeSecret;

use super::{Candidate, SectionResult};
use crate::evaluator::Violation;

/// Exact, case-sensitive comparison with the username.
pub fn username_section(candidate: &Candidate<'_>) -> SectionResult {
    if candidate.password.expose_secret() == candidate.username {
        return vec![Violation::MatchesUsername];
    }
    Vec::new()
}
