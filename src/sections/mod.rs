//! Password evaluation sections
//!
//! Each section checks one rule family of the strength policy and reports
//! the violations it found.

mod compromised;
mod length;
mod pattern;
mod scan;
mod username;
mod variety;

pub use compromised::compromised_section;
pub use length::{MIN_LENGTH, length_section};
pub use pattern::{MAX_RUN, pattern_section};
pub use scan::CharacterScan;
pub use username::username_section;
pub use variety::character_variety_section;

use secrecy::{ExposeSecret, SecretString};

use crate::blacklist::CompromisedListSource;
use crate::evaluator::Violation;

/// Result type for section evaluation functions.
/// - empty - Section passed
/// - otherwise - every rule of the section that failed
pub type SectionResult = Vec<Violation>;

/// Inputs shared by all sections of one evaluation.
pub struct Candidate<'a> {
    pub password: &'a SecretString,
    pub username: &'a str,
    pub scan: CharacterScan,
    pub source: &'a dyn CompromisedListSource,
}

impl<'a> Candidate<'a> {
    pub fn new(
        password: &'a SecretString,
        username: &'a str,
        source: &'a dyn CompromisedListSource,
    ) -> Self {
        Self {
            password,
            username,
            scan: CharacterScan::of(password.expose_secret()),
            source,
        }
    }
}
