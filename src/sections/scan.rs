//! Single pass character scan shared by the variety and pattern sections.

use super::MAX_RUN;

/// Facts gathered in one left-to-right pass over a password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterScan {
    /// Length in characters, not bytes.
    pub length: usize,
    pub has_lower: bool,
    pub has_upper: bool,
    pub has_digit: bool,
    /// Set once a run grows past `MAX_RUN` and never cleared.
    pub repeat_violation: bool,
    pub longest_run: usize,
}

impl CharacterScan {
    pub fn of(password: &str) -> Self {
        let mut scan = Self::default();
        let mut previous: Option<char> = None;
        let mut run = 0;

        for c in password.chars() {
            scan.length += 1;

            run = if previous == Some(c) { run + 1 } else { 1 };
            previous = Some(c);
            scan.longest_run = scan.longest_run.max(run);
            if run > MAX_RUN {
                scan.repeat_violation = true;
            }

            if c.is_lowercase() {
                scan.has_lower = true;
            } else if c.is_uppercase() {
                scan.has_upper = true;
            } else if c.is_ascii_digit() {
                scan.has_digit = true;
            }
        }

        scan
    }
}
