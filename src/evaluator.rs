//! Password strength evaluator - main evaluation logic.

use secrecy::SecretString;
use thiserror::Error;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::blacklist::CompromisedListSource;
use crate::sections::{
    Candidate, SectionResult, character_variety_section, compromised_section, length_section,
    pattern_section, username_section,
};

/// A single reason a password is not strong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize, actual: usize },
    #[error("Password must not match the username")]
    MatchesUsername,
    #[error("Password must contain a lowercase letter")]
    MissingLowercase,
    #[error("Password must contain an uppercase letter")]
    MissingUppercase,
    #[error("Password must contain a digit")]
    MissingDigit,
    #[error("Password repeats a character {run} times in a row")]
    RepeatedCharacters { run: usize },
    #[error("Password appears in a list of compromised passwords")]
    Compromised,
}

/// Outcome of a strength evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordEvaluation {
    pub violations: Vec<Violation>,
    /// `false` if the evaluation was cancelled before all sections ran.
    pub completed: bool,
}

impl PasswordEvaluation {
    /// A password is strong only if every section ran and none objected.
    pub fn is_strong(&self) -> bool {
        self.completed && self.violations.is_empty()
    }
}

type Section = fn(&Candidate<'_>) -> SectionResult;

const SECTIONS: [(&str, Section); 5] = [
    ("length", length_section),
    ("username", username_section),
    ("variety", character_variety_section),
    ("pattern", pattern_section),
    ("compromised", compromised_section),
];

/// Returns `true` if `password` satisfies the strength policy.
///
/// A password is rejected if it is shorter than 8 characters, equals
/// `username`, lacks a lowercase letter, an uppercase letter or a digit,
/// repeats one character 3 or more times in a row, or appears in `source`.
pub fn is_strong(
    password: &SecretString,
    username: &str,
    source: &dyn CompromisedListSource,
) -> bool {
    evaluate(password, username, source).is_strong()
}

/// Evaluates password strength and returns every violation found.
///
/// All sections run, so the result lists each rule the password breaks.
pub fn evaluate(
    password: &SecretString,
    username: &str,
    source: &dyn CompromisedListSource,
) -> PasswordEvaluation {
    run_sections(password, username, source, || false)
}

/// Like [`evaluate`], but checks `token` before each section.
///
/// A cancelled evaluation has `completed == false` and is never strong.
#[cfg(feature = "async")]
pub fn evaluate_cancellable(
    password: &SecretString,
    username: &str,
    source: &dyn CompromisedListSource,
    token: &CancellationToken,
) -> PasswordEvaluation {
    run_sections(password, username, source, || token.is_cancelled())
}

/// Async version that sends evaluation result via channel.
///
/// Waits out a short debounce first so a host evaluating as the user types
/// can cancel superseded requests.
#[cfg(feature = "async")]
pub async fn evaluate_tx(
    password: &SecretString,
    username: &str,
    source: &dyn CompromisedListSource,
    token: CancellationToken,
    tx: mpsc::Sender<PasswordEvaluation>,
) {
    use std::time::Duration;

    #[cfg(feature = "tracing")]
    tracing::debug!("evaluation is about to start...");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let evaluation = evaluate_cancellable(password, username, source, &token);

    if let Err(_e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}

fn run_sections(
    password: &SecretString,
    username: &str,
    source: &dyn CompromisedListSource,
    is_cancelled: impl Fn() -> bool,
) -> PasswordEvaluation {
    let candidate = Candidate::new(password, username, source);
    let mut violations = Vec::new();

    for (_section_name, section_fn) in SECTIONS {
        if is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Password evaluation cancelled before section: {}", _section_name);
            return PasswordEvaluation {
                violations,
                completed: false,
            };
        }

        let found = section_fn(&candidate);

        #[cfg(feature = "tracing")]
        if !found.is_empty() {
            tracing::trace!("Section {} reported {} violations", _section_name, found.len());
        }

        violations.extend(found);
    }

    PasswordEvaluation {
        violations,
        completed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blacklist::{EmptyListSource, FileListSource, StaticListSource};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const USER: &str = "mark";

    fn secret(password: &str) -> SecretString {
        SecretString::new(password.to_string().into())
    }

    fn setup_with_tempfile(passwords: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for pwd in passwords {
            writeln!(temp_file, "{}", pwd).expect("Failed to write");
        }
        temp_file
    }

    #[test]
    fn test_strong_password_with_empty_source() {
        assert!(is_strong(&secret("Password123"), USER, &EmptyListSource));
        assert!(is_strong(&secret("realGoodPassword123456"), USER, &EmptyListSource));
    }

    #[test]
    fn test_short_passwords_never_strong() {
        for pwd in ["", "a", "not7", "Ab1cD2e"] {
            assert!(!is_strong(&secret(pwd), USER, &EmptyListSource), "{pwd}");
        }
    }

    #[test]
    fn test_password_equal_to_username() {
        let evaluation = evaluate(&secret("markMarkmark123"), "markMarkmark123", &EmptyListSource);
        assert!(!evaluation.is_strong());
        assert_eq!(evaluation.violations, vec![Violation::MatchesUsername]);
    }

    #[test]
    fn test_missing_character_classes() {
        assert!(!is_strong(&secret("ALLCAPS78"), USER, &EmptyListSource));
        assert!(!is_strong(&secret("nocaps78"), USER, &EmptyListSource));
        assert!(!is_strong(&secret("NoDigitsHere"), USER, &EmptyListSource));
        assert!(!is_strong(&secret("123456789"), USER, &EmptyListSource));
    }

    #[test]
    fn test_repeated_characters() {
        assert!(!is_strong(&secret("aaabcdefgh123"), USER, &EmptyListSource));
        assert!(!is_strong(&secret("Aaa11123"), USER, &EmptyListSource));
        assert!(is_strong(&secret("Aab11c23"), USER, &EmptyListSource));
    }

    #[test]
    fn test_compromised_password_rejected() {
        let source = vec!["Password1".to_string()];
        let evaluation = evaluate(&secret("Password1"), USER, &source);
        assert!(!evaluation.is_strong());
        assert_eq!(evaluation.violations, vec![Violation::Compromised]);
    }

    #[test]
    fn test_compromised_file_match_is_exact() {
        let temp_file = setup_with_tempfile(&["Summer2024"]);
        let source = FileListSource::new(temp_file.path());
        assert!(!is_strong(&secret("Summer2024"), USER, &source));
        assert!(is_strong(&secret("Summer2025"), USER, &source));
        assert!(is_strong(&secret("Summer20245"), USER, &source));
    }

    #[test]
    fn test_missing_compromised_file_does_not_fail() {
        let source = FileListSource::new("/nonexistent/path/blacklist.txt");
        assert!(is_strong(&secret("Password123"), USER, &source));
    }

    #[test]
    fn test_all_violations_reported() {
        let source = StaticListSource::new(["aaa"]);
        let evaluation = evaluate(&secret("aaa"), "aaa", &source);
        assert!(evaluation.completed);
        assert_eq!(
            evaluation.violations,
            vec![
                Violation::TooShort { min: 8, actual: 3 },
                Violation::MatchesUsername,
                Violation::MissingUppercase,
                Violation::MissingDigit,
                Violation::RepeatedCharacters { run: 3 },
                Violation::Compromised,
            ]
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let source = StaticListSource::new(["Password1"]);
        for pwd in ["Password123", "Password1", "aaa"] {
            let first = evaluate(&secret(pwd), USER, &source);
            let second = evaluate(&secret(pwd), USER, &source);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            Violation::TooShort { min: 8, actual: 3 }.to_string(),
            "Password must be at least 8 characters"
        );
        assert_eq!(
            Violation::RepeatedCharacters { run: 4 }.to_string(),
            "Password repeats a character 4 times in a row"
        );
    }

    #[test]
    fn test_incomplete_evaluation_is_not_strong() {
        let evaluation = PasswordEvaluation {
            violations: Vec::new(),
            completed: false,
        };
        assert!(!evaluation.is_strong());
    }
}
