//! Password change validation for host applications.
//!
//! Ties the enforcement gate and the strength evaluator together the way a
//! profile update or password reset hook needs them.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::blacklist::CompromisedListSource;
use crate::config::PolicyConfig;
use crate::evaluator::{Violation, evaluate};
use crate::gate::{Actor, CapabilityOracle, should_enforce_with};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Please make the password a strong one.")]
    WeakPassword { violations: Vec<Violation> },
}

/// Fields of a password change request, as extracted by the host.
pub trait RequestFieldExtractor {
    /// The new password, if one was submitted.
    fn password(&self) -> Option<SecretString>;
    fn role(&self) -> Option<String>;
    fn user_id(&self) -> Option<u64>;
    fn username(&self) -> String;

    fn is_privileged_context(&self) -> bool {
        false
    }

    /// Whether the host already rejected the password for another reason.
    fn has_password_error(&self) -> bool {
        false
    }
}

/// Plain request data for hosts without their own request type.
#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub password: Option<SecretString>,
    pub role: Option<String>,
    pub user_id: Option<u64>,
    pub username: String,
    pub is_privileged_context: bool,
    pub has_password_error: bool,
}

impl RequestFieldExtractor for PasswordChange {
    fn password(&self) -> Option<SecretString> {
        self.password.clone()
    }

    fn role(&self) -> Option<String> {
        self.role.clone()
    }

    fn user_id(&self) -> Option<u64> {
        self.user_id
    }

    fn username(&self) -> String {
        self.username.clone()
    }

    fn is_privileged_context(&self) -> bool {
        self.is_privileged_context
    }

    fn has_password_error(&self) -> bool {
        self.has_password_error
    }
}

/// Validates a password change request against the policy.
///
/// Returns `Ok(())` when there is nothing to check (no password, a blank
/// password, or an earlier password error reported by the host), when the
/// actor is not subject to enforcement, or when the password is strong.
///
/// # Errors
///
/// Returns `PolicyError::WeakPassword` with every violation found if the
/// actor must use a strong password and the submitted one is not.
pub fn validate_password_change<R, O>(
    request: &R,
    config: &PolicyConfig,
    oracle: &O,
    source: &dyn CompromisedListSource,
) -> Result<(), PolicyError>
where
    R: RequestFieldExtractor + ?Sized,
    O: CapabilityOracle + ?Sized,
{
    let Some(password) = request.password() else {
        return Ok(());
    };
    if password.expose_secret().trim().is_empty() || request.has_password_error() {
        return Ok(());
    }

    let actor = Actor {
        user_id: request.user_id(),
        role: request.role(),
        is_privileged_context: request.is_privileged_context(),
        ..Actor::default()
    };
    if !should_enforce_with(&actor, config, oracle) {
        return Ok(());
    }

    let evaluation = evaluate(&password, &request.username(), source);
    if evaluation.is_strong() {
        return Ok(());
    }

    #[cfg(feature = "tracing")]
    tracing::info!(
        "Weak password rejected for user {:?}: {} violations",
        actor.user_id,
        evaluation.violations.len()
    );

    Err(PolicyError::WeakPassword {
        violations: evaluation.violations,
    })
}
