//! Enforcement gate - decides whether an actor must use a strong password.

use std::collections::HashSet;

use crate::config::PolicyConfig;

/// The account whose password change is being checked.
///
/// Built by the host per request; all fields are optional facts about the
/// actor and an absent value is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Option<u64>,
    pub role: Option<String>,
    pub held_capabilities: HashSet<String>,
    /// Network or site-wide admin screens.
    pub is_privileged_context: bool,
}

impl Actor {
    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.held_capabilities.insert(capability.into());
        self
    }

    pub fn privileged(mut self) -> Self {
        self.is_privileged_context = true;
        self
    }
}

/// Host authorization lookup.
pub trait CapabilityOracle {
    fn user_can(&self, user_id: Option<u64>, capability: &str) -> bool;
}

/// A plain capability set answers for whoever holds it.
impl CapabilityOracle for HashSet<String> {
    fn user_can(&self, _user_id: Option<u64>, capability: &str) -> bool {
        self.contains(capability)
    }
}

impl<F> CapabilityOracle for F
where
    F: Fn(Option<u64>, &str) -> bool,
{
    fn user_can(&self, user_id: Option<u64>, capability: &str) -> bool {
        self(user_id, capability)
    }
}

/// Checks whether `actor` must set a strong password, using the
/// capabilities the actor carries.
pub fn should_enforce(actor: &Actor, config: &PolicyConfig) -> bool {
    should_enforce_with(actor, config, &actor.held_capabilities)
}

/// Checks whether `actor` must set a strong password, asking `oracle` for
/// capabilities.
///
/// First match wins:
/// 1. privileged context enforces
/// 2. no user id but a weak role is exempt
/// 3. any required capability enforces (queried in configured order)
/// 4. otherwise exempt
pub fn should_enforce_with<O>(actor: &Actor, config: &PolicyConfig, oracle: &O) -> bool
where
    O: CapabilityOracle + ?Sized,
{
    if actor.is_privileged_context {
        #[cfg(feature = "tracing")]
        tracing::debug!("Strong password enforced: privileged context");
        return true;
    }

    if actor.user_id.is_none() {
        if let Some(role) = actor.role.as_deref() {
            if config.is_weak_role(role) {
                #[cfg(feature = "tracing")]
                tracing::debug!("Strong password not enforced: weak role {}", role);
                return false;
            }
        }
    }

    let matched = config
        .required_capabilities()
        .iter()
        .find(|cap| oracle.user_can(actor.user_id, cap));

    match matched {
        Some(_cap) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("Strong password enforced: user {:?} can {}", actor.user_id, _cap);
            true
        }
        None => false,
    }
}
