//! Strong password policy library
//!
//! Decides whether a privileged account must use a strong password and
//! whether a candidate password satisfies the policy.
//!
//! # Features
//!
//! - `async` (default): Enables cancellable and channel-based evaluation
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_POLICY_WEAK_ROLES`: Comma separated roles exempt from enforcement
//!   (default: `subscriber,contributor`)
//! - `PWD_POLICY_CAPS_CHECK`: Comma separated capabilities that trigger enforcement
//!   (default: `publish_posts,upload_files,edit_published_posts`)
//! - `PWD_BLACKLIST_PATH`: Path to the compromised password list
//!   (default: `./assets/blacklist.txt`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_policy::{is_strong, should_enforce, Actor, PolicyConfig};
//! use secrecy::SecretString;
//!
//! let config = PolicyConfig::from_env().expect("Invalid policy environment");
//! let source = config.compromised_list();
//!
//! let actor = Actor::default()
//!     .with_user_id(1)
//!     .with_capability("publish_posts");
//!
//! let password = SecretString::new("Password123".to_string().into());
//!
//! if should_enforce(&actor, &config) && !is_strong(&password, "mark", &source) {
//!     println!("Please make the password a strong one.");
//! }
//! ```

// Internal modules
mod blacklist;
mod config;
mod evaluator;
mod gate;
mod policy;
mod sections;

// Public API
pub use blacklist::{
    CachedListSource, CompromisedListSource, EmptyListSource, FileListSource, StaticListSource,
};
pub use config::{ConfigError, PolicyConfig};
pub use evaluator::{PasswordEvaluation, Violation, evaluate, is_strong};
pub use gate::{Actor, CapabilityOracle, should_enforce, should_enforce_with};
pub use policy::{PasswordChange, PolicyError, RequestFieldExtractor, validate_password_change};
pub use sections::{MAX_RUN, MIN_LENGTH};

#[cfg(feature = "async")]
pub use evaluator::{evaluate_cancellable, evaluate_tx};
