//! Policy configuration
//!
//! Holds the roles exempt from enforcement, the capabilities that trigger it
//! and the location of the compromised password list. A `PolicyConfig` is
//! immutable once built and can be shared freely between threads.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::blacklist::FileListSource;

pub const WEAK_ROLES_ENV: &str = "PWD_POLICY_WEAK_ROLES";
pub const CAPS_CHECK_ENV: &str = "PWD_POLICY_CAPS_CHECK";
pub const BLACKLIST_PATH_ENV: &str = "PWD_BLACKLIST_PATH";

const DEFAULT_WEAK_ROLES: &[&str] = &["subscriber", "contributor"];
const DEFAULT_REQUIRED_CAPABILITIES: &[&str] =
    &["publish_posts", "upload_files", "edit_published_posts"];
const DEFAULT_BLACKLIST_PATH: &str = "./assets/blacklist.txt";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {key} is not valid unicode: {value:?}")]
    NotUnicode { key: &'static str, value: OsString },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    weak_roles: HashSet<String>,
    required_capabilities: Vec<String>,
    compromised_list_path: PathBuf,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_WEAK_ROLES.iter().copied(),
            DEFAULT_REQUIRED_CAPABILITIES.iter().copied(),
        )
    }
}

impl PolicyConfig {
    /// Builds a configuration with the default compromised list path.
    ///
    /// Capabilities keep the given order; repeated entries are dropped.
    pub fn new<R, C>(weak_roles: R, required_capabilities: C) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut seen = HashSet::new();
        let required_capabilities = required_capabilities
            .into_iter()
            .map(Into::into)
            .filter(|cap: &String| seen.insert(cap.clone()))
            .collect();

        Self {
            weak_roles: weak_roles.into_iter().map(Into::into).collect(),
            required_capabilities,
            compromised_list_path: PathBuf::from(DEFAULT_BLACKLIST_PATH),
        }
    }

    pub fn with_compromised_list_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.compromised_list_path = path.into();
        self
    }

    /// Reads the configuration from the environment.
    ///
    /// Priority for each value:
    /// 1. Environment variable (`PWD_POLICY_WEAK_ROLES`, `PWD_POLICY_CAPS_CHECK`,
    ///    `PWD_BLACKLIST_PATH`)
    /// 2. Built-in default
    ///
    /// List variables are comma separated; blank entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but is not valid unicode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let weak_roles = match read_env(WEAK_ROLES_ENV)? {
            Some(value) => split_list(&value).collect(),
            None => defaults.weak_roles,
        };
        let required_capabilities = match read_env(CAPS_CHECK_ENV)? {
            Some(value) => split_list(&value).collect::<Vec<_>>(),
            None => defaults.required_capabilities,
        };
        let path = read_env(BLACKLIST_PATH_ENV)?
            .map(PathBuf::from)
            .unwrap_or(defaults.compromised_list_path);

        let config = Self::new(weak_roles, required_capabilities)
            .with_compromised_list_path(path);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Policy config loaded: {} weak roles, {} capabilities, list at {:?}",
            config.weak_roles.len(),
            config.required_capabilities.len(),
            config.compromised_list_path
        );

        Ok(config)
    }

    pub fn weak_roles(&self) -> &HashSet<String> {
        &self.weak_roles
    }

    /// Capabilities checked, in configured order.
    pub fn required_capabilities(&self) -> &[String] {
        &self.required_capabilities
    }

    pub fn compromised_list_path(&self) -> &Path {
        &self.compromised_list_path
    }

    pub fn is_weak_role(&self, role: &str) -> bool {
        self.weak_roles.contains(role)
    }

    /// File source for the configured compromised list, read on every lookup.
    pub fn compromised_list(&self) -> FileListSource {
        FileListSource::new(self.compromised_list_path.clone())
    }
}

fn read_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var_os(key) {
        None => Ok(None),
        Some(value) => value
            .into_string()
            .map(Some)
            .map_err(|value| ConfigError::NotUnicode { key, value }),
    }
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}
