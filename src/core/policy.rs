//! Enrollment policy: institution-tunable thresholds and category id sets
//!
//! The rule *kinds* are fixed (exact-count category, max-count category,
//! per-slot required hours); everything tunable about them lives here as
//! data so institution changes never touch validator logic.

use crate::core::models::Slot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default policy shipped with the binary (the observed institution
/// configuration: arts/music exact 2, KES max 3, 29 hours per slot).
const POLICY_DEFAULTS: &str = include_str!("../assets/DefaultPolicy.toml");

/// Error raised when a policy file cannot be loaded
#[derive(Debug, Error)]
pub enum PolicyLoadError {
    /// The policy file could not be read
    #[error("Failed to read policy '{path}': {source}")]
    Io {
        /// Path that failed to read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The policy file is not valid TOML for the expected schema
    #[error("Policy is not well-formed: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A category rule requiring an exact number of picks from a fixed id set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactCategory {
    /// Display name for messages (e.g., "미술·음악")
    pub name: String,
    /// Course ids the category spans
    pub ids: Vec<String>,
    /// Exact number of selections required from `ids`
    pub required_count: usize,
}

/// A category rule capping picks from a fixed id set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxCategory {
    /// Display name for messages (e.g., "국영수 심화")
    pub name: String,
    /// Course ids the category spans
    pub ids: Vec<String>,
    /// Maximum number of selections allowed from `ids`
    pub max_count: usize,
}

/// The full enrollment policy for one institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentPolicy {
    /// Exact-count category rule
    pub exact_category: ExactCategory,
    /// Max-count category rule
    pub max_category: MaxCategory,
    /// Required total credit hours per slot, keyed "Y<year>S<semester>"
    pub hours_by_slot: BTreeMap<String, u32>,
}

impl EnrollmentPolicy {
    /// Parse a policy from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the
    /// expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load a policy from a TOML file
    ///
    /// # Errors
    /// Returns `PolicyLoadError` if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PolicyLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PolicyLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_toml(&content)?)
    }

    /// Load the compiled-in default policy
    ///
    /// # Panics
    /// Panics if the embedded default policy is invalid TOML. This should
    /// never happen in practice since the defaults are compiled into the
    /// binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(POLICY_DEFAULTS).expect("Failed to parse compiled-in default policy")
    }

    /// Required total credit hours for a slot, if configured
    #[must_use]
    pub fn required_hours(&self, slot: Slot) -> Option<u32> {
        self.hours_by_slot.get(&slot.key()).copied()
    }
}
