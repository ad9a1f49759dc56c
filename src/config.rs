//! Validator Configuration
//!
//! Policies decide what happens to findings that are legal by default but
//! worth surfacing. Core type rules are always enforced.

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// How a policy-governed finding is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Ignore the finding
    Allow,
    /// Record it as a warning; the manifest stays valid
    Warn,
    /// Fail validation
    Reject,
}

impl Default for Policy {
    fn default() -> Self {
        Self::Allow
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Gather every parameter violation instead of stopping at the first.
    pub collect_all: bool,
    /// Type tags other than `string`, `integer`, `boolean`.
    pub unknown_types: Policy,
    /// Two or more parameters sharing a name.
    pub duplicate_names: Policy,
}

impl ValidatorConfig {
    /// Reject everything a policy can reject.
    pub fn strict() -> Self {
        Self {
            collect_all: false,
            unknown_types: Policy::Reject,
            duplicate_names: Policy::Reject,
        }
    }

    /// Surface everything a policy can surface, without failing on it.
    pub fn warn_all() -> Self {
        Self {
            collect_all: false,
            unknown_types: Policy::Warn,
            duplicate_names: Policy::Warn,
        }
    }

    /// Load from a JSON or YAML document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ManifestError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_slice(bytes)?)
    }

    /// Policy governing a finding. Findings outside any policy always reject.
    pub fn policy_for(&self, finding: &ManifestError) -> Policy {
        match finding {
            ManifestError::UnknownType { .. } => self.unknown_types,
            ManifestError::DuplicateName { .. } => self.duplicate_names,
            _ => Policy::Reject,
        }
    }
}
