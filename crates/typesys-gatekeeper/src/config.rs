//! Gatekeeper configuration

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};

/// What to do when tags would flow from a child end up to its container
///
/// The type system does not define how such propagation should be resolved,
/// so the gatekeeper only detects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropagationPolicy {
    /// Accept silently
    #[default]
    Ignore,

    /// Accept, but record and log a warning
    Warn,

    /// Reject the relationship def
    Reject,
}

/// Configuration for validation rules
///
/// Missing keys in a TOML document fall back to the default preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Require a non-empty typedef name
    pub require_name: bool,

    /// Require `relationshipCategory` to be set
    pub require_relationship_category: bool,

    /// Reject `LIST` cardinality on relationship ends
    pub reject_list_ends: bool,

    /// Enforce container rules (single container, association vs containment,
    /// composition children with a single parent)
    pub validate_containment: bool,

    /// Only allow built-in primitive types for relationship attributes
    pub primitive_attributes_only: bool,

    /// Handling of child-to-container tag propagation in containment relationships
    pub propagation_policy: PropagationPolicy,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_name: true,
            require_relationship_category: true,
            reject_list_ends: true,
            validate_containment: true,
            primitive_attributes_only: true,
            propagation_policy: PropagationPolicy::Ignore,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (only end presence is checked)
    pub fn permissive() -> Self {
        Self {
            require_name: false,
            require_relationship_category: false,
            reject_list_ends: false,
            validate_containment: false,
            primitive_attributes_only: false,
            propagation_policy: PropagationPolicy::Ignore,
        }
    }

    /// Create a strict configuration (all validations enabled)
    pub fn strict() -> Self {
        Self {
            propagation_policy: PropagationPolicy::Reject,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, GatekeeperError> {
        toml::from_str(toml_str)
            .map_err(|e| GatekeeperError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, GatekeeperError> {
        toml::to_string_pretty(self)
            .map_err(|e| GatekeeperError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
