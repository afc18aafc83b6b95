//! Relationship def validation logic

use crate::config::PropagationPolicy;
use crate::{GatekeeperError, ValidationConfig};
use std::fmt;
use tracing::{debug, warn};
use typesys_domain::{
    Cardinality, EndPosition, PropagateTags, RelationshipCategory, RelationshipDef, TypesDef,
};

/// Result of validating one relationship def
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Name of the validated typedef
    pub type_name: String,

    /// Whether the def passed validation
    pub status: ValidationStatus,

    /// Rule violations (empty when accepted)
    pub reasons: Vec<RejectionReason>,

    /// Findings that did not cause rejection
    pub warnings: Vec<RejectionReason>,
}

impl ValidationResult {
    /// Whether the def was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Relationship def accepted
    Accepted,

    /// Relationship def rejected
    Rejected,
}

/// A rule a relationship def can violate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Typedef name is empty
    MissingName,

    /// `relationshipCategory` is not set
    MissingRelationshipCategory,

    /// An end is not set
    MissingEnd(EndPosition),

    /// An end has an empty entity type or attribute name
    IncompleteEnd {
        /// Which end
        end: EndPosition,
        /// Wire name of the empty field
        field: &'static str,
    },

    /// An end declares `LIST` cardinality
    ListCardinalityOnEnd(EndPosition),

    /// Both ends are marked as container
    DoubleContainer,

    /// An association marks an end as container
    AssociationWithContainer(EndPosition),

    /// A containment relationship has no container end
    ContainmentWithoutContainer(RelationshipCategory),

    /// A composition child end has `SET` cardinality, i.e. multiple parents
    CompositionMultipleParents(EndPosition),

    /// A relationship attribute has a non-primitive type
    NonPrimitiveAttribute {
        /// Attribute name
        attribute: String,
        /// Declared type
        type_name: String,
    },

    /// Tags would flow from the child end up to the container end
    UpwardPropagation {
        /// Relationship category
        category: RelationshipCategory,
        /// Declared propagation
        propagate_tags: PropagateTags,
        /// The container end receiving the child's tags
        container: EndPosition,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::MissingName => write!(f, "name is empty"),
            RejectionReason::MissingRelationshipCategory => {
                write!(f, "relationshipCategory is not set")
            }
            RejectionReason::MissingEnd(end) => write!(f, "{} is not set", end),
            RejectionReason::IncompleteEnd { end, field } => {
                write!(f, "{}.{} is empty", end, field)
            }
            RejectionReason::ListCardinalityOnEnd(end) => {
                write!(f, "{} has LIST cardinality; use SINGLE or SET", end)
            }
            RejectionReason::DoubleContainer => {
                write!(f, "both ends are marked as container")
            }
            RejectionReason::AssociationWithContainer(end) => {
                write!(f, "ASSOCIATION cannot have a container end ({})", end)
            }
            RejectionReason::ContainmentWithoutContainer(category) => {
                write!(f, "{} requires one end to be a container", category)
            }
            RejectionReason::CompositionMultipleParents(end) => write!(
                f,
                "COMPOSITION child end {} has SET cardinality (multiple parents)",
                end
            ),
            RejectionReason::NonPrimitiveAttribute {
                attribute,
                type_name,
            } => write!(
                f,
                "attribute '{}' has non-primitive type '{}'",
                attribute, type_name
            ),
            RejectionReason::UpwardPropagation {
                category,
                propagate_tags,
                container,
            } => write!(
                f,
                "{} with {} propagates tags from the child up to the container ({})",
                category, propagate_tags, container
            ),
        }
    }
}

/// The Gatekeeper validates relationship defs before registration
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a relationship def against the configured rules
    ///
    /// Every violated rule is reported, not just the first.
    pub fn validate(&self, def: &RelationshipDef) -> ValidationResult {
        let mut reasons = Vec::new();
        let mut warnings = Vec::new();

        // 1. Header
        if self.config.require_name && def.name().is_empty() {
            reasons.push(RejectionReason::MissingName);
        }
        if self.config.require_relationship_category && def.relationship_category().is_none() {
            reasons.push(RejectionReason::MissingRelationshipCategory);
        }

        // 2. Ends; the remaining rules need both of them
        let ends_complete = self.validate_ends(def, &mut reasons);

        if ends_complete {
            // 3. Containment
            if self.config.validate_containment {
                self.validate_containment(def, &mut reasons);
            }

            // 4. Propagation across containment
            if let Some(reason) = self.check_upward_propagation(def) {
                match self.config.propagation_policy {
                    PropagationPolicy::Ignore => {}
                    PropagationPolicy::Warn => {
                        warn!("Relationship def '{}': {}", def.name(), reason);
                        warnings.push(reason);
                    }
                    PropagationPolicy::Reject => reasons.push(reason),
                }
            }
        }

        // 5. Relationship attributes
        if self.config.primitive_attributes_only {
            for attr in def.attribute_defs() {
                if !attr.has_primitive_type() {
                    reasons.push(RejectionReason::NonPrimitiveAttribute {
                        attribute: attr.name.clone(),
                        type_name: attr.type_name.clone(),
                    });
                }
            }
        }

        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Rejected
        };
        debug!(
            "Validated relationship def '{}': {:?} ({} reasons, {} warnings)",
            def.name(),
            status,
            reasons.len(),
            warnings.len()
        );

        ValidationResult {
            type_name: def.name().to_string(),
            status,
            reasons,
            warnings,
        }
    }

    /// Validate and turn a rejection into an error naming the typedef
    pub fn check(&self, def: &RelationshipDef) -> Result<ValidationResult, GatekeeperError> {
        let result = self.validate(def);
        if result.is_accepted() {
            Ok(result)
        } else {
            Err(GatekeeperError::Rejected {
                type_name: result.type_name,
                reasons: result.reasons,
            })
        }
    }

    /// Validate every relationship def in a bundle, in order
    pub fn validate_types(&self, types: &TypesDef) -> Vec<ValidationResult> {
        types
            .relationship_defs
            .iter()
            .map(|def| self.validate(def))
            .collect()
    }

    /// Check end presence, completeness and cardinality
    ///
    /// Returns whether both ends are set.
    fn validate_ends(&self, def: &RelationshipDef, reasons: &mut Vec<RejectionReason>) -> bool {
        let mut complete = true;

        for position in [EndPosition::One, EndPosition::Two] {
            let Some(end) = def.end(position) else {
                reasons.push(RejectionReason::MissingEnd(position));
                complete = false;
                continue;
            };

            if end.type_name.is_empty() {
                reasons.push(RejectionReason::IncompleteEnd {
                    end: position,
                    field: "type",
                });
            }
            if end.name.is_empty() {
                reasons.push(RejectionReason::IncompleteEnd {
                    end: position,
                    field: "name",
                });
            }
            if self.config.reject_list_ends && end.cardinality == Cardinality::List {
                reasons.push(RejectionReason::ListCardinalityOnEnd(position));
            }
        }

        complete
    }

    /// Container rules per relationship category
    fn validate_containment(&self, def: &RelationshipDef, reasons: &mut Vec<RejectionReason>) {
        let containers: Vec<EndPosition> = [EndPosition::One, EndPosition::Two]
            .into_iter()
            .filter(|p| def.end(*p).is_some_and(|e| e.is_container))
            .collect();

        if containers.len() > 1 {
            reasons.push(RejectionReason::DoubleContainer);
        }

        let Some(category) = def.relationship_category() else {
            return;
        };

        match (category, containers.first()) {
            (RelationshipCategory::Association, Some(position)) => {
                reasons.push(RejectionReason::AssociationWithContainer(*position));
            }
            (RelationshipCategory::Aggregation | RelationshipCategory::Composition, None) => {
                reasons.push(RejectionReason::ContainmentWithoutContainer(category));
            }
            _ => {}
        }

        if category == RelationshipCategory::Composition {
            for position in [EndPosition::One, EndPosition::Two] {
                if let Some(end) = def.end(position) {
                    if !end.is_container && end.cardinality == Cardinality::Set {
                        reasons.push(RejectionReason::CompositionMultipleParents(position));
                    }
                }
            }
        }
    }

    /// Detect tags flowing from the child end to the container end
    fn check_upward_propagation(&self, def: &RelationshipDef) -> Option<RejectionReason> {
        let category = def.relationship_category()?;
        if !category.is_containment() {
            return None;
        }

        let container = def.container_end()?;
        let propagate_tags = def.propagate_tags_or_default();
        if propagate_tags.flows_toward(container) {
            Some(RejectionReason::UpwardPropagation {
                category,
                propagate_tags,
                container,
            })
        } else {
            None
        }
    }
}
