//! Relationship ends

use crate::attribute::Cardinality;
use crate::header::Quoted;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an end within a relationship def
///
/// "1" and "2" are labels, not a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndPosition {
    /// `endDef1`
    One,

    /// `endDef2`
    Two,
}

impl EndPosition {
    /// The opposite end
    pub fn other(&self) -> Self {
        match self {
            EndPosition::One => EndPosition::Two,
            EndPosition::Two => EndPosition::One,
        }
    }

    /// Wire field name of this end
    pub fn field_name(&self) -> &'static str {
        match self {
            EndPosition::One => "endDef1",
            EndPosition::Two => "endDef2",
        }
    }
}

impl fmt::Display for EndPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// One side of a relationship def
///
/// Names the participating entity type and the attribute the relationship
/// injects into instances of that type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEndDef {
    /// Entity type name
    #[serde(rename = "type")]
    pub type_name: String,

    /// Attribute name injected into instances of `type_name`
    pub name: String,

    /// How many related instances the injected attribute holds
    #[serde(default)]
    pub cardinality: Cardinality,

    /// Whether this end is the container in a containment relationship
    #[serde(default)]
    pub is_container: bool,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the injected attribute replaces a legacy attribute of the same name
    #[serde(default)]
    pub is_legacy_attribute: bool,
}

impl RelationshipEndDef {
    /// Create a non-container end
    pub fn new(
        type_name: impl Into<String>,
        name: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            cardinality,
            is_container: false,
            description: None,
            is_legacy_attribute: false,
        }
    }

    /// Create a container end
    pub fn container(
        type_name: impl Into<String>,
        name: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            is_container: true,
            ..Self::new(type_name, name, cardinality)
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the injected attribute as replacing a legacy attribute
    pub fn legacy(mut self) -> Self {
        self.is_legacy_attribute = true;
        self
    }
}

impl fmt::Display for RelationshipEndDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RelationshipEndDef{{type='{}', name='{}', description={}, isContainer={}, \
             cardinality={}, isLegacyAttribute={}}}",
            self.type_name,
            self.name,
            Quoted(&self.description),
            self.is_container,
            self.cardinality,
            self.is_legacy_attribute
        )
    }
}
