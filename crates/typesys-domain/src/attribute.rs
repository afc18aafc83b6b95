//! Attribute definitions

use crate::header::Quoted;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in primitive type names
pub const PRIMITIVE_TYPE_NAMES: [&str; 11] = [
    "boolean",
    "byte",
    "short",
    "int",
    "long",
    "float",
    "double",
    "biginteger",
    "bigdecimal",
    "string",
    "date",
];

/// Whether `type_name` names a built-in primitive type
pub fn is_primitive_type(type_name: &str) -> bool {
    PRIMITIVE_TYPE_NAMES.contains(&type_name)
}

/// How many values an attribute (or relationship end) holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cardinality {
    /// Exactly one value
    #[default]
    Single,

    /// Ordered values, duplicates allowed
    List,

    /// Unordered distinct values
    Set,
}

impl Cardinality {
    /// Wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::Single => "SINGLE",
            Cardinality::List => "LIST",
            Cardinality::Set => "SET",
        }
    }

    /// Whether more than one value may be held
    pub fn is_multi_valued(&self) -> bool {
        !matches!(self, Cardinality::Single)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of a single attribute on a struct-like typedef
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDef {
    /// Attribute name
    pub name: String,

    /// Name of the attribute's type
    pub type_name: String,

    /// Whether instances may omit a value
    #[serde(default = "default_is_optional")]
    pub is_optional: bool,

    /// Value cardinality
    #[serde(default)]
    pub cardinality: Cardinality,

    /// Minimum number of values (multi-valued attributes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_min_count: Option<u32>,

    /// Maximum number of values (multi-valued attributes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_max_count: Option<u32>,

    /// Whether values must be unique across instances
    #[serde(default)]
    pub is_unique: bool,

    /// Whether the attribute should be indexed
    #[serde(default)]
    pub is_indexable: bool,

    /// Default value, in its string form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_is_optional() -> bool {
    true
}

impl AttributeDef {
    /// Create an optional single-valued attribute
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_optional: true,
            cardinality: Cardinality::Single,
            values_min_count: None,
            values_max_count: None,
            is_unique: false,
            is_indexable: false,
            default_value: None,
            description: None,
        }
    }

    /// Mark the attribute as required
    pub fn required(mut self) -> Self {
        self.is_optional = false;
        self
    }

    /// Set the cardinality
    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the declared type is a built-in primitive
    pub fn has_primitive_type(&self) -> bool {
        is_primitive_type(&self.type_name)
    }
}

impl fmt::Display for AttributeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AttributeDef{{name='{}', typeName='{}', isOptional={}, cardinality={}, \
             isUnique={}, isIndexable={}, description={}}}",
            self.name,
            self.type_name,
            self.is_optional,
            self.cardinality,
            self.is_unique,
            self.is_indexable,
            Quoted(&self.description)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_types() {
        assert!(is_primitive_type("string"));
        assert!(is_primitive_type("bigdecimal"));
        assert!(!is_primitive_type("hive_table"));
        assert!(!is_primitive_type("array<string>"));
    }

    #[test]
    fn test_defaults_on_deserialize() {
        let attr: AttributeDef =
            serde_json::from_str(r#"{"name":"createTime","typeName":"date"}"#).unwrap();
        assert_eq!(attr, AttributeDef::new("createTime", "date"));
        assert!(attr.is_optional);
        assert_eq!(attr.cardinality, Cardinality::Single);
    }

    #[test]
    fn test_multi_valued() {
        assert!(!Cardinality::Single.is_multi_valued());
        assert!(Cardinality::List.is_multi_valued());
        assert!(Cardinality::Set.is_multi_valued());
    }

    #[test]
    fn test_display() {
        let attr = AttributeDef::new("position", "int").required();
        assert_eq!(
            attr.to_string(),
            "AttributeDef{name='position', typeName='int', isOptional=false, cardinality=SINGLE, \
             isUnique=false, isIndexable=false, description=null}"
        );
    }
}
