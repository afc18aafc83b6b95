//! Type categories and the wire discriminator that pins them

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Category of a type definition
///
/// The wire `category` field of every typedef record carries one of these
/// tokens. Only `ENUM`, `STRUCT`, `CLASSIFICATION`, `ENTITY` and
/// `RELATIONSHIP` have typedef records of their own; the rest name built-in
/// or derived types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TypeCategory {
    /// Built-in scalar (string, int, date, ...)
    Primitive = 0,

    /// Array of another type
    Array = 1,

    /// Map from one type to another
    Map = 2,

    /// Enumeration of named values
    Enum = 3,

    /// Named record of attributes
    Struct = 4,

    /// Classification (tag) that can be attached to entities
    Classification = 5,

    /// Node-like type in the metadata graph
    Entity = 6,

    /// Connection between two entity types
    Relationship = 7,
}

impl TypeCategory {
    /// Wire token for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCategory::Primitive => "PRIMITIVE",
            TypeCategory::Array => "ARRAY",
            TypeCategory::Map => "MAP",
            TypeCategory::Enum => "ENUM",
            TypeCategory::Struct => "STRUCT",
            TypeCategory::Classification => "CLASSIFICATION",
            TypeCategory::Entity => "ENTITY",
            TypeCategory::Relationship => "RELATIONSHIP",
        }
    }

    /// Parse a category from its wire token (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PRIMITIVE" => Some(TypeCategory::Primitive),
            "ARRAY" => Some(TypeCategory::Array),
            "MAP" => Some(TypeCategory::Map),
            "ENUM" => Some(TypeCategory::Enum),
            "STRUCT" => Some(TypeCategory::Struct),
            "CLASSIFICATION" => Some(TypeCategory::Classification),
            "ENTITY" => Some(TypeCategory::Entity),
            "RELATIONSHIP" => Some(TypeCategory::Relationship),
            _ => None,
        }
    }

    /// Numeric code, used as the const parameter of [`CategoryTag`]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`TypeCategory::code`]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TypeCategory::Primitive),
            1 => Some(TypeCategory::Array),
            2 => Some(TypeCategory::Map),
            3 => Some(TypeCategory::Enum),
            4 => Some(TypeCategory::Struct),
            5 => Some(TypeCategory::Classification),
            6 => Some(TypeCategory::Entity),
            7 => Some(TypeCategory::Relationship),
            _ => None,
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TypeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid type category: {}", s))
    }
}

/// Zero-sized `category` field of a typedef record
///
/// Always serializes as the category identified by `CODE`. Deserializing any
/// other token fails; a missing field falls back to `Default`, so the
/// category is implicit on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct CategoryTag<const CODE: u8>;

pub(crate) type EnumTag = CategoryTag<{ TypeCategory::Enum.code() }>;
pub(crate) type ClassificationTag = CategoryTag<{ TypeCategory::Classification.code() }>;
pub(crate) type EntityTag = CategoryTag<{ TypeCategory::Entity.code() }>;
pub(crate) type RelationshipTag = CategoryTag<{ TypeCategory::Relationship.code() }>;

impl<const CODE: u8> Serialize for CategoryTag<CODE> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match TypeCategory::from_code(CODE) {
            Some(category) => category.serialize(serializer),
            None => Err(serde::ser::Error::custom(format!("unknown category code {}", CODE))),
        }
    }
}

impl<'de, const CODE: u8> Deserialize<'de> for CategoryTag<CODE> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let found = TypeCategory::deserialize(deserializer)?;
        if found.code() == CODE {
            return Ok(CategoryTag);
        }

        let expected = TypeCategory::from_code(CODE)
            .map(|c| c.as_str())
            .unwrap_or("<unknown>");
        Err(de::Error::custom(format!(
            "expected category {}, found {}",
            expected, found
        )))
    }
}
