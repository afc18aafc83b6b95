//! Struct typedef: a header plus an ordered list of attribute definitions
//!
//! `StructDef` is also the base value embedded in classification, entity and
//! relationship typedefs. It carries no `category` field of its own; the
//! embedding typedef (or [`crate::TypeDef`]) supplies it on the wire.

use crate::attribute::AttributeDef;
use crate::header::{TypeDefGuid, TypeDefHeader};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header and attribute definitions of a struct-like typedef
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructDef {
    #[serde(flatten)]
    header: TypeDefHeader,

    #[serde(default)]
    attribute_defs: Vec<AttributeDef>,
}

impl StructDef {
    /// Create a struct def from a header and attributes
    pub fn new(header: TypeDefHeader, attribute_defs: Vec<AttributeDef>) -> Self {
        Self {
            header,
            attribute_defs,
        }
    }

    /// Create a struct def with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TypeDefHeader::named(name), Vec::new())
    }

    /// Header fields
    pub fn header(&self) -> &TypeDefHeader {
        &self.header
    }

    /// Type name
    pub fn name(&self) -> &str {
        self.header.name()
    }

    /// Attribute definitions, in declaration order
    pub fn attribute_defs(&self) -> &[AttributeDef] {
        &self.attribute_defs
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attribute_defs.iter().find(|a| a.name == name)
    }

    /// Whether an attribute with this name is declared
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Replace the header
    pub fn with_header(mut self, header: TypeDefHeader) -> Self {
        self.header = header;
        self
    }

    /// Replace the guid
    pub fn with_guid(mut self, guid: impl Into<Option<TypeDefGuid>>) -> Self {
        self.header = self.header.with_guid(guid);
        self
    }

    /// Replace all attribute definitions
    pub fn with_attribute_defs(mut self, attribute_defs: Vec<AttributeDef>) -> Self {
        self.attribute_defs = attribute_defs;
        self
    }

    /// Add an attribute, replacing an existing one with the same name in place
    pub fn with_attribute_def(mut self, attribute_def: AttributeDef) -> Self {
        match self
            .attribute_defs
            .iter_mut()
            .find(|a| a.name == attribute_def.name)
        {
            Some(existing) => *existing = attribute_def,
            None => self.attribute_defs.push(attribute_def),
        }
        self
    }

    /// Remove an attribute by name (no-op when absent)
    pub fn without_attribute(mut self, name: &str) -> Self {
        self.attribute_defs.retain(|a| a.name != name);
        self
    }
}

impl fmt::Display for StructDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StructDef{{{}, attributeDefs=[", self.header)?;
        for (i, attr) in self.attribute_defs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", attr)?;
        }
        f.write_str("]}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_attrs() -> Vec<AttributeDef> {
        vec![
            AttributeDef::new("name", "string").required(),
            AttributeDef::new("position", "int"),
        ]
    }

    #[test]
    fn test_attribute_lookup() {
        let def = StructDef::new(TypeDefHeader::named("column"), column_attrs());
        assert!(def.has_attribute("position"));
        assert!(!def.has_attribute("owner"));
        assert_eq!(def.attribute("name").unwrap().type_name, "string");
    }

    #[test]
    fn test_with_attribute_replaces_by_name() {
        let def = StructDef::new(TypeDefHeader::named("column"), column_attrs())
            .with_attribute_def(AttributeDef::new("position", "long"))
            .with_attribute_def(AttributeDef::new("comment", "string"));

        let names: Vec<&str> = def.attribute_defs().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["name", "position", "comment"]);
        assert_eq!(def.attribute("position").unwrap().type_name, "long");
    }

    #[test]
    fn test_without_attribute() {
        let def = StructDef::new(TypeDefHeader::named("column"), column_attrs())
            .without_attribute("name")
            .without_attribute("missing");
        assert_eq!(def.attribute_defs().len(), 1);
    }

    #[test]
    fn test_attribute_order_matters_for_equality() {
        let mut reversed = column_attrs();
        reversed.reverse();
        let a = StructDef::new(TypeDefHeader::named("column"), column_attrs());
        let b = StructDef::new(TypeDefHeader::named("column"), reversed);
        assert_ne!(a, b);
    }

    #[test]
    fn test_attribute_defs_always_written() {
        let json = serde_json::to_string(&StructDef::named("empty")).unwrap();
        assert_eq!(json, r#"{"name":"empty","attributeDefs":[]}"#);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let def: StructDef = serde_json::from_str(
            r#"{"name":"empty","createdBy":"admin","attributeDefs":[]}"#,
        )
        .unwrap();
        assert_eq!(def, StructDef::named("empty"));
    }
}
