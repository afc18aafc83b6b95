//! The typedef family and the bundle record that carries it
//!
//! [`TypeDef`] is a tagged union over the five kinds of typedef. On the wire
//! each variant is a record whose `category` field selects the kind.

use crate::category::{ClassificationTag, EntityTag, EnumTag, TypeCategory};
use crate::header::TypeDefHeader;
use crate::relationship::RelationshipDef;
use crate::structdef::StructDef;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// One named value of an enum typedef
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumElementDef {
    /// Element value
    pub value: String,

    /// Position of the element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<i32>,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnumElementDef {
    /// Create an element with an ordinal
    pub fn new(value: impl Into<String>, ordinal: i32) -> Self {
        Self {
            value: value.into(),
            ordinal: Some(ordinal),
            description: None,
        }
    }
}

/// Enumeration typedef
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    #[serde(default)]
    category: EnumTag,

    #[serde(flatten)]
    header: TypeDefHeader,

    #[serde(default)]
    element_defs: Vec<EnumElementDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
}

impl EnumDef {
    /// Create an enum def from a header and its elements
    pub fn new(header: TypeDefHeader, element_defs: Vec<EnumElementDef>) -> Self {
        Self {
            category: EnumTag::default(),
            header,
            element_defs,
            default_value: None,
        }
    }

    /// Header fields
    pub fn header(&self) -> &TypeDefHeader {
        &self.header
    }

    /// Type name
    pub fn name(&self) -> &str {
        self.header.name()
    }

    /// Elements, in declaration order
    pub fn element_defs(&self) -> &[EnumElementDef] {
        &self.element_defs
    }

    /// Look up an element by value
    pub fn element(&self, value: &str) -> Option<&EnumElementDef> {
        self.element_defs.iter().find(|e| e.value == value)
    }

    /// Default value, if declared
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Replace the default value
    pub fn with_default_value(mut self, default_value: impl Into<Option<String>>) -> Self {
        self.default_value = default_value.into();
        self
    }
}

/// Classification (tag) typedef
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationDef {
    #[serde(default)]
    category: ClassificationTag,

    #[serde(flatten)]
    base: StructDef,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    super_types: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    entity_types: BTreeSet<String>,
}

impl ClassificationDef {
    /// Create a classification def over a struct base
    pub fn new(base: StructDef) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Struct base
    pub fn as_struct_def(&self) -> &StructDef {
        &self.base
    }

    /// Type name
    pub fn name(&self) -> &str {
        self.base.name()
    }

    /// Names of classification super types
    pub fn super_types(&self) -> &BTreeSet<String> {
        &self.super_types
    }

    /// Entity types this classification may be attached to (empty means any)
    pub fn entity_types(&self) -> &BTreeSet<String> {
        &self.entity_types
    }

    /// Add a super type
    pub fn with_super_type(mut self, super_type: impl Into<String>) -> Self {
        self.super_types.insert(super_type.into());
        self
    }

    /// Restrict the classification to an entity type
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_types.insert(entity_type.into());
        self
    }
}

/// Entity typedef
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDef {
    #[serde(default)]
    category: EntityTag,

    #[serde(flatten)]
    base: StructDef,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    super_types: BTreeSet<String>,
}

impl EntityDef {
    /// Create an entity def over a struct base
    pub fn new(base: StructDef) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Struct base
    pub fn as_struct_def(&self) -> &StructDef {
        &self.base
    }

    /// Type name
    pub fn name(&self) -> &str {
        self.base.name()
    }

    /// Names of entity super types
    pub fn super_types(&self) -> &BTreeSet<String> {
        &self.super_types
    }

    /// Add a super type
    pub fn with_super_type(mut self, super_type: impl Into<String>) -> Self {
        self.super_types.insert(super_type.into());
        self
    }
}

/// Any typedef
///
/// Values of different variants never compare equal, even when their common
/// fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDef {
    /// Enumeration
    Enum(EnumDef),

    /// Plain struct
    Struct(StructDef),

    /// Classification
    Classification(ClassificationDef),

    /// Entity
    Entity(EntityDef),

    /// Relationship
    Relationship(RelationshipDef),
}

impl TypeDef {
    /// Category of this typedef
    pub fn category(&self) -> TypeCategory {
        match self {
            TypeDef::Enum(_) => TypeCategory::Enum,
            TypeDef::Struct(_) => TypeCategory::Struct,
            TypeDef::Classification(_) => TypeCategory::Classification,
            TypeDef::Entity(_) => TypeCategory::Entity,
            TypeDef::Relationship(_) => TypeCategory::Relationship,
        }
    }

    /// Type name
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Enum(def) => def.name(),
            TypeDef::Struct(def) => def.name(),
            TypeDef::Classification(def) => def.name(),
            TypeDef::Entity(def) => def.name(),
            TypeDef::Relationship(def) => def.name(),
        }
    }

    /// The relationship def, if this is one
    pub fn as_relationship(&self) -> Option<&RelationshipDef> {
        match self {
            TypeDef::Relationship(def) => Some(def),
            _ => None,
        }
    }
}

/// Plain struct defs carry no tag of their own, so one is added here
#[derive(Serialize)]
struct TaggedStruct<'a> {
    category: TypeCategory,

    #[serde(flatten)]
    def: &'a StructDef,
}

impl Serialize for TypeDef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypeDef::Enum(def) => def.serialize(serializer),
            TypeDef::Struct(def) => TaggedStruct {
                category: TypeCategory::Struct,
                def,
            }
            .serialize(serializer),
            TypeDef::Classification(def) => def.serialize(serializer),
            TypeDef::Entity(def) => def.serialize(serializer),
            TypeDef::Relationship(def) => def.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TypeDef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = serde_json::Value::deserialize(deserializer)?;
        let category = record
            .get("category")
            .ok_or_else(|| <D::Error as de::Error>::missing_field("category"))?;
        let category = TypeCategory::deserialize(category)
            .map_err(|e| <D::Error as de::Error>::custom(e))?;

        let typedef = match category {
            TypeCategory::Enum => serde_json::from_value(record).map(TypeDef::Enum),
            TypeCategory::Struct => serde_json::from_value(record).map(TypeDef::Struct),
            TypeCategory::Classification => {
                serde_json::from_value(record).map(TypeDef::Classification)
            }
            TypeCategory::Entity => serde_json::from_value(record).map(TypeDef::Entity),
            TypeCategory::Relationship => {
                serde_json::from_value(record).map(TypeDef::Relationship)
            }
            other => {
                return Err(de::Error::custom(format!(
                    "category {} has no typedef record",
                    other
                )))
            }
        };
        typedef.map_err(de::Error::custom)
    }
}

impl From<EnumDef> for TypeDef {
    fn from(def: EnumDef) -> Self {
        TypeDef::Enum(def)
    }
}

impl From<StructDef> for TypeDef {
    fn from(def: StructDef) -> Self {
        TypeDef::Struct(def)
    }
}

impl From<ClassificationDef> for TypeDef {
    fn from(def: ClassificationDef) -> Self {
        TypeDef::Classification(def)
    }
}

impl From<EntityDef> for TypeDef {
    fn from(def: EntityDef) -> Self {
        TypeDef::Entity(def)
    }
}

impl From<RelationshipDef> for TypeDef {
    fn from(def: RelationshipDef) -> Self {
        TypeDef::Relationship(def)
    }
}

/// A batch of typedefs grouped by kind
///
/// This is the record exchanged when registering or exporting several
/// typedefs at once. Empty lists are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesDef {
    /// Enum typedefs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_defs: Vec<EnumDef>,

    /// Struct typedefs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub struct_defs: Vec<StructDef>,

    /// Classification typedefs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classification_defs: Vec<ClassificationDef>,

    /// Entity typedefs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_defs: Vec<EntityDef>,

    /// Relationship typedefs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationship_defs: Vec<RelationshipDef>,
}

impl TypesDef {
    /// Total number of typedefs
    pub fn len(&self) -> usize {
        self.enum_defs.len()
            + self.struct_defs.len()
            + self.classification_defs.len()
            + self.entity_defs.len()
            + self.relationship_defs.len()
    }

    /// Whether the bundle holds no typedefs
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a typedef to the list for its kind
    pub fn push(&mut self, typedef: TypeDef) {
        match typedef {
            TypeDef::Enum(def) => self.enum_defs.push(def),
            TypeDef::Struct(def) => self.struct_defs.push(def),
            TypeDef::Classification(def) => self.classification_defs.push(def),
            TypeDef::Entity(def) => self.entity_defs.push(def),
            TypeDef::Relationship(def) => self.relationship_defs.push(def),
        }
    }

    /// Append every typedef of `other`
    pub fn extend(&mut self, other: TypesDef) {
        self.enum_defs.extend(other.enum_defs);
        self.struct_defs.extend(other.struct_defs);
        self.classification_defs.extend(other.classification_defs);
        self.entity_defs.extend(other.entity_defs);
        self.relationship_defs.extend(other.relationship_defs);
    }

    /// Look up a relationship def by name
    pub fn relationship_def(&self, name: &str) -> Option<&RelationshipDef> {
        self.relationship_defs.iter().find(|d| d.name() == name)
    }

    /// Flatten into individual typedefs, kind by kind
    pub fn into_type_defs(self) -> Vec<TypeDef> {
        let mut typedefs = Vec::with_capacity(self.len());
        typedefs.extend(self.enum_defs.into_iter().map(TypeDef::Enum));
        typedefs.extend(self.struct_defs.into_iter().map(TypeDef::Struct));
        typedefs.extend(self.classification_defs.into_iter().map(TypeDef::Classification));
        typedefs.extend(self.entity_defs.into_iter().map(TypeDef::Entity));
        typedefs.extend(self.relationship_defs.into_iter().map(TypeDef::Relationship));
        typedefs
    }
}

impl FromIterator<TypeDef> for TypesDef {
    fn from_iter<I: IntoIterator<Item = TypeDef>>(iter: I) -> Self {
        let mut types = TypesDef::default();
        for typedef in iter {
            types.push(typedef);
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttributeDef, Cardinality};
    use crate::end::RelationshipEndDef;
    use crate::relationship::{PropagateTags, RelationshipCategory};

    fn table_columns() -> RelationshipDef {
        RelationshipDef::new(
            "table_columns",
            "columns of a table".to_string(),
            "1.0".to_string(),
            RelationshipCategory::Composition,
            PropagateTags::OneToTwo,
            RelationshipEndDef::container("Table", "columns", Cardinality::Set),
            RelationshipEndDef::new("Column", "table", Cardinality::Single),
        )
    }

    fn sample_types() -> TypesDef {
        vec![
            TypeDef::from(EnumDef::new(
                TypeDefHeader::named("column_kind"),
                vec![EnumElementDef::new("KEY", 0), EnumElementDef::new("VALUE", 1)],
            )),
            TypeDef::from(StructDef::named("audit_info")),
            TypeDef::from(ClassificationDef::new(StructDef::named("PII")).with_entity_type("Column")),
            TypeDef::from(EntityDef::new(
                StructDef::named("Table").with_attribute_def(AttributeDef::new("name", "string")),
            )),
            TypeDef::from(EntityDef::new(StructDef::named("Column")).with_super_type("DataSet")),
            TypeDef::from(table_columns()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_category_dispatch() {
        let typedef: TypeDef = serde_json::from_str(
            r#"{"category":"ENTITY","name":"Table","attributeDefs":[],"superTypes":["DataSet"]}"#,
        )
        .unwrap();
        assert_eq!(typedef.category(), TypeCategory::Entity);
        assert_eq!(typedef.name(), "Table");
        assert!(typedef.as_relationship().is_none());
    }

    #[test]
    fn test_missing_category_rejected() {
        let err = serde_json::from_str::<TypeDef>(r#"{"name":"Table"}"#).unwrap_err();
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_non_record_category_rejected() {
        let err = serde_json::from_str::<TypeDef>(r#"{"category":"ARRAY","name":"x"}"#).unwrap_err();
        assert!(err.to_string().contains("has no typedef record"));
    }

    #[test]
    fn test_every_variant_round_trips() {
        for typedef in sample_types().into_type_defs() {
            let json = serde_json::to_value(&typedef).unwrap();
            assert_eq!(json["category"], typedef.category().as_str());

            let decoded: TypeDef = serde_json::from_value(json).unwrap();
            assert_eq!(decoded, typedef);
        }
    }

    #[test]
    fn test_variants_are_nominal() {
        let as_struct = TypeDef::from(StructDef::named("Table"));
        let as_entity = TypeDef::from(EntityDef::new(StructDef::named("Table")));
        assert_ne!(as_struct, as_entity);
    }

    #[test]
    fn test_types_def_bundle() {
        let types = sample_types();
        assert_eq!(types.len(), 6);
        assert_eq!(types.entity_defs.len(), 2);
        assert!(types.relationship_def("table_columns").is_some());

        let json = serde_json::to_string(&types).unwrap();
        let decoded: TypesDef = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, types);
    }

    #[test]
    fn test_empty_bundle_is_empty_object() {
        let types = TypesDef::default();
        assert!(types.is_empty());
        assert_eq!(serde_json::to_string(&types).unwrap(), "{}");
    }

    #[test]
    fn test_extend() {
        let mut types = TypesDef::default();
        types.extend(sample_types());
        types.extend(sample_types());
        assert_eq!(types.len(), 12);
    }
}
