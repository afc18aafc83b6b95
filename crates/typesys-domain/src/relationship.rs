//! Relationship typedefs
//!
//! A relationship def describes how two entity types may be connected. Each
//! end names an entity type and the attribute the relationship injects into
//! instances of that type: with entity `A {attr1, attr2, attr3}` and a
//! relationship whose end 1 is `{type: A, name: attr7}`, instances of `A`
//! expose `attr1..attr3` plus `attr7`. Computing that union is the type
//! registry's job, not this module's.
//!
//! Relationship defs are immutable values. Updates go through the consuming
//! `with_*` methods, which return a new value and leave published copies
//! untouched.

use crate::attribute::AttributeDef;
use crate::category::{RelationshipTag, TypeCategory};
use crate::end::{EndPosition, RelationshipEndDef};
use crate::header::{OrNull, TypeDefGuid, TypeDefHeader};
use crate::structdef::StructDef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Containment and lifecycle style of a relationship (UML terminology)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipCategory {
    /// No containment
    Association,

    /// Containment; container and children have independent lifecycles
    Aggregation,

    /// Containment; children cannot exist without the container
    Composition,
}

impl RelationshipCategory {
    /// All categories, in declaration order
    pub const ALL: [RelationshipCategory; 3] = [
        RelationshipCategory::Association,
        RelationshipCategory::Aggregation,
        RelationshipCategory::Composition,
    ];

    /// Wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipCategory::Association => "ASSOCIATION",
            RelationshipCategory::Aggregation => "AGGREGATION",
            RelationshipCategory::Composition => "COMPOSITION",
        }
    }

    /// Parse from a wire token (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ASSOCIATION" => Some(RelationshipCategory::Association),
            "AGGREGATION" => Some(RelationshipCategory::Aggregation),
            "COMPOSITION" => Some(RelationshipCategory::Composition),
            _ => None,
        }
    }

    /// Whether one end is the logical parent of the other
    pub fn is_containment(&self) -> bool {
        !matches!(self, RelationshipCategory::Association)
    }
}

impl fmt::Display for RelationshipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationshipCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relationship category: {}", s))
    }
}

/// Direction in which classification tags flow across a relationship instance
///
/// For example, confidentiality tags on a table flowing to its columns is
/// `ONE_TO_TWO` (table at end 1); glossary synonyms sharing tags is `BOTH`.
/// How conflicting propagations resolve is not defined here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropagateTags {
    /// Tags do not propagate
    None,

    /// Tags flow from end 1 to end 2
    OneToTwo,

    /// Tags flow from end 2 to end 1
    TwoToOne,

    /// Tags flow both ways
    Both,
}

impl PropagateTags {
    /// All directions, in declaration order
    pub const ALL: [PropagateTags; 4] = [
        PropagateTags::None,
        PropagateTags::OneToTwo,
        PropagateTags::TwoToOne,
        PropagateTags::Both,
    ];

    /// Wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            PropagateTags::None => "NONE",
            PropagateTags::OneToTwo => "ONE_TO_TWO",
            PropagateTags::TwoToOne => "TWO_TO_ONE",
            PropagateTags::Both => "BOTH",
        }
    }

    /// Parse from a wire token (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "NONE" => Some(PropagateTags::None),
            "ONE_TO_TWO" => Some(PropagateTags::OneToTwo),
            "TWO_TO_ONE" => Some(PropagateTags::TwoToOne),
            "BOTH" => Some(PropagateTags::Both),
            _ => None,
        }
    }

    /// Whether tags attached at the other end become visible at `end`
    pub fn flows_toward(&self, end: EndPosition) -> bool {
        match (self, end) {
            (PropagateTags::Both, _) => true,
            (PropagateTags::OneToTwo, EndPosition::Two) => true,
            (PropagateTags::TwoToOne, EndPosition::One) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PropagateTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PropagateTags {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid propagate tags: {}", s))
    }
}

/// A relationship typedef
///
/// Equality and hashing are structural over the struct base (header and
/// attribute list, in order) and the category, propagation and both ends.
/// End position matters: swapping `end_def1` and `end_def2` yields an
/// unequal value.
///
/// # Examples
///
/// ```
/// use typesys_domain::{Cardinality, PropagateTags, RelationshipCategory};
/// use typesys_domain::{RelationshipDef, RelationshipEndDef};
///
/// let def = RelationshipDef::new(
///     "table_columns",
///     "columns of a table".to_string(),
///     "1.0".to_string(),
///     RelationshipCategory::Composition,
///     PropagateTags::OneToTwo,
///     RelationshipEndDef::container("Table", "columns", Cardinality::Set),
///     RelationshipEndDef::new("Column", "table", Cardinality::Single),
/// );
///
/// let copy = def.clone().with_propagate_tags(PropagateTags::None);
/// assert_eq!(def.propagate_tags(), Some(PropagateTags::OneToTwo));
/// assert_ne!(def, copy);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDef {
    #[serde(default)]
    category: RelationshipTag,

    #[serde(flatten)]
    base: StructDef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    relationship_category: Option<RelationshipCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    propagate_tags: Option<PropagateTags>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_def1: Option<RelationshipEndDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_def2: Option<RelationshipEndDef>,
}

impl RelationshipDef {
    /// Create a relationship def with no attributes of its own
    ///
    /// Use [`RelationshipDef::with_attribute_defs`] to add attributes.
    /// Description and type version may be `None`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<Option<String>>,
        type_version: impl Into<Option<String>>,
        relationship_category: RelationshipCategory,
        propagate_tags: PropagateTags,
        end_def1: RelationshipEndDef,
        end_def2: RelationshipEndDef,
    ) -> Self {
        Self {
            category: RelationshipTag::default(),
            base: StructDef::new(
                TypeDefHeader::new(name, description, type_version),
                Vec::new(),
            ),
            relationship_category: Some(relationship_category),
            propagate_tags: Some(propagate_tags),
            end_def1: Some(end_def1),
            end_def2: Some(end_def2),
        }
    }

    /// Copy `other`, or produce the default value when there is nothing to copy
    pub fn copy_of(other: Option<&RelationshipDef>) -> Self {
        other.cloned().unwrap_or_default()
    }

    /// Always [`TypeCategory::Relationship`]
    pub fn category(&self) -> TypeCategory {
        TypeCategory::Relationship
    }

    /// Struct base (header and attribute definitions)
    pub fn as_struct_def(&self) -> &StructDef {
        &self.base
    }

    /// Header fields
    pub fn header(&self) -> &TypeDefHeader {
        self.base.header()
    }

    /// Type name (empty when unset)
    pub fn name(&self) -> &str {
        self.base.name()
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.header().description()
    }

    /// Optional type version
    pub fn type_version(&self) -> Option<&str> {
        self.header().type_version()
    }

    /// Registry guid, if assigned
    pub fn guid(&self) -> Option<&TypeDefGuid> {
        self.header().guid()
    }

    /// Attributes of the relationship instance itself
    pub fn attribute_defs(&self) -> &[AttributeDef] {
        self.base.attribute_defs()
    }

    /// Relationship category, if set
    pub fn relationship_category(&self) -> Option<RelationshipCategory> {
        self.relationship_category
    }

    /// Tag propagation direction, if set
    pub fn propagate_tags(&self) -> Option<PropagateTags> {
        self.propagate_tags
    }

    /// Tag propagation direction, treating unset as [`PropagateTags::None`]
    pub fn propagate_tags_or_default(&self) -> PropagateTags {
        self.propagate_tags.unwrap_or(PropagateTags::None)
    }

    /// First end, if set
    pub fn end_def1(&self) -> Option<&RelationshipEndDef> {
        self.end_def1.as_ref()
    }

    /// Second end, if set
    pub fn end_def2(&self) -> Option<&RelationshipEndDef> {
        self.end_def2.as_ref()
    }

    /// End at `position`, if set
    pub fn end(&self, position: EndPosition) -> Option<&RelationshipEndDef> {
        match position {
            EndPosition::One => self.end_def1(),
            EndPosition::Two => self.end_def2(),
        }
    }

    /// Both ends, in position order
    pub fn ends(&self) -> [Option<&RelationshipEndDef>; 2] {
        [self.end_def1(), self.end_def2()]
    }

    /// The container end, when exactly one end is marked as container
    pub fn container_end(&self) -> Option<EndPosition> {
        let is_container = |end: Option<&RelationshipEndDef>| end.is_some_and(|e| e.is_container);
        match (is_container(self.end_def1()), is_container(self.end_def2())) {
            (true, false) => Some(EndPosition::One),
            (false, true) => Some(EndPosition::Two),
            _ => None,
        }
    }

    /// Replace the header
    pub fn with_header(mut self, header: TypeDefHeader) -> Self {
        self.base = self.base.with_header(header);
        self
    }

    /// Replace the guid
    pub fn with_guid(mut self, guid: impl Into<Option<TypeDefGuid>>) -> Self {
        self.base = self.base.with_guid(guid);
        self
    }

    /// Replace the relationship's own attribute definitions
    pub fn with_attribute_defs(mut self, attribute_defs: Vec<AttributeDef>) -> Self {
        self.base = self.base.with_attribute_defs(attribute_defs);
        self
    }

    /// Add (or replace by name) one attribute definition
    pub fn with_attribute_def(mut self, attribute_def: AttributeDef) -> Self {
        self.base = self.base.with_attribute_def(attribute_def);
        self
    }

    /// Replace (or clear) the relationship category
    pub fn with_relationship_category(
        mut self,
        relationship_category: impl Into<Option<RelationshipCategory>>,
    ) -> Self {
        self.relationship_category = relationship_category.into();
        self
    }

    /// Replace (or clear) the propagation direction
    pub fn with_propagate_tags(mut self, propagate_tags: impl Into<Option<PropagateTags>>) -> Self {
        self.propagate_tags = propagate_tags.into();
        self
    }

    /// Replace (or clear) the first end
    pub fn with_end_def1(mut self, end_def1: impl Into<Option<RelationshipEndDef>>) -> Self {
        self.end_def1 = end_def1.into();
        self
    }

    /// Replace (or clear) the second end
    pub fn with_end_def2(mut self, end_def2: impl Into<Option<RelationshipEndDef>>) -> Self {
        self.end_def2 = end_def2.into();
        self
    }
}

impl fmt::Display for RelationshipDef {
    /// Unset category, propagation or ends render as `null`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RelationshipTypeDef{{{},{},{},{},{}}}",
            self.base,
            OrNull(&self.relationship_category),
            OrNull(&self.propagate_tags),
            OrNull(&self.end_def1),
            OrNull(&self.end_def2)
        )
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::attribute::Cardinality;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn cardinality() -> impl Strategy<Value = Cardinality> {
        prop_oneof![
            Just(Cardinality::Single),
            Just(Cardinality::List),
            Just(Cardinality::Set),
        ]
    }

    fn end_def() -> impl Strategy<Value = RelationshipEndDef> {
        ("[A-Z][a-z]{1,6}", "[a-z]{1,8}", cardinality(), any::<bool>()).prop_map(
            |(type_name, name, cardinality, is_container)| RelationshipEndDef {
                is_container,
                ..RelationshipEndDef::new(type_name, name, cardinality)
            },
        )
    }

    fn relationship_def() -> impl Strategy<Value = RelationshipDef> {
        (
            "[a-z_]{1,12}",
            proptest::option::of(prop::sample::select(RelationshipCategory::ALL.to_vec())),
            proptest::option::of(prop::sample::select(PropagateTags::ALL.to_vec())),
            proptest::option::of(end_def()),
            proptest::option::of(end_def()),
        )
            .prop_map(|(name, category, tags, end1, end2)| {
                RelationshipDef::default()
                    .with_header(TypeDefHeader::named(name))
                    .with_relationship_category(category)
                    .with_propagate_tags(tags)
                    .with_end_def1(end1)
                    .with_end_def2(end2)
            })
    }

    fn hash_of(def: &RelationshipDef) -> u64 {
        let mut hasher = DefaultHasher::new();
        def.hash(&mut hasher);
        hasher.finish()
    }

    proptest! {
        /// Property: equality is reflexive and a copy hashes like its original
        #[test]
        fn test_copy_equal_and_same_hash(def in relationship_def()) {
            let copy = RelationshipDef::copy_of(Some(&def));
            prop_assert_eq!(&def, &def);
            prop_assert_eq!(&def, &copy);
            prop_assert_eq!(hash_of(&def), hash_of(&copy));
        }

        /// Property: equality is symmetric and equal values hash equal
        #[test]
        fn test_equality_symmetric(a in relationship_def(), b in relationship_def()) {
            prop_assert_eq!(a == b, b == a);
            if a == b {
                prop_assert_eq!(hash_of(&a), hash_of(&b));
            }
        }

        /// Property: equality is transitive
        #[test]
        fn test_equality_transitive(def in relationship_def()) {
            let a = def.clone();
            let b = RelationshipDef::copy_of(Some(&def));
            let c: RelationshipDef =
                serde_json::from_str(&serde_json::to_string(&def).unwrap()).unwrap();
            prop_assert!(a == b && b == c);
            prop_assert_eq!(&a, &c);
            prop_assert_eq!(hash_of(&a), hash_of(&c));
        }

        /// Property: swapping two different ends breaks equality
        #[test]
        fn test_swap_sensitivity(def in relationship_def(), e1 in end_def(), e2 in end_def()) {
            prop_assume!(e1 != e2);
            let a = def.clone().with_end_def1(e1.clone()).with_end_def2(e2.clone());
            let b = def.with_end_def1(e2).with_end_def2(e1);
            prop_assert_ne!(a, b);
        }

        /// Property: JSON round trip preserves the value
        #[test]
        fn test_json_round_trip(def in relationship_def()) {
            let json = serde_json::to_string(&def).unwrap();
            let decoded: RelationshipDef = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(def, decoded);
        }
    }
}
