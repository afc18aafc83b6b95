//! Typesys Domain Layer
//!
//! Value types for a metadata type system: the typedef header, attribute
//! definitions, the struct base shared by struct-like typedefs, and the
//! relationship typedef that connects two entity types.
//!
//! ## Key Concepts
//!
//! - **RelationshipDef**: how two entity types may be connected, which
//!   attributes the connection carries, and how classification tags flow
//!   across it
//! - **RelationshipEndDef**: one side of a relationship; names the entity
//!   type and the attribute injected into its instances
//! - **RelationshipCategory**: association, aggregation or composition
//! - **PropagateTags**: direction in which tags propagate
//! - **TypeDef**: tagged union over every kind of typedef
//!
//! ## Architecture
//!
//! - Pure values only: no I/O, no registry, no validation
//! - Typedefs are immutable; updates return new values
//! - Rule checking lives in `typesys-gatekeeper`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod category;
pub mod end;
pub mod header;
pub mod relationship;
pub mod structdef;
pub mod typedef;

// Re-exports for convenience
pub use attribute::{is_primitive_type, AttributeDef, Cardinality};
pub use category::TypeCategory;
pub use end::{EndPosition, RelationshipEndDef};
pub use header::{TypeDefGuid, TypeDefHeader};
pub use relationship::{PropagateTags, RelationshipCategory, RelationshipDef};
pub use structdef::StructDef;
pub use typedef::{ClassificationDef, EntityDef, EnumDef, EnumElementDef, TypeDef, TypesDef};
