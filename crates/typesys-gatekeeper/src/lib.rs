//! Typesys Gatekeeper
//!
//! Checks relationship defs before they are registered.
//!
//! The Gatekeeper provides:
//! - Header checks (name, relationship category)
//! - End checks (presence, completeness, cardinality)
//! - Containment rules per relationship category
//! - Detection of tags propagating from a child up to its container
//!
//! # Examples
//!
//! ```
//! use typesys_domain::{Cardinality, PropagateTags, RelationshipCategory, RelationshipDef, RelationshipEndDef};
//! use typesys_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let def = RelationshipDef::new(
//!     "table_columns",
//!     "columns of a table".to_string(),
//!     "1.0".to_string(),
//!     RelationshipCategory::Composition,
//!     PropagateTags::OneToTwo,
//!     RelationshipEndDef::container("Table", "columns", Cardinality::Set),
//!     RelationshipEndDef::new("Column", "table", Cardinality::Single),
//! );
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! assert!(gatekeeper.validate(&def).is_accepted());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::{PropagationPolicy, ValidationConfig};
pub use error::GatekeeperError;
pub use validator::{Gatekeeper, RejectionReason, ValidationResult, ValidationStatus};
