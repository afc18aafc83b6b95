//! Loading typedef files.
//!
//! A file holds one of:
//! - a `TypesDef` bundle (`{"relationshipDefs": [...], ...}`)
//! - a single typedef record; without a `category` it is read as a
//!   relationship def
//! - an array of typedef records

use crate::error::{CliError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use typesys_domain::{RelationshipDef, TypeDef, TypesDef};

const BUNDLE_KEYS: [&str; 5] = [
    "enumDefs",
    "structDefs",
    "classificationDefs",
    "entityDefs",
    "relationshipDefs",
];

/// Load every typedef in `paths` into one bundle, in file order.
pub fn load_files(paths: &[impl AsRef<Path>]) -> Result<TypesDef> {
    let mut types = TypesDef::default();
    for path in paths {
        types.extend(load_file(path.as_ref())?);
    }
    Ok(types)
}

/// Load the typedefs in a single file.
pub fn load_file(path: &Path) -> Result<TypesDef> {
    let contents = fs::read_to_string(path)?;
    let types = parse(&contents).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    if types.relationship_defs.is_empty() {
        warn!("No relationship defs in {}", path.display());
    }
    debug!("Loaded {} typedef(s) from {}", types.len(), path.display());
    Ok(types)
}

/// Decode typedefs from JSON text.
pub fn parse(contents: &str) -> serde_json::Result<TypesDef> {
    let value: Value = serde_json::from_str(contents)?;

    let (is_record, is_bundle) = match &value {
        Value::Object(record) => (
            record.contains_key("category"),
            BUNDLE_KEYS.iter().any(|k| record.contains_key(*k)),
        ),
        _ => (false, false),
    };

    if value.is_array() {
        let records: Vec<TypeDef> = serde_json::from_value(value)?;
        Ok(records.into_iter().collect())
    } else if is_record {
        let typedef: TypeDef = serde_json::from_value(value)?;
        Ok(std::iter::once(typedef).collect())
    } else if is_bundle {
        serde_json::from_value(value)
    } else {
        let def: RelationshipDef = serde_json::from_value(value)?;
        Ok(std::iter::once(TypeDef::from(def)).collect())
    }
}
