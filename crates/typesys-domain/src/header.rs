//! Identity and descriptive fields shared by every typedef

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Registry-assigned identifier for a typedef, based on UUIDv7
///
/// Typedefs are primarily identified by name; the guid is the second handle
/// a registry hands out once the definition has been stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeDefGuid(uuid::Uuid);

impl TypeDefGuid {
    /// Generate a new UUIDv7-based guid
    ///
    /// # Examples
    ///
    /// ```
    /// use typesys_domain::TypeDefGuid;
    ///
    /// let a = TypeDefGuid::new();
    /// let b = TypeDefGuid::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse a guid from its hyphenated string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid typedef guid: {}", e))
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for TypeDefGuid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TypeDefGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Header fields common to all typedefs
///
/// An unset name is the empty string and is omitted on the wire, as are an
/// unset guid, description, type version and an empty options map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    guid: Option<TypeDefGuid>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    type_version: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    options: BTreeMap<String, String>,
}

impl TypeDefHeader {
    /// Create a header with a name and no other fields set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a header with name, description and type version
    ///
    /// Pass `None` to leave description or type version unset.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<Option<String>>,
        type_version: impl Into<Option<String>>,
    ) -> Self {
        Self {
            guid: None,
            name: name.into(),
            description: description.into(),
            type_version: type_version.into(),
            options: BTreeMap::new(),
        }
    }

    /// Registry guid, if one was assigned
    pub fn guid(&self) -> Option<&TypeDefGuid> {
        self.guid.as_ref()
    }

    /// Type name (empty when unset)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional type version
    pub fn type_version(&self) -> Option<&str> {
        self.type_version.as_deref()
    }

    /// Free-form string options
    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    /// Look up a single option
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Replace the guid
    pub fn with_guid(mut self, guid: impl Into<Option<TypeDefGuid>>) -> Self {
        self.guid = guid.into();
        self
    }

    /// Replace the description
    pub fn with_description(mut self, description: impl Into<Option<String>>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the type version
    pub fn with_type_version(mut self, type_version: impl Into<Option<String>>) -> Self {
        self.type_version = type_version.into();
        self
    }

    /// Set one option, replacing any previous value for the key
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for TypeDefHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "guid={}, name='{}', description={}, typeVersion={}, options={:?}",
            OrNull(&self.guid),
            self.name,
            Quoted(&self.description),
            Quoted(&self.type_version),
            self.options
        )
    }
}

/// Renders `None` as `null` and `Some(v)` with `v`'s `Display`
pub(crate) struct OrNull<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrNull<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("null"),
        }
    }
}

/// Like [`OrNull`] but wraps present values in single quotes
pub(crate) struct Quoted<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for Quoted<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "'{}'", value),
            None => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_display_and_parse() {
        let guid = TypeDefGuid::new();
        let guid_str = guid.to_string();
        assert_eq!(guid_str.len(), 36);

        let parsed = TypeDefGuid::from_string(&guid_str).unwrap();
        assert_eq!(guid, parsed);
    }

    #[test]
    fn test_guid_invalid_string() {
        assert!(TypeDefGuid::from_string("not-a-guid").is_err());
        assert!(TypeDefGuid::from_string("").is_err());
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let header = TypeDefHeader::named("hive_table_columns");
        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(json, r#"{"name":"hive_table_columns"}"#);
    }

    #[test]
    fn test_guid_serializes_as_string() {
        let guid = TypeDefGuid::new();
        let header = TypeDefHeader::named("t").with_guid(guid);
        let value = serde_json::to_value(&header).unwrap();
        assert_eq!(value["guid"], serde_json::Value::String(guid.to_string()));
    }

    #[test]
    fn test_display_renders_unset_as_null() {
        let header = TypeDefHeader::named("t").with_option("schemaElementsAttribute", "columns");
        assert_eq!(
            header.to_string(),
            "guid=null, name='t', description=null, typeVersion=null, \
             options={\"schemaElementsAttribute\": \"columns\"}"
        );
    }
}
