//! OCSF schema records
//!
//! In-memory model of the schema export served by an OCSF server
//! (`/export/schema`). Records are decoded once per run and treated as
//! immutable afterwards.
//!
//! The JSON document uses two special property names, `@deprecated` and
//! `$include`; serde renames map them to `deprecated` and `include` on every
//! record that carries them.

pub mod json;
pub mod source;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub use json::{from_file, from_json, to_json};
pub use source::{LocalSchemaSource, SchemaSource};

/// Key of a class, object, type or attribute
pub type OcsfName = String;

/// Key of an enum member (the enumerated value, as a string)
pub type OcsfEnumValue = String;

/// Attributes keyed by name
pub type OcsfAttributes = BTreeMap<OcsfName, OcsfAttr>;

/// Enum members keyed by value
pub type OcsfEnum = BTreeMap<OcsfEnumValue, OcsfEnumMember>;

/// A property that may hold either one string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for StringOrList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringOrList::One(s) => write!(f, "{}", s),
            StringOrList::Many(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Kind of top-level element that owns attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OcsfElementType {
    Event,
    Object,
}

impl fmt::Display for OcsfElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event => write!(f, "Event"),
            Self::Object => write!(f, "Object"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcsfDeprecationInfo {
    pub message: String,
    pub since: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcsfEnumMember {
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OcsfEnumMember {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            description: None,
            notes: None,
        }
    }
}

/// An attribute of a class or object, or an entry of the attribute dictionary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcsfAttr {
    #[serde(rename = "$include", skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<OcsfEnum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub is_array: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observable: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sibling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<StringOrList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    #[serde(rename = "@deprecated", skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<OcsfDeprecationInfo>,
}

/// A data type from the `types` section of the schema
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcsfType {
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_array: bool,
    #[serde(rename = "@deprecated", skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<OcsfDeprecationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observable: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
}

/// A reusable object definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcsfObject {
    pub caption: String,
    pub name: OcsfName,
    #[serde(default)]
    pub attributes: OcsfAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observable: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, rename = "$include", skip_serializing_if = "Option::is_none")]
    pub include: Option<StringOrList>,
    #[serde(default, rename = "@deprecated", skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<OcsfDeprecationInfo>,
}

/// An event class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcsfEvent {
    pub caption: String,
    pub name: OcsfName,
    #[serde(default)]
    pub attributes: OcsfAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associations: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, rename = "$include", skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(default, rename = "@deprecated", skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<OcsfDeprecationInfo>,
}

impl OcsfEvent {
    pub fn new(name: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            name: name.into(),
            attributes: OcsfAttributes::new(),
            description: None,
            uid: None,
            category: None,
            extends: None,
            profiles: None,
            associations: None,
            constraints: None,
            include: None,
            deprecated: None,
        }
    }
}

impl OcsfObject {
    pub fn new(name: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            name: name.into(),
            attributes: OcsfAttributes::new(),
            description: None,
            extends: None,
            observable: None,
            profiles: None,
            constraints: None,
            include: None,
            deprecated: None,
        }
    }
}

/// A complete schema export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcsfSchema {
    pub version: String,
    #[serde(default)]
    pub classes: BTreeMap<OcsfName, OcsfEvent>,
    #[serde(default)]
    pub objects: BTreeMap<OcsfName, OcsfObject>,
    #[serde(default)]
    pub types: BTreeMap<OcsfName, OcsfType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_event: Option<OcsfEvent>,
}

impl OcsfSchema {
    /// An empty schema with the given version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            classes: BTreeMap::new(),
            objects: BTreeMap::new(),
            types: BTreeMap::new(),
            base_event: None,
        }
    }
}
