//! Difference records for every OCSF record kind

use serde::Serialize;
use serde_json::Value;

use super::descriptor::{Record, RecordKind};
use super::summary::{ChangeEntry, DiffNode};
use crate::error::{OcsfError, Result};
use crate::schema::{
    OcsfAttr, OcsfDeprecationInfo, OcsfEnumMember, OcsfEvent, OcsfObject, OcsfSchema, OcsfType,
    StringOrList,
};

changed_record! {
    /// Difference of two schema exports
    OcsfSchema => ChangedSchema (RecordKind::Schema) {
        version: scalar String,
        classes: record_map OcsfEvent,
        objects: record_map OcsfObject,
        types: record_map OcsfType,
        base_event: optional_record OcsfEvent,
    }
}

changed_record! {
    OcsfEvent => ChangedEvent (RecordKind::Event) {
        caption: scalar String,
        name: scalar String,
        attributes: record_map OcsfAttr,
        description: optional_scalar String,
        uid: optional_scalar i64,
        category: optional_scalar String,
        extends: optional_scalar String,
        profiles: optional_scalar Vec<String>,
        associations: optional_scalar_map Vec<String>,
        constraints: optional_scalar_map Vec<String>,
        include as "$include": optional_scalar String,
        deprecated as "@deprecated": optional_record OcsfDeprecationInfo,
    }
}

changed_record! {
    OcsfObject => ChangedObject (RecordKind::Object) {
        caption: scalar String,
        name: scalar String,
        attributes: record_map OcsfAttr,
        description: optional_scalar String,
        extends: optional_scalar String,
        observable: optional_scalar i64,
        profiles: optional_scalar Vec<String>,
        constraints: optional_scalar_map Vec<String>,
        include as "$include": optional_scalar StringOrList,
        deprecated as "@deprecated": optional_record OcsfDeprecationInfo,
    }
}

changed_record! {
    /// Difference of two attributes
    OcsfAttr => ChangedAttr (RecordKind::Attr) {
        include as "$include": optional_scalar String,
        caption: optional_scalar String,
        default: optional_scalar Value,
        description: optional_scalar String,
        r#enum as "enum": optional_record_map OcsfEnumMember,
        group: optional_scalar String,
        is_array: scalar bool,
        max_len: optional_scalar i64,
        name: optional_scalar String,
        notes: optional_scalar String,
        observable: optional_scalar i64,
        range: optional_scalar Vec<i64>,
        regex: optional_scalar String,
        requirement: optional_scalar String,
        sibling: optional_scalar String,
        r#type as "type": optional_scalar String,
        type_name: optional_scalar String,
        profile: optional_scalar StringOrList,
        values: optional_scalar Vec<Value>,
        deprecated as "@deprecated": optional_record OcsfDeprecationInfo,
    }
}

changed_record! {
    OcsfEnumMember => ChangedEnumMember (RecordKind::EnumMember) {
        caption: scalar String,
        description: optional_scalar String,
        notes: optional_scalar String,
    }
}

changed_record! {
    OcsfDeprecationInfo => ChangedDeprecationInfo (RecordKind::DeprecationInfo) {
        message: scalar String,
        since: scalar String,
    }
}

changed_record! {
    OcsfType => ChangedType (RecordKind::Type) {
        caption: scalar String,
        description: optional_scalar String,
        is_array: scalar bool,
        deprecated as "@deprecated": optional_record OcsfDeprecationInfo,
        max_len: optional_scalar i64,
        observable: optional_scalar i64,
        range: optional_scalar Vec<i64>,
        regex: optional_scalar String,
        r#type as "type": optional_scalar String,
        type_name: optional_scalar String,
        values: optional_scalar Vec<Value>,
    }
}

/// Compare two schema exports
pub fn compare_schemas(old: &OcsfSchema, new: &OcsfSchema) -> ChangedSchema {
    tracing::debug!(old = %old.version, new = %new.version, "Comparing schemas");
    OcsfSchema::between(old, new)
}

/// Any comparable record, for callers that only know the kind at runtime
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum OcsfModel {
    Schema(OcsfSchema),
    Event(OcsfEvent),
    Object(OcsfObject),
    Attr(OcsfAttr),
    EnumMember(OcsfEnumMember),
    DeprecationInfo(OcsfDeprecationInfo),
    Type(OcsfType),
}

/// Difference of two records of the same kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ChangedModel {
    Schema(ChangedSchema),
    Event(ChangedEvent),
    Object(ChangedObject),
    Attr(ChangedAttr),
    EnumMember(ChangedEnumMember),
    DeprecationInfo(ChangedDeprecationInfo),
    Type(ChangedType),
}

impl OcsfModel {
    pub fn kind(&self) -> RecordKind {
        match self {
            OcsfModel::Schema(_) => RecordKind::Schema,
            OcsfModel::Event(_) => RecordKind::Event,
            OcsfModel::Object(_) => RecordKind::Object,
            OcsfModel::Attr(_) => RecordKind::Attr,
            OcsfModel::EnumMember(_) => RecordKind::EnumMember,
            OcsfModel::DeprecationInfo(_) => RecordKind::DeprecationInfo,
            OcsfModel::Type(_) => RecordKind::Type,
        }
    }
}

impl ChangedModel {
    pub fn kind(&self) -> RecordKind {
        match self {
            ChangedModel::Schema(_) => RecordKind::Schema,
            ChangedModel::Event(_) => RecordKind::Event,
            ChangedModel::Object(_) => RecordKind::Object,
            ChangedModel::Attr(_) => RecordKind::Attr,
            ChangedModel::EnumMember(_) => RecordKind::EnumMember,
            ChangedModel::DeprecationInfo(_) => RecordKind::DeprecationInfo,
            ChangedModel::Type(_) => RecordKind::Type,
        }
    }

    fn node(&self) -> &dyn DiffNode {
        match self {
            ChangedModel::Schema(diff) => diff,
            ChangedModel::Event(diff) => diff,
            ChangedModel::Object(diff) => diff,
            ChangedModel::Attr(diff) => diff,
            ChangedModel::EnumMember(diff) => diff,
            ChangedModel::DeprecationInfo(diff) => diff,
            ChangedModel::Type(diff) => diff,
        }
    }
}

impl DiffNode for ChangedModel {
    fn collect_into(&self, path: &mut Vec<String>, out: &mut Vec<ChangeEntry>) {
        self.node().collect_into(path, out);
    }

    fn is_unchanged(&self) -> bool {
        self.node().is_unchanged()
    }
}

/// Compare two records whose kind is only known at runtime.
///
/// Records of different kinds cannot be compared and fail with
/// [`OcsfError::KindMismatch`].
pub fn compare_models(old: &OcsfModel, new: &OcsfModel) -> Result<ChangedModel> {
    let changed = match (old, new) {
        (OcsfModel::Schema(old), OcsfModel::Schema(new)) => {
            ChangedModel::Schema(OcsfSchema::between(old, new))
        }
        (OcsfModel::Event(old), OcsfModel::Event(new)) => {
            ChangedModel::Event(OcsfEvent::between(old, new))
        }
        (OcsfModel::Object(old), OcsfModel::Object(new)) => {
            ChangedModel::Object(OcsfObject::between(old, new))
        }
        (OcsfModel::Attr(old), OcsfModel::Attr(new)) => {
            ChangedModel::Attr(OcsfAttr::between(old, new))
        }
        (OcsfModel::EnumMember(old), OcsfModel::EnumMember(new)) => {
            ChangedModel::EnumMember(OcsfEnumMember::between(old, new))
        }
        (OcsfModel::DeprecationInfo(old), OcsfModel::DeprecationInfo(new)) => {
            ChangedModel::DeprecationInfo(OcsfDeprecationInfo::between(old, new))
        }
        (OcsfModel::Type(old), OcsfModel::Type(new)) => {
            ChangedModel::Type(OcsfType::between(old, new))
        }
        _ => {
            return Err(OcsfError::KindMismatch {
                old: old.kind(),
                new: new.kind(),
            })
        }
    };
    Ok(changed)
}
