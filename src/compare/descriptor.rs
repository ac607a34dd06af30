//! Static field metadata for comparable records
//!
//! Every record kind publishes its field list at compile time. The list is
//! generated next to the difference struct by `changed_record!`, so the two can
//! never drift apart, and the change summary walks difference records through
//! it by position.

use serde::Serialize;
use std::fmt;

use super::difference::Comparable;

/// The closed set of comparable record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    Schema,
    Event,
    Object,
    Attr,
    EnumMember,
    DeprecationInfo,
    Type,
}

impl RecordKind {
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Schema => "Schema",
            RecordKind::Event => "Event",
            RecordKind::Object => "Object",
            RecordKind::Attr => "Attr",
            RecordKind::EnumMember => "EnumMember",
            RecordKind::DeprecationInfo => "DeprecationInfo",
            RecordKind::Type => "Type",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a field is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Compared by equality
    Scalar,
    /// Compared by equality, `None` included
    OptionalScalar,
    /// Always recursed into
    Record(RecordKind),
    /// Recursed into when present on both sides
    OptionalRecord(RecordKind),
    /// Keyed collection of records
    RecordMap(RecordKind),
    /// Keyed collection of records that may be absent
    OptionalRecordMap(RecordKind),
    /// Keyed collection of scalars
    ScalarMap,
    /// Keyed collection of scalars that may be absent
    OptionalScalarMap,
}

impl FieldKind {
    /// Record kind nested under this field, if any
    pub fn nested(&self) -> Option<RecordKind> {
        match self {
            FieldKind::Record(kind)
            | FieldKind::OptionalRecord(kind)
            | FieldKind::RecordMap(kind)
            | FieldKind::OptionalRecordMap(kind) => Some(*kind),
            FieldKind::Scalar
            | FieldKind::OptionalScalar
            | FieldKind::ScalarMap
            | FieldKind::OptionalScalarMap => None,
        }
    }
}

/// One declared field of a record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Name as it appears in the schema document
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A schema record with a static field table and a difference struct
pub trait Record: Comparable {
    const KIND: RecordKind;
    const FIELDS: &'static [FieldDescriptor];

    /// Field-by-field difference of two records of this kind
    fn between(old: &Self, new: &Self) -> Self::Diff;

    fn field(name: &str) -> Option<&'static FieldDescriptor> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }
}
