//! Structural comparison of OCSF schemas
//!
//! Two records of the same kind compare into a difference record with one
//! entry per declared field. Scalars become `Unchanged` or `Changed`, nested
//! records present on both sides recurse, and keyed collections produce one
//! entry for every key of the union of both sides.
//!
//! The result is built once per comparison and is read-only afterwards; rules
//! and the change summary only ever borrow it.

#[macro_use]
mod macros;

mod comparator;
mod descriptor;
mod difference;
mod model;
mod summary;

pub use comparator::{
    compare_map, compare_optional_map, compare_optional_record, compare_record, compare_scalar,
};
pub use descriptor::{FieldDescriptor, FieldKind, Record, RecordKind};
pub use difference::{Comparable, DiffMap, Difference, MapDifference, ScalarDiff};
pub use model::{
    compare_models, compare_schemas, ChangedAttr, ChangedDeprecationInfo, ChangedEnumMember,
    ChangedEvent, ChangedModel, ChangedObject, ChangedSchema, ChangedType, OcsfModel,
};
pub use summary::{collect_changes, render_changes, ChangeEntry, ChangeTag, DiffNode};

/// Compare two values of any comparable type
pub fn compare<T: Comparable>(old: &T, new: &T) -> Difference<T> {
    T::compare(old, new)
}
