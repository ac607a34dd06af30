//! Declarative generation of difference records.
//!
//! `changed_record!` takes a record type and its field list and emits, from that
//! single list, the difference struct, the static field table, the field-wise
//! comparison and the change-summary walk.
//!
//! ```ignore
//! changed_record! {
//!     OcsfEnumMember => ChangedEnumMember (RecordKind::EnumMember) {
//!         caption: scalar String,
//!         description: optional_scalar String,
//!     }
//! }
//! ```
//!
//! Field kinds: `scalar`, `optional_scalar`, `record`, `optional_record`,
//! `record_map`, `optional_record_map`, `scalar_map`, `optional_scalar_map`.
//! The type after the kind is the element type: the record or scalar held by
//! the field, map or option stripped.

macro_rules! field_type {
    (scalar $t:ty) => { $crate::compare::Difference<$t> };
    (optional_scalar $t:ty) => { $crate::compare::Difference<Option<$t>> };
    (record $t:ty) => { $crate::compare::Difference<$t> };
    (optional_record $t:ty) => { $crate::compare::Difference<$t> };
    (record_map $t:ty) => { $crate::compare::DiffMap<$t> };
    (optional_record_map $t:ty) => { $crate::compare::MapDifference<$t> };
    (scalar_map $t:ty) => { $crate::compare::DiffMap<$t> };
    (optional_scalar_map $t:ty) => { $crate::compare::MapDifference<$t> };
}

macro_rules! field_kind {
    (scalar $t:ty) => { $crate::compare::FieldKind::Scalar };
    (optional_scalar $t:ty) => { $crate::compare::FieldKind::OptionalScalar };
    (record $t:ty) => {
        $crate::compare::FieldKind::Record(<$t as $crate::compare::Record>::KIND)
    };
    (optional_record $t:ty) => {
        $crate::compare::FieldKind::OptionalRecord(<$t as $crate::compare::Record>::KIND)
    };
    (record_map $t:ty) => {
        $crate::compare::FieldKind::RecordMap(<$t as $crate::compare::Record>::KIND)
    };
    (optional_record_map $t:ty) => {
        $crate::compare::FieldKind::OptionalRecordMap(<$t as $crate::compare::Record>::KIND)
    };
    (scalar_map $t:ty) => { $crate::compare::FieldKind::ScalarMap };
    (optional_scalar_map $t:ty) => { $crate::compare::FieldKind::OptionalScalarMap };
}

macro_rules! compare_field {
    (scalar, $old:expr, $new:expr) => { $crate::compare::compare_scalar($old, $new) };
    (optional_scalar, $old:expr, $new:expr) => { $crate::compare::compare_scalar($old, $new) };
    (record, $old:expr, $new:expr) => { $crate::compare::compare_record($old, $new) };
    (optional_record, $old:expr, $new:expr) => {
        $crate::compare::compare_optional_record($old, $new)
    };
    (record_map, $old:expr, $new:expr) => { $crate::compare::compare_map($old, $new) };
    (optional_record_map, $old:expr, $new:expr) => {
        $crate::compare::compare_optional_map($old, $new)
    };
    (scalar_map, $old:expr, $new:expr) => { $crate::compare::compare_map($old, $new) };
    (optional_scalar_map, $old:expr, $new:expr) => {
        $crate::compare::compare_optional_map($old, $new)
    };
}

macro_rules! field_name {
    ($field:ident) => { stringify!($field) };
    ($field:ident $alias:literal) => { $alias };
}

macro_rules! changed_record {
    (
        $(#[$meta:meta])*
        $record:ty => $changed:ident ($kind:expr) {
            $( $field:ident $(as $alias:literal)? : $fkind:ident $fty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
        pub struct $changed {
            $(
                $( #[serde(rename = $alias)] )?
                pub $field: field_type!($fkind $fty),
            )*
        }

        impl $crate::compare::Record for $record {
            const KIND: $crate::compare::RecordKind = $kind;
            const FIELDS: &'static [$crate::compare::FieldDescriptor] = &[
                $(
                    $crate::compare::FieldDescriptor::new(
                        field_name!($field $($alias)?),
                        field_kind!($fkind $fty),
                    ),
                )*
            ];

            fn between(old: &Self, new: &Self) -> $changed {
                $changed {
                    $( $field: compare_field!($fkind, &old.$field, &new.$field), )*
                }
            }
        }

        impl $crate::compare::Comparable for $record {
            type Diff = $changed;

            fn compare(old: &Self, new: &Self) -> $crate::compare::Difference<Self> {
                $crate::compare::Difference::Record(
                    <Self as $crate::compare::Record>::between(old, new),
                )
            }
        }

        impl $crate::compare::DiffNode for $changed {
            fn collect_into(
                &self,
                path: &mut Vec<String>,
                out: &mut Vec<$crate::compare::ChangeEntry>,
            ) {
                let nodes: Vec<&dyn $crate::compare::DiffNode> = vec![
                    $( &self.$field as &dyn $crate::compare::DiffNode, )*
                ];
                let fields = <$record as $crate::compare::Record>::FIELDS;
                for (field, node) in fields.iter().zip(nodes) {
                    path.push(field.name.to_string());
                    node.collect_into(path, out);
                    path.pop();
                }
            }

            fn is_unchanged(&self) -> bool {
                true $( && $crate::compare::DiffNode::is_unchanged(&self.$field) )*
            }
        }
    };
}
