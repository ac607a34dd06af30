//! Structural comparison of values, records and keyed collections

use serde_json::Value;
use std::collections::BTreeMap;

use super::descriptor::Record;
use super::difference::{Comparable, DiffMap, Difference, MapDifference, ScalarDiff};
use crate::schema::StringOrList;

/// Equal values are `Unchanged`, anything else is `Changed`
pub fn compare_scalar<T: Comparable>(old: &T, new: &T) -> Difference<T> {
    if old == new {
        Difference::Unchanged
    } else {
        Difference::Changed {
            before: old.clone(),
            after: new.clone(),
        }
    }
}

/// Field-by-field difference of two records, wrapped as `Difference::Record`
pub fn compare_record<R: Record>(old: &R, new: &R) -> Difference<R> {
    Difference::Record(R::between(old, new))
}

/// Difference of an optional record field.
///
/// Two present records always recurse, even when equal. Absent on both sides
/// is `Unchanged`.
pub fn compare_optional_record<R: Record>(old: &Option<R>, new: &Option<R>) -> Difference<R> {
    match (old, new) {
        (Some(old), Some(new)) => compare_record(old, new),
        (None, Some(new)) => Difference::Added { after: new.clone() },
        (Some(old), None) => Difference::Removed {
            before: old.clone(),
        },
        (None, None) => Difference::Unchanged,
    }
}

/// Per-key difference over the union of both key sets.
///
/// Keys only in `old` are `Removed`, keys only in `new` are `Added`, equal
/// entries are `Unchanged` and unequal entries are compared by value type.
pub fn compare_map<T: Comparable>(
    old: &BTreeMap<String, T>,
    new: &BTreeMap<String, T>,
) -> DiffMap<T> {
    let mut result = DiffMap::new();

    for (key, before) in old {
        let diff = match new.get(key) {
            None => Difference::Removed {
                before: before.clone(),
            },
            Some(after) if before == after => Difference::Unchanged,
            Some(after) => T::compare(before, after),
        };
        result.insert(key.clone(), diff);
    }

    for (key, after) in new {
        if !old.contains_key(key) {
            result.insert(
                key.clone(),
                Difference::Added {
                    after: after.clone(),
                },
            );
        }
    }

    result
}

/// Difference of an optional keyed collection; an absent side counts as empty
pub fn compare_optional_map<T: Comparable>(
    old: &Option<BTreeMap<String, T>>,
    new: &Option<BTreeMap<String, T>>,
) -> MapDifference<T> {
    if old.is_none() && new.is_none() {
        return MapDifference::Unchanged;
    }

    let empty = BTreeMap::new();
    MapDifference::Entries(compare_map(
        old.as_ref().unwrap_or(&empty),
        new.as_ref().unwrap_or(&empty),
    ))
}

macro_rules! scalar_comparable {
    ($($t:ty),* $(,)?) => {
        $(
            impl Comparable for $t {
                type Diff = ScalarDiff;

                fn compare(old: &Self, new: &Self) -> Difference<Self> {
                    compare_scalar(old, new)
                }
            }

            impl Comparable for Option<$t> {
                type Diff = ScalarDiff;

                fn compare(old: &Self, new: &Self) -> Difference<Self> {
                    compare_scalar(old, new)
                }
            }
        )*
    };
}

scalar_comparable!(
    String,
    bool,
    i64,
    Value,
    Vec<String>,
    Vec<i64>,
    Vec<Value>,
    StringOrList,
);
