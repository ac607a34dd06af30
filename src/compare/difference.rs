//! The difference vocabulary

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;

use super::summary::DiffNode;

/// Values the comparator knows how to diff.
///
/// Scalars use [`ScalarDiff`] as their nested difference, which has no values;
/// records use the difference struct generated for them.
pub trait Comparable: Clone + PartialEq + Debug + Serialize {
    type Diff: DiffNode + Clone + PartialEq + Debug + Serialize;

    fn compare(old: &Self, new: &Self) -> Difference<Self>;
}

/// Result of comparing two values of the same type.
///
/// `Changed` is only built for unequal values; equal values are `Unchanged`.
/// `Record` holds the field-by-field difference of two present records and is
/// produced even when nothing inside changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case", bound = "")]
pub enum Difference<T: Comparable> {
    Unchanged,
    Added { after: T },
    Removed { before: T },
    Changed { before: T, after: T },
    Record(T::Diff),
}

impl<T: Comparable> Default for Difference<T> {
    fn default() -> Self {
        Difference::Unchanged
    }
}

impl<T: Comparable> Difference<T> {
    /// True only for the `Unchanged` tag; see [`DiffNode::is_unchanged`] for a deep check
    pub fn is_unchanged_tag(&self) -> bool {
        matches!(self, Difference::Unchanged)
    }

    pub fn is_added(&self) -> bool {
        matches!(self, Difference::Added { .. })
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, Difference::Removed { .. })
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, Difference::Changed { .. })
    }

    /// Value on the old side, when the tag carries one
    pub fn before(&self) -> Option<&T> {
        match self {
            Difference::Removed { before } | Difference::Changed { before, .. } => Some(before),
            _ => None,
        }
    }

    /// Value on the new side, when the tag carries one
    pub fn after(&self) -> Option<&T> {
        match self {
            Difference::Added { after } | Difference::Changed { after, .. } => Some(after),
            _ => None,
        }
    }

    pub fn changed(&self) -> Option<(&T, &T)> {
        match self {
            Difference::Changed { before, after } => Some((before, after)),
            _ => None,
        }
    }

    /// Nested difference of two present records
    pub fn record(&self) -> Option<&T::Diff> {
        match self {
            Difference::Record(diff) => Some(diff),
            _ => None,
        }
    }
}

/// Per-key differences of a keyed collection
pub type DiffMap<T> = BTreeMap<String, Difference<T>>;

/// Difference of an optional keyed collection.
///
/// `Unchanged` means the collection was absent on both sides. Otherwise an
/// absent side counts as empty and every key of the union has an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, bound = "")]
pub enum MapDifference<T: Comparable> {
    Unchanged,
    Entries(DiffMap<T>),
}

impl<T: Comparable> Default for MapDifference<T> {
    fn default() -> Self {
        MapDifference::Unchanged
    }
}

impl<T: Comparable> MapDifference<T> {
    pub fn entries(&self) -> Option<&DiffMap<T>> {
        match self {
            MapDifference::Unchanged => None,
            MapDifference::Entries(entries) => Some(entries),
        }
    }
}

/// Nested difference for scalar values, which have no fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScalarDiff {}
