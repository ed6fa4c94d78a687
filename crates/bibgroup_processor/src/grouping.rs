/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Partitioning records into named groups.

use indexmap::IndexMap;
use tracing::debug;

use bibgroup_core::grouping::{key_for, GroupField};
use bibgroup_core::Reference;

/// The grouped form of a record list.
///
/// `groups` preserves per-group insertion order; `sorted_keys` is the same
/// key set in lexicographic order. The two are produced together by
/// [`group_and_sort`] and never diverge: every sorted key maps to a
/// non-empty record list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedReferences {
    pub groups: IndexMap<String, Vec<Reference>>,
    pub sorted_keys: Vec<String>,
    /// Records that had no usable value at the group field. They are in
    /// no group; the count is kept so a host can surface it if it wants.
    pub skipped: usize,
}

impl GroupedReferences {
    /// Iterate groups in sorted-key order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &[Reference])> {
        self.sorted_keys
            .iter()
            .filter_map(|key| self.groups.get(key).map(|refs| (key.as_str(), refs.as_slice())))
    }
}

/// Partition records by the given field and sort the group keys.
///
/// Records are visited in input order. A record with a missing or empty
/// value at the field is skipped, not an error. Keys are compared with
/// ordinary byte-wise string ordering, so the result is identical for
/// identical input regardless of environment.
pub fn group_and_sort(references: &[Reference], field: GroupField) -> GroupedReferences {
    let mut groups: IndexMap<String, Vec<Reference>> = IndexMap::new();
    let mut skipped = 0;

    for reference in references {
        match key_for(reference, field) {
            Some(key) => groups.entry(key).or_default().push(reference.clone()),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(skipped, field = %field, "records without the group field were left out");
    }

    let mut sorted_keys: Vec<String> = groups.keys().cloned().collect();
    sorted_keys.sort_unstable();

    GroupedReferences {
        groups,
        sorted_keys,
        skipped,
    }
}
