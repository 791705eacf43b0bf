//! Item set diffing
//!
//! Items are compared as a multiset of exact strings: every value in the
//! new collection counts +1, every value in the old collection counts -1.
//! Values with a positive net are appended once, values with a negative
//! net are removed once, and values that net to zero are left alone.

use crate::types::{ListItem, ListPatch};
use std::collections::HashMap;

/// Compute the patch that takes `old` to `new` for list `id`
///
/// Appends keep first-occurrence order of `new`, removals keep
/// first-occurrence order of `old`. Existing items are never reordered.
pub fn diff_items(id: &str, old: &[String], new: &[String]) -> ListPatch {
    let counts = net_counts(old, new);

    let append = first_occurrences(new)
        .filter(|value| counts[*value] > 0)
        .map(ListItem::new)
        .collect();

    let remove = first_occurrences(old)
        .filter(|value| counts[*value] < 0)
        .map(str::to_string)
        .collect();

    ListPatch {
        id: id.to_string(),
        append,
        remove,
    }
}

fn net_counts<'a>(old: &'a [String], new: &'a [String]) -> HashMap<&'a str, i64> {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for value in new {
        *counts.entry(value.as_str()).or_default() += 1;
    }
    for value in old {
        *counts.entry(value.as_str()).or_default() -= 1;
    }
    counts
}

fn first_occurrences(values: &[String]) -> impl Iterator<Item = &str> {
    let mut seen = std::collections::HashSet::new();
    values
        .iter()
        .map(String::as_str)
        .filter(move |value| seen.insert(*value))
}

/// Summary of how two item collections relate, for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemChanges {
    /// Distinct values that would be appended
    pub added: usize,
    /// Distinct values that would be removed
    pub removed: usize,
    /// Distinct values present on both sides
    pub unchanged: usize,
}

impl ItemChanges {
    /// Summarize the change from `old` to `new`
    pub fn between(old: &[String], new: &[String]) -> Self {
        let patch = diff_items("", old, new);
        let unchanged = first_occurrences(new)
            .filter(|value| old.iter().any(|o| o.as_str() == *value))
            .count();
        Self {
            added: patch.append.len(),
            removed: patch.remove.len(),
            unchanged,
        }
    }

    /// Check if any item would change
    pub fn has_changes(&self) -> bool {
        self.added + self.removed > 0
    }
}
