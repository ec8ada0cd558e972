//! Sequential retitling of a combined record set.

use crate::model::record::Record;

/// Title assigned to the record at zero-based `position`.
#[inline]
pub fn sequential_title(prefix: &str, position: usize) -> String {
    format!("{prefix}_{}", position + 1)
}

/// Retitles records `prefix_1 .. prefix_N` in traversal order.
///
/// Pure relabeling: order and structures are kept exactly. No check is made
/// that the input is correctly grouped.
pub fn renumber(records: &[Record], prefix: &str) -> Vec<Record> {
    records
        .iter()
        .enumerate()
        .map(|(position, record)| record.with_title(&sequential_title(prefix, position)))
        .collect()
}
