//! Selecting records by title, in source order.

use crate::model::record::Record;
use std::collections::HashSet;

/// Records picked from a source file plus the requested titles it lacked.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub records: Vec<Record>,
    pub missing: Vec<String>,
}

/// Keeps every record whose title is listed, in **source** order.
///
/// The title list only decides membership; its order is ignored, which is
/// why the grouped order has to be recovered afterwards.
pub fn select_by_title(source: &[Record], titles: &[String]) -> Selection {
    let wanted: HashSet<&str> = titles.iter().map(String::as_str).collect();
    let records: Vec<Record> = source
        .iter()
        .filter(|r| wanted.contains(r.title()))
        .cloned()
        .collect();

    let found: HashSet<&str> = records.iter().map(Record::title).collect();
    let missing = titles
        .iter()
        .filter(|t| !found.contains(t.as_str()))
        .cloned()
        .collect();

    Selection { records, missing }
}
