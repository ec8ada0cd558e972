//! Checking that a final record set is grouped, uniquely titled, and holds
//! the same conformers as its source.

use super::detect::{Group, detect};
use super::error::Error;
use crate::canon::Canonicalizer;
use crate::model::record::Record;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct GroupingReport {
    pub records: usize,
    pub structures: usize,
    /// Structures whose conformers are still not contiguous.
    pub split: Vec<Group>,
    /// Titles used by more than one record, in first-seen order.
    pub duplicate_titles: Vec<String>,
    /// Record count of the source set, when one was compared.
    pub source_records: Option<usize>,
    /// Source titles whose record body never reached the checked set.
    pub missing: Vec<String>,
    /// Titles of checked records whose body has no counterpart in the source.
    pub unexpected: Vec<String>,
}

impl GroupingReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.split.is_empty()
            && self.duplicate_titles.is_empty()
            && self.missing.is_empty()
            && self.unexpected.is_empty()
    }
}

pub fn verify_grouping<C>(records: &[Record], canon: &C) -> Result<GroupingReport, Error>
where
    C: Canonicalizer + ?Sized,
{
    let index = detect(records, canon)?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut duplicate_titles = Vec::new();
    for record in records {
        let seen = counts.entry(record.title()).or_insert(0);
        *seen += 1;
        if *seen == 2 {
            duplicate_titles.push(record.title().to_string());
        }
    }

    Ok(GroupingReport {
        records: records.len(),
        structures: index.len(),
        split: index.split_groups().cloned().collect(),
        duplicate_titles,
        ..GroupingReport::default()
    })
}

/// [`verify_grouping`] plus a comparison against `source`.
///
/// Records are matched by body (everything after the title line) as a
/// multiset, so a conformer written twice in place of another one shows up
/// as one missing and one unexpected record.
pub fn verify_regrouped<C>(
    records: &[Record],
    source: &[Record],
    canon: &C,
) -> Result<GroupingReport, Error>
where
    C: Canonicalizer + ?Sized,
{
    let mut report = verify_grouping(records, canon)?;
    report.source_records = Some(source.len());
    report.missing = unmatched(source, records);
    report.unexpected = unmatched(records, source);
    Ok(report)
}

/// Titles of the records of `from` left over once each body of `against`
/// has been matched at most once.
fn unmatched(from: &[Record], against: &[Record]) -> Vec<String> {
    let mut available: HashMap<&str, usize> = HashMap::new();
    for record in against {
        *available.entry(record.body()).or_insert(0) += 1;
    }

    from.iter()
        .filter(|record| match available.get_mut(record.body()) {
            Some(left) if *left > 0 => {
                *left -= 1;
                false
            }
            _ => true,
        })
        .map(|record| record.title().to_string())
        .collect()
}
