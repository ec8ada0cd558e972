//! Restoring grouped order of a re-extracted subset by title lookup.

use super::error::Error;
use crate::model::record::Record;
use std::collections::HashMap;

/// Positions in `reloaded` that put its titles in `desired` order.
///
/// Each desired title is looked up by first match; titles are expected to be
/// unique within a file. A desired title missing from `reloaded` fails the
/// whole operation.
pub fn recover_order<S: AsRef<str>>(reloaded: &[S], desired: &[String]) -> Result<Vec<usize>, Error> {
    let mut first_seen: HashMap<&str, usize> = HashMap::with_capacity(reloaded.len());
    for (position, title) in reloaded.iter().enumerate() {
        first_seen.entry(title.as_ref()).or_insert(position);
    }

    desired
        .iter()
        .map(|title| {
            first_seen
                .get(title.as_str())
                .copied()
                .ok_or_else(|| Error::missing_title(title.as_str()))
        })
        .collect()
}

/// Applies a permutation: output `k` is `records[permutation[k]]`.
///
/// Records are cloned untouched; only their order changes.
pub fn reorder(records: &[Record], permutation: &[usize]) -> Result<Vec<Record>, Error> {
    permutation
        .iter()
        .map(|&position| {
            records
                .get(position)
                .cloned()
                .ok_or(Error::PositionOutOfRange {
                    position,
                    len: records.len(),
                })
        })
        .collect()
}

/// Reorders a reloaded subset so its records follow `desired` title order.
pub fn regroup(reloaded: &[Record], desired: &[String]) -> Result<Vec<Record>, Error> {
    let titles: Vec<&str> = reloaded.iter().map(Record::title).collect();
    let permutation = recover_order(&titles, desired)?;
    reorder(reloaded, &permutation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::ConnectionTable;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn record(title: &str, body: &str) -> Record {
        Record::new(format!("{title}\n{body}\n"), ConnectionTable::new(), Vec::new())
    }

    #[test]
    fn recovers_permutation_from_titles() {
        let reloaded = ["full_18", "full_20", "full_19"];
        let desired = strings(&["full_18", "full_19", "full_20"]);
        assert_eq!(recover_order(&reloaded, &desired).unwrap(), vec![0, 2, 1]);
    }

    #[test]
    fn missing_title_fails_instead_of_skipping() {
        let reloaded = ["full_18", "full_20"];
        let desired = strings(&["full_18", "full_19", "full_20"]);
        let err = recover_order(&reloaded, &desired).unwrap_err();
        match err {
            Error::MissingTitle { title } => assert_eq!(title, "full_19"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn first_match_wins_for_repeated_titles() {
        let reloaded = ["a", "b", "a"];
        let desired = strings(&["a", "b"]);
        assert_eq!(recover_order(&reloaded, &desired).unwrap(), vec![0, 1]);
    }

    #[test]
    fn regroup_moves_records_without_touching_them() {
        let reloaded = vec![
            record("full_3", "third"),
            record("full_1", "first"),
            record("full_2", "second"),
        ];
        let desired = strings(&["full_1", "full_2", "full_3"]);

        let regrouped = regroup(&reloaded, &desired).unwrap();
        let blocks: Vec<_> = regrouped.iter().map(Record::block).collect();
        assert_eq!(
            blocks,
            vec!["full_1\nfirst\n", "full_2\nsecond\n", "full_3\nthird\n"]
        );
    }

    #[test]
    fn reorder_rejects_out_of_range_positions() {
        let records = vec![record("x", "")];
        assert!(matches!(
            reorder(&records, &[0, 1]),
            Err(Error::PositionOutOfRange { position: 1, len: 1 })
        ));
    }
}
