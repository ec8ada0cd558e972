//! Pure transformations that regroup split conformer sets.
//!
//! The stages run in this order, each over explicit inputs:
//!
//! 1. [`detect`]: group record positions by structure key and flag groups
//!    whose positions are not one contiguous run.
//! 2. [`partition`]: split titles into `redo` (split groups, grouped order)
//!    and `good` (everything else, natural order). Titles must be unique.
//! 3. [`select_by_title`]: pull a subset out of a source set by title; the
//!    subset comes back in source order.
//! 4. [`regroup`] / [`recover_order`]: restore the grouped `redo` order of a
//!    re-extracted subset by title lookup.
//! 5. [`renumber`]: retitle the combined set `prefix_1 .. prefix_N`.
//!
//! [`verify_grouping`] checks the final set, and [`verify_regrouped`] also
//! checks that it holds exactly the conformers of the source set. None of these touch the file
//! system; see [`crate::pipeline`] for the file-level stages.

mod detect;
mod error;
mod extract;
mod natural;
mod partition;
mod recover;
mod renumber;
mod verify;

pub use detect::{Group, GroupIndex, detect, is_split};
pub use error::Error;
pub use extract::{Selection, select_by_title};
pub use natural::{natural_cmp, natural_sort};
pub use partition::{Partition, ensure_unique_titles, partition};
pub use recover::{recover_order, regroup, reorder};
pub use renumber::{renumber, sequential_title};
pub use verify::{GroupingReport, verify_grouping, verify_regrouped};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::TagCanonicalizer;
    use crate::model::record::{DataItem, Record};
    use crate::model::table::ConnectionTable;

    fn record(title: &str, key: &str) -> Record {
        let data = vec![DataItem {
            tag: "KEY".into(),
            value: key.into(),
        }];
        Record::new(format!("{title}\n"), ConnectionTable::new(), data)
    }

    /// A at 0..=2 and 10..=12, B at 3..=5, singletons C..F in between.
    fn scenario() -> Vec<Record> {
        let keys = [
            "A", "A", "A", "B", "B", "B", "C", "D", "E", "F", "A", "A", "A",
        ];
        keys.iter()
            .enumerate()
            .map(|(i, k)| record(&format!("full_{}", i + 1), k))
            .collect()
    }

    #[test]
    fn end_to_end_regroups_split_structure() {
        let canon = TagCanonicalizer::new("KEY");
        let records = scenario();
        let titles: Vec<String> = records.iter().map(|r| r.title().to_string()).collect();

        let index = detect(&records, &canon).unwrap();
        let split: Vec<_> = index.split_groups().map(|g| g.key.as_str()).collect();
        assert_eq!(split, vec!["A"]);

        let part = partition(&titles, &index).unwrap();
        assert_eq!(
            part.redo,
            vec!["full_1", "full_2", "full_3", "full_11", "full_12", "full_13"]
        );
        assert!(part.good.contains(&"full_4".to_string()));
        assert!(part.good.contains(&"full_6".to_string()));
        assert_eq!(part.total(), records.len());

        // Simulate an extraction tool that returns the subset scrambled.
        let mut reloaded = select_by_title(&records, &part.redo).records;
        reloaded.reverse();
        reloaded.swap(0, 3);

        let regrouped = regroup(&reloaded, &part.redo).unwrap();
        let order: Vec<_> = regrouped.iter().map(Record::title).collect();
        assert_eq!(
            order,
            vec!["full_1", "full_2", "full_3", "full_11", "full_12", "full_13"]
        );

        let good = select_by_title(&records, &part.good).records;
        let combined: Vec<Record> = good.into_iter().chain(regrouped).collect();
        let final_set = renumber(&combined, "full");

        let report = verify_regrouped(&final_set, &records, &canon).unwrap();
        assert!(report.is_clean(), "report: {report:?}");
        assert_eq!(report.records, 13);
        assert_eq!(final_set.last().unwrap().title(), "full_13");
    }
}
