//! Splitting titles into the records to regroup and the records to keep.

use super::detect::GroupIndex;
use super::error::Error;
use super::natural::natural_sort;
use std::collections::{HashMap, HashSet};

/// Titles to regroup (`redo`) and titles already in place (`good`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Titles of every split group, group by group in first-seen key order,
    /// each group's titles in its position-list order.
    pub redo: Vec<String>,
    /// Every other title, in natural order.
    pub good: Vec<String>,
}

impl Partition {
    #[inline]
    pub fn total(&self) -> usize {
        self.redo.len() + self.good.len()
    }
}

/// Fails on the first title that appears at two positions.
pub fn ensure_unique_titles(titles: &[String]) -> Result<(), Error> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(titles.len());
    for (position, title) in titles.iter().enumerate() {
        if let Some(&first) = seen.get(title.as_str()) {
            return Err(Error::DuplicateTitle {
                title: title.clone(),
                first,
                second: position,
            });
        }
        seen.insert(title, position);
    }
    Ok(())
}

/// Partitions `titles` (indexed by position) using the split groups of `index`.
///
/// `redo` keeps the group iteration order so that a later stage can restore
/// grouping by title. `good` is the set difference of all titles and `redo`.
/// Titles must be unique, see [`ensure_unique_titles`].
pub fn partition(titles: &[String], index: &GroupIndex) -> Result<Partition, Error> {
    ensure_unique_titles(titles)?;

    let mut redo = Vec::new();
    for group in index.split_groups() {
        for &position in &group.positions {
            let title = titles.get(position).ok_or(Error::PositionOutOfRange {
                position,
                len: titles.len(),
            })?;
            redo.push(title.clone());
        }
    }

    let redo_set: HashSet<&str> = redo.iter().map(String::as_str).collect();
    let mut good: Vec<String> = titles
        .iter()
        .filter(|t| !redo_set.contains(t.as_str()))
        .cloned()
        .collect();
    natural_sort(&mut good);

    Ok(Partition { redo, good })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::StructureKey;

    fn titles(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("full_{i}")).collect()
    }

    fn index(keys: &[&str]) -> GroupIndex {
        GroupIndex::build(keys.iter().map(|k| StructureKey::from(*k)))
    }

    #[test]
    fn redo_follows_group_then_position_order() {
        // A at 0,1,4; B at 2,5; C at 3.
        let idx = index(&["A", "A", "B", "C", "A", "B"]);
        let part = partition(&titles(6), &idx).unwrap();

        assert_eq!(
            part.redo,
            vec!["full_1", "full_2", "full_5", "full_3", "full_6"]
        );
        assert_eq!(part.good, vec!["full_4"]);
    }

    #[test]
    fn good_uses_natural_order() {
        let names: Vec<String> = ["full_10", "full_2", "full_1", "full_11"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let idx = index(&["A", "B", "C", "D"]);
        let part = partition(&names, &idx).unwrap();

        assert!(part.redo.is_empty());
        assert_eq!(part.good, vec!["full_1", "full_2", "full_10", "full_11"]);
    }

    #[test]
    fn partitions_are_disjoint_and_exhaustive() {
        let keys = ["A", "B", "A", "C", "C", "B", "D", "A", "E", "E"];
        let all = titles(keys.len());
        let part = partition(&all, &index(&keys)).unwrap();

        assert_eq!(part.total(), all.len());
        let redo: HashSet<_> = part.redo.iter().collect();
        let good: HashSet<_> = part.good.iter().collect();
        assert!(redo.is_disjoint(&good));
        let union: HashSet<_> = redo.union(&good).copied().collect();
        let expected: HashSet<_> = all.iter().collect();
        assert_eq!(union, expected);
    }

    #[test]
    fn repeated_title_is_rejected() {
        let names: Vec<String> = ["x", "y", "x"].iter().map(|s| s.to_string()).collect();
        let err = partition(&names, &index(&["A", "B", "A"])).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateTitle { ref title, first: 0, second: 2 } if title == "x"
        ));
    }

    #[test]
    fn unique_titles_pass() {
        assert!(ensure_unique_titles(&titles(5)).is_ok());
        assert!(ensure_unique_titles(&[]).is_ok());
    }

    #[test]
    fn position_past_title_list_is_an_error() {
        let idx = index(&["A", "B", "A"]);
        let err = partition(&titles(2), &idx).unwrap_err();
        assert!(matches!(
            err,
            Error::PositionOutOfRange {
                position: 2,
                len: 2
            }
        ));
    }
}
