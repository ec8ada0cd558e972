//! Grouping record positions by structure key and flagging split groups.

use super::error::Error;
use crate::canon::{Canonicalizer, StructureKey};
use crate::model::record::Record;
use std::collections::HashMap;
use tracing::debug;

/// All positions at which one structure occurs, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: StructureKey,
    pub positions: Vec<usize>,
}

impl Group {
    #[inline]
    pub fn is_split(&self) -> bool {
        is_split(&self.positions)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Structure key to positions, iterated in first-seen key order.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    groups: Vec<Group>,
    slots: HashMap<StructureKey, usize>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from keys listed in position order.
    pub fn build<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = StructureKey>,
    {
        let mut index = Self::new();
        for (position, key) in keys.into_iter().enumerate() {
            index.insert(key, position);
        }
        index
    }

    /// Appends `position` to the group for `key`, creating the group on first sight.
    pub fn insert(&mut self, key: StructureKey, position: usize) {
        match self.slots.get(&key) {
            Some(&slot) => self.groups[slot].positions.push(position),
            None => {
                self.slots.insert(key.clone(), self.groups.len());
                self.groups.push(Group {
                    key,
                    positions: vec![position],
                });
            }
        }
    }

    pub fn get(&self, key: &StructureKey) -> Option<&[usize]> {
        self.slots
            .get(key)
            .map(|&slot| self.groups[slot].positions.as_slice())
    }

    /// Number of distinct structures.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of positions across all groups.
    pub fn position_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Groups whose positions do not form one unbroken run.
    pub fn split_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| g.is_split())
    }
}

/// True iff `positions`, once sorted, is not exactly `min..=max`.
///
/// Empty and single-element lists are never split. A repeated position
/// leaves a hole in the range and therefore counts as split.
pub fn is_split(positions: &[usize]) -> bool {
    if positions.len() <= 1 {
        return false;
    }
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).any(|w| w[1] != w[0] + 1)
}

/// Computes every record's structure key and groups positions by key.
pub fn detect<C>(records: &[Record], canon: &C) -> Result<GroupIndex, Error>
where
    C: Canonicalizer + ?Sized,
{
    let mut index = GroupIndex::new();
    for (position, record) in records.iter().enumerate() {
        let key = canon.key(record)?;
        index.insert(key, position);
    }

    for group in index.split_groups() {
        debug!(
            key = %group.key,
            positions = ?group.positions,
            "structure split across non-contiguous positions"
        );
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<StructureKey> {
        raw.iter().map(|k| StructureKey::from(*k)).collect()
    }

    /// Reference definition: sorted positions differ from the full range.
    fn split_by_definition(p: &[usize]) -> bool {
        if p.is_empty() {
            return false;
        }
        let mut sorted = p.to_vec();
        sorted.sort_unstable();
        let min = *sorted.first().unwrap();
        let max = *sorted.last().unwrap();
        sorted != (min..=max).collect::<Vec<_>>()
    }

    #[test]
    fn single_and_contiguous_lists_are_not_split() {
        assert!(!is_split(&[]));
        assert!(!is_split(&[7]));
        assert!(!is_split(&[3, 4, 5]));
        assert!(!is_split(&[5, 3, 4]));
    }

    #[test]
    fn any_gap_marks_split() {
        assert!(is_split(&[0, 1, 2, 10, 11, 12]));
        assert!(is_split(&[0, 2]));
        assert!(is_split(&[4, 4]));
    }

    #[test]
    fn matches_range_definition_on_all_small_lists() {
        // Every list of length 1..=4 over positions 0..5, with repeats.
        let mut cases = vec![Vec::new()];
        for _ in 0..4 {
            let mut grown = Vec::new();
            for case in &cases {
                for p in 0..5 {
                    let mut next: Vec<usize> = case.clone();
                    next.push(p);
                    grown.push(next);
                }
            }
            for case in &grown {
                assert_eq!(
                    is_split(case),
                    split_by_definition(case),
                    "positions {case:?}"
                );
            }
            cases = grown;
        }
    }

    #[test]
    fn index_preserves_first_seen_key_order() {
        let index = GroupIndex::build(keys(&["B", "A", "B", "C", "A"]));
        let order: Vec<_> = index.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(index.get(&"A".into()), Some(&[1, 4][..]));
        assert_eq!(index.get(&"B".into()), Some(&[0, 2][..]));
        assert_eq!(index.get(&"Z".into()), None);
        assert_eq!(index.position_count(), 5);
    }

    #[test]
    fn split_groups_flags_only_broken_runs() {
        let index = GroupIndex::build(keys(&["A", "A", "B", "B", "A", "C"]));
        let split: Vec<_> = index.split_groups().map(|g| g.key.as_str()).collect();
        assert_eq!(split, vec!["A"]);
    }

    #[test]
    fn insert_appends_positions_in_call_order() {
        let mut index = GroupIndex::new();
        index.insert("A".into(), 12);
        index.insert("A".into(), 3);
        assert_eq!(index.get(&"A".into()), Some(&[12, 3][..]));
        assert_eq!(index.len(), 1);
    }
}
