use super::{CanonConfig, Canonicalizer, Error, StructureKey};
use crate::model::record::Record;
use crate::model::table::ConnectionTable;
use crate::model::types::BondStereo;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Connectivity key built by iterative neighborhood refinement.
///
/// Atoms start from an invariant (element, plus charge, parity and folded
/// hydrogen count as configured) and are repeatedly re-ranked by their own
/// rank and the sorted ranks of their bonded neighbors until the partition
/// stops splitting. The ranked atom descriptions are then hashed with
/// SHA-256. Atom order and coordinates never affect the key.
///
/// Like any refinement scheme this cannot separate every pair of
/// non-isomorphic graphs; some highly regular ones collide.
///
/// Atom parity is read as written: it is only comparable between records
/// that share an atom numbering, which holds for conformers of one export.
#[derive(Debug, Clone)]
pub struct GraphCanonicalizer {
    config: CanonConfig,
}

impl GraphCanonicalizer {
    pub fn new(config: CanonConfig) -> Self {
        Self { config }
    }

    /// Canonical description string before hashing.
    pub fn description(&self, table: &ConnectionTable) -> String {
        let graph = Graph::from_table(table, &self.config);
        let ranks = refine(&graph);

        let mut atoms: Vec<(usize, String)> = (0..graph.invariants.len())
            .map(|a| {
                let mut env: Vec<(&str, usize)> = graph.adj[a]
                    .iter()
                    .map(|(n, label)| (label.as_str(), ranks[*n]))
                    .collect();
                env.sort_unstable();

                let mut desc = format!("{}|{}:", ranks[a], graph.invariants[a]);
                for (label, rank) in env {
                    let _ = write!(desc, "{label}-{rank},");
                }
                (ranks[a], desc)
            })
            .collect();
        atoms.sort_unstable();

        atoms
            .into_iter()
            .map(|(_, desc)| desc)
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl Canonicalizer for GraphCanonicalizer {
    fn key(&self, record: &Record) -> Result<StructureKey, Error> {
        let description = self.description(&record.table);
        let digest = Sha256::digest(description.as_bytes());
        Ok(StructureKey::new(hex::encode(digest)))
    }

    fn describe(&self) -> String {
        let flag = |on: bool| if on { "on" } else { "off" };
        format!(
            "graph (stereo {}, charges {}, hydrogens {})",
            flag(self.config.stereo),
            flag(self.config.charges),
            flag(self.config.hydrogens)
        )
    }
}

/// Labelled graph over the atoms kept for keying.
struct Graph {
    invariants: Vec<String>,
    adj: Vec<Vec<(usize, String)>>,
}

impl Graph {
    fn from_table(table: &ConnectionTable, config: &CanonConfig) -> Self {
        let keep: Vec<bool> = table
            .atoms
            .iter()
            .map(|a| config.hydrogens || !a.is_hydrogen())
            .collect();

        let mut index = vec![None; table.atoms.len()];
        let mut next = 0;
        for (old, kept) in keep.iter().enumerate() {
            if *kept {
                index[old] = Some(next);
                next += 1;
            }
        }

        let mut folded_h = vec![0usize; next];
        let mut adj = vec![Vec::new(); next];
        for (old, neighbors) in table.adjacency().into_iter().enumerate() {
            let Some(a) = index[old] else { continue };
            for (nb, bond_idx) in neighbors {
                match index[nb] {
                    Some(b) => {
                        let bond = &table.bonds[bond_idx];
                        let code = bond.order.ctfile_code();
                        adj[a].push((b, bond_label(code, bond.stereo, bond.i == old, config)));
                    }
                    None => folded_h[a] += 1,
                }
            }
        }

        let invariants = table
            .atoms
            .iter()
            .zip(&index)
            .filter_map(|(atom, idx)| idx.map(|i| (atom, i)))
            .map(|(atom, i)| {
                let mut inv = atom.symbol.clone();
                if config.charges && atom.charge != 0 {
                    let _ = write!(inv, "{:+}", atom.charge);
                }
                if config.stereo {
                    let _ = write!(inv, "@{}", atom.parity.ctfile_code());
                }
                if !config.hydrogens {
                    let _ = write!(inv, "H{}", folded_h[i]);
                }
                inv
            })
            .collect();

        Self { invariants, adj }
    }
}

fn bond_label(order: u8, stereo: BondStereo, from_start: bool, config: &CanonConfig) -> String {
    if !config.stereo || stereo == BondStereo::None {
        return order.to_string();
    }
    let code = match stereo {
        BondStereo::None => 0,
        BondStereo::Up => 1,
        BondStereo::CisTransEither => 3,
        BondStereo::Either => 4,
        BondStereo::Down => 6,
    };
    // Wedges point from the first atom; record which end this view is from.
    let end = if from_start { '>' } else { '<' };
    format!("{order}{end}{code}")
}

fn refine(graph: &Graph) -> Vec<usize> {
    let n = graph.invariants.len();
    let mut ranks = rank(&graph.invariants);
    let mut classes = distinct(&ranks);

    for _ in 0..n {
        let labels: Vec<(usize, Vec<(&str, usize)>)> = (0..n)
            .map(|a| {
                let mut env: Vec<(&str, usize)> = graph.adj[a]
                    .iter()
                    .map(|(nb, label)| (label.as_str(), ranks[*nb]))
                    .collect();
                env.sort_unstable();
                (ranks[a], env)
            })
            .collect();

        let next = rank(&labels);
        let next_classes = distinct(&next);
        ranks = next;
        if next_classes == classes {
            break;
        }
        classes = next_classes;
    }

    ranks
}

/// Dense rank of each label in sorted order of distinct labels.
fn rank<T: Ord>(labels: &[T]) -> Vec<usize> {
    let order: BTreeMap<&T, usize> = labels
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(i, label)| (label, i))
        .collect();
    labels.iter().map(|label| order[label]).collect()
}

fn distinct(ranks: &[usize]) -> usize {
    ranks.iter().collect::<BTreeSet<_>>().len()
}
