use super::atom::Atom;
use super::types::{BondOrder, BondStereo};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
    pub stereo: BondStereo,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize, order: BondOrder) -> Self {
        Self {
            i: idx1,
            j: idx2,
            order,
            stereo: BondStereo::None,
        }
    }

    pub fn with_stereo(mut self, stereo: BondStereo) -> Self {
        self.stereo = stereo;
        self
    }
}

/// Atoms and bonds of one molfile connection table.
///
/// Bond endpoints keep the order written in the file, since wedge stereo
/// flags are relative to the first atom.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTable {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Per-atom adjacency lists of `(neighbor, bond index)`.
    pub fn adjacency(&self) -> Vec<Vec<(usize, usize)>> {
        let mut adj = vec![Vec::new(); self.atoms.len()];
        for (idx, bond) in self.bonds.iter().enumerate() {
            adj[bond.i].push((bond.j, idx));
            adj[bond.j].push((bond.i, idx));
        }
        adj
    }
}
