pub mod chemistry;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::species::Species;

pub use chemistry::{apply_bond_spring_forces, update_bonds};

/// Undirected, duplicate-free bond set over particle indices.
///
/// Stored as one adjacency list per particle, so a particle's degree is the
/// length of its list and membership tests scan at most `valence` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBondGraph")]
pub struct BondGraph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl BondGraph {
    /// Empty graph over `n` particles.
    pub fn new(n: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); n],
            edge_count: 0,
        }
    }

    /// Builds a graph from per-particle neighbour lists. Every entry must be
    /// in range, not a self-loop, listed once, and mirrored in the other
    /// particle's list.
    pub fn from_adjacency(adjacency: Vec<Vec<usize>>) -> Result<Self> {
        let n = adjacency.len();
        let mut ends = 0;
        for (i, nbrs) in adjacency.iter().enumerate() {
            for (k, &j) in nbrs.iter().enumerate() {
                if j >= n {
                    return Err(SimError::InvalidBond { i, j, reason: "index out of range" });
                }
                if j == i {
                    return Err(SimError::InvalidBond { i, j, reason: "self-loop" });
                }
                if nbrs[..k].contains(&j) {
                    return Err(SimError::InvalidBond { i, j, reason: "listed twice" });
                }
                if !adjacency[j].contains(&i) {
                    return Err(SimError::InvalidBond { i, j, reason: "missing reverse entry" });
                }
            }
            ends += nbrs.len();
        }
        Ok(Self {
            adjacency,
            edge_count: ends / 2,
        })
    }

    /// Errors if any particle carries more bonds than its species allows.
    /// `species` must cover every particle in the graph.
    pub fn check_valence(&self, species: &[Species]) -> Result<()> {
        for (particle, (nbrs, s)) in self.adjacency.iter().zip(species).enumerate() {
            let valence = s.valence();
            if nbrs.len() > valence as usize {
                return Err(SimError::ValenceExceeded { particle, degree: nbrs.len(), valence });
            }
        }
        Ok(())
    }

    pub fn num_particles(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of bonds.
    pub fn len(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    pub fn degree(&self, i: usize) -> usize {
        self.adjacency[i].len()
    }

    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adjacency[i]
    }

    pub fn has(&self, i: usize, j: usize) -> bool {
        // Scan the shorter list
        let (a, b) = if self.adjacency[i].len() <= self.adjacency[j].len() { (i, j) } else { (j, i) };
        self.adjacency[a].contains(&b)
    }

    /// Inserts the bond `{i, j}`. Returns `false` for self-loops and for
    /// bonds that already exist.
    pub fn add(&mut self, i: usize, j: usize) -> bool {
        if i == j || self.has(i, j) {
            return false;
        }
        self.adjacency[i].push(j);
        self.adjacency[j].push(i);
        self.edge_count += 1;
        true
    }

    /// Removes the bond `{i, j}` if present.
    pub fn remove(&mut self, i: usize, j: usize) -> bool {
        let Some(pos) = self.adjacency[i].iter().position(|&n| n == j) else {
            return false;
        };
        self.adjacency[i].swap_remove(pos);
        if let Some(pos) = self.adjacency[j].iter().position(|&n| n == i) {
            self.adjacency[j].swap_remove(pos);
        }
        self.edge_count -= 1;
        true
    }

    /// True iff both particles still have free valence.
    pub fn can_form(&self, i: usize, j: usize, species: &[Species]) -> bool {
        self.degree(i) < species[i].valence() as usize && self.degree(j) < species[j].valence() as usize
    }

    /// Adds `{i, j}` only if neither particle would exceed its valence.
    pub fn try_form(&mut self, i: usize, j: usize, species: &[Species]) -> bool {
        self.can_form(i, j, species) && self.add(i, j)
    }

    /// Every bond once, as `(i, j)` with `i < j`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, nbrs)| nbrs.iter().filter(move |&&j| j > i).map(move |&j| (i, j)))
    }

    pub fn for_each<F: FnMut(usize, usize)>(&self, mut f: F) {
        for (i, j) in self.iter() {
            f(i, j);
        }
    }

    pub fn clear(&mut self) {
        for nbrs in &mut self.adjacency {
            nbrs.clear();
        }
        self.edge_count = 0;
    }

    /// Extends the graph to cover `n` particles. Existing bonds are kept;
    /// shrinking is not supported and leaves the graph unchanged.
    pub fn resize(&mut self, n: usize) {
        if n > self.adjacency.len() {
            self.adjacency.resize_with(n, Vec::new);
        }
    }
}

#[derive(Deserialize)]
struct RawBondGraph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl TryFrom<RawBondGraph> for BondGraph {
    type Error = SimError;

    fn try_from(raw: RawBondGraph) -> Result<Self> {
        let graph = Self::from_adjacency(raw.adjacency)?;
        if graph.edge_count != raw.edge_count {
            return Err(SimError::LengthMismatch {
                what: "bond count",
                expected: graph.edge_count,
                found: raw.edge_count,
            });
        }
        Ok(graph)
    }
}
