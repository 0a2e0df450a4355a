use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::bonds::BondGraph;
use crate::species::Species;

/// Counts of the recognised bonding motifs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoleculeCounts {
    /// O bonded to exactly two H.
    pub water: usize,
    /// C bonded to exactly two O.
    pub carbon_dioxide: usize,
    /// Na-Cl bonds, counted from the Na side.
    pub salt: usize,
}

/// Scans the bond set once and counts motifs. Read-only.
pub fn classify(bonds: &BondGraph, species: &[Species]) -> MoleculeCounts {
    let mut hydrogens_on_oxygen: HashMap<usize, usize> = HashMap::new();
    let mut oxygens_on_carbon: HashMap<usize, usize> = HashMap::new();
    let mut counts = MoleculeCounts::default();

    for (i, j) in bonds.iter() {
        for (a, b) in [(i, j), (j, i)] {
            match (species[a], species[b]) {
                (Species::O, Species::H) => *hydrogens_on_oxygen.entry(a).or_default() += 1,
                (Species::C, Species::O) => *oxygens_on_carbon.entry(a).or_default() += 1,
                (Species::Na, Species::Cl) => counts.salt += 1,
                _ => {}
            }
        }
    }

    counts.water = hydrogens_on_oxygen.values().filter(|&&c| c == 2).count();
    counts.carbon_dioxide = oxygens_on_carbon.values().filter(|&&c| c == 2).count();
    counts
}
