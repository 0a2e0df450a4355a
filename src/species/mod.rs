use serde::{Deserialize, Serialize};

/// Chemical species tag carried by every particle.
///
/// The discriminant doubles as the index into [`SPECIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Species {
    H = 0,
    O = 1,
    C = 2,
    Na = 3,
    Cl = 4,
}

impl Species {
    /// Every species in table order.
    pub const ALL: [Species; 5] = [Species::H, Species::O, Species::C, Species::Na, Species::Cl];

    /// Static descriptor for this species.
    #[inline]
    pub fn info(self) -> &'static SpeciesInfo {
        &SPECIES[self as usize]
    }

    #[inline]
    pub fn valence(self) -> u16 {
        self.info().valence
    }

    pub fn symbol(self) -> &'static str {
        self.info().name
    }

    /// Looks up a species from its table index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl Default for Species {
    fn default() -> Self {
        Species::H
    }
}

/// Immutable per-species parameters (reduced units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesInfo {
    pub name: &'static str,
    pub sigma: f64,   // LJ zero-crossing distance
    pub epsilon: f64, // LJ well depth
    pub valence: u16, // Maximum simultaneous bonds
    pub charge: f64,  // Placeholder, unused by the force field
    pub color: u32,   // Display hint (0xRRGGBB)
    pub radius: f64,  // Display hint
}

pub static SPECIES: [SpeciesInfo; 5] = [
    SpeciesInfo { name: "H", sigma: 1.0, epsilon: 0.3, valence: 1, charge: 0.0, color: 0x9ad1ff, radius: 0.22 },
    SpeciesInfo { name: "O", sigma: 1.1, epsilon: 0.6, valence: 2, charge: 0.0, color: 0xff6b6b, radius: 0.28 },
    SpeciesInfo { name: "C", sigma: 1.05, epsilon: 0.5, valence: 4, charge: 0.0, color: 0x9ea7b8, radius: 0.25 },
    SpeciesInfo { name: "Na", sigma: 1.2, epsilon: 0.2, valence: 1, charge: 1.0, color: 0x9dd49a, radius: 0.30 },
    SpeciesInfo { name: "Cl", sigma: 1.2, epsilon: 0.4, valence: 1, charge: -1.0, color: 0xc3ff8f, radius: 0.30 },
];

/// Lennard-Jones parameters for a specific pair of species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairParams {
    pub sigma: f64,
    pub epsilon: f64,
}

/// Lorentz-Berthelot mixing: arithmetic mean sigma, geometric mean epsilon.
#[inline]
pub fn mix(a: Species, b: Species) -> PairParams {
    let pa = a.info();
    let pb = b.info();
    PairParams {
        sigma: 0.5 * (pa.sigma + pb.sigma),
        epsilon: (pa.epsilon * pb.epsilon).sqrt(),
    }
}

/// Equilibrium bond length for a pair, taken as the mixed sigma.
#[inline]
pub fn rest_length(a: Species, b: Species) -> f64 {
    mix(a, b).sigma
}
