pub mod interactions;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::atom::ParticleState;
use crate::bonds::BondGraph;
use crate::spatial::CellList;
use crate::species::{mix, Species};
use interactions::{calculate_lj, MIN_DIST_SQ};

/// Settings for one pass of the pairwise force loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairOptions {
    /// Pairs farther apart than this feel no LJ force and never bond.
    pub cutoff: f64,
    pub enable_lj: bool,
    pub enable_formation: bool,
    /// A bond forms when `r < formation_tolerance * rest_length`.
    pub formation_tolerance: f64,
}

impl Default for PairOptions {
    fn default() -> Self {
        Self {
            cutoff: 2.5,
            enable_lj: true,
            enable_formation: true,
            formation_tolerance: 1.1,
        }
    }
}

/// What a force pass did besides writing accelerations.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PairReport {
    pub lj_energy: f64,
    pub bonds_formed: usize,
}

/// Energy breakdown of the most recent step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyTerms {
    pub lennard_jones: f64,
    pub bond: f64,
    pub kinetic: f64,
    pub total: f64,
}

/// Resets accelerations and accumulates species-mixed LJ forces over every
/// pair found through the cell list, proposing bonds on the way.
///
/// `grid` must have been rebuilt since particles last moved by more than
/// its threshold.
///
/// # Panics
///
/// If `grid` was never rebuilt for the current particle count.
pub fn accumulate_forces(
    state: &mut ParticleState,
    grid: &CellList,
    bonds: &mut BondGraph,
    opts: &PairOptions,
) -> PairReport {
    let cutoff_sq = opts.cutoff * opts.cutoff;
    let mut report = PairReport::default();
    let (positions, species, acc) = state.force_view();
    acc.fill(DVec3::ZERO);

    for i in 0..positions.len() {
        grid.for_each_neighbor(i, |j| {
            interact(i, j, positions, species, acc, bonds, opts, cutoff_sq, &mut report);
        });
    }
    report
}

/// All-pairs O(n²) version of [`accumulate_forces`]. Same results, no grid.
pub fn accumulate_forces_brute_force(
    state: &mut ParticleState,
    bonds: &mut BondGraph,
    opts: &PairOptions,
) -> PairReport {
    let cutoff_sq = opts.cutoff * opts.cutoff;
    let mut report = PairReport::default();
    let (positions, species, acc) = state.force_view();
    acc.fill(DVec3::ZERO);

    let n = positions.len();
    for i in 0..n {
        for j in (i + 1)..n {
            interact(i, j, positions, species, acc, bonds, opts, cutoff_sq, &mut report);
        }
    }
    report
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn interact(
    i: usize,
    j: usize,
    positions: &[DVec3],
    species: &[Species],
    acc: &mut [DVec3],
    bonds: &mut BondGraph,
    opts: &PairOptions,
    cutoff_sq: f64,
    report: &mut PairReport,
) {
    let diff = positions[i] - positions[j];
    let r2 = diff.length_squared();
    if r2 < MIN_DIST_SQ || r2 > cutoff_sq {
        return;
    }

    let pair = mix(species[i], species[j]);
    if opts.enable_lj {
        if let Some((e, f_vec)) = calculate_lj(diff, pair, cutoff_sq) {
            report.lj_energy += e;
            acc[i] += f_vec;
            acc[j] -= f_vec;
        }
    }

    // Rest length is the mixed sigma
    if opts.enable_formation
        && r2.sqrt() < opts.formation_tolerance * pair.sigma
        && !bonds.has(i, j)
        && bonds.try_form(i, j, species)
    {
        report.bonds_formed += 1;
    }
}

/// Kinetic energy with unit mass for every species.
pub fn kinetic_energy(velocities: &[DVec3]) -> f64 {
    0.5 * velocities.iter().map(|v| v.length_squared()).sum::<f64>()
}
