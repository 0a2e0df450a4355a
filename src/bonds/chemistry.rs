use crate::atom::ParticleState;
use crate::bonds::BondGraph;
use crate::forcefield::interactions::calculate_bond;
use crate::species::rest_length;

/// Adds a harmonic spring force for every bond on top of whatever is
/// already in the acceleration array. Returns the total spring energy.
pub fn apply_bond_spring_forces(state: &mut ParticleState, bonds: &BondGraph, k: f64) -> f64 {
    let (positions, species, acc) = state.force_view();
    let mut energy = 0.0;
    for (i, j) in bonds.iter() {
        let r0 = rest_length(species[i], species[j]);
        if let Some((e, f_vec)) = calculate_bond(positions[i] - positions[j], k, r0) {
            energy += e;
            acc[i] += f_vec;
            acc[j] -= f_vec;
        }
    }
    energy
}

/// Removes every bond longer than `break_ratio * rest_length`. Never adds
/// bonds. Returns the number removed.
pub fn update_bonds(state: &ParticleState, bonds: &mut BondGraph, break_ratio: f64) -> usize {
    let positions = state.positions();
    let species = state.species();

    let stretched: Vec<(usize, usize)> = bonds
        .iter()
        .filter(|&(i, j)| {
            let r = (positions[i] - positions[j]).length();
            r > break_ratio * rest_length(species[i], species[j])
        })
        .collect();

    for &(i, j) in &stretched {
        bonds.remove(i, j);
    }
    if !stretched.is_empty() {
        log::trace!("broke {} stretched bonds", stretched.len());
    }
    stretched.len()
}
