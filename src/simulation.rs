use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::atom::ParticleState;
use crate::bonds::{apply_bond_spring_forces, update_bonds, BondGraph};
use crate::classify::{classify, MoleculeCounts};
use crate::error::{Result, SimError};
use crate::forcefield::{accumulate_forces, kinetic_energy, EnergyTerms};
use crate::integrator::{step_positions, step_velocities};
use crate::params::SimParams;
use crate::spatial::CellList;
use crate::species::Species;

/// Advances one velocity-Verlet step.
///
/// Order: half-kick and drift, wall confinement, cell-list rebuild if the
/// skin test fires, pair forces (with bond formation), bond springs, bond
/// breaking, second half-kick. With `refresh_forces == false` everything
/// between the two kicks except confinement is skipped and the previous
/// accelerations are reused.
///
/// Returns the potential-energy part of [`EnergyTerms`] when forces were
/// refreshed.
pub fn step(
    state: &mut ParticleState,
    grid: &mut CellList,
    bonds: &mut BondGraph,
    params: &SimParams,
    refresh_forces: bool,
) -> Option<EnergyTerms> {
    step_positions(state, params.dt);
    params.sim_box().confine(state);

    let mut potential = None;
    if refresh_forces {
        if grid.needs_rebuild(state.positions()) {
            grid.rebuild(state.positions());
        }
        let report = accumulate_forces(state, grid, bonds, &params.pair_options());
        let bond_energy = apply_bond_spring_forces(state, bonds, params.bond_k);
        let broken = update_bonds(state, bonds, params.break_ratio);
        if report.bonds_formed > 0 || broken > 0 {
            log::trace!("bonds: +{} -{} ({} total)", report.bonds_formed, broken, bonds.len());
        }
        potential = Some(EnergyTerms {
            lennard_jones: report.lj_energy,
            bond: bond_energy,
            ..EnergyTerms::default()
        });
    }

    step_velocities(state, params.dt);
    potential
}

/// Appends `count` particles of `species` and grows the bond graph and cell
/// list to match. Existing particles and bonds are untouched.
pub fn grow<R: Rng + ?Sized>(
    state: &mut ParticleState,
    bonds: &mut BondGraph,
    grid: &mut CellList,
    rng: &mut R,
    count: usize,
    species: Species,
    params: &SimParams,
) {
    if count == 0 {
        return;
    }
    state.grow(
        rng,
        count,
        species,
        params.box_half_extent,
        params.spawn_fraction,
        params.temperature,
    );
    bonds.resize(state.len());
    *grid = CellList::new(state.len(), params.box_half_extent, params.cutoff, params.skin);
    grid.rebuild(state.positions());
}

/// The aggregate a host application owns: particles, bonds, the cell list
/// and the random source used for (re)initialisation.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: SimParams,
    state: ParticleState,
    bonds: BondGraph,
    grid: CellList,
    rng: StdRng,
    energy: EnergyTerms,
    steps: u64,
}

impl Simulation {
    /// Validates `params` and creates `params.n` randomly placed particles.
    pub fn new(params: SimParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::build(params))
    }

    /// Wraps an explicit particle layout, e.g. a hand-built molecule.
    /// Rejects inconsistent particle arrays, a bond graph larger than the
    /// state, and any particle bonded beyond its valence.
    pub fn from_state(params: SimParams, state: ParticleState, mut bonds: BondGraph) -> Result<Self> {
        params.validate()?;
        state.check_lengths()?;
        if bonds.num_particles() > state.len() {
            return Err(SimError::LengthMismatch {
                what: "bond graph",
                expected: state.len(),
                found: bonds.num_particles(),
            });
        }
        bonds.resize(state.len());
        bonds.check_valence(state.species())?;
        let mut grid = CellList::new(state.len(), params.box_half_extent, params.cutoff, params.skin);
        grid.rebuild(state.positions());
        let mut sim = Self {
            params,
            state,
            bonds,
            grid,
            rng: seeded_rng(params.seed),
            energy: EnergyTerms::default(),
            steps: 0,
        };
        sim.refresh_kinetic();
        Ok(sim)
    }

    fn build(params: SimParams) -> Self {
        let mut rng = seeded_rng(params.seed);
        let state = ParticleState::random(
            &mut rng,
            params.n,
            params.initial_species,
            params.box_half_extent,
            params.init_fraction,
            params.temperature,
        );
        let bonds = BondGraph::new(state.len());
        let mut grid = CellList::new(state.len(), params.box_half_extent, params.cutoff, params.skin);
        grid.rebuild(state.positions());
        log::info!(
            "initialised {} {} particles in box ±{} ({} cells)",
            state.len(),
            params.initial_species.symbol(),
            params.box_half_extent,
            grid.num_cells()
        );

        let mut sim = Self {
            params,
            state,
            bonds,
            grid,
            rng,
            energy: EnergyTerms::default(),
            steps: 0,
        };
        sim.refresh_kinetic();
        sim
    }

    /// Discards everything and re-initialises from the current parameters.
    pub fn reset(&mut self) {
        *self = Self::build(self.params);
    }

    /// Re-initialises with new parameters.
    pub fn reset_with(&mut self, params: SimParams) -> Result<()> {
        params.validate()?;
        *self = Self::build(params);
        Ok(())
    }

    /// Replaces the live parameters without touching particles. Geometry
    /// changes (box, cutoff, skin) relayout the cell list.
    pub fn set_params(&mut self, params: SimParams) -> Result<()> {
        params.validate()?;
        let relayout = params.box_half_extent != self.params.box_half_extent
            || params.cutoff != self.params.cutoff
            || params.skin != self.params.skin;
        self.params = params;
        if relayout {
            self.grid = CellList::new(self.state.len(), params.box_half_extent, params.cutoff, params.skin);
            self.grid.rebuild(self.state.positions());
        }
        Ok(())
    }

    pub fn step(&mut self) {
        self.step_with(true);
    }

    /// One integration step. Pass `false` to reuse the last forces, which
    /// lets a host throttle the expensive part under frame pressure.
    pub fn step_with(&mut self, refresh_forces: bool) {
        if let Some(potential) = step(&mut self.state, &mut self.grid, &mut self.bonds, &self.params, refresh_forces) {
            self.energy.lennard_jones = potential.lennard_jones;
            self.energy.bond = potential.bond;
        }
        self.refresh_kinetic();
        self.steps += 1;
    }

    /// Runs `params.substeps` steps, as done once per rendered frame.
    pub fn advance_frame(&mut self) {
        for _ in 0..self.params.substeps {
            self.step();
        }
    }

    /// Appends `count` particles of `species` near the box centre.
    pub fn grow(&mut self, count: usize, species: Species) {
        if count == 0 {
            return;
        }
        grow(
            &mut self.state,
            &mut self.bonds,
            &mut self.grid,
            &mut self.rng,
            count,
            species,
            &self.params,
        );
        self.refresh_kinetic();
        log::info!("spawned {} {} particles, {} total", count, species.symbol(), self.state.len());
    }

    pub fn classify(&self) -> MoleculeCounts {
        classify(&self.bonds, self.state.species())
    }

    fn refresh_kinetic(&mut self) {
        self.energy.kinetic = kinetic_energy(self.state.velocities());
        self.energy.total = self.energy.kinetic + self.energy.lennard_jones + self.energy.bond;
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    pub fn bonds(&self) -> &BondGraph {
        &self.bonds
    }

    pub fn grid(&self) -> &CellList {
        &self.grid
    }

    pub fn energy(&self) -> EnergyTerms {
        self.energy
    }

    /// Steps taken since the last (re)initialisation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn particle_count(&self) -> usize {
        self.state.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn positions(&self) -> &[DVec3] {
        self.state.positions()
    }

    pub fn velocities(&self) -> &[DVec3] {
        self.state.velocities()
    }

    pub fn species(&self) -> &[Species] {
        self.state.species()
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_init_is_reproducible() {
        let params = SimParams::new(64).with_seed(11);
        let a = Simulation::new(params).unwrap();
        let b = Simulation::new(params).unwrap();
        assert_eq!(a.state(), b.state());
        assert_eq!(a.particle_count(), 64);
        assert!(a.bonds().is_empty());
        assert_eq!(a.bonds().num_particles(), 64);
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        assert!(Simulation::new(SimParams::default().with_dt(0.0)).is_err());
        let mut sim = Simulation::new(SimParams::new(8).with_seed(1)).unwrap();
        assert!(sim.set_params(SimParams::default().with_restitution(2.0)).is_err());
        assert!(sim.reset_with(SimParams::default().with_cutoff(-1.0)).is_err());
        assert_eq!(sim.particle_count(), 8);
    }

    #[test]
    fn test_reset_restores_initial_layout() {
        let params = SimParams::new(50).with_seed(5);
        let mut sim = Simulation::new(params).unwrap();
        let initial = sim.state().clone();
        sim.grow(10, Species::O);
        for _ in 0..5 {
            sim.step();
        }
        sim.reset();
        assert_eq!(sim.state(), &initial);
        assert_eq!(sim.steps(), 0);
        assert!(sim.bonds().is_empty());
    }

    #[test]
    fn test_step_without_refresh_keeps_accelerations() {
        let mut sim = Simulation::new(SimParams::new(100).with_box(4.0).with_seed(3)).unwrap();
        sim.step();
        let acc = sim.state().accelerations().to_vec();
        let bonds = sim.bond_count();
        sim.step_with(false);
        assert_eq!(sim.state().accelerations(), &acc[..]);
        assert_eq!(sim.bond_count(), bonds);
        assert_eq!(sim.steps(), 2);
    }

    #[test]
    fn test_set_params_relayouts_grid() {
        let mut sim = Simulation::new(SimParams::new(20).with_seed(9)).unwrap();
        assert_eq!(sim.grid().dims, [8, 8, 8]);
        sim.set_params(sim.params().with_cutoff(5.0)).unwrap();
        assert_eq!(sim.grid().dims, [4, 4, 4]);
    }
}
