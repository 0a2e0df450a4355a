//! # atomic-lab
//!
//! `atomic-lab` is the simulation core of a real-time toy molecular-dynamics
//! sandbox: point atoms of a few species interact through Lennard-Jones
//! forces, form and break covalent-like bonds, and bounce around a
//! reflective box. Rendering and UI live elsewhere; they call into this
//! crate once per frame and read back the arrays.
//!
//! ## Features
//! - **Near-linear**: pair search through a uniform cell list whose skin lets
//!   it be reused across steps.
//! - **Dynamic bonding**: valence-limited bond formation, harmonic springs and
//!   stretch-based breaking.
//! - **Deterministic**: steps draw no random numbers; seeding only matters for
//!   initialisation and spawning.
//!
//! ## Quick Start
//!
//! ```rust
//! use atomic_lab::{SimParams, Simulation, Species};
//!
//! let params = SimParams::new(200).with_box(6.0).with_seed(42);
//! let mut sim = Simulation::new(params).unwrap();
//! sim.grow(20, Species::O);
//! for _ in 0..10 {
//!     sim.advance_frame();
//! }
//! let counts = sim.classify();
//! println!("bonds: {}, water: {}", sim.bond_count(), counts.water);
//! ```

pub mod atom;
pub mod bonds;
pub mod boundary;
pub mod classify;
pub mod error;
pub mod forcefield;
pub mod integrator;
pub mod params;
pub mod simulation;
pub mod spatial;
pub mod species;

pub use atom::ParticleState;
pub use bonds::{apply_bond_spring_forces, update_bonds, BondGraph};
pub use boundary::{confine_to_box, SimBox};
pub use classify::{classify, MoleculeCounts};
pub use error::{Result, SimError};
pub use forcefield::{accumulate_forces, accumulate_forces_brute_force, EnergyTerms, PairOptions, PairReport};
pub use integrator::{step_positions, step_velocities};
pub use params::SimParams;
pub use simulation::Simulation;
pub use spatial::CellList;
pub use species::{mix, rest_length, PairParams, Species, SpeciesInfo, SPECIES};
