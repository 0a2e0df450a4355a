use serde::{Deserialize, Serialize};

use crate::boundary::SimBox;
use crate::error::{Result, SimError};
use crate::forcefield::PairOptions;
use crate::species::Species;

/// Run-time configuration supplied by the host application.
///
/// Values are in reduced units. Everything can be changed between frames;
/// `n` only takes effect on the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Particle count created by init/reset.
    pub n: usize,
    pub dt: f64,
    /// The box spans `[-box_half_extent, box_half_extent]` on every axis.
    pub box_half_extent: f64,
    /// Initial velocities are uniform in `±sqrt(temperature)`.
    pub temperature: f64,
    pub cutoff: f64,
    /// Extra cell width on top of the cutoff; lets the cell list survive
    /// several steps between rebuilds.
    pub skin: f64,
    pub restitution: f64,
    pub enable_lj: bool,
    pub enable_formation: bool,
    /// Harmonic spring constant for bonds.
    pub bond_k: f64,
    pub break_ratio: f64,
    pub formation_tolerance: f64,
    /// Integration steps per rendered frame.
    pub substeps: usize,
    pub init_fraction: f64,
    pub spawn_fraction: f64,
    pub initial_species: Species,
    /// `None` seeds the generator from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            n: 800,
            dt: 0.003,
            box_half_extent: 12.0,
            temperature: 1.0,
            cutoff: 2.5,
            skin: 0.4,
            restitution: 0.9,
            enable_lj: true,
            enable_formation: true,
            bond_k: 12.0,
            break_ratio: 1.5,
            formation_tolerance: 1.1,
            substeps: 3,
            init_fraction: 0.65,
            spawn_fraction: 0.3,
            initial_species: Species::H,
            seed: None,
        }
    }
}

impl SimParams {
    pub fn new(n: usize) -> Self {
        Self { n, ..Self::default() }
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_box(mut self, half_extent: f64) -> Self {
        self.box_half_extent = half_extent;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_skin(mut self, skin: f64) -> Self {
        self.skin = skin;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_lj(mut self, enable: bool) -> Self {
        self.enable_lj = enable;
        self
    }

    pub fn with_formation(mut self, enable: bool) -> Self {
        self.enable_formation = enable;
        self
    }

    pub fn with_bond_k(mut self, k: f64) -> Self {
        self.bond_k = k;
        self
    }

    pub fn with_break_ratio(mut self, ratio: f64) -> Self {
        self.break_ratio = ratio;
        self
    }

    pub fn with_formation_tolerance(mut self, tolerance: f64) -> Self {
        self.formation_tolerance = tolerance;
        self
    }

    pub fn with_substeps(mut self, substeps: usize) -> Self {
        self.substeps = substeps;
        self
    }

    pub fn with_initial_species(mut self, species: Species) -> Self {
        self.initial_species = species;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Options for the pairwise force loop.
    pub fn pair_options(&self) -> PairOptions {
        PairOptions {
            cutoff: self.cutoff,
            enable_lj: self.enable_lj,
            enable_formation: self.enable_formation,
            formation_tolerance: self.formation_tolerance,
        }
    }

    pub fn sim_box(&self) -> SimBox {
        SimBox::new(self.box_half_extent, self.restitution)
    }

    /// Checks every numeric parameter once, outside the hot loops.
    pub fn validate(&self) -> Result<()> {
        positive("dt", self.dt)?;
        positive("box_half_extent", self.box_half_extent)?;
        positive("cutoff", self.cutoff)?;
        non_negative("skin", self.skin)?;
        non_negative("temperature", self.temperature)?;
        unit_interval("restitution", self.restitution)?;
        non_negative("bond_k", self.bond_k)?;
        positive("break_ratio", self.break_ratio)?;
        positive("formation_tolerance", self.formation_tolerance)?;
        unit_interval("init_fraction", self.init_fraction)?;
        unit_interval("spawn_fraction", self.spawn_fraction)?;
        if self.substeps == 0 {
            return Err(SimError::InvalidParameter { name: "substeps", value: 0.0, reason: "must be at least 1" });
        }
        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value, reason: "must be finite" })
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value, reason: "must be positive" })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value, reason: "must not be negative" })
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value, reason: "must lie in (0, 1]" })
    }
}
