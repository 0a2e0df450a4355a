use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::species::Species;

/// Kinematic state of every particle, stored as parallel arrays.
///
/// All four arrays always share the same length; they can only grow, so a
/// particle index stays valid for the lifetime of the state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParticleState")]
pub struct ParticleState {
    positions: Vec<DVec3>,
    velocities: Vec<DVec3>,
    accelerations: Vec<DVec3>,
    species: Vec<Species>,
}

impl ParticleState {
    /// Builds a state from explicit arrays. Accelerations start at zero.
    pub fn from_parts(positions: Vec<DVec3>, velocities: Vec<DVec3>, species: Vec<Species>) -> Result<Self> {
        let n = positions.len();
        let state = Self {
            positions,
            velocities,
            accelerations: vec![DVec3::ZERO; n],
            species,
        };
        state.check_lengths()?;
        Ok(state)
    }

    /// Errors unless every array has as many entries as `positions`.
    pub(crate) fn check_lengths(&self) -> Result<()> {
        let n = self.positions.len();
        for (what, found) in [
            ("velocities", self.velocities.len()),
            ("accelerations", self.accelerations.len()),
            ("species", self.species.len()),
        ] {
            if found != n {
                return Err(SimError::LengthMismatch { what, expected: n, found });
            }
        }
        Ok(())
    }

    /// Creates `n` particles of one species with random positions in
    /// `±half_extent * fraction` and random velocities in `±sqrt(temperature)`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        n: usize,
        species: Species,
        half_extent: f64,
        fraction: f64,
        temperature: f64,
    ) -> Self {
        let mut state = Self::default();
        state.grow(rng, n, species, half_extent, fraction, temperature);
        state
    }

    /// Appends `count` particles using the random placement policy.
    ///
    /// Existing entries are untouched. A zero count is a no-op.
    pub fn grow<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
        species: Species,
        half_extent: f64,
        fraction: f64,
        temperature: f64,
    ) {
        if count == 0 {
            return;
        }
        let spread = half_extent * fraction;
        let v_scale = temperature.max(0.0).sqrt();

        self.positions.reserve(count);
        self.velocities.reserve(count);
        self.accelerations.reserve(count);
        self.species.reserve(count);

        for _ in 0..count {
            self.positions.push(random_unit_cube(rng) * spread);
            self.velocities.push(random_unit_cube(rng) * v_scale);
            self.accelerations.push(DVec3::ZERO);
            self.species.push(species);
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[DVec3] {
        &self.velocities
    }

    pub fn accelerations(&self) -> &[DVec3] {
        &self.accelerations
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn positions_mut(&mut self) -> &mut [DVec3] {
        &mut self.positions
    }

    pub fn velocities_mut(&mut self) -> &mut [DVec3] {
        &mut self.velocities
    }

    pub fn accelerations_mut(&mut self) -> &mut [DVec3] {
        &mut self.accelerations
    }

    /// Split borrow used by the force loops: positions and species are read
    /// while accelerations are written.
    pub(crate) fn force_view(&mut self) -> (&[DVec3], &[Species], &mut [DVec3]) {
        (&self.positions, &self.species, &mut self.accelerations)
    }

    /// Split borrow for passes that move particles.
    pub(crate) fn kinematics_mut(&mut self) -> (&mut [DVec3], &mut [DVec3], &[DVec3]) {
        (&mut self.positions, &mut self.velocities, &self.accelerations)
    }

    /// Copies positions into a flat `xyzxyz...` f32 buffer, as used by
    /// instanced draw calls. The buffer is resized to `3 * len()`.
    pub fn write_positions_f32(&self, out: &mut Vec<f32>) {
        out.clear();
        out.reserve(self.positions.len() * 3);
        for p in &self.positions {
            out.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        }
    }
}

#[derive(Deserialize)]
struct RawParticleState {
    positions: Vec<DVec3>,
    velocities: Vec<DVec3>,
    accelerations: Vec<DVec3>,
    species: Vec<Species>,
}

impl TryFrom<RawParticleState> for ParticleState {
    type Error = SimError;

    fn try_from(raw: RawParticleState) -> Result<Self> {
        let state = Self {
            positions: raw.positions,
            velocities: raw.velocities,
            accelerations: raw.accelerations,
            species: raw.species,
        };
        state.check_lengths()?;
        Ok(state)
    }
}

fn random_unit_cube<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    DVec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_state_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = ParticleState::random(&mut rng, 500, Species::O, 10.0, 0.5, 4.0);
        assert_eq!(state.len(), 500);
        assert_eq!(state.velocities().len(), 500);
        assert_eq!(state.accelerations().len(), 500);
        for (p, v) in state.positions().iter().zip(state.velocities()) {
            assert!(p.abs().max_element() <= 5.0);
            assert!(v.abs().max_element() <= 2.0);
        }
        assert!(state.species().iter().all(|&s| s == Species::O));
        assert!(state.accelerations().iter().all(|a| *a == DVec3::ZERO));
    }

    #[test]
    fn test_from_parts_rejects_mismatched_lengths() {
        let err = ParticleState::from_parts(
            vec![DVec3::ZERO; 3],
            vec![DVec3::ZERO; 3],
            vec![Species::H; 2],
        )
        .unwrap_err();
        assert_eq!(err, SimError::LengthMismatch { what: "species", expected: 3, found: 2 });

        assert!(ParticleState::from_parts(vec![DVec3::ZERO; 2], vec![DVec3::ZERO], vec![Species::H; 2]).is_err());
    }

    #[test]
    fn test_grow_zero_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = ParticleState::random(&mut rng, 4, Species::H, 5.0, 0.65, 1.0);
        let before = state.clone();
        state.grow(&mut rng, 0, Species::C, 5.0, 0.3, 1.0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_write_positions_f32() {
        let state = ParticleState::from_parts(
            vec![DVec3::new(1.0, 2.0, 3.0), DVec3::new(-1.0, 0.5, 0.0)],
            vec![DVec3::ZERO; 2],
            vec![Species::H, Species::Cl],
        )
        .unwrap();
        let mut buf = vec![9.0; 17];
        state.write_positions_f32(&mut buf);
        assert_eq!(buf, vec![1.0, 2.0, 3.0, -1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_deserialize_checks_array_lengths() {
        let json = r#"{
            "positions": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            "velocities": [[0.0, 0.0, 0.0]],
            "accelerations": [],
            "species": ["H", "H"]
        }"#;
        let err = serde_json::from_str::<ParticleState>(json).unwrap_err();
        assert!(err.to_string().contains("velocities"), "{err}");

        let state = ParticleState::from_parts(vec![DVec3::X; 2], vec![DVec3::Y; 2], vec![Species::O, Species::Na]).unwrap();
        let text = serde_json::to_string(&state).unwrap();
        let back: ParticleState = serde_json::from_str(&text).unwrap();
        assert_eq!(back, state);
    }
}
