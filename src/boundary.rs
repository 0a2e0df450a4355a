use serde::{Deserialize, Serialize};

use crate::atom::ParticleState;

/// Reflective cubic box `[-half_extent, half_extent]^3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimBox {
    pub half_extent: f64,
    /// Fraction of the normal velocity kept after a bounce, in `(0, 1]`.
    pub restitution: f64,
}

impl SimBox {
    pub fn new(half_extent: f64, restitution: f64) -> Self {
        Self { half_extent, restitution }
    }

    #[cfg(test)]
    fn contains(&self, p: glam::DVec3) -> bool {
        p.abs().max_element() <= self.half_extent
    }

    /// Clamps each axis independently; see [`confine_to_box`].
    pub fn confine(&self, state: &mut ParticleState) -> usize {
        confine_to_box(state, self.half_extent, self.restitution)
    }
}

/// Clamps every out-of-range position component onto the wall and reflects
/// the matching velocity component scaled by `restitution`. Axes are
/// handled independently. Returns the number of component bounces.
pub fn confine_to_box(state: &mut ParticleState, half_extent: f64, restitution: f64) -> usize {
    let (positions, velocities, _) = state.kinematics_mut();
    let mut bounces = 0;
    for (x, v) in positions.iter_mut().zip(velocities.iter_mut()) {
        for k in 0..3 {
            if x[k] < -half_extent {
                x[k] = -half_extent;
                v[k] = -v[k] * restitution;
                bounces += 1;
            } else if x[k] > half_extent {
                x[k] = half_extent;
                v[k] = -v[k] * restitution;
                bounces += 1;
            }
        }
    }
    bounces
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use crate::species::Species;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn single(x: DVec3, v: DVec3) -> ParticleState {
        ParticleState::from_parts(vec![x], vec![v], vec![Species::H]).unwrap()
    }

    #[test]
    fn test_bounce_on_one_axis() {
        let mut state = single(DVec3::new(8.5, 3.0, -1.0), DVec3::new(2.0, 1.0, -1.0));
        assert_eq!(confine_to_box(&mut state, 8.0, 0.9), 1);
        assert_eq!(state.positions()[0], DVec3::new(8.0, 3.0, -1.0));
        let v = state.velocities()[0];
        assert_relative_eq!(v.x, -1.8, epsilon = 1e-12);
        // Untouched axes pass freely
        assert_eq!(v.y, 1.0);
        assert_eq!(v.z, -1.0);
    }

    #[test]
    fn test_negative_wall_and_corner() {
        let mut state = single(DVec3::new(-9.0, -9.0, 9.0), DVec3::new(-1.0, -2.0, 3.0));
        let sim_box = SimBox::new(8.0, 0.5);
        assert_eq!(sim_box.confine(&mut state), 3);
        assert!(sim_box.contains(state.positions()[0]));
        assert_eq!(state.velocities()[0], DVec3::new(0.5, 1.0, -1.5));
    }

    proptest! {
        #[test]
        fn prop_positions_end_inside_box(
            x in -50.0f64..50.0, y in -50.0f64..50.0, z in -50.0f64..50.0,
            vx in -10.0f64..10.0, vy in -10.0f64..10.0, vz in -10.0f64..10.0,
            half in 1.0f64..20.0, restitution in 0.05f64..=1.0,
        ) {
            let p0 = DVec3::new(x, y, z);
            let v0 = DVec3::new(vx, vy, vz);
            let mut state = single(p0, v0);
            confine_to_box(&mut state, half, restitution);

            let p = state.positions()[0];
            let v = state.velocities()[0];
            for k in 0..3 {
                prop_assert!(p[k] >= -half && p[k] <= half);
                if p0[k].abs() > half {
                    prop_assert!((v[k] + v0[k] * restitution).abs() < 1e-12);
                } else {
                    prop_assert_eq!(v[k], v0[k]);
                    prop_assert_eq!(p[k], p0[k]);
                }
            }
        }
    }
}
