//! Velocity-Verlet integration with unit mass.
//!
//! A full step is `step_positions`, a force recomputation at the new
//! positions, then `step_velocities`.

use crate::atom::ParticleState;

/// First half-kick `v += a dt/2` followed by the drift `x += v dt`.
pub fn step_positions(state: &mut ParticleState, dt: f64) {
    let half = 0.5 * dt;
    let (positions, velocities, acc) = state.kinematics_mut();
    for ((x, v), a) in positions.iter_mut().zip(velocities.iter_mut()).zip(acc) {
        *v += *a * half;
        *x += *v * dt;
    }
}

/// Second half-kick `v += a dt/2`, using the acceleration evaluated after
/// the drift.
pub fn step_velocities(state: &mut ParticleState, dt: f64) {
    let half = 0.5 * dt;
    let (_, velocities, acc) = state.kinematics_mut();
    for (v, a) in velocities.iter_mut().zip(acc) {
        *v += *a * half;
    }
}
