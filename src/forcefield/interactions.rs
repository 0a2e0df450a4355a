use glam::DVec3;

use crate::species::PairParams;

/// Pairs closer than this (squared) are treated as coincident and skipped.
pub const MIN_DIST_SQ: f64 = 1e-8;

/// 12-6 Lennard-Jones between two particles.
///
/// `dist_vec` is `x_i - x_j`. Returns `(energy, force on i)`; the force on
/// `j` is the negation. Pairs beyond the cutoff or closer than
/// [`MIN_DIST_SQ`] yield `None`.
#[inline]
pub fn calculate_lj(dist_vec: DVec3, pair: PairParams, cutoff_sq: f64) -> Option<(f64, DVec3)> {
    let r2 = dist_vec.length_squared();
    if r2 < MIN_DIST_SQ || r2 > cutoff_sq {
        return None;
    }
    let inv_r2 = 1.0 / r2;
    let sr2 = pair.sigma * pair.sigma * inv_r2;
    let sr6 = sr2 * sr2 * sr2;
    let sr12 = sr6 * sr6;

    let energy = 4.0 * pair.epsilon * (sr12 - sr6);
    let f_mag = 24.0 * pair.epsilon * (2.0 * sr12 - sr6) * inv_r2;
    Some((energy, dist_vec * f_mag))
}

/// Harmonic spring `F = -k (r - r0)` along `dist_vec = x_i - x_j`.
///
/// Returns `(energy, force on i)`, or `None` for coincident particles.
#[inline]
pub fn calculate_bond(dist_vec: DVec3, k: f64, r0: f64) -> Option<(f64, DVec3)> {
    let r2 = dist_vec.length_squared();
    if r2 < MIN_DIST_SQ {
        return None;
    }
    let r = r2.sqrt();
    let dr = r - r0;
    let energy = 0.5 * k * dr * dr;
    let f_vec = dist_vec * (-k * dr / r);
    Some((energy, f_vec))
}
