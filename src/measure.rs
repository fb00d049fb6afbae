//! Single-qubit measurement in the computational basis.
//!
//! - [`probabilities`] - distribution over all basis states
//! - [`probability_of_zero`] - marginal probability that one position reads 0
//! - [`sample_outcome`] - one Bernoulli draw from that marginal
//! - [`collapse`] - zero inconsistent amplitudes and renormalize

use std::fmt;

use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::complex::ComplexExt;
use crate::index::bit_at;
use crate::layout::QubitId;
use crate::state::StateVector;

/// Outcome of one measurement operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeasurementResult {
    pub qubit: QubitId,
    pub outcome: u8,
}

impl MeasurementResult {
    pub fn new(qubit: QubitId, outcome: u8) -> Self {
        MeasurementResult { qubit, outcome }
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{} = {}", self.qubit, self.outcome)
    }
}

/// Probability of every basis state.
pub fn probabilities(state: &StateVector) -> Vec<f64> {
    state.iter().map(|c| c.magnitude_squared()).collect()
}

/// Probability that the qubit at `position` reads 0.
///
/// Computed as `weight(bit = 0) / total weight`, so a collapsed state
/// reports exactly 1.0 or exactly 0.0.
///
/// # Example
/// ```
/// use qsim_rs::measure::probability_of_zero;
/// use qsim_rs::StateVector;
///
/// // |10>: position 0 reads 1, position 1 reads 0
/// let state = StateVector::basis_state(2, 2);
/// assert_eq!(probability_of_zero(&state, 0, 2), 0.0);
/// assert_eq!(probability_of_zero(&state, 1, 2), 1.0);
/// ```
pub fn probability_of_zero(state: &StateVector, position: usize, num_qubits: usize) -> f64 {
    let (zero, one) = state
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(zero, one), (basis, amp)| {
            if bit_at(basis, position, num_qubits) == 0 {
                (zero + amp.magnitude_squared(), one)
            } else {
                (zero, one + amp.magnitude_squared())
            }
        });
    let total = zero + one;
    if total == 0.0 {
        return 0.0;
    }
    zero / total
}

/// Draw one uniform sample in `[0, 1)`: outcome 0 if it falls below `p_zero`.
pub fn sample_outcome(p_zero: f64, rng: &mut impl Rng) -> u8 {
    let r: f64 = rng.r#gen();
    if r < p_zero {
        0
    } else {
        1
    }
}

/// Zero every amplitude whose bit at `position` differs from `outcome`,
/// then renormalize the survivors.
///
/// A branch with zero weight cannot be renormalized; it is logged and the
/// zeroed vector is returned as is.
pub fn collapse(state: &StateVector, position: usize, num_qubits: usize, outcome: u8) -> StateVector {
    let zero = Complex64::new(0.0, 0.0);
    let kept: Vec<Complex64> = state
        .iter()
        .enumerate()
        .map(|(basis, &amp)| {
            if bit_at(basis, position, num_qubits) == outcome as usize {
                amp
            } else {
                zero
            }
        })
        .collect();
    let kept = StateVector::from_vec(kept);
    if kept.norm() == 0.0 {
        warn!(position, outcome, "collapse onto a zero-weight branch");
        return kept;
    }
    kept.normalize()
}
