//! Shared test utilities for qsim-rs integration tests.

use approx::assert_abs_diff_eq;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use qsim_rs::{Gate, Register, StateVector};

#[allow(dead_code)]
pub fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Compare real and imaginary parts within `1e-10`.
#[allow(dead_code)]
pub fn assert_complex_approx(actual: Complex64, expected: Complex64) {
    assert_abs_diff_eq!(actual.re, expected.re, epsilon = 1e-10);
    assert_abs_diff_eq!(actual.im, expected.im, epsilon = 1e-10);
}

/// Element-wise comparison with a readable failure message.
#[allow(dead_code)]
pub fn assert_state_approx(actual: &StateVector, expected: &StateVector, epsilon: f64) {
    assert_eq!(actual.len(), expected.len(), "state lengths differ");
    for (i, (a, b)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - b).norm() < epsilon,
            "amplitude {} differs: {} vs {}\nactual: {}\nexpected: {}",
            i,
            a,
            b,
            actual,
            expected
        );
    }
}

#[allow(dead_code)]
pub fn assert_normalized(state: &StateVector) {
    assert_abs_diff_eq!(state.norm(), 1.0, epsilon = 1e-9);
}

/// A seeded register with every qubit in a different superposition, so
/// tests do not start from a basis state.
#[allow(dead_code)]
pub fn entangled_register(num_qubits: usize, seed: u64) -> Register {
    let mut register = Register::with_seed(num_qubits, seed);
    let mut rng = StdRng::seed_from_u64(seed);
    for id in 0..num_qubits {
        let theta: f64 = rng.r#gen::<f64>() * 3.0;
        let phi: f64 = rng.r#gen::<f64>() * 3.0;
        register.apply_gate(&Gate::Ry(theta), &[id]).unwrap();
        register.apply_gate(&Gate::Rz(phi), &[id]).unwrap();
    }
    for id in 0..num_qubits.saturating_sub(1) {
        register.apply_gate(&Gate::CNOT, &[id, id + 1]).unwrap();
    }
    register
}

/// Set qubit `id` to |1> on a fresh register.
#[allow(dead_code)]
pub fn flip(register: &mut Register, ids: &[usize]) {
    for &id in ids {
        register.apply_gate(&Gate::X, &[id]).unwrap();
    }
}
