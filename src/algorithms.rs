//! Algorithm drivers built only on the public circuit API.
//!
//! Oracles are opaque gates; the drivers check their declared operand count
//! against the register before queuing anything.

use std::f64::consts::FRAC_PI_4;

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;

use crate::circuit::Circuit;
use crate::error::{Result, SimError};
use crate::gate::Gate;
use crate::layout::QubitId;
use crate::operator::Operator;
use crate::register::Register;

fn check_oracle<R: Rng>(register: &Register<R>, oracle: &Gate) -> Result<()> {
    if register.num_qubits() != oracle.num_qubits() {
        return Err(SimError::RegisterMismatch {
            expected: oracle.num_qubits(),
            actual: register.num_qubits(),
        });
    }
    Ok(())
}

// =============================================================================
// Oracle builders
// =============================================================================

/// Diagonal `n`-qubit gate with -1 on the `marked` basis states.
///
/// Basis states are numbered with the first operand as most significant bit.
pub fn phase_oracle(num_qubits: usize, marked: &[usize]) -> Result<Gate> {
    let dim = 1usize << num_qubits;
    if let Some(&bad) = marked.iter().find(|&&m| m >= dim) {
        return Err(SimError::shape("phase oracle", bad, dim));
    }
    let one = Complex64::new(1.0, 0.0);
    let mut m = Array2::eye(dim);
    for &index in marked {
        m[[index, index]] = -one;
    }
    Gate::custom(Operator::new(m), format!("Oracle{:?}", marked))
}

/// Multi-controlled Z on `n` qubits: diag(1, ..., 1, -1).
pub fn multi_controlled_z(num_qubits: usize) -> Result<Gate> {
    let dim = 1usize << num_qubits;
    let mut m = Array2::eye(dim);
    m[[dim - 1, dim - 1]] = Complex64::new(-1.0, 0.0);
    Gate::custom(Operator::new(m), format!("C{}Z", num_qubits.saturating_sub(1)))
}

// =============================================================================
// Drivers
// =============================================================================

/// Deutsch–Jozsa: decide whether `oracle` is constant or balanced.
///
/// The register must hold `oracle.num_qubits()` qubits in `|0...0>`; the last
/// qubit is the ancilla. Returns `true` for a constant oracle.
///
/// # Errors
/// `RegisterMismatch` if the register size differs from the oracle width or
/// the oracle has no input qubit besides the ancilla.
pub fn deutsch_jozsa<R: Rng>(register: &mut Register<R>, oracle: &Gate) -> Result<bool> {
    check_oracle(register, oracle)?;
    let n = oracle.num_qubits();
    // at least one input qubit besides the ancilla
    if n < 2 {
        return Err(SimError::RegisterMismatch {
            expected: 2,
            actual: register.num_qubits(),
        });
    }
    let ids: Vec<QubitId> = (0..n).collect();

    let mut circuit = Circuit::new(register);
    circuit.add_gate(Gate::X, &[n - 1]);
    for &id in &ids {
        circuit.add_gate(Gate::H, &[id]);
    }
    circuit.add_gate(oracle.clone(), &ids);
    for &id in &ids[..n - 1] {
        circuit.add_gate(Gate::H, &[id]);
    }
    for &id in &ids[..n - 1] {
        circuit.add_measurement(id);
    }

    let results = circuit.execute()?;
    Ok(results.iter().all(|r| r.outcome == 0))
}

/// Number of Grover iterations for `n` qubits: `floor(π/4 · √2^n)`, at least 1.
pub fn grover_iterations(num_qubits: usize) -> usize {
    let size = (1u64 << num_qubits) as f64;
    ((FRAC_PI_4 * size.sqrt()).floor() as usize).max(1)
}

/// Grover search with a phase `oracle` over all qubits of the register.
///
/// Returns the measured basis state, qubit 0 as most significant bit.
pub fn grover_search<R: Rng>(register: &mut Register<R>, oracle: &Gate) -> Result<usize> {
    check_oracle(register, oracle)?;
    let n = oracle.num_qubits();
    let ids: Vec<QubitId> = (0..n).collect();
    let reflect = multi_controlled_z(n)?;

    let mut circuit = Circuit::new(register);
    for &id in &ids {
        circuit.add_gate(Gate::H, &[id]);
    }
    for _ in 0..grover_iterations(n) {
        circuit.add_gate(oracle.clone(), &ids);
        // diffusion: H X (C..Z) X H
        for &id in &ids {
            circuit.add_gate(Gate::H, &[id]).add_gate(Gate::X, &[id]);
        }
        circuit.add_gate(reflect.clone(), &ids);
        for &id in &ids {
            circuit.add_gate(Gate::X, &[id]).add_gate(Gate::H, &[id]);
        }
    }
    for &id in &ids {
        circuit.add_measurement(id);
    }

    let results = circuit.execute()?;
    Ok(results
        .iter()
        .fold(0usize, |acc, r| (acc << 1) | r.outcome as usize))
}
