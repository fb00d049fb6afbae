mod common;

use qsim_rs::algorithms::{deutsch_jozsa, grover_iterations, grover_search, multi_controlled_z, phase_oracle};
use qsim_rs::{Gate, Operator, Register, SimError};

#[test]
fn test_deutsch_jozsa_constant_oracle() {
    let oracle = Gate::custom(Operator::identity(4), "I2").unwrap();
    for seed in 0..10 {
        let mut register = Register::with_seed(2, seed);
        assert!(deutsch_jozsa(&mut register, &oracle).unwrap());
    }
}

#[test]
fn test_deutsch_jozsa_balanced_oracle() {
    for seed in 0..10 {
        let mut register = Register::with_seed(2, seed);
        assert!(!deutsch_jozsa(&mut register, &Gate::CNOT).unwrap());
    }
}

#[test]
fn test_deutsch_jozsa_three_qubits() {
    // f(x0, x1) = x1: CNOT from the second input onto the ancilla
    let cnot = Gate::CNOT.matrix().unwrap();
    let balanced = Gate::custom(Operator::identity(2).kron(&cnot), "I⊗CNOT").unwrap();
    let constant = Gate::custom(Operator::identity(8), "I3").unwrap();
    for seed in 0..5 {
        let mut register = Register::with_seed(3, seed);
        assert!(!deutsch_jozsa(&mut register, &balanced).unwrap());
        let mut register = Register::with_seed(3, seed);
        assert!(deutsch_jozsa(&mut register, &constant).unwrap());
    }
}

#[test]
fn test_deutsch_jozsa_register_mismatch() {
    let mut register = Register::with_seed(3, 0);
    let err = deutsch_jozsa(&mut register, &Gate::Swap).unwrap_err();
    assert_eq!(err, SimError::RegisterMismatch { expected: 2, actual: 3 });
    // nothing was applied
    assert_eq!(register.probability_of_zero(2).unwrap(), 1.0);
}

#[test]
fn test_deutsch_jozsa_needs_an_input_qubit() {
    // a single qubit is only the ancilla
    for oracle in [Gate::X, Gate::I, Gate::custom(Gate::H.matrix().unwrap(), "H1").unwrap()] {
        let mut register = Register::with_seed(1, 0);
        let err = deutsch_jozsa(&mut register, &oracle).unwrap_err();
        assert_eq!(err, SimError::RegisterMismatch { expected: 2, actual: 1 });
        assert_eq!(register.probability_of_zero(0).unwrap(), 1.0);
    }
    // no gate spans zero qubits, so an empty register always mismatches
    let mut empty = Register::with_seed(0, 0);
    assert!(matches!(
        deutsch_jozsa(&mut empty, &Gate::X),
        Err(SimError::RegisterMismatch { expected: 1, actual: 0 })
    ));
    assert!(matches!(
        Gate::custom(Operator::identity(1), "empty"),
        Err(SimError::InvalidGate { .. })
    ));
}

#[test]
fn test_grover_iterations() {
    assert_eq!(grover_iterations(1), 1);
    assert_eq!(grover_iterations(2), 1);
    assert_eq!(grover_iterations(3), 2);
    assert_eq!(grover_iterations(4), 3);
    assert_eq!(grover_iterations(6), 6);
}

#[test]
fn test_grover_two_qubits_is_exact() {
    for marked in 0..4 {
        let oracle = phase_oracle(2, &[marked]).unwrap();
        for seed in 0..5 {
            let mut register = Register::with_seed(2, seed);
            assert_eq!(grover_search(&mut register, &oracle).unwrap(), marked);
        }
    }
}

#[test]
fn test_grover_three_qubits_mostly_finds_target() {
    let oracle = phase_oracle(3, &[5]).unwrap();
    let hits = (0..20)
        .filter(|&seed| {
            let mut register = Register::with_seed(3, seed);
            grover_search(&mut register, &oracle).unwrap() == 5
        })
        .count();
    assert!(hits >= 14, "only {} of 20 runs found the marked state", hits);
}

#[test]
fn test_oracle_builders() {
    let oracle = phase_oracle(2, &[1, 2]).unwrap();
    assert_eq!(oracle.num_qubits(), 2);
    let m = oracle.matrix().unwrap();
    assert!(m.is_unitary());
    assert_eq!(m.get(0, 0).re, 1.0);
    assert_eq!(m.get(1, 1).re, -1.0);
    assert_eq!(m.get(2, 2).re, -1.0);
    assert!(matches!(phase_oracle(2, &[4]), Err(SimError::ShapeMismatch { .. })));

    let mcz = multi_controlled_z(3).unwrap();
    assert_eq!(mcz.num_qubits(), 3);
    assert_eq!(mcz.matrix().unwrap().get(7, 7).re, -1.0);
    assert_eq!(mcz.matrix().unwrap().get(6, 6).re, 1.0);
}
